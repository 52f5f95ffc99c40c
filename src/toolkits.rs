use serde::{Deserialize, Serialize};

/// Toolkit summary. The API sends more fields, only these are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolkit {
    pub name: String,
    pub id: String,
    pub status: ToolkitStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolkitStatus {
    Published,
    Draft,
}

impl ToolkitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
        }
    }
}

impl std::fmt::Display for ToolkitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_fields_are_dropped() {
        let raw = r#"{"name": "Launch", "id": "tk1", "status": "draft", "owner": {"id": 3}}"#;
        let toolkit: Toolkit = serde_json::from_str(raw).unwrap();

        assert_eq!(toolkit.status, ToolkitStatus::Draft);
        assert_eq!(
            serde_json::to_value(&toolkit).unwrap(),
            serde_json::json!({"name": "Launch", "id": "tk1", "status": "draft"})
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let raw = r#"{"name": "Launch", "id": "tk1", "status": "archived"}"#;
        assert!(serde_json::from_str::<Toolkit>(raw).is_err());
    }
}
