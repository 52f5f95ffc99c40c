use std::{fs, path::Path};

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Scheme and host of the API, e.g. `https://app.example.com`.
    pub base_domain: String,
    pub organization_id: String,
    /// Value of the `x-sosha-session-token` cookie.
    pub session_token: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to open config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    pub fn from_yaml(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_yaml::from_str(s)?;
        cfg.validate()?;

        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_domain.is_empty() {
            return Err(ConfigError::Invalid("base_domain is empty"));
        }
        if !(self.base_domain.starts_with("http://") || self.base_domain.starts_with("https://")) {
            return Err(ConfigError::Invalid(
                "base_domain must start with http:// or https://",
            ));
        }
        if self.organization_id.is_empty() {
            return Err(ConfigError::Invalid("organization_id is empty"));
        }
        if self.session_token.is_empty() {
            return Err(ConfigError::Invalid("session_token is empty"));
        }
        self.organization_url()?;

        Ok(())
    }

    /// `{base_domain}/api/v1/organizations/{organization_id}`, with the
    /// organization id percent-encoded as a single path segment.
    pub fn organization_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.base_domain)
            .map_err(|_| ConfigError::Invalid("base_domain is not a valid URL"))?;
        url.path_segments_mut()
            .map_err(|_| ConfigError::Invalid("base_domain cannot be a base URL"))?
            .pop_if_empty()
            .extend(["api", "v1", "organizations", self.organization_id.as_str()]);

        Ok(url)
    }
}
