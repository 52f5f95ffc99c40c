use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single post of a toolkit, as returned by the API.
///
/// The JSON object is kept as is and re-serialized unchanged. Display
/// attributes are read through accessors that tolerate missing, `null` or
/// oddly typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post(Map<String, Value>);

/// Borrowed view of a post's `captioned_link`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionedLink<'a> {
    pub caption: Option<&'a str>,
    pub link: Option<&'a str>,
}

/// Posts sharing one `group_id`. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostGroup {
    pub group_id: String,
    pub posts: Vec<Post>,
}

impl Post {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Group key. Absent or `null` is the empty string, which is still a
    /// valid key. Non-string scalars group by their JSON text.
    pub fn group_id(&self) -> Cow<'_, str> {
        match self.get("group_id") {
            None | Some(Value::Null) => Cow::Borrowed(""),
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    pub fn text(&self) -> Option<&str> {
        self.str_field("text")
    }

    pub fn ai_generated(&self) -> bool {
        self.get("ai_generated")
            .and_then(Value::as_bool)
            .unwrap_or_default()
    }

    pub fn social_networks(&self) -> impl Iterator<Item = &str> {
        self.get("social_networks")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    pub fn captioned_link(&self) -> Option<CaptionedLink<'_>> {
        let link = self.get("captioned_link")?.as_object()?;

        Some(CaptionedLink {
            caption: link.get("caption").and_then(Value::as_str),
            link: link.get("link").and_then(Value::as_str),
        })
    }

    /// `preview.preview_url` of every media group that has one.
    pub fn media_previews(&self) -> impl Iterator<Item = &str> {
        self.get("media_groups")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|g| g.get("preview")?.get("preview_url")?.as_str())
    }
}

/// Partitions posts by `group_id`.
///
/// Groups come out in the order their key was first seen, posts inside a
/// group keep their input order.
pub fn group_posts<I>(posts: I) -> Vec<PostGroup>
where
    I: IntoIterator<Item = Post>,
{
    let mut groups: IndexMap<String, Vec<Post>> = IndexMap::new();

    for post in posts {
        groups
            .entry(post.group_id().into_owned())
            .or_default()
            .push(post);
    }

    groups
        .into_iter()
        .map(|(group_id, posts)| PostGroup { group_id, posts })
        .collect()
}
