use reqwest::{header::COOKIE, Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::{Config, ConfigError},
    posts::Post,
    toolkits::Toolkit,
};

const SESSION_COOKIE: &str = "x-sosha-session-token";

pub struct SoshaClient {
    client: Client,
    organization_url: Url,
    session_token: String,
}
pub struct GetToolkits<'a> {
    client: &'a SoshaClient,
}
pub struct GetPosts<'a> {
    client: &'a SoshaClient,
    toolkit_id: &'a str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Scheme(#[from] serde_json::Error),
    #[error("API returned status {status}: {body}")]
    Server { status: StatusCode, body: String },
}

impl SoshaClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            client: Client::new(),
            organization_url: config.organization_url()?,
            session_token: config.session_token.clone(),
        })
    }

    pub fn get_toolkits(&self) -> GetToolkits<'_> {
        GetToolkits { client: self }
    }

    pub fn get_posts<'a>(&'a self, toolkit_id: &'a str) -> GetPosts<'a> {
        GetPosts {
            client: self,
            toolkit_id,
        }
    }

    /// Organization URL with `segments` appended, each one percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.organization_url.clone();
        // checked to be a base URL when the config was validated
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }

        url
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(url = %url, "fetching");

        let res = self
            .client
            .get(url)
            .header(COOKIE, format!("{SESSION_COOKIE}={}", self.session_token))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ApiError::Server { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl<'a> GetToolkits<'a> {
    pub async fn send(self) -> Result<Vec<Toolkit>, ApiError> {
        let url = self.client.endpoint(&["toolkits"]);
        self.client.fetch(url).await
    }
}

impl<'a> GetPosts<'a> {
    pub async fn send(self) -> Result<Vec<Post>, ApiError> {
        let url = self
            .client
            .endpoint(&["toolkits", self.toolkit_id, "posts"]);
        let posts: Vec<Post> = self.client.fetch(url).await?;
        debug!(toolkit = self.toolkit_id, count = posts.len(), ?posts, "fetched posts");

        Ok(posts)
    }
}
