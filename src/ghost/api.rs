//! HTTP access to the Ghost Admin API

use crate::config::Settings;
use crate::core::post::PostEnvelope;
use crate::error::{PublishError, Result};
use crate::ghost::auth::AdminToken;
use crate::ghost::types::{PostsResponse, UploadResponse};
use crate::ghost::API_VERSION;
use async_trait::async_trait;
use reqwest::{header, multipart, Client};

/// An image ready to be uploaded
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name sent with the multipart part
    pub file_name: String,
    /// Media type, e.g. `image/png`
    pub media_type: String,
    /// Value of the `ref` form field
    pub reference: String,
    pub bytes: Vec<u8>,
}

/// The operations the publish pipeline needs from the blog
#[async_trait]
pub trait GhostApi: Send + Sync {
    /// Upload one image and return its public URL
    async fn upload_image(&self, image: ImageUpload, token: &AdminToken) -> Result<String>;

    /// Create a post; errors are transport or decoding failures only
    async fn create_post(&self, envelope: &PostEnvelope, token: &AdminToken)
        -> Result<PostsResponse>;
}

/// `GhostApi` over HTTP
#[derive(Debug, Clone)]
pub struct GhostClient {
    http: Client,
    base_url: String,
}

impl GhostClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("ghostpost/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self) -> String {
        format!("{}/ghost/api/admin/images/upload/", self.base_url)
    }

    pub fn posts_url(&self) -> String {
        format!(
            "{}/ghost/api/{}/admin/posts/?source=html",
            self.base_url, API_VERSION
        )
    }
}

#[async_trait]
impl GhostApi for GhostClient {
    async fn upload_image(&self, image: ImageUpload, token: &AdminToken) -> Result<String> {
        let url = self.upload_url();
        log::debug!("POST {} ({} bytes)", url, image.bytes.len());

        let part = multipart::Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.media_type)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("ref", image.reference);

        let response = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, token.authorization())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log::debug!("Upload answered {}", status);

        let parsed: UploadResponse = serde_json::from_str(&body)?;
        parsed.into_url()
    }

    async fn create_post(
        &self,
        envelope: &PostEnvelope,
        token: &AdminToken,
    ) -> Result<PostsResponse> {
        let url = self.posts_url();
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, token.authorization())
            .header(header::CONTENT_TYPE, "application/json;charset=utf-8")
            .body(serde_json::to_vec(envelope)?)
            .send()
            .await?;

        // Validation failures come back as 4xx with an `errors` body
        let status = response.status();
        let body = response.text().await?;
        log::debug!("Publish answered {}", status);

        if body.trim().is_empty() {
            return Err(PublishError::unexpected_response(format!(
                "empty body with status {}",
                status
            )));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let client = GhostClient::new("https://blog.example.com/").unwrap();
        assert_eq!(client.base_url(), "https://blog.example.com");
        assert_eq!(
            client.upload_url(),
            "https://blog.example.com/ghost/api/admin/images/upload/"
        );
        assert_eq!(
            client.posts_url(),
            "https://blog.example.com/ghost/api/v4/admin/posts/?source=html"
        );
    }

    #[test]
    fn test_from_settings_trims_url() {
        let settings = Settings::new(" https://blog.example.com// ", "abc:00");
        let client = GhostClient::from_settings(&settings).unwrap();
        assert_eq!(client.base_url(), "https://blog.example.com");
    }
}
