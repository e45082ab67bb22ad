//! Wire types for Admin API responses

use crate::error::{PublishError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Response of the image upload endpoint
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub images: Vec<UploadedImage>,
}

#[derive(Debug, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

impl UploadResponse {
    /// URL of the first uploaded image
    pub fn into_url(self) -> Result<String> {
        self.images
            .into_iter()
            .next()
            .map(|image| image.url)
            .ok_or_else(|| PublishError::unexpected_response("upload response has no images[0].url"))
    }
}

/// Response of the posts endpoint; exactly one of the two arrays is expected
#[derive(Debug, Default, Deserialize)]
pub struct PostsResponse {
    pub posts: Option<Vec<PublishedPost>>,
    pub errors: Option<Vec<ApiError>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishedPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    pub context: Option<String>,
    pub details: Option<Vec<ErrorDetail>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub message: Option<String>,
    pub params: Option<ErrorParams>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorParams {
    #[serde(rename = "allowedValues")]
    pub allowed_values: Option<Value>,
}

impl ApiError {
    /// The context when present, the message otherwise
    pub fn summary(&self) -> String {
        match self.context.as_deref() {
            Some(context) if !context.is_empty() => context.to_string(),
            _ => self.message.clone(),
        }
    }

    /// First validation detail with its allowed values, e.g. `must be one of - public,members`
    pub fn first_detail(&self) -> Option<String> {
        let detail = self.details.as_ref()?.first()?;
        let message = detail.message.clone().unwrap_or_default();
        let allowed = detail
            .params
            .as_ref()
            .and_then(|params| params.allowed_values.as_ref())
            .filter(|values| !values.is_null());

        match allowed {
            Some(values) => Some(format!("{} - {}", message, allowed_text(values))),
            None if message.is_empty() => None,
            None => Some(message),
        }
    }
}

/// Arrays are joined with `,`; a single value is shown as is
fn allowed_text(values: &Value) -> String {
    match values {
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        other => value_text(other),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// What the blog made of a publish request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The post was created
    Published { title: String, status: String },
    /// The API refused the post
    Rejected {
        message: String,
        detail: Option<String>,
    },
}

impl PublishOutcome {
    /// Interpret a posts response by its shape
    pub fn from_response(response: PostsResponse) -> Result<Self> {
        if let Some(posts) = response.posts {
            let post = posts.into_iter().next().unwrap_or_default();
            return Ok(Self::Published {
                title: post.title,
                status: post.status,
            });
        }

        match response.errors.as_deref().and_then(<[ApiError]>::first) {
            Some(error) => Ok(Self::Rejected {
                message: error.summary(),
                detail: error.first_detail(),
            }),
            None => Err(PublishError::unexpected_response(
                "response has neither `posts` nor `errors`",
            )),
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }

    /// User-facing notices, one per line of feedback
    pub fn notices(&self) -> Vec<String> {
        match self {
            Self::Published { title, status } => {
                vec![format!("\"{}\" has been {} successful!", title, status)]
            }
            Self::Rejected { message, detail } => {
                let mut notices = vec![message.clone()];
                notices.extend(detail.clone());
                notices
            }
        }
    }
}
