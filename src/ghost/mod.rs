//! Ghost Admin API: authentication, wire types and the HTTP client

pub mod api;
pub mod auth;
pub mod types;

pub use api::{GhostApi, GhostClient, ImageUpload};
pub use auth::{AdminKey, AdminToken};
pub use types::{PostsResponse, PublishOutcome, UploadResponse};

/// Admin API version used for the posts endpoint and token audience
pub const API_VERSION: &str = "v4";
