//! The outbound post object and its HTML rendering

use crate::core::metadata::PostMetadata;
use pulldown_cmark::{html, Options, Parser};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Excerpt sent when the note does not define one
pub const EXCERPT_PLACEHOLDER: &str = "undefined";

/// Publication status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published => write!(f, "published"),
            Self::Draft => write!(f, "draft"),
        }
    }
}

/// A post as sent to the Admin API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GhostPost {
    pub title: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub status: PostStatus,
    pub custom_excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<String>,
    pub slug: String,
    pub html: String,
}

impl GhostPost {
    /// Fill the post from note metadata, falling back to the note's file name
    pub fn from_metadata(metadata: PostMetadata, note_name: &str, html: String) -> Self {
        Self {
            title: metadata.title.unwrap_or_else(|| note_name.to_string()),
            tags: metadata.tags.unwrap_or_default(),
            featured: metadata.featured,
            status: if metadata.published {
                PostStatus::Published
            } else {
                PostStatus::Draft
            },
            custom_excerpt: metadata
                .excerpt
                .unwrap_or_else(|| EXCERPT_PLACEHOLDER.to_string()),
            feature_image: metadata.feature_image,
            slug: metadata.slug.unwrap_or_else(|| note_name.to_string()),
            html,
        }
    }
}

/// Request body for the posts endpoint: `{ "posts": [ ... ] }`
#[derive(Debug, Clone, Serialize)]
pub struct PostEnvelope {
    pub posts: Vec<GhostPost>,
}

impl PostEnvelope {
    pub fn single(post: GhostPost) -> Self {
        Self { posts: vec![post] }
    }
}

/// Render markdown to HTML (CommonMark plus tables and strikethrough)
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_from_empty_metadata() {
        let post = GhostPost::from_metadata(PostMetadata::default(), "My Note", String::new());
        assert_eq!(post.title, "My Note");
        assert_eq!(post.slug, "My Note");
        assert!(post.tags.is_empty());
        assert!(!post.featured);
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.custom_excerpt, "undefined");
        assert_eq!(post.feature_image, None);
    }

    #[test]
    fn test_metadata_wins_over_defaults() {
        let metadata = PostMetadata {
            title: Some("Title".to_string()),
            tags: Some(vec!["rust".to_string()]),
            featured: true,
            excerpt: Some("Excerpt".to_string()),
            slug: Some("custom-slug".to_string()),
            feature_image: Some("https://cdn/hero.jpg".to_string()),
            published: true,
        };
        let post = GhostPost::from_metadata(metadata, "ignored", "<p>x</p>".to_string());
        assert_eq!(post.title, "Title");
        assert_eq!(post.slug, "custom-slug");
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.custom_excerpt, "Excerpt");
    }

    #[test]
    fn test_envelope_serialization() {
        let post = GhostPost::from_metadata(PostMetadata::default(), "note", "<p>hi</p>\n".to_string());
        let json = serde_json::to_value(PostEnvelope::single(post)).unwrap();
        let first = &json["posts"][0];
        assert_eq!(first["status"], "draft");
        assert_eq!(first["custom_excerpt"], "undefined");
        assert_eq!(first["html"], "<p>hi</p>\n");
        // Absent feature image is omitted entirely
        assert!(first.get("feature_image").is_none());
    }

    #[test]
    fn test_render_html() {
        let html = render_html("# Title\n\nSome *text* and ~~old~~.\n\n![](https://cdn/a.png)\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains(r#"<img src="https://cdn/a.png" alt="" />"#));
    }

    #[test]
    fn test_render_tables() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }
}
