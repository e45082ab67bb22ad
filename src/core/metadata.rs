//! Post metadata from a note's front matter
//!
//! Front matter in notes is written by hand, so values are read loosely: empty
//! strings count as absent and flags follow "truthy" rules rather than requiring
//! YAML booleans.

use crate::error::{PublishError, Result};
use gray_matter::{engine::YAML, Matter};
use serde_yaml::{Mapping, Value};

/// Metadata keys understood by the publisher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostMetadata {
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: bool,
    pub excerpt: Option<String>,
    pub slug: Option<String>,
    pub feature_image: Option<String>,
    pub published: bool,
}

impl PostMetadata {
    /// Build metadata from a parsed front matter value
    pub fn from_yaml(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(map) => Ok(Self::from_mapping(map)),
            other => Err(PublishError::invalid_front_matter(format!(
                "expected a mapping, found {}",
                type_name(other)
            ))),
        }
    }

    fn from_mapping(map: &Mapping) -> Self {
        let get = |key: &str| map.get(key);
        Self {
            title: get("title").and_then(truthy_string),
            tags: get("tags").and_then(tag_list),
            featured: get("featured").is_some_and(is_truthy),
            excerpt: get("excerpt").and_then(scalar_string),
            slug: get("slug").and_then(truthy_string),
            feature_image: get("feature_image").and_then(scalar_string),
            published: get("published").is_some_and(is_truthy),
        }
    }
}

/// Split note text into front matter metadata and body content
pub fn parse_note(content: &str) -> Result<(PostMetadata, String)> {
    if !content.trim_start().starts_with("---") {
        return Ok((PostMetadata::default(), content.to_string()));
    }

    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(content);

    let value: Value = match parsed.data {
        Some(data) => data.deserialize().map_err(|e| {
            PublishError::invalid_front_matter(format!("failed to deserialize: {}", e))
        })?,
        None => Value::Null,
    };

    // The loader yields null both for an empty block and for YAML it cannot read
    if value.is_null() && !parsed.matter.trim().is_empty() {
        check_yaml(&parsed.matter)?;
    }

    let metadata = PostMetadata::from_yaml(&value)?;
    Ok((metadata, parsed.content))
}

/// Fails unless `matter` is YAML that holds no value
fn check_yaml(matter: &str) -> Result<()> {
    let comments_only = matter.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if comments_only {
        return Ok(());
    }

    match serde_yaml::from_str::<Value>(matter) {
        Ok(Value::Null) => Ok(()),
        Ok(_) => Err(PublishError::invalid_front_matter(
            "front matter is not valid YAML",
        )),
        Err(e) => Err(PublishError::invalid_front_matter(format!(
            "front matter is not valid YAML: {}",
            e
        ))),
    }
}

/// JavaScript-style truthiness for loosely typed flags
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => return scalar_string(&tagged.value),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Like `scalar_string`, but falsy values such as `false` or `0` count as absent
fn truthy_string(value: &Value) -> Option<String> {
    if is_truthy(value) {
        scalar_string(value)
    } else {
        None
    }
}

fn tag_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Sequence(items) => Some(items.iter().filter_map(scalar_string).collect()),
        other => scalar_string(other).map(|tag| vec![tag]),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_note_with_front_matter() {
        let content = r#"---
title: Hello Ghost
tags: [rust, ghost]
featured: true
excerpt: Short summary
slug: hello-ghost
feature_image: https://cdn.example.com/hero.jpg
published: true
---
# Heading

Body text."#;

        let (meta, body) = parse_note(content).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hello Ghost"));
        assert_eq!(
            meta.tags,
            Some(vec!["rust".to_string(), "ghost".to_string()])
        );
        assert!(meta.featured);
        assert_eq!(meta.excerpt.as_deref(), Some("Short summary"));
        assert_eq!(meta.slug.as_deref(), Some("hello-ghost"));
        assert_eq!(
            meta.feature_image.as_deref(),
            Some("https://cdn.example.com/hero.jpg")
        );
        assert!(meta.published);
        assert_eq!(body.trim(), "# Heading\n\nBody text.");
    }

    #[test]
    fn test_parse_note_without_front_matter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (meta, body) = parse_note(content).unwrap();
        assert_eq!(meta, PostMetadata::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_loose_values() {
        let value: Value = serde_yaml::from_str(
            "title: ''\ntags: solo\nfeatured: 0\npublished: 'yes'\nslug: 42\nexcerpt: 0\n",
        )
        .unwrap();
        let meta = PostMetadata::from_yaml(&value).unwrap();
        assert_eq!(meta.title, None);
        assert_eq!(meta.tags, Some(vec!["solo".to_string()]));
        assert!(!meta.featured);
        assert!(meta.published);
        assert_eq!(meta.slug.as_deref(), Some("42"));
        assert_eq!(meta.excerpt.as_deref(), Some("0"));
    }

    #[test]
    fn test_falsy_title_and_slug_are_absent() {
        let value: Value = serde_yaml::from_str("title: false\nslug: 0\n").unwrap();
        let meta = PostMetadata::from_yaml(&value).unwrap();
        assert_eq!(meta.title, None);
        assert_eq!(meta.slug, None);

        let value: Value = serde_yaml::from_str("title: true\nslug: '0'\n").unwrap();
        let meta = PostMetadata::from_yaml(&value).unwrap();
        assert_eq!(meta.title.as_deref(), Some("true"));
        assert_eq!(meta.slug.as_deref(), Some("0"));
    }

    #[test]
    fn test_unreadable_front_matter_is_rejected() {
        let content = "---\ntitle: Launch Day\npublished: true\nfeature_image: ![[gone.jpg]]\n---\nBody";
        assert!(matches!(
            parse_note(content),
            Err(PublishError::InvalidFrontMatter { .. })
        ));
    }

    #[test]
    fn test_comment_only_front_matter_uses_defaults() {
        let (meta, body) = parse_note("---\n# nothing yet\n---\nBody").unwrap();
        assert_eq!(meta, PostMetadata::default());
        assert_eq!(body.trim(), "Body");
    }

    #[test]
    fn test_non_mapping_front_matter_is_rejected() {
        let value = Value::String("just a string".to_string());
        assert!(matches!(
            PostMetadata::from_yaml(&value),
            Err(PublishError::InvalidFrontMatter { .. })
        ));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&Value::Bool(false)));
        assert!(!is_truthy(&Value::String(String::new())));
        assert!(is_truthy(&Value::String("false".to_string())));
        assert!(is_truthy(&Value::Sequence(Vec::new())));
    }
}
