//! Pure text and data logic for the publish pipeline
//!
//! - embed: local image embed discovery and rewriting
//! - metadata: front matter splitting and typed post metadata
//! - post: the outbound post object and markdown rendering

pub mod embed;
pub mod metadata;
pub mod post;

pub use embed::{
    find_image_embeds, front_matter_boundary, strip_blockquotes, substitute, ImageMatch,
};
pub use metadata::{parse_note, PostMetadata};
pub use post::{render_html, GhostPost, PostEnvelope, PostStatus};
