//! Stage two: build the post from the staged note and submit it

use crate::core::metadata::parse_note;
use crate::core::post::{render_html, GhostPost, PostEnvelope};
use crate::error::{PublishError, Result};
use crate::ghost::{AdminKey, AdminToken, PublishOutcome};
use crate::io::Note;
use crate::publish::{Publisher, INVALID_KEY_NOTICE};
use log::{debug, info, warn};

/// Notice shown when the posts request never got an answer
pub fn connectivity_notice(err: &PublishError) -> String {
    format!(
        "Couldn't connect to the Ghost API. Is the API URL and Admin API Key correct?\n\n{}: {}",
        err.kind_name(),
        err
    )
}

impl Publisher<'_> {
    /// Publish `note`: sign a token, upload its images, then create the post.
    ///
    /// A rejection by the API is a successful call returning
    /// [`PublishOutcome::Rejected`]; configuration and transport failures are
    /// reported through the notifier and returned as errors.
    pub async fn publish(&self, note: &Note) -> Result<PublishOutcome> {
        let key = match AdminKey::parse(&self.settings.admin_token) {
            Ok(key) => key,
            Err(err) => {
                warn!("{}", err);
                self.notifier.notice(INVALID_KEY_NOTICE);
                return Err(err);
            }
        };
        let token =
            AdminToken::sign(&key).map_err(|err| self.fail("sign the admin token", err))?;

        let Some(scratch) = self.upload_images(note, &token).await? else {
            return Err(self.missing_settings_error());
        };
        let content = scratch
            .read(self.vault)
            .await
            .map_err(|err| self.fail("read the upload preview", err))?;
        let post = self
            .build_post(note, &content)
            .map_err(|err| self.fail("build the post", err))?;

        if self.settings.debug {
            debug!(
                "Outbound post: title={:?} slug={:?} status={} tags={:?} featured={} feature_image={:?} excerpt={:?}",
                post.title,
                post.slug,
                post.status,
                post.tags,
                post.featured,
                post.feature_image,
                post.custom_excerpt
            );
        }

        let envelope = PostEnvelope::single(post);
        let outcome = match self.submit(&envelope, &token).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Publishing {} failed: {}", note.path.display(), err);
                self.notifier.notice(&connectivity_notice(&err));
                return Err(err);
            }
        };

        match &outcome {
            PublishOutcome::Published { title, status } => {
                info!("Published {:?} as {}", title, status)
            }
            PublishOutcome::Rejected { message, .. } => warn!("Ghost rejected the post: {}", message),
        }
        for notice in outcome.notices() {
            self.notifier.notice(&notice);
        }
        Ok(outcome)
    }

    /// Turn staged note text into the outbound post
    pub fn build_post(&self, note: &Note, content: &str) -> Result<GhostPost> {
        let (metadata, body) = parse_note(content)?;
        let html = render_html(&body);
        Ok(GhostPost::from_metadata(metadata, &note.basename(), html))
    }

    async fn submit(&self, envelope: &PostEnvelope, token: &AdminToken) -> Result<PublishOutcome> {
        let response = self.api.create_post(envelope, token).await?;
        PublishOutcome::from_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_notice_names_the_error() {
        let err = PublishError::unexpected_response("empty body with status 502 Bad Gateway");
        let notice = connectivity_notice(&err);
        assert!(notice.starts_with("Couldn't connect to the Ghost API."));
        assert!(notice.ends_with(
            "ResponseError: Unexpected response: empty body with status 502 Bad Gateway"
        ));
    }
}
