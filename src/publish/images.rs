//! Stage one: upload local images and rewrite their embeds

use crate::core::embed::{find_image_embeds, front_matter_boundary, strip_blockquotes, substitute};
use crate::error::Result;
use crate::ghost::{AdminToken, ImageUpload};
use crate::io::{Asset, Note, ScratchFile};
use crate::publish::{Publisher, MISSING_SETTINGS_NOTICE, NO_IMAGES_NOTICE};
use log::{debug, info, warn};

impl Publisher<'_> {
    /// Upload every resolvable image embed of `note` and stage the rewritten text.
    ///
    /// Returns `None` without touching anything when the URL or admin key is
    /// missing. Images that cannot be resolved or uploaded keep their embed.
    pub async fn upload_images(
        &self,
        note: &Note,
        token: &AdminToken,
    ) -> Result<Option<ScratchFile>> {
        if !self.settings.is_complete() {
            warn!("Refusing to upload images: settings are incomplete");
            self.notifier.notice(MISSING_SETTINGS_NOTICE);
            return Ok(None);
        }

        let mut text = strip_blockquotes(&note.content);
        let matches = find_image_embeds(&text);

        if matches.is_empty() {
            self.notifier.notice(NO_IMAGES_NOTICE);
        } else {
            let boundary = front_matter_boundary(&text);
            debug!(
                "Found {} image embeds in {} (front matter ends at {:?})",
                matches.len(),
                note.path.display(),
                boundary
            );
            self.notifier
                .notice(&format!("Upload {} images to Ghost...", matches.len()));

            for image in &matches {
                // Identical embeds were all rewritten by the first upload of this
                // token, so later matches are not uploaded again and the count
                // above can exceed the number of uploads
                if !text.contains(&image.token) {
                    debug!("{} was already replaced", image.token);
                    continue;
                }

                let Some(asset) = self.resolver.resolve_link(&image.name, &note.path).await
                else {
                    debug!("Skipping unresolved image {}", image.name);
                    continue;
                };

                let Some(url) = self.upload_asset(&asset, token).await else {
                    continue;
                };

                let replacement = image.replacement(&url, boundary);
                text = substitute(&text, &image.token, &replacement);
            }
        }

        let scratch = ScratchFile::persist(self.vault, &text)
            .await
            .map_err(|err| self.fail("save the upload preview", err))?;
        Ok(Some(scratch))
    }

    /// Upload one asset; any failure is reported and turned into `None`
    pub async fn upload_asset(&self, asset: &Asset, token: &AdminToken) -> Option<String> {
        let name = asset.name();
        self.notifier.notice(&format!("'{}' Uploading...", name));

        match self.try_upload_asset(asset, token).await {
            Ok(url) => {
                info!("'{}' Upload successful! URL: {}", name, url);
                self.notifier
                    .notice(&format!("'{}' Upload successful! URL: {}", name, url));
                Some(url)
            }
            Err(err) => {
                warn!("Ghost upload failed! ({}): {}", name, err);
                self.notifier.notice(&format!("'{}' Upload failed!", name));
                None
            }
        }
    }

    async fn try_upload_asset(&self, asset: &Asset, token: &AdminToken) -> Result<String> {
        let bytes = self.vault.read_binary(asset.path()).await?;
        let upload = ImageUpload {
            file_name: asset.name(),
            media_type: asset.media_type(),
            reference: asset.path_ref(),
            bytes,
        };
        self.api.upload_image(upload, token).await
    }
}
