//! Thumbnail `blob:` URLs for staged photos.

use std::collections::HashMap;

use nuptial_core::{FileId, PreviewPlan, StagedFile};
use tracing::{debug, warn};

use crate::fetch::{self, BrowserError};

/// An object URL that is revoked when dropped.
#[derive(Debug)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Create an object URL for `bytes` typed as `mime_type`.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::JsError`] if the `Blob` or URL cannot be
    /// created.
    pub fn new(bytes: &[u8], mime_type: &str) -> Result<Self, BrowserError> {
        let blob = fetch::blob_from_bytes(bytes, mime_type)?;
        Ok(Self(web_sys::Url::create_object_url_with_blob(&blob)?))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = web_sys::Url::revoke_object_url(&self.0) {
            warn!(error = ?e, "failed to revoke object URL");
        }
    }
}

/// One preview URL per staged file.
#[derive(Debug, Default)]
pub struct PreviewUrls {
    urls: HashMap<FileId, ObjectUrl>,
}

impl PreviewUrls {
    /// Create previews for newly staged files and revoke the ones whose
    /// file was removed.
    pub fn sync(&mut self, staged: &[StagedFile]) {
        let plan = PreviewPlan::reconcile(self.urls.keys().copied(), staged);
        if plan.is_empty() {
            return;
        }

        for id in &plan.release {
            self.urls.remove(id);
        }
        for file in staged.iter().filter(|f| plan.create.contains(&f.id())) {
            match ObjectUrl::new(file.bytes(), file.mime_type()) {
                Ok(url) => {
                    self.urls.insert(file.id(), url);
                }
                Err(e) => warn!(name = %file.name(), error = %e, "failed to create preview"),
            }
        }
        debug!(
            created = plan.create.len(),
            released = plan.release.len(),
            live = self.urls.len(),
            "preview URLs synced"
        );
    }

    /// The preview URL of `id`, if one exists.
    #[must_use]
    pub fn get(&self, id: FileId) -> Option<&str> {
        self.urls.get(&id).map(ObjectUrl::as_str)
    }
}
