//! Turn picked or dropped browser files into staging candidates.

use dioxus::html::FileData;
use nuptial_core::Candidate;
use nuptial_core::types::is_image_mime;
use tracing::{debug, warn};

/// Read every file in `files` into a [`Candidate`].
///
/// Files the browser already reports as non-images are passed through
/// with no bytes; staging drops them anyway, so reading them would be
/// wasted work. Files with no reported type are sniffed from their
/// contents. Files that cannot be read are logged and skipped.
#[allow(clippy::future_not_send)]
pub async fn read_candidates(files: Vec<FileData>) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(files.len());
    for file in files {
        let name = file.name();
        let reported = file.content_type().unwrap_or_default();

        if !reported.is_empty() && !is_image_mime(&reported) {
            debug!(%name, mime = %reported, "skipping read of non-image file");
            candidates.push(Candidate::new(name, reported, Vec::new()));
            continue;
        }

        match file.read_bytes().await {
            Ok(bytes) => {
                let mime_type = if reported.is_empty() {
                    sniff_mime(&bytes).unwrap_or_default()
                } else {
                    reported
                };
                candidates.push(Candidate::new(name, mime_type, bytes.to_vec()));
            }
            Err(e) => warn!(%name, error = %e, "failed to read file"),
        }
    }
    candidates
}

/// MIME type of a recognized image format, from its magic bytes.
#[must_use]
pub fn sniff_mime(bytes: &[u8]) -> Option<String> {
    image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type().to_owned())
}
