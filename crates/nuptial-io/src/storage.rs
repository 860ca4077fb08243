//! Object-storage endpoint: one `POST` per photo into a bucket.

use nuptial_core::request::{self, ObjectPut};
use nuptial_core::{Endpoint, UploadBatch, UploadError, UploadReport};
use tracing::{debug, info, warn};
use web_time::Instant;

use crate::fetch;

/// Stores each photo as its own object.
///
/// Files are sent one after another. A failure on one file does not
/// stop the rest; the report lists which files were stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStorageEndpoint {
    base_url: String,
    bucket: String,
    api_key: Option<String>,
}

impl ObjectStorageEndpoint {
    #[must_use]
    pub const fn new(base_url: String, bucket: String, api_key: Option<String>) -> Self {
        Self {
            base_url,
            bucket,
            api_key,
        }
    }
}

impl Endpoint for ObjectStorageEndpoint {
    async fn upload(&self, batch: &UploadBatch) -> Result<UploadReport, UploadError> {
        let puts = request::plan_object_storage(
            &self.base_url,
            &self.bucket,
            self.api_key.as_deref(),
            batch,
        );
        info!(bucket = %self.bucket, files = puts.len(), "storing batch as objects");

        let started = Instant::now();
        let mut report = UploadReport::default();
        for put in &puts {
            match put_object(put).await {
                Ok(()) => {
                    debug!(key = %put.key, "object stored");
                    report.record_stored(&put.file);
                }
                Err(e) => {
                    warn!(key = %put.key, error = %e, "object upload failed");
                    report.record_failed(&put.file, e);
                }
            }
        }

        info!(
            stored = report.stored().len(),
            failed = report.failed().len(),
            elapsed_ms = started.elapsed().as_millis(),
            "object uploads finished"
        );
        report.into_result()
    }
}

#[allow(clippy::future_not_send)]
async fn put_object(put: &ObjectPut) -> Result<(), UploadError> {
    let blob = fetch::blob_from_bytes(put.file.bytes(), put.file.mime_type())?;
    let response = fetch::post(&put.url, &blob.into(), &put.headers).await?;
    request::classify_storage_response(
        put.file.name(),
        response.status,
        &response.status_text,
        &response.body,
    )
}
