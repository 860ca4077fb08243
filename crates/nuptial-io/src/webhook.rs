//! Multipart form webhook endpoint (e.g. an n8n form trigger).

use nuptial_core::request::{self, FormPart};
use nuptial_core::{Endpoint, UploadBatch, UploadError, UploadReport};
use tracing::{debug, info};
use web_time::Instant;

use crate::fetch::{self, BrowserError};

/// Sends the whole batch as one `multipart/form-data` `POST`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEndpoint {
    url: String,
    file_field: String,
}

impl WebhookEndpoint {
    #[must_use]
    pub const fn new(url: String, file_field: String) -> Self {
        Self { url, file_field }
    }

    /// Build the browser `FormData` for `batch`.
    fn form_data(&self, batch: &UploadBatch) -> Result<web_sys::FormData, BrowserError> {
        let plan = request::plan_webhook(&self.url, &self.file_field, batch);
        let form = web_sys::FormData::new()?;
        for part in &plan.parts {
            match part {
                FormPart::File { field, file } => {
                    let blob = fetch::blob_from_bytes(file.bytes(), file.mime_type())?;
                    form.append_with_blob_and_filename(field, &blob, file.name())?;
                }
                FormPart::Text { field, value } => {
                    form.append_with_str(field, value)?;
                }
            }
        }
        Ok(form)
    }
}

impl Endpoint for WebhookEndpoint {
    async fn upload(&self, batch: &UploadBatch) -> Result<UploadReport, UploadError> {
        let form = self.form_data(batch)?;
        info!(url = %self.url, files = batch.len(), "posting batch to webhook");

        // The browser sets the multipart boundary header itself.
        let started = Instant::now();
        let response = fetch::post(&self.url, &form.into(), &[]).await?;
        debug!(
            status = response.status,
            elapsed_ms = started.elapsed().as_millis(),
            body = %response.body,
            "webhook responded"
        );

        request::classify_webhook_response(response.status, &response.status_text, &response.body)?;
        Ok(UploadReport::all_stored(batch))
    }
}
