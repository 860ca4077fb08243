//! Request plans for the two supported endpoint kinds.
//!
//! Everything here is pure: the browser endpoints in `nuptial-io` turn
//! a plan into `fetch` calls and feed the raw response back through the
//! `classify_*` functions.

use std::collections::HashSet;

use serde::Deserialize;

use crate::batch::UploadBatch;
use crate::error::UploadError;
use crate::types::StagedFile;

/// Form field carrying the batch timestamp.
pub const FIELD_TIMESTAMP: &str = "timestamp";
/// Form field carrying [`SOURCE_TAG`](crate::SOURCE_TAG).
pub const FIELD_SOURCE: &str = "source";
/// Form field carrying the number of files.
pub const FIELD_TOTAL_FILES: &str = "totalFiles";

/// One part of a multipart form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// A binary file part.
    File {
        field: String,
        file: StagedFile,
    },
    /// A plain text part.
    Text {
        field: &'static str,
        value: String,
    },
}

/// A single multipart `POST` to a form webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookForm {
    pub url: String,
    pub parts: Vec<FormPart>,
}

/// Plan the multipart body for `batch`: one file part per staged file
/// under `file_field`, followed by the metadata text fields.
#[must_use]
pub fn plan_webhook(url: &str, file_field: &str, batch: &UploadBatch) -> WebhookForm {
    let mut parts: Vec<FormPart> = batch
        .files()
        .iter()
        .map(|file| FormPart::File {
            field: file_field.to_owned(),
            file: file.clone(),
        })
        .collect();

    let meta = batch.metadata();
    parts.push(FormPart::Text {
        field: FIELD_TIMESTAMP,
        value: meta.timestamp_rfc3339(),
    });
    parts.push(FormPart::Text {
        field: FIELD_SOURCE,
        value: meta.source.to_owned(),
    });
    parts.push(FormPart::Text {
        field: FIELD_TOTAL_FILES,
        value: meta.total_files.to_string(),
    });

    WebhookForm {
        url: url.to_owned(),
        parts,
    }
}

/// Interpret a webhook response.
///
/// Any 2xx is success; the body is informational only.
///
/// # Errors
///
/// [`UploadError::WorkflowInactive`] for 404, [`UploadError::Rejected`]
/// for every other non-2xx status.
pub fn classify_webhook_response(
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<(), UploadError> {
    if is_success(status) {
        return Ok(());
    }
    if status == 404 {
        return Err(UploadError::WorkflowInactive);
    }
    Err(UploadError::Rejected {
        status,
        reason: join_reason(status_text, body),
    })
}

/// A single object `POST` into a storage bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPut {
    pub file: StagedFile,
    pub key: String,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

/// Plan one object upload per file in `batch`.
///
/// Keys are `{unix_millis}_{sanitized_name}`, unique within the batch.
#[must_use]
pub fn plan_object_storage(
    base_url: &str,
    bucket: &str,
    api_key: Option<&str>,
    batch: &UploadBatch,
) -> Vec<ObjectPut> {
    let millis = batch.metadata().timestamp.timestamp_millis();
    let base = base_url.trim_end_matches('/');
    let mut used = HashSet::new();

    batch
        .files()
        .iter()
        .map(|file| {
            let key = unique_key(&format!("{millis}_{}", sanitize_name(file.name())), &mut used);
            let mut headers = vec![
                ("Content-Type", file.mime_type().to_owned()),
                ("x-upsert", "false".to_owned()),
                ("Cache-Control", "3600".to_owned()),
            ];
            if let Some(api_key) = api_key {
                headers.push(("Authorization", format!("Bearer {api_key}")));
                headers.push(("apikey", api_key.to_owned()));
            }
            ObjectPut {
                file: file.clone(),
                url: format!("{base}/storage/v1/object/{bucket}/{key}"),
                key,
                headers,
            }
        })
        .collect()
}

/// Interpret the response to one [`ObjectPut`].
///
/// # Errors
///
/// [`UploadError::Storage`] for any non-2xx status, with the backend's
/// JSON `message`/`error` when the body carries one.
pub fn classify_storage_response(
    name: &str,
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<(), UploadError> {
    if is_success(status) {
        return Ok(());
    }

    let reason = serde_json::from_str::<StorageErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| join_reason(status_text, body));

    Err(UploadError::Storage {
        name: name.to_owned(),
        reason: format!("{status} {reason}"),
    })
}

/// Error body shape returned by the storage API.
#[derive(Deserialize)]
struct StorageErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// An empty result becomes `photo`.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "photo".to_owned()
    } else {
        cleaned
    }
}

/// Return `key`, or `key` with a `-{n}` suffix before the extension,
/// whichever is not yet in `used`. Records the result in `used`.
fn unique_key(key: &str, used: &mut HashSet<String>) -> String {
    if used.insert(key.to_owned()) {
        return key.to_owned();
    }
    let (stem, ext) = match key.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (key, None),
    };
    let mut n = 1u32;
    loop {
        let candidate =
            ext.map_or_else(|| format!("{stem}-{n}"), |ext| format!("{stem}-{n}.{ext}"));
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

const fn is_success(status: u16) -> bool {
    matches!(status, 200..=299)
}

fn join_reason(status_text: &str, body: &str) -> String {
    let status_text = status_text.trim();
    let body = body.trim();
    match (status_text.is_empty(), body.is_empty()) {
        (true, true) => "no details".to_owned(),
        (false, true) => status_text.to_owned(),
        (true, false) => body.to_owned(),
        (false, false) => format!("{status_text} - {body}"),
    }
}
