//! Thin helpers over the browser `fetch` API.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use nuptial_core::UploadError;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{BlobPropertyBag, Request, RequestInit, RequestMode, Response};

/// Errors from browser API calls other than the network request itself.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    /// A browser API call returned an error or a required object was missing.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for BrowserError {
    fn from(value: JsValue) -> Self {
        Self::JsError(describe_js_error(&value))
    }
}

impl From<BrowserError> for UploadError {
    fn from(value: BrowserError) -> Self {
        match value {
            BrowserError::JsError(msg) => Self::Browser(msg),
        }
    }
}

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// Human-readable text for a thrown JS value.
///
/// Prefers `Error.message`, then a string value, then the debug form.
#[must_use]
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Wrap `bytes` in a `Blob` of type `mime_type`.
///
/// # Errors
///
/// Returns [`BrowserError::JsError`] if `Blob` construction fails.
pub fn blob_from_bytes(bytes: &[u8], mime_type: &str) -> Result<web_sys::Blob, BrowserError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);

    Ok(web_sys::Blob::new_with_buffer_source_sequence_and_options(&parts, &opts)?)
}

/// `POST` `body` to `url` with extra `headers` and wait for the full
/// response body.
///
/// # Errors
///
/// - [`UploadError::Browser`] if the request cannot be built.
/// - [`UploadError::Unreachable`] if `fetch` rejects (network failure,
///   DNS, CORS) or the body cannot be read.
///
/// A non-2xx status is **not** an error here; callers classify it.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn post(
    url: &str,
    body: &JsValue,
    headers: &[(&str, String)],
) -> Result<RawResponse, UploadError> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(body);

    let request = Request::new_with_str_and_init(url, &opts).map_err(BrowserError::from)?;
    for (name, value) in headers {
        request.headers().set(name, value).map_err(BrowserError::from)?;
    }

    let window = web_sys::window().ok_or_else(|| UploadError::Browser("no global window".into()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| UploadError::Unreachable {
            reason: describe_js_error(&e),
        })?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| UploadError::Browser(format!("fetch did not return a Response: {e:?}")))?;

    let text_promise = response.text().map_err(BrowserError::from)?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|e| UploadError::Unreachable {
            reason: describe_js_error(&e),
        })?
        .as_string()
        .unwrap_or_default();

    Ok(RawResponse {
        status: response.status(),
        status_text: response.status_text(),
        body,
    })
}
