//! Deployment configuration.
//!
//! The page is a static bundle, so configuration is baked in at build
//! time (see the `nuptial` binary) as JSON:
//!
//! ```json
//! {
//!   "endpoint": { "kind": "webhook", "url": "https://n8n.example/form/album" },
//!   "submit_timeout_ms": 90000,
//!   "language": "tr"
//! }
//! ```
//!
//! Every field is optional and falls back to [`AppConfig::default`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::i18n::Language;
use crate::theme::Theme;

/// Webhook URL used when none is configured (a local n8n form trigger).
pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5678/form/wedding-album";

/// Form field name for file parts when none is configured.
pub const DEFAULT_FILE_FIELD: &str = "file";

/// Default upper bound on one submission.
pub const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 120_000;

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field has an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Where uploads go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndpointConfig {
    /// A multipart form webhook (e.g. an n8n form trigger).
    Webhook {
        url: String,
        #[serde(default = "default_file_field")]
        file_field: String,
    },
    /// An object-storage bucket with a Supabase-style REST API.
    ObjectStorage {
        base_url: String,
        bucket: String,
        #[serde(default)]
        api_key: Option<String>,
    },
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::webhook(DEFAULT_WEBHOOK_URL)
    }
}

impl EndpointConfig {
    /// A webhook endpoint with the default file field.
    pub fn webhook(url: impl Into<String>) -> Self {
        Self::Webhook {
            url: url.into(),
            file_field: default_file_field(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = match self {
            Self::Webhook { url, file_field } => {
                if file_field.trim().is_empty() {
                    return Err(ConfigError::Invalid("webhook file_field is empty".into()));
                }
                url
            }
            Self::ObjectStorage { base_url, bucket, .. } => {
                if bucket.trim().is_empty() || bucket.contains('/') {
                    return Err(ConfigError::Invalid(format!(
                        "bad storage bucket name: {bucket:?}"
                    )));
                }
                base_url
            }
        };
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!("endpoint URL must be http(s): {url:?}")));
        }
        Ok(())
    }
}

fn default_file_field() -> String {
    DEFAULT_FILE_FIELD.to_owned()
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Upload destination.
    pub endpoint: EndpointConfig,
    /// How long a submission may take before it counts as failed.
    pub submit_timeout_ms: u64,
    /// Initial UI language.
    pub language: Language,
    /// Initial theme; `None` follows the browser's color-scheme preference.
    pub theme: Option<Theme>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            submit_timeout_ms: DEFAULT_SUBMIT_TIMEOUT_MS,
            language: Language::default(),
            theme: None,
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed JSON or unknown endpoint
    /// kinds, [`ConfigError::Invalid`] for a zero timeout, an empty
    /// file field, a bad bucket name, or a non-HTTP URL.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the configuration from build-time values.
    ///
    /// `config_json` wins over `webhook_url`; with neither, defaults
    /// apply.
    ///
    /// # Errors
    ///
    /// See [`from_json`](Self::from_json).
    pub fn from_build_env(
        config_json: Option<&str>,
        webhook_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(json) = config_json.filter(|s| !s.trim().is_empty()) {
            return Self::from_json(json);
        }
        let mut config = Self::default();
        if let Some(url) = webhook_url.filter(|s| !s.trim().is_empty()) {
            config.endpoint = EndpointConfig::webhook(url.trim());
            config.validate()?;
        }
        Ok(config)
    }

    /// The submission timeout as a [`Duration`].
    #[must_use]
    pub const fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.submit_timeout_ms == 0 {
            return Err(ConfigError::Invalid("submit_timeout_ms must be greater than 0".into()));
        }
        self.endpoint.validate()
    }
}
