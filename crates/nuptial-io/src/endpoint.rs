//! The configured upload destination.

use nuptial_core::{Endpoint, EndpointConfig, UploadBatch, UploadError, UploadReport};

use crate::storage::ObjectStorageEndpoint;
use crate::webhook::WebhookEndpoint;

/// A browser endpoint selected from [`EndpointConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEndpoint {
    Webhook(WebhookEndpoint),
    ObjectStorage(ObjectStorageEndpoint),
}

impl BrowserEndpoint {
    #[must_use]
    pub fn from_config(config: &EndpointConfig) -> Self {
        match config {
            EndpointConfig::Webhook { url, file_field } => {
                Self::Webhook(WebhookEndpoint::new(url.clone(), file_field.clone()))
            }
            EndpointConfig::ObjectStorage {
                base_url,
                bucket,
                api_key,
            } => Self::ObjectStorage(ObjectStorageEndpoint::new(
                base_url.clone(),
                bucket.clone(),
                api_key.clone(),
            )),
        }
    }
}

impl Endpoint for BrowserEndpoint {
    async fn upload(&self, batch: &UploadBatch) -> Result<UploadReport, UploadError> {
        match self {
            Self::Webhook(endpoint) => endpoint.upload(batch).await,
            Self::ObjectStorage(endpoint) => endpoint.upload(batch).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_selects_webhook() {
        let endpoint = BrowserEndpoint::from_config(&EndpointConfig::default());
        assert!(matches!(endpoint, BrowserEndpoint::Webhook(_)));
    }

    #[test]
    fn storage_config_selects_object_storage() {
        let config = EndpointConfig::ObjectStorage {
            base_url: "https://example.supabase.co".into(),
            bucket: "wedding-photos".into(),
            api_key: None,
        };
        assert!(matches!(
            BrowserEndpoint::from_config(&config),
            BrowserEndpoint::ObjectStorage(_)
        ));
    }
}
