//! nuptial-core: Upload workflow and UI state for nuptial (sans-IO).
//!
//! Stages guest photos, assembles upload batches, and tracks the
//! submission state machine. Also owns the endpoint contract, the
//! request plans that browser endpoints execute, notifications,
//! localization, theme and configuration.
//!
//! This crate has **no I/O dependencies** -- endpoints are described by
//! the [`Endpoint`] trait and implemented by `nuptial-io` on top of the
//! browser `fetch` API.

pub mod batch;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod i18n;
pub mod notification;
pub mod preview;
pub mod request;
pub mod staging;
pub mod theme;
pub mod types;
pub mod workflow;

pub use batch::{BatchMetadata, SOURCE_TAG, UploadBatch};
pub use config::{AppConfig, ConfigError, EndpointConfig};
pub use endpoint::{Endpoint, FileFailure, UploadReport};
pub use error::UploadError;
pub use i18n::{Catalog, Language, Translator};
pub use notification::{MessageArg, Notification, NotificationCenter, NotificationId, Severity};
pub use preview::PreviewPlan;
pub use staging::StagingArea;
pub use theme::Theme;
pub use types::{Candidate, FileId, StagedFile};
pub use workflow::{Resolution, ResolutionKind, SubmissionId, SubmitTicket, UploadWorkflow};
