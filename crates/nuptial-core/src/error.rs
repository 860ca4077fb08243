//! Upload failure kinds.

use crate::notification::MessageArg;

/// Errors that can occur while submitting an upload batch.
///
/// None of these is fatal: every failure returns the workflow to idle
/// with the staged files intact so the guest can retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The endpoint could not be reached (server down, DNS, CORS).
    #[error("cannot connect to upload server: {reason}")]
    Unreachable {
        /// Browser-reported reason.
        reason: String,
    },

    /// The webhook answered 404, which means its workflow is not active.
    #[error("upload service not available: the receiving workflow is not active")]
    WorkflowInactive,

    /// The endpoint answered with a non-success status.
    #[error("upload rejected with status {status}: {reason}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Status text and response body, as far as available.
        reason: String,
    },

    /// The storage backend refused one file of the batch.
    #[error("failed to store {name}: {reason}")]
    Storage {
        /// Original filename.
        name: String,
        /// Backend-reported reason.
        reason: String,
    },

    /// The endpoint did not answer in time.
    #[error("upload timed out after {after_ms} ms")]
    TimedOut {
        /// Timeout that elapsed, in milliseconds.
        after_ms: u64,
    },

    /// A browser API call failed while building or sending the request.
    #[error("browser API error: {0}")]
    Browser(String),
}

impl UploadError {
    /// Translation key describing this failure to the guest.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "error-unreachable",
            Self::WorkflowInactive => "error-workflow-inactive",
            Self::Rejected { .. } => "error-rejected",
            Self::Storage { .. } => "error-storage",
            Self::TimedOut { .. } => "error-timed-out",
            Self::Browser(_) => "error-browser",
        }
    }

    /// Interpolation arguments for [`message_key`](Self::message_key).
    #[must_use]
    pub fn message_args(&self) -> Vec<(&'static str, MessageArg)> {
        match self {
            Self::Unreachable { reason } | Self::Browser(reason) => {
                vec![("reason", MessageArg::Text(reason.clone()))]
            }
            Self::WorkflowInactive => Vec::new(),
            Self::Rejected { status, reason } => vec![
                ("status", MessageArg::Text(status.to_string())),
                ("reason", MessageArg::Text(reason.clone())),
            ],
            Self::Storage { name, reason } => vec![
                ("name", MessageArg::Text(name.clone())),
                ("reason", MessageArg::Text(reason.clone())),
            ],
            Self::TimedOut { after_ms } => vec![(
                "seconds",
                MessageArg::Count(usize::try_from(after_ms.div_ceil(1000)).unwrap_or(usize::MAX)),
            )],
        }
    }
}
