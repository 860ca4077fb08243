//! The endpoint contract: "upload a batch, get a report or a typed error".
//!
//! The workflow never knows whether photos go to a form webhook or to
//! an object-storage bucket. Concrete endpoints live in `nuptial-io`.

use crate::batch::UploadBatch;
use crate::error::UploadError;
use crate::types::{FileId, StagedFile};

/// A destination that accepts upload batches.
///
/// `Err` means the batch as a whole failed and nothing can be assumed
/// stored. Per-file outcomes of a batch that was at least partly
/// processed go into the [`UploadReport`].
#[allow(async_fn_in_trait)] // single-threaded WASM: no Send bound wanted
pub trait Endpoint {
    /// Deliver every file in `batch`.
    async fn upload(&self, batch: &UploadBatch) -> Result<UploadReport, UploadError>;
}

/// One file that the endpoint refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub id: FileId,
    pub name: String,
    pub error: UploadError,
}

/// Per-file outcome of a processed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    stored: Vec<FileId>,
    failed: Vec<FileFailure>,
}

impl UploadReport {
    /// A report where every file of `batch` was stored.
    #[must_use]
    pub fn all_stored(batch: &UploadBatch) -> Self {
        Self {
            stored: batch.ids(),
            failed: Vec::new(),
        }
    }

    /// Record `file` as stored.
    pub fn record_stored(&mut self, file: &StagedFile) {
        self.stored.push(file.id());
    }

    /// Record `file` as failed with `error`.
    pub fn record_failed(&mut self, file: &StagedFile, error: UploadError) {
        self.failed.push(FileFailure {
            id: file.id(),
            name: file.name().to_owned(),
            error,
        });
    }

    #[must_use]
    pub fn stored(&self) -> &[FileId] {
        &self.stored
    }

    #[must_use]
    pub fn failed(&self) -> &[FileFailure] {
        &self.failed
    }

    /// Nothing failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Collapse a report with no stored files into the first failure.
    ///
    /// Endpoints that try files one by one use this so that "every file
    /// failed" is reported as a plain failure rather than a partial
    /// success with zero stored files.
    ///
    /// # Errors
    ///
    /// Returns the first file's error when nothing was stored and at
    /// least one file failed.
    pub fn into_result(mut self) -> Result<Self, UploadError> {
        if self.stored.is_empty() && !self.failed.is_empty() {
            return Err(self.failed.swap_remove(0).error);
        }
        Ok(self)
    }
}
