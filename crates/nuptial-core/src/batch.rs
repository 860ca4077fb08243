//! Upload batches: the snapshot of staged files handed to an endpoint.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::{FileId, StagedFile};

/// Source tag sent with every batch so the receiving side can tell
/// album uploads apart from other traffic.
pub const SOURCE_TAG: &str = "wedding_album";

/// Metadata sent alongside the files of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchMetadata {
    /// When the guest pressed submit.
    pub timestamp: DateTime<Utc>,
    /// Always [`SOURCE_TAG`].
    pub source: &'static str,
    /// Number of files in the batch.
    pub total_files: usize,
}

impl BatchMetadata {
    /// The timestamp as RFC 3339 with millisecond precision,
    /// e.g. `2026-06-13T17:45:03.120Z`.
    #[must_use]
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// All staged files at the moment of submission, plus metadata.
///
/// Assembled by the workflow when a submission begins and dropped once
/// the endpoint call resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    metadata: BatchMetadata,
    files: Vec<StagedFile>,
}

impl UploadBatch {
    /// Snapshot `files` taken at `timestamp`.
    #[must_use]
    pub fn new(files: Vec<StagedFile>, timestamp: DateTime<Utc>) -> Self {
        let metadata = BatchMetadata {
            timestamp,
            source: SOURCE_TAG,
            total_files: files.len(),
        };
        Self { metadata, files }
    }

    #[must_use]
    pub const fn metadata(&self) -> &BatchMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Ids of all files in the batch, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<FileId> {
        self.files.iter().map(StagedFile::id).collect()
    }

    /// Total payload size in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(StagedFile::size).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::staging::StagingArea;
    use crate::types::Candidate;

    #[test]
    fn metadata_counts_files_and_tags_source() {
        let mut area = StagingArea::new();
        area.stage_files([
            Candidate::new("a.png", "image/png", vec![0u8; 10]),
            Candidate::new("b.png", "image/png", vec![0u8; 5]),
        ]);
        let ts = Utc.with_ymd_and_hms(2026, 6, 13, 17, 45, 3).single().unwrap();
        let batch = UploadBatch::new(area.files().to_vec(), ts);

        assert_eq!(batch.metadata().total_files, 2);
        assert_eq!(batch.metadata().source, "wedding_album");
        assert_eq!(batch.total_bytes(), 15);
        assert_eq!(batch.metadata().timestamp_rfc3339(), "2026-06-13T17:45:03.000Z");
        assert_eq!(batch.ids(), area.ids());
    }
}
