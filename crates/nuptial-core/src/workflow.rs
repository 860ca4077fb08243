//! The upload workflow: staging plus the submission state machine.
//!
//! ```text
//!            begin_submit (non-empty)
//!   Idle ────────────────────────────▶ Submitting
//!    ▲                                     │
//!    └──────── finish_submit(id, ..) ──────┘
//! ```
//!
//! Submission is split in two so the network call can happen outside
//! any borrow of the workflow: [`UploadWorkflow::begin_submit`] hands
//! out a [`SubmitTicket`] carrying the batch, the caller awaits the
//! endpoint, then reports the outcome with
//! [`UploadWorkflow::finish_submit`]. Each ticket has a fresh
//! [`SubmissionId`]; outcomes for any other id are stale and ignored,
//! which is how a timeout and a late network answer race safely.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::batch::UploadBatch;
use crate::endpoint::UploadReport;
use crate::error::UploadError;
use crate::notification::{MessageArg, Notification};
use crate::staging::StagingArea;
use crate::types::{Candidate, FileId, StagedFile};

/// Identifier of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(u64);

/// Handed out by [`UploadWorkflow::begin_submit`]: the batch to deliver
/// and the id to report the outcome under.
#[derive(Debug)]
pub struct SubmitTicket {
    id: SubmissionId,
    batch: UploadBatch,
}

impl SubmitTicket {
    #[must_use]
    pub const fn id(&self) -> SubmissionId {
        self.id
    }

    #[must_use]
    pub const fn batch(&self) -> &UploadBatch {
        &self.batch
    }
}

/// What a resolved submission did to the staged list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Every file was stored and removed from the list.
    Succeeded { count: usize },
    /// Some files were stored (and removed), the rest stay staged.
    PartiallySucceeded { stored: usize, failed: usize },
    /// Nothing was stored; the list is unchanged.
    Failed(UploadError),
}

/// The result of [`UploadWorkflow::finish_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub kind: ResolutionKind,
    pub notification: Notification,
}

impl Resolution {
    /// Whether the file input widget should be reset.
    #[must_use]
    pub const fn resets_input(&self) -> bool {
        matches!(self.kind, ResolutionKind::Succeeded { .. })
    }
}

#[derive(Debug)]
struct InFlight {
    id: SubmissionId,
    files: Vec<FileId>,
}

/// Staged files plus the `is_submitting` state machine.
#[derive(Debug, Default)]
pub struct UploadWorkflow {
    staging: StagingArea,
    in_flight: Option<InFlight>,
    next_submission: u64,
}

impl UploadWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage the image candidates. See [`StagingArea::stage_files`].
    ///
    /// Allowed while submitting: the in-flight batch is a snapshot, so
    /// files staged now are simply part of the next submission.
    pub fn stage_files(&mut self, candidates: impl IntoIterator<Item = Candidate>) -> usize {
        self.staging.stage_files(candidates)
    }

    /// Remove the file at `index`; out of range is a no-op.
    /// See [`StagingArea::unstage_file`].
    pub fn unstage_file(&mut self, index: usize) -> Option<StagedFile> {
        self.staging.unstage_file(index)
    }

    /// Remove the file with `id`; an id that is no longer staged is a
    /// no-op. See [`StagingArea::unstage_id`].
    pub fn unstage_id(&mut self, id: FileId) -> Option<StagedFile> {
        self.staging.unstage_id(id)
    }

    #[must_use]
    pub fn files(&self) -> &[StagedFile] {
        self.staging.files()
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether [`begin_submit`](Self::begin_submit) would start a submission.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.staging.is_empty()
    }

    /// Enter `Submitting` and snapshot the staged files into a batch.
    ///
    /// Returns `None` -- with no side effect at all -- when nothing is
    /// staged or a submission is already in flight.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }
        let id = SubmissionId(self.next_submission);
        self.next_submission += 1;

        let batch = UploadBatch::new(self.staging.files().to_vec(), now);
        info!(
            files = batch.len(),
            bytes = batch.total_bytes(),
            "submitting upload batch"
        );
        self.in_flight = Some(InFlight {
            id,
            files: batch.ids(),
        });
        Some(SubmitTicket { id, batch })
    }

    /// Leave `Submitting` with the endpoint's outcome.
    ///
    /// Returns `None` when `id` is not the in-flight submission (the
    /// outcome arrived after a timeout already resolved it, or twice).
    pub fn finish_submit(
        &mut self,
        id: SubmissionId,
        outcome: Result<UploadReport, UploadError>,
    ) -> Option<Resolution> {
        match &self.in_flight {
            Some(in_flight) if in_flight.id == id => {}
            _ => {
                warn!(?id, "ignoring stale submission outcome");
                return None;
            }
        }
        let in_flight = self.in_flight.take()?;

        let report = match outcome {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, "upload failed; staged files kept");
                return Some(failure(err));
            }
        };

        // Only files that were part of this batch can be removed; files
        // staged while it was in flight are not in the report.
        let stored: Vec<FileId> = report
            .stored()
            .iter()
            .copied()
            .filter(|id| in_flight.files.contains(id))
            .collect();
        let count = stored.len();
        let removed = self.staging.remove_ids(&stored);

        if report.is_complete() {
            info!(count, removed, "upload succeeded");
            return Some(Resolution {
                kind: ResolutionKind::Succeeded { count },
                notification: Notification::success("upload-success")
                    .with_body("upload-success-count")
                    .with_arg("count", MessageArg::Count(count)),
            });
        }

        let failed = report.failed();
        if count == 0 {
            // Reports with nothing stored are plain failures.
            let err = failed
                .first()
                .map_or_else(
                    || UploadError::Browser("empty upload report".into()),
                    |f| f.error.clone(),
                );
            warn!(error = %err, "upload failed; staged files kept");
            return Some(failure(err));
        }

        let names = failed.iter().map(|f| f.name.as_str()).collect::<Vec<_>>().join(", ");
        warn!(stored = count, failed = failed.len(), %names, "upload partially succeeded");
        Some(Resolution {
            kind: ResolutionKind::PartiallySucceeded {
                stored: count,
                failed: failed.len(),
            },
            notification: Notification::warning("upload-partial")
                .with_body("upload-partial-count")
                .with_arg("stored", MessageArg::Count(count))
                .with_arg("failed", MessageArg::Count(failed.len()))
                .with_arg("names", MessageArg::Text(names)),
        })
    }
}

fn failure(err: UploadError) -> Resolution {
    let mut notification = Notification::error("upload-error").with_body(err.message_key());
    for (name, value) in err.message_args() {
        notification = notification.with_arg(name, value);
    }
    Resolution {
        kind: ResolutionKind::Failed(err),
        notification,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notification::Severity;

    fn image(name: &str) -> Candidate {
        Candidate::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    fn names(workflow: &UploadWorkflow) -> Vec<String> {
        workflow.files().iter().map(|f| f.name().to_owned()).collect()
    }

    fn staged(names: &[&str]) -> UploadWorkflow {
        let mut workflow = UploadWorkflow::new();
        workflow.stage_files(names.iter().map(|n| image(n)));
        workflow
    }

    #[test]
    fn submit_on_empty_list_is_ignored() {
        let mut workflow = UploadWorkflow::new();
        assert!(workflow.begin_submit(Utc::now()).is_none());
        assert!(!workflow.is_submitting());
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut workflow = staged(&["a", "b"]);
        let ticket = workflow.begin_submit(Utc::now()).unwrap();
        assert!(workflow.is_submitting());
        assert!(workflow.begin_submit(Utc::now()).is_none());
        assert_eq!(ticket.batch().len(), 2);
        assert_eq!(names(&workflow), ["a", "b"]);
    }

    #[test]
    fn success_clears_list_and_reports_count() {
        let mut workflow = staged(&["a", "b"]);
        let ticket = workflow.begin_submit(Utc::now()).unwrap();
        let report = UploadReport::all_stored(ticket.batch());
        let resolution = workflow.finish_submit(ticket.id(), Ok(report)).unwrap();

        assert!(workflow.files().is_empty());
        assert!(!workflow.is_submitting());
        assert!(resolution.resets_input());
        assert_eq!(resolution.kind, ResolutionKind::Succeeded { count: 2 });
        assert_eq!(resolution.notification.severity(), Severity::Success);
        assert_eq!(resolution.notification.arg("count"), Some(&MessageArg::Count(2)));
    }

    #[test]
    fn failure_keeps_list_untouched() {
        let mut workflow = staged(&["a", "b", "c"]);
        let before: Vec<StagedFile> = workflow.files().to_vec();
        let ticket = workflow.begin_submit(Utc::now()).unwrap();
        let resolution = workflow
            .finish_submit(ticket.id(), Err(UploadError::WorkflowInactive))
            .unwrap();

        assert_eq!(workflow.files(), before.as_slice());
        assert!(!workflow.is_submitting());
        assert!(!resolution.resets_input());
        assert_eq!(resolution.notification.severity(), Severity::Error);
        assert_eq!(resolution.notification.body_key(), Some("error-workflow-inactive"));
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let mut workflow = staged(&["a"]);
        let first = workflow.begin_submit(Utc::now()).unwrap();
        let first_id = first.id();
        // Timeout resolves the first attempt.
        workflow
            .finish_submit(first_id, Err(UploadError::TimedOut { after_ms: 10 }))
            .unwrap();
        // The late network answer for the same attempt is dropped.
        let late = UploadReport::all_stored(first.batch());
        assert!(workflow.finish_submit(first_id, Ok(late)).is_none());
        assert_eq!(names(&workflow), ["a"]);

        // A retry gets a new id; the old id still does nothing.
        let retry = workflow.begin_submit(Utc::now()).unwrap();
        assert_ne!(retry.id(), first_id);
        assert!(workflow.finish_submit(first_id, Err(UploadError::WorkflowInactive)).is_none());
        assert!(workflow.is_submitting());
    }

    #[test]
    fn files_staged_mid_flight_survive_success() {
        let mut workflow = staged(&["a", "b"]);
        let ticket = workflow.begin_submit(Utc::now()).unwrap();
        workflow.stage_files([image("late")]);
        let report = UploadReport::all_stored(ticket.batch());
        workflow.finish_submit(ticket.id(), Ok(report)).unwrap();
        assert_eq!(names(&workflow), ["late"]);
    }

    #[test]
    fn partial_success_keeps_only_failed_files() {
        let mut workflow = staged(&["a", "b", "c"]);
        let ticket = workflow.begin_submit(Utc::now()).unwrap();
        let files = ticket.batch().files();
        let mut report = UploadReport::default();
        report.record_stored(&files[0]);
        report.record_failed(
            &files[1],
            UploadError::Storage {
                name: "b".into(),
                reason: "409 Duplicate".into(),
            },
        );
        report.record_stored(&files[2]);

        let resolution = workflow.finish_submit(ticket.id(), Ok(report)).unwrap();
        assert_eq!(names(&workflow), ["b"]);
        assert_eq!(
            resolution.kind,
            ResolutionKind::PartiallySucceeded {
                stored: 2,
                failed: 1
            }
        );
        assert_eq!(resolution.notification.severity(), Severity::Warning);
        assert_eq!(
            resolution.notification.arg("names"),
            Some(&MessageArg::Text("b".into()))
        );
        assert!(!resolution.resets_input());
    }

    #[test]
    fn report_with_nothing_stored_is_a_failure() {
        let mut workflow = staged(&["a"]);
        let ticket = workflow.begin_submit(Utc::now()).unwrap();
        let mut report = UploadReport::default();
        report.record_failed(&ticket.batch().files()[0], UploadError::Browser("x".into()));

        let resolution = workflow.finish_submit(ticket.id(), Ok(report)).unwrap();
        assert!(matches!(resolution.kind, ResolutionKind::Failed(_)));
        assert_eq!(names(&workflow), ["a"]);
    }

    #[test]
    fn unstage_during_flight_is_allowed() {
        let mut workflow = staged(&["a", "b"]);
        let ticket = workflow.begin_submit(Utc::now()).unwrap();
        workflow.unstage_file(0);
        let report = UploadReport::all_stored(ticket.batch());
        let resolution = workflow.finish_submit(ticket.id(), Ok(report)).unwrap();
        // Both photos were delivered; only "b" was still staged.
        assert_eq!(resolution.kind, ResolutionKind::Succeeded { count: 2 });
        assert!(workflow.files().is_empty());
    }

    #[test]
    fn unstage_by_id_is_unaffected_by_earlier_removals() {
        let mut workflow = staged(&["a", "b", "c"]);
        let ids: Vec<FileId> = workflow.files().iter().map(StagedFile::id).collect();

        // Two removals issued against the same rendered list.
        workflow.unstage_id(ids[0]);
        workflow.unstage_id(ids[1]);
        assert_eq!(names(&workflow), ["c"]);

        workflow.unstage_id(ids[1]);
        assert_eq!(names(&workflow), ["c"]);
    }
}
