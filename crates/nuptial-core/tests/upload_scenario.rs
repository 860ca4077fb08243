//! Integration test: the guest flow from staging to a successful upload
//! and a failed retry, driven through the `Endpoint` trait.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::Utc;
use futures::executor::block_on;
use nuptial_core::{
    Candidate, Catalog, Endpoint, Language, MessageArg, Resolution, ResolutionKind, Severity,
    Translator, UploadBatch, UploadError, UploadReport, UploadWorkflow,
};

/// Endpoint double that answers from a script and records what it saw.
#[derive(Default)]
struct ScriptedEndpoint {
    answers: RefCell<VecDeque<Result<(), UploadError>>>,
    seen: RefCell<Vec<Vec<String>>>,
}

impl ScriptedEndpoint {
    fn answering(answers: impl IntoIterator<Item = Result<(), UploadError>>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            seen: RefCell::default(),
        }
    }
}

impl Endpoint for ScriptedEndpoint {
    async fn upload(&self, batch: &UploadBatch) -> Result<UploadReport, UploadError> {
        self.seen
            .borrow_mut()
            .push(batch.files().iter().map(|f| f.name().to_owned()).collect());
        let answer = self
            .answers
            .borrow_mut()
            .pop_front()
            .expect("unexpected upload call");
        answer.map(|()| UploadReport::all_stored(batch))
    }
}

fn submit(workflow: &mut UploadWorkflow, endpoint: &impl Endpoint) -> Option<Resolution> {
    let ticket = workflow.begin_submit(Utc::now())?;
    let outcome = block_on(endpoint.upload(ticket.batch()));
    workflow.finish_submit(ticket.id(), outcome)
}

fn names(workflow: &UploadWorkflow) -> Vec<String> {
    workflow.files().iter().map(|f| f.name().to_owned()).collect()
}

#[test]
fn stage_remove_submit_then_fail_retry() {
    let mut workflow = UploadWorkflow::new();
    let staged = workflow.stage_files([
        Candidate::new("first-dance.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]),
        Candidate::new("cake.png", "image/png", vec![0x89, b'P']),
        Candidate::new("vows.heic", "image/heic", vec![0, 0, 0]),
        Candidate::new("seating.txt", "text/plain", b"table 4".to_vec()),
    ]);
    assert_eq!(staged, 3);
    assert_eq!(workflow.files().len(), 3);

    workflow.unstage_file(1);
    assert_eq!(names(&workflow), ["first-dance.jpg", "vows.heic"]);

    // Successful submission empties the list and reports the count.
    let endpoint = ScriptedEndpoint::answering([Ok(())]);
    let resolution = submit(&mut workflow, &endpoint).unwrap();
    assert_eq!(resolution.kind, ResolutionKind::Succeeded { count: 2 });
    assert_eq!(resolution.notification.severity(), Severity::Success);
    assert_eq!(resolution.notification.arg("count"), Some(&MessageArg::Count(2)));
    assert!(workflow.files().is_empty());
    assert_eq!(endpoint.seen.borrow().as_slice(), [vec!["first-dance.jpg", "vows.heic"]]);

    let t = Translator::new(Rc::new(Catalog::load()), Language::En);
    let body = t.lookup_with(
        resolution.notification.body_key().unwrap(),
        resolution.notification.args(),
    );
    assert_eq!(body, "2 photos were added to the album.");

    // Nothing staged: submit is a no-op and never reaches the endpoint.
    assert!(submit(&mut workflow, &endpoint).is_none());
    assert_eq!(endpoint.seen.borrow().len(), 1);

    // Re-stage two photos, fail, and keep them for a retry.
    workflow.stage_files([
        Candidate::new("first-dance.jpg", "image/jpeg", vec![1]),
        Candidate::new("vows.heic", "image/heic", vec![2]),
    ]);
    let before = workflow.files().to_vec();
    let failing = ScriptedEndpoint::answering([Err(UploadError::Unreachable {
        reason: "TypeError: Failed to fetch".into(),
    })]);
    let resolution = submit(&mut workflow, &failing).unwrap();
    assert!(matches!(resolution.kind, ResolutionKind::Failed(UploadError::Unreachable { .. })));
    assert_eq!(resolution.notification.severity(), Severity::Error);
    assert_eq!(workflow.files(), before.as_slice());
    assert!(!workflow.is_submitting());
}

#[test]
fn resubmit_after_failure_delivers_the_same_files() {
    let mut workflow = UploadWorkflow::new();
    workflow.stage_files([
        Candidate::new("a.jpg", "image/jpeg", vec![1]),
        Candidate::new("b.jpg", "image/jpeg", vec![2]),
    ]);
    let endpoint = ScriptedEndpoint::answering([
        Err(UploadError::Rejected {
            status: 503,
            reason: "Service Unavailable".into(),
        }),
        Ok(()),
    ]);

    let first = submit(&mut workflow, &endpoint).unwrap();
    assert!(matches!(first.kind, ResolutionKind::Failed(_)));
    let second = submit(&mut workflow, &endpoint).unwrap();
    assert_eq!(second.kind, ResolutionKind::Succeeded { count: 2 });

    let seen = endpoint.seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
    assert!(workflow.files().is_empty());
}

#[test]
fn error_notification_renders_in_both_languages() {
    let mut workflow = UploadWorkflow::new();
    workflow.stage_files([Candidate::new("a.jpg", "image/jpeg", vec![1])]);
    let endpoint = ScriptedEndpoint::answering([Err(UploadError::TimedOut { after_ms: 30_000 })]);
    let resolution = submit(&mut workflow, &endpoint).unwrap();
    let n = &resolution.notification;

    let mut t = Translator::new(Rc::new(Catalog::load()), Language::En);
    assert_eq!(
        t.lookup_with(n.body_key().unwrap(), n.args()),
        "The upload did not finish within 30 seconds."
    );
    t.set_language(Language::Tr);
    assert_eq!(
        t.lookup_with(n.body_key().unwrap(), n.args()),
        "Yükleme 30 saniye içinde tamamlanamadı."
    );
    assert_eq!(t.lookup(n.title_key()), "Fotoğraflar yüklenemedi. Lütfen tekrar deneyin.");
}
