//! Run one submission against the endpoint, bounded by a timeout.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::Utc;
use dioxus::core::Task;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use nuptial_core::{Endpoint, Resolution, UploadError, UploadReport, UploadWorkflow};
use tracing::{debug, warn};

use crate::endpoint::BrowserEndpoint;

/// Start submitting the staged files, if a submission may start.
///
/// Two tasks race: the upload itself and a timer. Whichever finishes
/// first cancels the other and settles the submission; `on_resolved`
/// then receives the outcome. Returns `false` without doing anything
/// when nothing is staged or a submission is already in flight.
pub fn start_submission(
    mut workflow: Signal<UploadWorkflow>,
    endpoint: Rc<BrowserEndpoint>,
    timeout: Duration,
    on_resolved: impl Fn(Resolution) + 'static,
) -> bool {
    let Some(ticket) = workflow.write().begin_submit(Utc::now()) else {
        return false;
    };
    let id = ticket.id();
    let after_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    debug!(?id, timeout_ms = after_ms, "upload started");

    let settle: Rc<dyn Fn(Result<UploadReport, UploadError>)> = Rc::new(move |outcome| {
        let mut workflow = workflow;
        let resolution = workflow.write().finish_submit(id, outcome);
        if let Some(resolution) = resolution {
            on_resolved(resolution);
        }
    });

    let timer_slot: Rc<Cell<Option<Task>>> = Rc::new(Cell::new(None));

    let network = spawn({
        let settle = Rc::clone(&settle);
        let timer_slot = Rc::clone(&timer_slot);
        async move {
            let outcome = endpoint.upload(ticket.batch()).await;
            if let Some(timer) = timer_slot.take() {
                timer.cancel();
            }
            settle(outcome);
        }
    });

    let timer = spawn(async move {
        TimeoutFuture::new(u32::try_from(after_ms).unwrap_or(u32::MAX)).await;
        warn!(after_ms, "upload timed out");
        network.cancel();
        settle(Err(UploadError::TimedOut { after_ms }));
    });
    timer_slot.set(Some(timer));

    true
}
