use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::collaborator::{ResponseData, SubmitError};

pub(crate) enum JobMessage {
    SubmissionFinished(SubmissionResult),
}

#[derive(Debug)]
pub(crate) struct SubmissionResult {
    pub(crate) result: Result<ResponseData, SubmitError>,
}

/// Reports [`SubmitError::Interrupted`] if dropped before a result is delivered,
/// so a worker that unwinds still ends the Loading phase.
struct CompletionGuard {
    tx: Sender<JobMessage>,
    delivered: bool,
}

impl CompletionGuard {
    fn new(tx: Sender<JobMessage>) -> Self {
        Self {
            tx,
            delivered: false,
        }
    }

    fn deliver(mut self, result: Result<ResponseData, SubmitError>) {
        self.delivered = true;
        let _ = self
            .tx
            .send(JobMessage::SubmissionFinished(SubmissionResult { result }));
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.delivered {
            tracing::warn!("Submission worker stopped without a result");
            let _ = self
                .tx
                .send(JobMessage::SubmissionFinished(SubmissionResult {
                    result: Err(SubmitError::Interrupted),
                }));
        }
    }
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    submission_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            submission_in_progress: false,
        }
    }

    pub(super) fn submission_in_progress(&self) -> bool {
        self.submission_in_progress
    }

    pub(super) fn begin_submission<F>(&mut self, job: F)
    where
        F: FnOnce() -> Result<ResponseData, SubmitError> + Send + 'static,
    {
        if self.submission_in_progress {
            return;
        }
        self.submission_in_progress = true;
        let guard = CompletionGuard::new(self.message_tx.clone());
        thread::spawn(move || {
            let result = job();
            guard.deliver(result);
        });
    }

    pub(super) fn clear_submission(&mut self) {
        self.submission_in_progress = false;
    }

    pub(super) fn try_recv(&self) -> Option<JobMessage> {
        self.message_rx.try_recv().ok()
    }
}
