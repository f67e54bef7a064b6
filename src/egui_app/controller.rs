//! Drives the form: forwards UI events to [`FormState`], dispatches submissions
//! to a background worker and folds their results back in.

mod jobs;

use url::Url;

use crate::collaborator::CollaboratorClient;
use crate::config::{AppSettings, ConfigError};
use crate::egui_app::state::{FormEvent, FormState};
use crate::form::FieldName;
use jobs::{ControllerJobs, JobMessage};

/// Owns the form state and the single in-flight submission.
pub struct FormController {
    pub state: FormState,
    client: CollaboratorClient,
    jobs: ControllerJobs,
}

impl FormController {
    /// Build a controller posting to the endpoint in `settings`.
    pub fn new(settings: &AppSettings) -> Result<Self, ConfigError> {
        Ok(Self::with_client(CollaboratorClient::new(&settings.endpoint)?))
    }

    pub fn with_client(client: CollaboratorClient) -> Self {
        Self {
            state: FormState::default(),
            client,
            jobs: ControllerJobs::new(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        self.client.endpoint()
    }

    pub fn edit(&mut self, field: FieldName, value: impl Into<String>) {
        self.state.apply(FormEvent::Edit {
            field,
            value: value.into(),
        });
    }

    /// Validate, build the payload and start the request when both pass.
    pub fn submit(&mut self) {
        if self.jobs.submission_in_progress() {
            tracing::debug!("Submit ignored; a request is already in flight");
            return;
        }
        tracing::info!(fields = ?self.state.fields, "Form data before sending to API");
        let Some(payload) = self.state.apply(FormEvent::Submit) else {
            if !self.state.errors.is_empty() {
                tracing::info!(missing = self.state.errors.len(), "Submission blocked by validation");
            } else if let Some(banner) = self.state.banner() {
                tracing::info!("Submission aborted: {banner}");
            }
            return;
        };
        tracing::info!(endpoint = %self.client.endpoint(), "Submitting form");
        let client = self.client.clone();
        self.jobs.begin_submission(move || client.submit(&payload));
    }

    /// Restore a blank form. Ignored while a request is in flight.
    pub fn reset(&mut self) {
        if self.jobs.submission_in_progress() {
            return;
        }
        self.state.apply(FormEvent::Reset);
    }

    pub fn is_submission_in_progress(&self) -> bool {
        self.jobs.submission_in_progress()
    }

    /// Drain finished background work. Call once per frame.
    pub fn poll_background_jobs(&mut self) {
        while let Some(message) = self.jobs.try_recv() {
            match message {
                JobMessage::SubmissionFinished(message) => {
                    self.jobs.clear_submission();
                    match &message.result {
                        Ok(data) => tracing::info!(user_id = %data.user_id, "Form submitted"),
                        Err(err) => tracing::error!("Form submission failed: {err}"),
                    }
                    self.state.apply(FormEvent::Completed(message.result));
                }
            }
        }
    }

    #[cfg(test)]
    fn begin_test_job(
        &mut self,
        job: impl FnOnce() -> Result<crate::collaborator::ResponseData, crate::collaborator::SubmitError>
        + Send
        + 'static,
    ) {
        if self.state.apply(FormEvent::Submit).is_some() {
            self.jobs.begin_submission(job);
        }
    }
}
