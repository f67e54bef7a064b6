//! Form state and its single transition function.
//!
//! [`FormState::apply`] is the only place the status changes. It returns the
//! payload to send when an event moves the form into [`SubmissionStatus::Loading`];
//! the controller owns the side effects.

use crate::collaborator::{ResponseData, SubmitError};
use crate::form::{self, FieldName, FormErrors, FormFields, SubmissionPayload};

/// Progress of the current submission cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    /// Banner text shown under the form.
    Failed(String),
}

/// Inputs to [`FormState::apply`].
#[derive(Debug)]
pub enum FormEvent {
    Edit { field: FieldName, value: String },
    Submit,
    Completed(Result<ResponseData, SubmitError>),
    Reset,
}

/// Everything the form view renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub fields: FormFields,
    pub errors: FormErrors,
    pub status: SubmissionStatus,
    /// Last successful response; kept through later failures.
    pub response: Option<ResponseData>,
}

impl FormState {
    pub fn apply(&mut self, event: FormEvent) -> Option<SubmissionPayload> {
        match event {
            FormEvent::Edit { field, value } => {
                self.fields.set(field, value);
                None
            }
            FormEvent::Submit => self.submit(),
            FormEvent::Completed(result) => {
                self.complete(result);
                None
            }
            FormEvent::Reset => {
                *self = Self::default();
                None
            }
        }
    }

    fn submit(&mut self) -> Option<SubmissionPayload> {
        if self.is_loading() {
            return None;
        }
        self.errors = form::validate(&self.fields);
        if !self.errors.is_empty() {
            if self.status == SubmissionStatus::Succeeded {
                self.status = SubmissionStatus::Idle;
            }
            return None;
        }
        match form::build_payload(&self.fields) {
            Ok(payload) => {
                self.status = SubmissionStatus::Loading;
                Some(payload)
            }
            Err(err) => {
                self.status = SubmissionStatus::Failed(err.to_string());
                None
            }
        }
    }

    fn complete(&mut self, result: Result<ResponseData, SubmitError>) {
        if !self.is_loading() {
            tracing::debug!("Ignoring submission result that arrived outside Loading");
            return;
        }
        match result {
            Ok(data) => {
                self.response = Some(data);
                self.status = SubmissionStatus::Succeeded;
            }
            Err(err) => {
                self.status = SubmissionStatus::Failed(format!("Error: {err}"));
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == SubmissionStatus::Loading
    }

    /// Failure banner, if the last cycle failed.
    pub fn banner(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Response to render; present only while the last cycle succeeded.
    pub fn rendered_response(&self) -> Option<&ResponseData> {
        match self.status {
            SubmissionStatus::Succeeded => self.response.as_ref(),
            _ => None,
        }
    }
}
