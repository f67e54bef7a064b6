//! Client for the collaborator service that computes derived fields from a
//! submitted form.

pub mod api;

pub use api::{CollaboratorClient, ResponseData, SubmitError};
