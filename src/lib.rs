//! Library exports for the form app and its tests.
/// Config and log directory resolution.
pub mod app_dirs;
/// Collaborator endpoint client and wire types.
pub mod collaborator;
/// Endpoint settings stored as TOML.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Field model, validation and payload building.
pub mod form;
/// HTTP agent helpers.
pub mod http_client;
/// Tracing subscriber setup.
pub mod logging;
