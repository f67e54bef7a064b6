//! egui front end: form state, the controller driving submissions, and rendering.

pub mod controller;
pub mod state;
pub mod ui;
