//! egui renderer for the form window.

mod form_view;
pub mod result_view;
pub mod style;

use std::time::Duration;

use crate::config::AppSettings;
use crate::egui_app::controller::FormController;
use eframe::egui;

/// Minimum window size that keeps every field and the result panel readable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(520.0, 640.0);

const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the form using the shared controller state.
pub struct EguiApp {
    controller: FormController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(settings: &AppSettings) -> Result<Self, String> {
        let controller = FormController::new(settings)
            .map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self {
            controller,
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_form(ui);
                    self.render_response(ui);
                });
        });

        // Keep polling the worker channel while nothing else triggers a frame.
        if self.controller.is_submission_in_progress() {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }
    }
}
