#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based detail form.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use detailform::config;
use detailform::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use detailform::logging;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let app = config::load_or_default()
        .map_err(|err| format!("Failed to load config: {err}"))
        .and_then(|settings| EguiApp::new(&settings));
    if let Err(err) = &app {
        tracing::error!("{err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(560.0, 820.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Submit Your Details",
        native_options,
        Box::new(move |_cc| match app {
            Ok(app) => Ok(Box::new(app) as Box<dyn eframe::App>),
            Err(message) => Ok(Box::new(LaunchError { message }) as Box<dyn eframe::App>),
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
