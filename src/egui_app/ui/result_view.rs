//! Read-only rendering of a successful response.

use super::EguiApp;
use super::style::{self, StatusTone};
use crate::collaborator::ResponseData;
use eframe::egui::{self, RichText};

pub const SUCCESS_HEADING: &str = "Form Submitted Successfully!";

/// Label/value pairs in display order. Sequences are joined with `", "`.
pub fn result_rows(data: &ResponseData) -> Vec<(&'static str, String)> {
    vec![
        ("User ID", data.user_id.clone()),
        ("College Email ID", data.email.clone()),
        ("College Roll Number", data.roll_number.clone()),
        ("Numbers Array", join(&data.numbers)),
        ("Alphabets Array", join(&data.alphabets)),
        (
            "Highest Lowercase Alphabet",
            join(&data.highest_lowercase_alphabet),
        ),
        ("Prime Number Found", yes_no(data.is_prime_found).to_string()),
        (
            "File Validity",
            if data.file_valid { "Valid" } else { "Invalid" }.to_string(),
        ),
        ("File MIME Type", data.file_mime_type.clone()),
        (
            "File Size (KB)",
            data.file_size_kb
                .map(|size| size.to_string())
                .unwrap_or_default(),
        ),
    ]
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

impl EguiApp {
    pub(super) fn render_response(&mut self, ui: &mut egui::Ui) {
        let Some(data) = self.controller.state.rendered_response() else {
            return;
        };
        ui.add_space(16.0);
        ui.separator();
        ui.heading(RichText::new(SUCCESS_HEADING).color(style::status_color(StatusTone::Info)));
        ui.add_space(6.0);
        for (label, value) in result_rows(data) {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(format!("{label}:")).strong());
                ui.label(value);
            });
        }
    }
}
