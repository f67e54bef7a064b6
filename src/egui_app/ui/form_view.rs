//! Form panel: labelled inputs, inline errors, the action row and the failure banner.

use super::EguiApp;
use super::style::{self, StatusTone};
use crate::form::FieldName;
use eframe::egui::{self, RichText};

const FIELD_WIDTH: f32 = 420.0;

impl EguiApp {
    pub(super) fn render_form(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.heading("Submit Your Details");
        ui.label(
            RichText::new(format!("Endpoint: {}", self.controller.endpoint()))
                .small()
                .color(palette.text_muted),
        );
        ui.add_space(12.0);

        for field in FieldName::ALL {
            self.render_field(ui, field);
            ui.add_space(8.0);
        }

        let loading = self.controller.is_submission_in_progress();
        let mut submit_clicked = false;
        let mut clear_clicked = false;
        ui.horizontal(|ui| {
            submit_clicked = ui
                .add_enabled(!loading, egui::Button::new("Submit"))
                .clicked();
            clear_clicked = ui
                .add_enabled(!loading, egui::Button::new("Clear"))
                .clicked();
        });

        if loading {
            ui.label(RichText::new("Submitting...").color(style::status_color(StatusTone::Busy)));
        }
        if let Some(banner) = self.controller.state.banner() {
            ui.label(RichText::new(banner).color(style::status_color(StatusTone::Error)));
        }

        if submit_clicked {
            self.controller.submit();
        }
        if clear_clicked {
            self.controller.reset();
        }
    }

    fn render_field(&mut self, ui: &mut egui::Ui, field: FieldName) {
        let palette = style::palette();
        ui.label(RichText::new(field.prompt()).color(palette.text_primary));

        let mut value = self.controller.state.fields.get(field).to_string();
        let mut edit = egui::TextEdit::singleline(&mut value)
            .id_salt(field.key())
            .desired_width(FIELD_WIDTH);
        if let Some(hint) = field.hint() {
            edit = edit.hint_text(hint);
        }
        if ui.add(edit).changed() {
            self.controller.edit(field, value);
        }

        if let Some(message) = self.controller.state.errors.get(field) {
            ui.label(RichText::new(message).color(style::status_color(StatusTone::Error)));
        }
    }
}
