use tcline_state::status::StatusLog;

use crate::theme;

pub fn status_panel(ui: &mut egui::Ui, status: &StatusLog, pending_uploads: usize) {
    ui.horizontal(|ui| {
        ui.strong(status.headline());
        if pending_uploads > 0 {
            ui.spinner();
            ui.colored_label(theme::TEXT_DIM, format!("{pending_uploads} in flight"));
        }
    });
    if status.lines().is_empty() {
        return;
    }
    egui::ScrollArea::vertical()
        .max_height(80.0)
        .auto_shrink([false, true])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in status.lines() {
                let color = if line.is_error() {
                    theme::ERROR_TEXT
                } else {
                    theme::TEXT_DIM
                };
                ui.colored_label(color, line.to_string());
            }
        });
}
