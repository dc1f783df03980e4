use std::path::PathBuf;

use egui::{vec2, Color32, CornerRadius, Id, LayerId, Order, Sense, Stroke, StrokeKind};

use crate::theme;

pub const ACCEPTED_EXTENSIONS: &[&str] = &["tc", "mp4"];

pub fn pick_files() -> Option<Vec<PathBuf>> {
    rfd::FileDialog::new()
        .set_title("Select timecode logs or clips")
        .add_filter("Timecode logs and clips", ACCEPTED_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_files()
        .filter(|files| !files.is_empty())
}

/// Large click target shown before anything is loaded.
pub fn drop_zone(ui: &mut egui::Ui) -> Option<Vec<PathBuf>> {
    let available = ui.available_rect_before_wrap();
    let zone = available.shrink(24.0);
    let response = ui.allocate_rect(zone, Sense::click());

    let stroke_color = if response.hovered() {
        theme::ACCENT
    } else {
        theme::TEXT_DIM
    };
    let painter = ui.painter();
    painter.rect_filled(zone, theme::ROUNDING, theme::BG_DARK);
    painter.rect_stroke(
        zone,
        theme::ROUNDING,
        Stroke::new(2.0, stroke_color),
        StrokeKind::Inside,
    );
    painter.text(
        zone.center() - vec2(0.0, 12.0),
        egui::Align2::CENTER_CENTER,
        "Drag & drop .tc or .mp4 files here",
        egui::FontId::proportional(18.0),
        theme::TEXT_PRIMARY,
    );
    painter.text(
        zone.center() + vec2(0.0, 14.0),
        egui::Align2::CENTER_CENTER,
        "or click to select files",
        egui::FontId::proportional(13.0),
        theme::TEXT_DIM,
    );

    if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
        return pick_files();
    }
    None
}

pub fn add_files_button(ui: &mut egui::Ui) -> Option<Vec<PathBuf>> {
    if ui.button("Add files").clicked() {
        return pick_files();
    }
    None
}

/// Dims the window while files are dragged over it.
pub fn drag_overlay(ctx: &egui::Context) {
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("drag_overlay")));
    let screen = ctx.screen_rect();
    painter.rect_filled(screen, CornerRadius::ZERO, theme::DROP_OVERLAY);
    painter.rect_stroke(
        screen.shrink(12.0),
        theme::ROUNDING,
        Stroke::new(3.0, theme::ACCENT),
        StrokeKind::Inside,
    );
    painter.text(
        screen.center(),
        egui::Align2::CENTER_CENTER,
        "Drop files to upload",
        egui::FontId::proportional(24.0),
        Color32::WHITE,
    );
}
