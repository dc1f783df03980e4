use egui::{pos2, vec2, Color32, CornerRadius, Pos2, Rect, Stroke};
use tcline_state::format::millis_to_hms;
use tcline_state::meta::{FileMeta, RangeKind};
use tcline_state::project::AppState;

use crate::theme;

use super::layout::*;

pub fn range_color(meta: &FileMeta) -> Color32 {
    match meta.kind() {
        RangeKind::Timecode => theme::TC_RANGE,
        RangeKind::Video => theme::VIDEO_RANGE,
    }
}

pub fn draw_ruler(ui: &egui::Ui, axis: &TimeAxis, top: f32) {
    let ruler_rect = Rect::from_min_size(pos2(axis.left, top), vec2(axis.width, RULER_HEIGHT));
    ui.painter()
        .rect_filled(ruler_rect, CornerRadius::ZERO, theme::RULER_BG);
    let painter = ui.painter().with_clip_rect(ruler_rect);

    let step = tick_step_ms(axis);
    let view_end = axis.view_start_ms + axis.visible_ms;
    let first = (axis.view_start_ms / step as f64).floor() as i64;
    let last = (view_end / step as f64).ceil() as i64;

    for i in first..=last {
        let t = i * step;
        if t < 0 {
            continue;
        }
        let x = axis.x_at(t);
        painter.line_segment(
            [pos2(x, top + RULER_HEIGHT - 8.0), pos2(x, top + RULER_HEIGHT)],
            Stroke::new(1.0, theme::TEXT_DIM),
        );
        painter.text(
            pos2(x + 2.0, top + 2.0),
            egui::Align2::LEFT_TOP,
            millis_to_hms(t, false),
            egui::FontId::monospace(9.0),
            theme::TEXT_DIM,
        );

        for sub in 1..4 {
            let sub_x = axis.x_at(t + sub * step / 4);
            painter.line_segment(
                [pos2(sub_x, top + RULER_HEIGHT - 4.0), pos2(sub_x, top + RULER_HEIGHT)],
                Stroke::new(0.5, theme::RULER_TICK),
            );
        }
    }
}

pub fn draw_item(painter: &egui::Painter, rect: Rect, meta: &FileMeta, emphasized: bool) {
    let color = range_color(meta);
    painter.rect_filled(rect, theme::ROUNDING_SM, color);
    painter.rect_stroke(
        rect,
        theme::ROUNDING_SM,
        Stroke::new(1.0, color.gamma_multiply(0.6)),
        egui::StrokeKind::Inside,
    );
    if emphasized {
        painter.rect_filled(rect, theme::ROUNDING_SM, Color32::from_white_alpha(30));
        painter.rect_stroke(
            rect,
            theme::ROUNDING_SM,
            Stroke::new(2.0, theme::ACCENT),
            egui::StrokeKind::Outside,
        );
    }
    if rect.width() >= 24.0 {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            meta.duration_label(),
            egui::FontId::proportional(11.0),
            Color32::WHITE,
        );
    }
}

/// Full-height vertical line at `x`, clipped to `clip`.
pub fn draw_marker(painter: &egui::Painter, x: f32, clip: Rect, stroke: Stroke) {
    if x < clip.min.x || x > clip.max.x {
        return;
    }
    painter.line_segment([pos2(x, clip.min.y), pos2(x, clip.max.y)], stroke);
}

/// Tooltip text for the pointer at `pointer_ms`, over `item` when one is
/// hovered or being dragged.
pub fn tooltip_lines(pointer_ms: i64, item: Option<&FileMeta>) -> Vec<String> {
    match item {
        Some(meta) => vec![
            format!("Start: {}", millis_to_hms(meta.start_time, false)),
            format!("End: {}", millis_to_hms(meta.end_time, false)),
            format!(
                "Elapsed: {}",
                millis_to_hms(pointer_ms - meta.start_time, false)
            ),
        ],
        None => vec![millis_to_hms(pointer_ms, true)],
    }
}

pub fn show_tooltip(ctx: &egui::Context, pointer: Pos2, lines: &[String]) {
    egui::Area::new(egui::Id::new("timeline_time_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(pointer + TOOLTIP_OFFSET)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                for line in lines {
                    ui.label(egui::RichText::new(line).monospace().size(11.0));
                }
            });
        });
}

pub fn draw_vertical_scrollbar(
    ui: &egui::Ui,
    state: &mut AppState,
    left: f32,
    top: f32,
    height: f32,
    total_rows_height: f32,
) {
    let scrollbar_rect = Rect::from_min_size(pos2(left, top), vec2(V_SCROLLBAR_WIDTH, height));
    ui.painter()
        .rect_filled(scrollbar_rect, CornerRadius::ZERO, theme::RULER_BG);

    let visible_fraction = (height / total_rows_height).clamp(0.05, 1.0);
    let max_v_scroll = (total_rows_height - height).max(1.0);
    let scroll_fraction = state.ui.timeline.vertical_scroll_offset / max_v_scroll;

    let thumb_h = (height * visible_fraction).max(20.0);
    let thumb_y = top + scroll_fraction * (height - thumb_h);
    let thumb_rect = Rect::from_min_size(
        pos2(left + 1.0, thumb_y),
        vec2(V_SCROLLBAR_WIDTH - 2.0, thumb_h),
    );
    ui.painter()
        .rect_filled(thumb_rect, CornerRadius::same(3), theme::BG_SURFACE);

    let response = ui.interact(
        scrollbar_rect,
        egui::Id::new("timeline_v_scrollbar"),
        egui::Sense::click_and_drag(),
    );
    if response.dragged() || response.clicked() {
        if let Some(pointer) = response.interact_pointer_pos() {
            let frac = ((pointer.y - top) / height).clamp(0.0, 1.0);
            state.ui.timeline.vertical_scroll_offset = frac * max_v_scroll;
        }
    }
}
