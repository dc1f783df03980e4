use egui::{CursorIcon, Rect};
use tcline_state::project::AppState;
use tcline_state::timeline::DragEdge;

use super::layout::*;

/// Follows the pointer while an item is held and finishes the drag on release.
pub fn handle_item_drag(ui: &egui::Ui, state: &mut AppState, axis: &TimeAxis) {
    let Some(edge) = state.ui.timeline.dragging.as_ref().map(|d| d.edge) else {
        return;
    };

    let is_dragging = ui.input(|i| i.pointer.any_down());
    if !is_dragging {
        if let Some(drag) = state.end_drag() {
            if let Some(meta) = state.project.files.get(&drag.name) {
                tracing::debug!(
                    name = %drag.name,
                    start = meta.start_time,
                    end = meta.end_time,
                    "drag finished"
                );
            }
        }
        return;
    }

    ui.ctx().set_cursor_icon(match edge {
        DragEdge::Body => CursorIcon::Grabbing,
        DragEdge::Start | DragEdge::End => CursorIcon::ResizeHorizontal,
    });

    let Some(pointer) = ui.input(|i| i.pointer.hover_pos()) else {
        return;
    };
    state.update_drag(axis.time_at(pointer.x));
}

pub fn handle_zoom_pan(
    ui: &egui::Ui,
    state: &mut AppState,
    timeline_rect: Rect,
    axis: &TimeAxis,
    needs_vertical_scroll: bool,
    total_rows_height: f32,
    available_rows_height: f32,
) {
    let hover_pos = ui.input(|i| i.pointer.hover_pos());
    let in_timeline = hover_pos.is_some_and(|p| timeline_rect.contains(p));
    if !in_timeline {
        return;
    }

    let view = &mut state.ui.timeline;
    let zoom_delta = ui.input(|i| i.zoom_delta());

    if zoom_delta != 1.0 {
        let anchor = match hover_pos {
            Some(p) if p.x >= axis.left => axis.time_at(p.x) as f64,
            _ => view.view_start_ms + view.visible_ms / 2.0,
        };
        view.zoom_around(anchor, zoom_delta as f64);
    } else {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
        if scroll_delta.x.abs() > 0.1 {
            view.pan_ms(-scroll_delta.x as f64 * axis.ms_per_px());
        }

        if scroll_delta.y.abs() > 0.1 {
            if needs_vertical_scroll {
                let max_v_scroll = (total_rows_height - available_rows_height).max(0.0);
                view.vertical_scroll_offset =
                    (view.vertical_scroll_offset - scroll_delta.y).clamp(0.0, max_v_scroll);
            } else {
                view.pan_ms(-scroll_delta.y as f64 * axis.ms_per_px());
            }
        }
    }
}
