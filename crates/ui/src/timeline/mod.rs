mod interaction;
mod layout;
mod rendering;

use egui::{pos2, vec2, CornerRadius, CursorIcon, Rect, Sense, Stroke};
use tcline_state::meta::FileMeta;
use tcline_state::project::AppState;
use tcline_state::timeline::DragEdge;

use crate::theme;

pub use layout::TimeAxis;
use layout::*;
use rendering::*;

pub fn timeline_panel(ui: &mut egui::Ui, state: &mut AppState) {
    ui.set_min_width(0.0);
    ui.set_min_height(0.0);

    let timeline_rect = ui.available_rect_before_wrap();
    ui.allocate_rect(timeline_rect, Sense::hover());

    let content_left = timeline_rect.min.x + GROUP_HEADER_WIDTH;
    let content_width = (timeline_rect.width() - GROUP_HEADER_WIDTH - V_SCROLLBAR_WIDTH).max(1.0);

    let items: Vec<FileMeta> = state.project.files.iter().cloned().collect();
    let rows_height = total_rows_height(items.len());
    let ruler_top = timeline_rect.min.y;
    let rows_area_top = ruler_top + RULER_HEIGHT;
    let available_rows_height = timeline_rect.max.y - rows_area_top;
    let needs_vertical_scroll = rows_height > available_rows_height;
    if !needs_vertical_scroll {
        state.ui.timeline.vertical_scroll_offset = 0.0;
    }

    let axis = TimeAxis::new(content_left, content_width, &state.ui.timeline);
    interaction::handle_zoom_pan(
        ui,
        state,
        timeline_rect,
        &axis,
        needs_vertical_scroll,
        rows_height,
        available_rows_height,
    );
    let axis = TimeAxis::new(content_left, content_width, &state.ui.timeline);

    let rows_top = rows_area_top - state.ui.timeline.vertical_scroll_offset;
    let content_clip = Rect::from_min_max(
        pos2(content_left, rows_area_top),
        pos2(axis.right(), timeline_rect.max.y),
    );
    let header_clip = Rect::from_min_max(
        pos2(timeline_rect.min.x, rows_area_top),
        pos2(content_left, timeline_rect.max.y),
    );
    let navigable = Rect::from_min_max(pos2(content_left, ruler_top), content_clip.max);

    // Registered first so range items sit on top of it for hit-testing.
    let background = ui.interact(
        navigable,
        egui::Id::new("timeline_background"),
        Sense::click(),
    );
    if background.clicked() {
        if let Some(pointer) = background.interact_pointer_pos() {
            let (t, snapped) = state.navigate_to(axis.time_at(pointer.x));
            tracing::debug!(t, snapped, "timeline navigation");
        }
    }

    let content_painter = ui.painter().with_clip_rect(content_clip);
    let header_painter = ui.painter().with_clip_rect(header_clip);
    ui.painter()
        .rect_filled(header_clip, CornerRadius::ZERO, theme::BG_PANEL);

    let pointer = ui.ctx().pointer_hover_pos();
    let dragging_name = state.ui.timeline.dragging.as_ref().map(|d| d.name.clone());
    let mut pending_remove: Option<String> = None;
    let mut hovered_item: Option<FileMeta> = None;

    for (index, meta) in items.iter().enumerate() {
        let row_top = group_top(rows_top, index);
        let row_rect = Rect::from_min_size(
            pos2(content_left, row_top),
            vec2(content_width, GROUP_HEIGHT),
        );
        content_painter.rect_filled(row_rect, CornerRadius::ZERO, theme::GROUP_BG);
        content_painter.line_segment(
            [
                pos2(timeline_rect.min.x, row_top + GROUP_HEIGHT),
                pos2(axis.right(), row_top + GROUP_HEIGHT),
            ],
            Stroke::new(1.0, theme::BORDER),
        );

        let header_rect = Rect::from_min_size(
            pos2(timeline_rect.min.x, row_top),
            vec2(GROUP_HEADER_WIDTH, GROUP_HEIGHT),
        );
        header_painter.rect_filled(header_rect, CornerRadius::ZERO, theme::GROUP_HEADER_BG);
        header_painter.text(
            pos2(header_rect.min.x + 8.0, header_rect.center().y),
            egui::Align2::LEFT_CENTER,
            truncate_name(&meta.name, 26),
            egui::FontId::proportional(12.0),
            theme::TEXT_PRIMARY,
        );

        let remove_rect = Rect::from_center_size(
            pos2(
                header_rect.max.x - REMOVE_BUTTON_SIZE.x / 2.0 - 6.0,
                header_rect.center().y,
            ),
            REMOVE_BUTTON_SIZE,
        );
        if header_clip.contains_rect(remove_rect)
            && ui
                .put(remove_rect, egui::Button::new("\u{00d7}").small())
                .on_hover_text("Remove")
                .clicked()
        {
            pending_remove = Some(meta.name.clone());
        }

        let rect = item_rect(&axis, row_top, meta);
        let is_dragged = dragging_name.as_deref() == Some(meta.name.as_str());
        let visible = rect.max.x >= content_left
            && rect.min.x <= axis.right()
            && rect.max.y >= content_clip.min.y
            && rect.min.y <= content_clip.max.y;

        if visible {
            draw_item(&content_painter, rect, meta, is_dragged);
            let response = ui.interact(
                rect.intersect(content_clip),
                egui::Id::new(("range_item", meta.name.as_str())),
                Sense::click_and_drag(),
            );

            if response.drag_started() && state.ui.timeline.dragging.is_none() {
                let press = ui
                    .input(|i| i.pointer.press_origin())
                    .or(response.interact_pointer_pos());
                if let Some(press) = press {
                    let edge = edge_at(rect, press.x);
                    state.begin_drag(&meta.name, edge, axis.time_at(press.x));
                }
            } else if response.hovered() && state.ui.timeline.dragging.is_none() {
                if let Some(p) = pointer {
                    let icon = match edge_at(rect, p.x) {
                        DragEdge::Body => CursorIcon::Grab,
                        DragEdge::Start | DragEdge::End => CursorIcon::ResizeHorizontal,
                    };
                    ui.ctx().set_cursor_icon(icon);
                }
            }
        }

        if pointer.is_some_and(|p| rect.contains(p)) {
            hovered_item = Some(meta.clone());
        }
    }

    interaction::handle_item_drag(ui, state, &axis);

    if let Some(name) = pending_remove {
        if state.remove_file(&name).is_some() {
            tracing::info!(name = %name, "removed file from timeline");
        }
    }

    let rows_bottom = (rows_top + rows_height).min(timeline_rect.max.y);
    let rows_clip = Rect::from_min_max(
        pos2(content_left, rows_area_top),
        pos2(axis.right(), rows_bottom.max(rows_area_top)),
    );

    if let Some(guide) = state.ui.timeline.snap_guide {
        draw_marker(
            &content_painter,
            axis.x_at(guide),
            rows_clip,
            Stroke::new(1.0, theme::ACCENT.gamma_multiply(0.7)),
        );
    }

    draw_ruler(ui, &axis, ruler_top);
    let corner_rect = Rect::from_min_size(
        pos2(timeline_rect.min.x, ruler_top),
        vec2(GROUP_HEADER_WIDTH, RULER_HEIGHT),
    );
    ui.painter()
        .rect_filled(corner_rect, CornerRadius::ZERO, theme::RULER_BG);

    let full_height_clip = Rect::from_min_max(pos2(content_left, ruler_top), content_clip.max);
    let marker_painter = ui.painter().with_clip_rect(full_height_clip);
    if let Some(marker) = state.ui.timeline.nav_marker {
        let x = axis.x_at(marker);
        draw_marker(
            &marker_painter,
            x,
            full_height_clip,
            Stroke::new(1.5, theme::NAV_MARKER),
        );
        let head = Rect::from_center_size(pos2(x, ruler_top + 4.0), vec2(10.0, 8.0));
        marker_painter.rect_filled(head, CornerRadius::same(2), theme::NAV_MARKER);
    }

    state.ui.timeline.hover_time = None;
    if let Some(p) = pointer.filter(|p| full_height_clip.contains(*p)) {
        let pointer_ms = axis.time_at(p.x);
        state.ui.timeline.hover_time = Some(pointer_ms);
        draw_marker(
            &marker_painter,
            p.x,
            full_height_clip,
            Stroke::new(1.0, theme::HOVER_LINE.gamma_multiply(0.6)),
        );

        let dragged = state
            .ui
            .timeline
            .dragging
            .as_ref()
            .and_then(|d| state.project.files.get(&d.name))
            .cloned();
        let lines = tooltip_lines(pointer_ms, dragged.as_ref().or(hovered_item.as_ref()));
        show_tooltip(ui.ctx(), p, &lines);
    }

    if needs_vertical_scroll {
        draw_vertical_scrollbar(
            ui,
            state,
            axis.right(),
            rows_area_top,
            available_rows_height,
            rows_height,
        );
    }
}

fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let head: String = name.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{head}...")
}
