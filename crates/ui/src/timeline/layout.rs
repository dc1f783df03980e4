use egui::{pos2, vec2, Rect, Vec2};
use tcline_state::meta::FileMeta;
use tcline_state::timeline::{DragEdge, TimelineView};

pub const GROUP_HEIGHT: f32 = 40.0;
pub const GROUP_GAP: f32 = 2.0;
pub const GROUP_HEADER_WIDTH: f32 = 220.0;
pub const RULER_HEIGHT: f32 = 24.0;
pub const V_SCROLLBAR_WIDTH: f32 = 10.0;
pub const EDGE_HANDLE_WIDTH: f32 = 8.0;
pub const ITEM_INSET: f32 = 4.0;
pub const REMOVE_BUTTON_SIZE: Vec2 = vec2(20.0, 20.0);
pub const TOOLTIP_OFFSET: Vec2 = vec2(15.0, -10.0);
const MIN_TICK_SPACING_PX: f64 = 90.0;

const TICK_STEPS_MS: &[i64] = &[
    1_000, 2_000, 5_000, 10_000, 15_000, 30_000, 60_000, 120_000, 300_000, 600_000, 900_000,
    1_800_000, 3_600_000, 7_200_000, 10_800_000, 21_600_000, 43_200_000, 86_400_000,
];

/// Maps between timeline milliseconds and screen x for the visible window.
#[derive(Debug, Clone, Copy)]
pub struct TimeAxis {
    pub left: f32,
    pub width: f32,
    pub view_start_ms: f64,
    pub visible_ms: f64,
}

impl TimeAxis {
    pub fn new(left: f32, width: f32, view: &TimelineView) -> Self {
        Self {
            left,
            width,
            view_start_ms: view.view_start_ms,
            visible_ms: view.visible_ms,
        }
    }

    pub fn ms_per_px(&self) -> f64 {
        self.visible_ms / self.width.max(1.0) as f64
    }

    pub fn x_at(&self, t_ms: i64) -> f32 {
        self.left + ((t_ms as f64 - self.view_start_ms) / self.ms_per_px()) as f32
    }

    pub fn time_at(&self, x: f32) -> i64 {
        (self.view_start_ms + (x - self.left) as f64 * self.ms_per_px()).round() as i64
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

pub fn tick_step_ms(axis: &TimeAxis) -> i64 {
    let min_step = MIN_TICK_SPACING_PX * axis.ms_per_px();
    TICK_STEPS_MS
        .iter()
        .copied()
        .find(|step| *step as f64 >= min_step)
        .unwrap_or(TICK_STEPS_MS[TICK_STEPS_MS.len() - 1])
}

pub fn group_top(rows_top: f32, index: usize) -> f32 {
    rows_top + index as f32 * (GROUP_HEIGHT + GROUP_GAP)
}

pub fn total_rows_height(rows: usize) -> f32 {
    rows as f32 * (GROUP_HEIGHT + GROUP_GAP)
}

pub fn item_rect(axis: &TimeAxis, row_top: f32, meta: &FileMeta) -> Rect {
    let x0 = axis.x_at(meta.start_time);
    let x1 = axis.x_at(meta.end_time).max(x0 + 2.0);
    Rect::from_min_max(
        pos2(x0, row_top + ITEM_INSET),
        pos2(x1, row_top + GROUP_HEIGHT - ITEM_INSET),
    )
}

/// Which part of an item a press at `x` grabs. Handles shrink on narrow
/// items so the body stays grabbable.
pub fn edge_at(item: Rect, x: f32) -> DragEdge {
    let handle = EDGE_HANDLE_WIDTH.min(item.width() / 3.0);
    if (x - item.min.x).abs() < handle {
        DragEdge::Start
    } else if (x - item.max.x).abs() < handle {
        DragEdge::End
    } else {
        DragEdge::Body
    }
}
