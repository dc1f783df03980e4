pub const MIN_VISIBLE_MS: f64 = 1_000.0;
pub const MAX_VISIBLE_MS: f64 = 7.0 * 24.0 * 3_600_000.0;
pub const DEFAULT_VISIBLE_MS: f64 = 60_000.0;
const FIT_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEdge {
    Body,
    Start,
    End,
}

/// An in-progress move or resize of one range item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub name: String,
    pub edge: DragEdge,
    /// Pointer time minus the grabbed edge (the start, for body drags).
    pub grab_offset_ms: i64,
    pub original_start: i64,
    pub original_end: i64,
}

#[derive(Debug, Clone)]
pub struct TimelineView {
    pub view_start_ms: f64,
    pub visible_ms: f64,
    pub vertical_scroll_offset: f32,
    pub dragging: Option<DragState>,
    pub hover_time: Option<i64>,
    pub nav_marker: Option<i64>,
    pub snap_guide: Option<i64>,
    /// A fit requested mid-drag, applied once the drag ends.
    pub fit_deferred: bool,
}

impl Default for TimelineView {
    fn default() -> Self {
        Self {
            view_start_ms: 0.0,
            visible_ms: DEFAULT_VISIBLE_MS,
            vertical_scroll_offset: 0.0,
            dragging: None,
            hover_time: None,
            nav_marker: None,
            snap_guide: None,
            fit_deferred: false,
        }
    }
}

impl TimelineView {
    /// Frames `extent` with a small margin on each side.
    pub fn fit(&mut self, extent: Option<(i64, i64)>) {
        let Some((start, end)) = extent else {
            return;
        };
        let span = (end - start) as f64;
        let margin = (span * FIT_MARGIN).max(MIN_VISIBLE_MS / 2.0);
        self.visible_ms = (span + 2.0 * margin).clamp(MIN_VISIBLE_MS, MAX_VISIBLE_MS);
        self.view_start_ms = start as f64 + span / 2.0 - self.visible_ms / 2.0;
    }

    /// Zooms by `factor` (>1 zooms in) keeping `anchor_ms` under the pointer.
    pub fn zoom_around(&mut self, anchor_ms: f64, factor: f64) {
        if factor <= 0.0 || !factor.is_finite() {
            return;
        }
        let old_visible = self.visible_ms;
        let new_visible = (old_visible / factor).clamp(MIN_VISIBLE_MS, MAX_VISIBLE_MS);
        let anchor_frac = (anchor_ms - self.view_start_ms) / old_visible;
        self.visible_ms = new_visible;
        self.view_start_ms = anchor_ms - anchor_frac * new_visible;
    }

    pub fn pan_ms(&mut self, delta_ms: f64) {
        self.view_start_ms += delta_ms;
    }

    pub fn view_end_ms(&self) -> f64 {
        self.view_start_ms + self.visible_ms
    }
}
