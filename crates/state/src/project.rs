use crate::meta::FileMeta;
use crate::snap::{self, SnappedRange};
use crate::status::StatusLog;
use crate::store::MetadataStore;
use crate::timeline::{DragEdge, DragState, TimelineView};

#[derive(Debug, Clone, Default)]
pub struct ProjectState {
    pub files: MetadataStore,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub timeline: TimelineView,
    pub status: StatusLog,
    pub files_hovering: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub project: ProjectState,
    pub ui: UiState,
}

impl AppState {
    /// Merges a processed upload, then refits the view and refreshes the
    /// status headline.
    pub fn apply_upload(&mut self, meta: FileMeta) {
        if self
            .ui
            .timeline
            .dragging
            .as_ref()
            .is_some_and(|d| d.name == meta.name)
        {
            self.end_drag();
        }
        self.project.files.insert(meta);
        self.after_store_change();
    }

    pub fn upload_failed(&mut self, name: &str, message: &str) {
        self.ui.status.error(name, message);
    }

    pub fn remove_file(&mut self, name: &str) -> Option<FileMeta> {
        let removed = self.project.files.remove(name)?;
        if self
            .ui
            .timeline
            .dragging
            .as_ref()
            .is_some_and(|d| d.name == name)
        {
            self.end_drag();
        }
        self.after_store_change();
        Some(removed)
    }

    fn after_store_change(&mut self) {
        if self.ui.timeline.dragging.is_some() {
            self.ui.timeline.fit_deferred = true;
        } else {
            self.ui.timeline.fit(self.project.files.extent());
        }
        self.ui.status.summarize(self.project.files.len());
    }

    /// Refreshes the headline once a batch has nothing left in flight.
    pub fn batch_settled(&mut self) {
        self.ui.status.summarize(self.project.files.len());
    }

    pub fn begin_drag(&mut self, name: &str, edge: DragEdge, pointer_ms: i64) -> bool {
        let Some(meta) = self.project.files.get(name) else {
            return false;
        };
        let anchor = match edge {
            DragEdge::Body | DragEdge::Start => meta.start_time,
            DragEdge::End => meta.end_time,
        };
        self.ui.timeline.dragging = Some(DragState {
            name: name.to_string(),
            edge,
            grab_offset_ms: pointer_ms - anchor,
            original_start: meta.start_time,
            original_end: meta.end_time,
        });
        true
    }

    /// Moves or resizes the dragged item to follow the pointer, snapping each
    /// edge to the other items.
    pub fn update_drag(&mut self, pointer_ms: i64) -> Option<SnappedRange> {
        let drag = self.ui.timeline.dragging.clone()?;
        let target = pointer_ms - drag.grab_offset_ms;
        let files = &self.project.files;

        let range = match drag.edge {
            DragEdge::Body => {
                let duration = drag.original_end - drag.original_start;
                snap::snap_range(files, &drag.name, target, target + duration)
            }
            DragEdge::Start => {
                let (start, start_snapped) =
                    snap::snap_to_items(files, target.min(drag.original_end), Some(&drag.name));
                SnappedRange {
                    start: start.min(drag.original_end),
                    end: drag.original_end,
                    start_snapped,
                    end_snapped: false,
                }
            }
            DragEdge::End => {
                let (end, end_snapped) =
                    snap::snap_to_items(files, target.max(drag.original_start), Some(&drag.name));
                SnappedRange {
                    start: drag.original_start,
                    end: end.max(drag.original_start),
                    start_snapped: false,
                    end_snapped,
                }
            }
        };

        if !self
            .project
            .files
            .set_range(&drag.name, range.start, range.end)
        {
            self.ui.timeline.dragging = None;
            return None;
        }
        self.ui.timeline.snap_guide = range.guide();
        Some(range)
    }

    pub fn end_drag(&mut self) -> Option<DragState> {
        self.ui.timeline.snap_guide = None;
        let drag = self.ui.timeline.dragging.take();
        if std::mem::take(&mut self.ui.timeline.fit_deferred) {
            self.ui.timeline.fit(self.project.files.extent());
        }
        drag
    }

    /// Places the navigation marker at the snapped `t`.
    pub fn navigate_to(&mut self, t: i64) -> (i64, bool) {
        let (time, snapped) = snap::snap_to_items(&self.project.files, t, None);
        self.ui.timeline.nav_marker = Some(time);
        (time, snapped)
    }
}
