use crate::store::MetadataStore;

/// Boundaries closer than this pull a candidate time onto themselves.
pub const SNAP_TOLERANCE_MS: u64 = 500;

/// Returns the boundary nearest to `candidate` when it lies strictly within
/// [`SNAP_TOLERANCE_MS`], else `candidate` itself. The flag reports whether
/// a snap happened. On equal distances the earliest boundary in iteration
/// order wins.
pub fn snap_time(candidate: i64, boundaries: impl IntoIterator<Item = i64>) -> (i64, bool) {
    snap_time_within(candidate, boundaries, SNAP_TOLERANCE_MS)
}

pub fn snap_time_within(
    candidate: i64,
    boundaries: impl IntoIterator<Item = i64>,
    tolerance_ms: u64,
) -> (i64, bool) {
    let mut best: Option<(i64, u64)> = None;
    for boundary in boundaries {
        let dist = candidate.abs_diff(boundary);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((boundary, dist));
        }
    }

    match best {
        Some((boundary, dist)) if dist < tolerance_ms => (boundary, true),
        _ => (candidate, false),
    }
}

/// Snaps against every rendered item except `exclude`.
pub fn snap_to_items(store: &MetadataStore, candidate: i64, exclude: Option<&str>) -> (i64, bool) {
    snap_time(candidate, store.boundaries(exclude))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnappedRange {
    pub start: i64,
    pub end: i64,
    pub start_snapped: bool,
    pub end_snapped: bool,
}

impl SnappedRange {
    pub fn guide(&self) -> Option<i64> {
        if self.start_snapped {
            Some(self.start)
        } else if self.end_snapped {
            Some(self.end)
        } else {
            None
        }
    }
}

/// Snaps both edges of `name`'s candidate range independently against the
/// other items.
pub fn snap_range(store: &MetadataStore, name: &str, start: i64, end: i64) -> SnappedRange {
    let (start, start_snapped) = snap_to_items(store, start, Some(name));
    let (end, end_snapped) = snap_to_items(store, end, Some(name));
    SnappedRange {
        start,
        end: end.max(start),
        start_snapped,
        end_snapped,
    }
}
