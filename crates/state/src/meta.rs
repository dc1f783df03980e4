use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Timecode,
    Video,
}

impl RangeKind {
    pub fn from_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".tc") {
            Self::Timecode
        } else {
            Self::Video
        }
    }
}

/// One uploaded file and the wall-clock interval it covers, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub name: String,
    pub start_time: i64,
    pub end_time: i64,
}

impl FileMeta {
    /// `end_time` is raised to `start_time` if it would precede it.
    pub fn new(name: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            name: name.into(),
            start_time,
            end_time: end_time.max(start_time),
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_time - self.start_time
    }

    pub fn kind(&self) -> RangeKind {
        RangeKind::from_name(&self.name)
    }

    pub fn contains(&self, t: i64) -> bool {
        t >= self.start_time && t < self.end_time
    }

    /// Whole-second duration shown inside the range item.
    pub fn duration_label(&self) -> String {
        format!("{}s", (self.duration_ms() + 500) / 1000)
    }

    pub fn set_range(&mut self, start_time: i64, end_time: i64) {
        self.start_time = start_time;
        self.end_time = end_time.max(start_time);
    }
}
