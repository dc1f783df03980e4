use std::fmt;

pub const READY_MESSAGE: &str = "Ready. Drag files or click to upload.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Skipped(String),
    Error { name: String, message: String },
}

impl StatusLine {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(name) => write!(f, "Skipping already processed file: {name}"),
            Self::Error { name, message } => write!(f, "Error processing {name}: {message}"),
        }
    }
}

/// Inline status text: one headline plus the notices of the latest batch.
#[derive(Debug, Clone)]
pub struct StatusLog {
    headline: String,
    lines: Vec<StatusLine>,
}

impl Default for StatusLog {
    fn default() -> Self {
        Self {
            headline: READY_MESSAGE.to_string(),
            lines: Vec::new(),
        }
    }
}

impl StatusLog {
    pub fn begin_batch(&mut self, file_count: usize) {
        self.headline = format!("Uploading and processing {file_count} file(s)...");
        self.lines.clear();
    }

    pub fn skipped(&mut self, name: impl Into<String>) {
        self.lines.push(StatusLine::Skipped(name.into()));
    }

    pub fn error(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.lines.push(StatusLine::Error {
            name: name.into(),
            message: message.into(),
        });
    }

    pub fn summarize(&mut self, loaded: usize) {
        self.headline = if loaded > 0 {
            format!("Timeline Updated: {loaded} file(s) loaded.")
        } else {
            READY_MESSAGE.to_string()
        };
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn lines(&self) -> &[StatusLine] {
        &self.lines
    }
}
