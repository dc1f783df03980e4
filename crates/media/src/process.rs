use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::metadata::{self, MetadataError};
use crate::probe::{self, ProbeError};
use crate::timecode::{self, TimecodeError};

const DAY_MS: i64 = 24 * 3_600_000;
const ZERO_TIMECODE: &str = "00:00:00:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    TimecodeLog,
    Mp4,
}

impl MediaKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".tc") {
            Some(Self::TimecodeLog)
        } else if lower.ends_with(".mp4") {
            Some(Self::Mp4)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Unsupported file type")]
    Unsupported,
    #[error(transparent)]
    Timecode(#[from] TimecodeError),
    #[error(transparent)]
    Probe(#[from] ProbeError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub ffprobe: Option<PathBuf>,
}

/// Works out the time range covered by the file at `path`. `original_name`
/// is the client-side filename, which picks the extraction strategy.
pub fn process_file(
    path: &Path,
    original_name: &str,
    options: &ProcessOptions,
) -> Result<TimeRange, ProcessError> {
    let kind = MediaKind::from_name(original_name).ok_or(ProcessError::Unsupported)?;
    let range = match kind {
        MediaKind::TimecodeLog => timecode_log_range(path)?,
        MediaKind::Mp4 => mp4_range(path, options)?,
    };
    tracing::info!(
        name = original_name,
        start_ms = range.start_ms,
        end_ms = range.end_ms,
        "processed upload"
    );
    Ok(range)
}

fn timecode_log_range(path: &Path) -> Result<TimeRange, ProcessError> {
    let (start, end) = timecode::read_tc_file(path)?;
    let start_ms = timecode::time_str_to_millis(&start)?;
    let mut end_ms = timecode::time_str_to_millis(&end)?;
    // A log that runs past midnight restarts its clock at 00:00:00.
    if end_ms < start_ms {
        end_ms = end_ms.saturating_add(DAY_MS);
    }
    Ok(TimeRange { start_ms, end_ms })
}

fn mp4_range(path: &Path, options: &ProcessOptions) -> Result<TimeRange, ProcessError> {
    let ffprobe = probe::find_ffprobe(options.ffprobe.as_deref())?;
    let start = probe::probe_timecode(&ffprobe, path)?.unwrap_or_else(|| {
        tracing::debug!("no embedded timecode in {}", path.display());
        ZERO_TIMECODE.to_string()
    });
    let start_ms = timecode::time_str_to_millis(&start)?;
    let duration = metadata::discover_duration(path)?;
    let end_ms = start_ms.saturating_add((duration.as_secs_f64() * 1000.0).round() as i64);
    Ok(TimeRange { start_ms, end_ms })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tc(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".tc").tempfile().unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn kind_is_chosen_by_extension() {
        assert_eq!(MediaKind::from_name("A.TC"), Some(MediaKind::TimecodeLog));
        assert_eq!(MediaKind::from_name("clip.Mp4"), Some(MediaKind::Mp4));
        assert_eq!(MediaKind::from_name("clip.mov"), None);
    }

    #[test]
    fn timecode_log_yields_first_and_last_times() {
        let file = write_tc("1,10,0,0,0\n1,10,0,1,0\n1,10,0,5,0\n");
        let range = process_file(file.path(), "take.tc", &ProcessOptions::default()).unwrap();
        assert_eq!(
            range,
            TimeRange {
                start_ms: 36_000_000,
                end_ms: 36_005_000
            }
        );
    }

    #[test]
    fn timecode_log_across_midnight_wraps() {
        let file = write_tc("1,23,59,58,0\n1,0,0,2,0\n");
        let range = process_file(file.path(), "night.tc", &ProcessOptions::default()).unwrap();
        assert_eq!(range.end_ms - range.start_ms, 4_000);
    }

    #[test]
    fn empty_timecode_log_fails() {
        let file = write_tc("\n\n");
        let err = process_file(file.path(), "empty.tc", &ProcessOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "TC file is empty");
    }

    #[test]
    fn huge_hour_field_is_a_timecode_error() {
        let file = write_tc("1,9999999999999999,0,0\n");
        let err = process_file(file.path(), "huge.tc", &ProcessOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Timecode(TimecodeError::MalformedTimecode(_))
        ));
    }

    #[test]
    fn other_extensions_are_unsupported() {
        let file = write_tc("irrelevant");
        let err = process_file(file.path(), "notes.txt", &ProcessOptions::default()).unwrap_err();
        assert!(matches!(err, ProcessError::Unsupported));
        assert_eq!(err.to_string(), "Unsupported file type");
    }

    #[test]
    fn mp4_without_ffprobe_reports_missing_binary() {
        let file = write_tc("");
        let options = ProcessOptions {
            ffprobe: Some(PathBuf::from("/definitely/not/here/ffprobe")),
        };
        let err = process_file(file.path(), "clip.mp4", &options).unwrap_err();
        assert!(matches!(err, ProcessError::Probe(ProbeError::FfprobeMissing)));
    }
}
