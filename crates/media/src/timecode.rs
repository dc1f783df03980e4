use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimecodeError {
    #[error("TC file is empty")]
    Empty,
    #[error("malformed TC line: {0:?}")]
    MalformedLine(String),
    #[error("malformed timecode: {0:?}")]
    MalformedTimecode(String),
    #[error("could not read TC file: {0}")]
    Io(#[from] std::io::Error),
}

/// Converts `HH:MM:SS` or `HH:MM:SS:FF` to milliseconds. Frames are dropped.
pub fn time_str_to_millis(time_str: &str) -> Result<i64, TimecodeError> {
    let malformed = || TimecodeError::MalformedTimecode(time_str.to_string());
    let fields = time_str
        .trim()
        .split([':', ';'])
        .take(3)
        .map(|p| p.trim().parse::<i64>().ok().filter(|v| *v >= 0))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(malformed)?;
    let [h, m, s] = fields[..] else {
        return Err(malformed());
    };
    h.checked_mul(3600)
        .and_then(|v| v.checked_add(m.checked_mul(60)?))
        .and_then(|v| v.checked_add(s))
        .and_then(|v| v.checked_mul(1000))
        .ok_or_else(malformed)
}

/// Extracts the first and last timecodes of a `.tc` log. Each line is
/// `<field>,<hour>,<minute>,<second>,...`.
pub fn parse_tc_log(contents: &str) -> Result<(String, String), TimecodeError> {
    let mut lines = contents.lines().map(str::trim).filter(|l| !l.is_empty());
    let first = lines.next().ok_or(TimecodeError::Empty)?;
    let last = lines.last().unwrap_or(first);
    Ok((line_timecode(first)?, line_timecode(last)?))
}

fn line_timecode(line: &str) -> Result<String, TimecodeError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 4 {
        return Err(TimecodeError::MalformedLine(line.to_string()));
    }
    Ok(format!(
        "{:0>2}:{:0>2}:{:0>2}",
        fields[1].trim(),
        fields[2].trim(),
        fields[3].trim()
    ))
}

pub fn read_tc_file(path: &Path) -> Result<(String, String), TimecodeError> {
    let bytes = std::fs::read(path)?;
    parse_tc_log(&String::from_utf8_lossy(&bytes))
}
