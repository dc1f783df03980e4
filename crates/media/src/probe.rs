use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("ffprobe not found next to the server or on PATH; please install FFmpeg (ffprobe)")]
    FfprobeMissing,
    #[error("ffprobe failed: {0}")]
    FfprobeFailed(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeStream {
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeJson {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

/// Resolves the ffprobe binary: an explicit path wins, then one shipped
/// beside the running executable, then `PATH`.
pub fn find_ffprobe(explicit: Option<&Path>) -> Result<PathBuf, ProbeError> {
    if let Some(path) = explicit {
        return if path.exists() {
            Ok(path.to_path_buf())
        } else {
            Err(ProbeError::FfprobeMissing)
        };
    }

    let local_name = if cfg!(windows) { "ffprobe.exe" } else { "ffprobe" };
    if let Some(local) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(local_name)))
        .filter(|p| p.is_file())
    {
        tracing::info!("using local ffprobe at {}", local.display());
        return Ok(local);
    }

    which::which("ffprobe").map_err(|_| ProbeError::FfprobeMissing)
}

/// Reads the embedded start timecode of a media file, if it carries one.
pub fn probe_timecode(ffprobe: &Path, path: &Path) -> Result<Option<String>, ProbeError> {
    let out = Command::new(ffprobe)
        .args(["-v", "error"])
        .args(["-show_entries", "format_tags=timecode:stream_tags=timecode"])
        .args(["-of", "json"])
        .arg(path)
        .output()
        .map_err(|e| ProbeError::FfprobeFailed(e.to_string()))?;
    if !out.status.success() {
        return Err(ProbeError::FfprobeFailed(
            String::from_utf8_lossy(&out.stderr).into(),
        ));
    }
    timecode_from_json(&out.stdout)
}

pub(crate) fn timecode_from_json(stdout: &[u8]) -> Result<Option<String>, ProbeError> {
    let parsed: FfprobeJson =
        serde_json::from_slice(stdout).map_err(|e| ProbeError::Parse(e.to_string()))?;

    if let Some(tc) = parsed.format.as_ref().and_then(|f| non_empty_tag(&f.tags)) {
        return Ok(Some(tc));
    }

    // Video tracks and tmcd data tracks both carry it as a stream tag.
    Ok(parsed.streams.iter().find_map(|s| non_empty_tag(&s.tags)))
}

fn non_empty_tag(tags: &HashMap<String, String>) -> Option<String> {
    tags.get("timecode")
        .map(|tc| tc.trim().to_string())
        .filter(|tc| !tc.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tag_takes_precedence() {
        let json = br#"{
            "streams": [{"index": 0, "codec_type": "video", "tags": {"timecode": "02:00:00:00"}}],
            "format": {"tags": {"timecode": "01:00:00:00"}}
        }"#;
        assert_eq!(
            timecode_from_json(json).unwrap().as_deref(),
            Some("01:00:00:00")
        );
    }

    #[test]
    fn falls_back_to_stream_tags() {
        let json = br#"{
            "streams": [
                {"index": 0, "codec_type": "video", "tags": {"language": "und"}},
                {"index": 2, "codec_type": "data", "codec_tag_string": "tmcd", "tags": {"timecode": "13:45:10:05"}}
            ],
            "format": {}
        }"#;
        assert_eq!(
            timecode_from_json(json).unwrap().as_deref(),
            Some("13:45:10:05")
        );
    }

    #[test]
    fn missing_timecode_is_none() {
        let json = br#"{"streams": [{"index": 0, "codec_type": "audio"}], "format": {"tags": {}}}"#;
        assert_eq!(timecode_from_json(json).unwrap(), None);
        assert_eq!(timecode_from_json(b"{}").unwrap(), None);
    }

    #[test]
    fn garbage_output_is_a_parse_error() {
        assert!(matches!(
            timecode_from_json(b"not json"),
            Err(ProbeError::Parse(_))
        ));
    }

    #[test]
    fn explicit_missing_binary_is_reported() {
        let missing = Path::new("/definitely/not/here/ffprobe");
        assert!(matches!(
            find_ffprobe(Some(missing)),
            Err(ProbeError::FfprobeMissing)
        ));
    }
}
