use std::path::Path;
use std::time::Duration;

use gstreamer as gst;
use gstreamer_pbutils as gst_pbutils;
use thiserror::Error;

use crate::gst_init::init_once;

const DISCOVER_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("GStreamer unavailable: {0}")]
    Init(String),
    #[error("invalid media path: {0}")]
    BadPath(String),
    #[error("could not inspect media: {0}")]
    Discover(String),
    #[error("media reports no duration")]
    NoDuration,
}

/// Asks GStreamer's discoverer for the container duration.
pub fn discover_duration(path: &Path) -> Result<Duration, MetadataError> {
    init_once().map_err(MetadataError::Init)?;

    let uri = url_from_path(path)
        .ok_or_else(|| MetadataError::BadPath(path.display().to_string()))?;

    let discoverer =
        gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(DISCOVER_TIMEOUT_SECS))
            .map_err(|e| MetadataError::Discover(e.to_string()))?;

    let info = discoverer
        .discover_uri(&uri)
        .map_err(|e| MetadataError::Discover(e.to_string()))?;

    let duration = info.duration().ok_or(MetadataError::NoDuration)?;
    tracing::debug!(uri = %uri, nanos = duration.nseconds(), "discovered duration");
    Ok(Duration::from_nanos(duration.nseconds()))
}

fn url_from_path(path: &Path) -> Option<String> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };
    gst::glib::filename_to_uri(&abs, None)
        .ok()
        .map(|u| u.to_string())
}
