use std::sync::OnceLock;

use gstreamer as gst;

/// Initializes GStreamer once per process. Later calls return the outcome of
/// the first one.
pub fn init_once() -> Result<(), String> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();
    INIT.get_or_init(|| {
        gst::init().map_err(|e| {
            tracing::error!("failed to initialize GStreamer: {e}");
            e.to_string()
        })
    })
    .clone()
}
