/// Formats a millisecond timestamp as `HH:MM:SS`, optionally with a
/// `.mmm` suffix. Hours are not wrapped at 24. Negative inputs render as
/// `00:00:00`.
pub fn millis_to_hms(ms: i64, include_millis: bool) -> String {
    if ms < 0 {
        return "00:00:00".to_string();
    }
    let total_secs = ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    if include_millis {
        format!("{h:02}:{m:02}:{s:02}.{:03}", ms % 1000)
    } else {
        format!("{h:02}:{m:02}:{s:02}")
    }
}
