//! Rendering of second counts for display

/// Format seconds as a clock, e.g. `0:45`, `1:30` or `1:01:01`.
///
/// Hours appear only when there is at least one; the leading field is never
/// padded and the rest are always two digits.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format a detected duration for a suggestion chip, e.g. `1h 30m`,
/// `2 min 15s` or `45s`.
///
/// Only the two largest units are shown: seconds are dropped once there is an
/// hour.
pub fn format_detected(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        if minutes > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{}h", hours)
        }
    } else if minutes > 0 {
        if secs > 0 {
            format!("{} min {}s", minutes, secs)
        } else {
            format!("{} min", minutes)
        }
    } else {
        format!("{}s", secs)
    }
}
