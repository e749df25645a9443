//! Human-readable renderings of a remaining interval.

use super::SECONDS_PER_YEAR;

/// Formats whole seconds as `"D days, H hrs, M mins, S sec"`.
///
/// Leading zero units are omitted; seconds are always shown. Negative
/// input is clamped to zero.
pub fn format_interval(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{days} days"));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{hours} hrs"));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{minutes} mins"));
    }
    parts.push(format!("{seconds} sec"));
    parts.join(", ")
}

/// Whole fixed-ratio years in `seconds`, truncated toward zero.
pub fn approximate_years(seconds: f64) -> i64 {
    (seconds / SECONDS_PER_YEAR).trunc() as i64
}

/// One-line summary shown once the quiz is done.
pub fn welcome_message(seconds_remaining: f64) -> String {
    format!(
        "You have approximately {} years left to live",
        approximate_years(seconds_remaining)
    )
}
