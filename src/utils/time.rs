//! Duration and distance formatting shared by the summary cards and the
//! timeline. Durations are non-negative by contract with the backend; a
//! negative value trips a debug assertion but still formats by flooring, so
//! release builds never panic on hostile input.

use chrono::{DateTime, TimeZone, Timelike};

/// Meters per statute mile, matching the routing provider's distance unit.
const METERS_PER_MILE: f64 = 1609.344;

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Formats a duration as `"2 hrs and 30 minutes"`, omitting a unit when it
/// is zero. Both zero yields the literal `"0 minutes"`.
pub fn to_hour_string(seconds: f64) -> String {
    debug_assert!(seconds >= 0.0, "negative duration: {seconds}");

    let hrs = (seconds / SECONDS_PER_HOUR).floor() as i64;
    let mins = ((seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE).floor() as i64;

    let mut parts = Vec::new();
    if hrs != 0 {
        parts.push(format!("{} hr{}", hrs, if hrs != 1 { "s" } else { "" }));
    }
    if mins != 0 {
        parts.push(format!("{} minute{}", mins, if mins != 1 { "s" } else { "" }));
    }

    if parts.is_empty() {
        "0 minutes".to_string()
    } else {
        parts.join(" and ")
    }
}

/// Whole hours in a duration.
pub fn to_hours(seconds: f64) -> i64 {
    debug_assert!(seconds >= 0.0, "negative duration: {seconds}");
    (seconds / SECONDS_PER_HOUR).floor() as i64
}

/// Compact `"1h 5m 30s"` form used in timeline tooltips; the seconds part is
/// omitted when zero.
pub fn to_hms_string(seconds: f64) -> String {
    debug_assert!(seconds >= 0.0, "negative duration: {seconds}");

    let h = (seconds / SECONDS_PER_HOUR).floor() as i64;
    let m = ((seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE).floor() as i64;
    let s = (seconds % SECONDS_PER_MINUTE).floor() as i64;

    if s != 0 {
        format!("{h}h {m}m {s}s")
    } else {
        format!("{h}h {m}m")
    }
}

/// Meters to miles with exactly two decimal places.
pub fn to_miles(meters: f64) -> String {
    format!("{:.2}", meters / METERS_PER_MILE)
}

/// Seconds elapsed since midnight of the timestamp's own calendar day,
/// fractional part included.
pub fn clock_seconds<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> f64 {
    f64::from(timestamp.hour()) * SECONDS_PER_HOUR
        + f64::from(timestamp.minute()) * SECONDS_PER_MINUTE
        + f64::from(timestamp.second())
        + f64::from(timestamp.nanosecond()) / 1e9
}
