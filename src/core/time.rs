use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

/// Maps a timestamp to an axis scalar: unix seconds with sub-second precision.
#[must_use]
pub fn datetime_to_scalar(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Inverse of [`datetime_to_scalar`]. Returns `None` for values outside the
/// representable chrono range.
#[must_use]
pub fn scalar_to_datetime(scalar: f64) -> Option<DateTime<Utc>> {
    if !scalar.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt((scalar * 1000.0).round() as i64)
        .single()
}

/// Converts a deferred-display delay in seconds to a scheduler duration.
/// Non-finite or negative delays collapse to zero.
#[must_use]
pub fn delay_to_duration(seconds: f64) -> Duration {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(seconds)
}
