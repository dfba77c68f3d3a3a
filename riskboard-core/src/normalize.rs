//! Normalization helpers
//!
//! Turn nullable inputs into arithmetic-safe values. Degenerate cases (missing values,
//! empty collections) produce 0 rather than NaN or an error.

use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Missing numeric field counts as 0
pub fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Arithmetic mean, 0 for an empty sequence
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Elapsed time between two instants in fractional hours (negative if `end < start`)
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Clamp to [0, 100]; a negative zero comes back as positive zero
pub fn clamp_percentage(value: f64) -> f64 {
    value.clamp(0.0, 100.0) + 0.0
}
