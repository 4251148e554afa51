use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

/// Converts an exact sample value into the `f64` space axes work in.
pub fn decimal_to_f64(value: Decimal, field: &str) -> ChartResult<f64> {
    match value.to_f64() {
        Some(converted) if converted.is_finite() => Ok(converted),
        _ => Err(ChartError::InvalidData(format!(
            "sample {field} `{value}` has no f64 representation"
        ))),
    }
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts epoch milliseconds into a UTC datetime.
///
/// Fractional milliseconds are floored. Returns `None` for non-finite input or
/// values outside chrono's representable range.
#[must_use]
pub fn unix_millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.floor() as i64)
}
