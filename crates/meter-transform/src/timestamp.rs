//! Unix timestamp formatting.

use chrono::DateTime;

use crate::error::{Result, TransformError};

/// Fixed shift applied to logger timestamps before display.
///
/// Kept exactly as the data loggers' export tooling applied it. Whether it
/// corrects a timezone or a clock drift is not documented.
pub const LEGACY_TIMESTAMP_OFFSET_SECS: i64 = 800 + 2639;

const TIMESTRING_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIMESTRING: &str = "timestring";

/// Formats `unix_ts + offset_secs` as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Fractional seconds are truncated towards the earlier second.
pub fn format_timestamp_with_offset(unix_ts: f64, offset_secs: i64) -> Result<String> {
    let shifted = unix_ts + offset_secs as f64;
    if !shifted.is_finite() || shifted.abs() >= i64::MAX as f64 {
        return Err(TransformError::TimestampOutOfRange { value: unix_ts });
    }
    let secs = shifted.floor() as i64;
    let datetime = DateTime::from_timestamp(secs, 0)
        .ok_or(TransformError::TimestampOutOfRange { value: unix_ts })?;
    Ok(datetime.format(TIMESTRING_FORMAT).to_string())
}

/// Formats a logger timestamp with the fixed legacy offset
/// ([`LEGACY_TIMESTAMP_OFFSET_SECS`]).
pub fn convert_timestamp_to_local_string(unix_ts: f64) -> Result<String> {
    format_timestamp_with_offset(unix_ts, LEGACY_TIMESTAMP_OFFSET_SECS)
}

fn timestring_slice(value: &str, start: usize, end: usize) -> Result<&str> {
    value
        .get(start..end)
        .filter(|slice| slice.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| {
            TransformError::malformed(
                TIMESTRING,
                value,
                format!("expected digits at {start}..{end}"),
            )
        })
}

/// Hour of a `YYYY-MM-DD HH:MM:SS` string.
pub fn hour_of_timestring(value: &str) -> Result<u32> {
    let hour = timestring_slice(value, 11, 13)?;
    hour.parse()
        .map_err(|_| TransformError::malformed(TIMESTRING, value, "invalid hour"))
}

/// `YYYYMMDD` as a number, from a `YYYY-MM-DD HH:MM:SS` string.
pub fn yyyymmdd_of_timestring(value: &str) -> Result<u32> {
    let year = timestring_slice(value, 0, 4)?;
    let month = timestring_slice(value, 5, 7)?;
    let day = timestring_slice(value, 8, 10)?;
    format!("{year}{month}{day}")
        .parse()
        .map_err(|_| TransformError::malformed(TIMESTRING, value, "invalid date"))
}
