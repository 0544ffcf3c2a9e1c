//! Meter data transformation.
//!
//! This crate turns raw records into analysis-ready frames:
//!
//! - **sanitize**: error tagging, type coercion, range validation and
//!   incomplete-row elimination
//! - **frame**: typed polars frames from sanitized records
//! - **time_keys**: `Month`, `Day` and `Hour` columns from the date and
//!   time-of-day strings
//! - **aggregate**: hourly means grouped by `(Hour, YYYYMMDD)`
//! - **timestamp**: unix timestamp formatting helpers

pub mod aggregate;
pub mod error;
pub mod frame;
pub mod sanitize;
pub mod time_keys;
pub mod timestamp;

pub use aggregate::{aggregate_hourly, hourly_mean};
pub use error::{Result, TransformError};
pub use frame::build_frame;
pub use sanitize::{
    ERROR_MARKER, SanitizeStats, Sanitized, coerce_types, drop_incomplete_rows,
    invalidate_out_of_range, sanitize, sanitize_table, tag_errors,
};
pub use time_keys::{day_of, derive_time_keys, hour_of, month_of};
pub use timestamp::{
    LEGACY_TIMESTAMP_OFFSET_SECS, convert_timestamp_to_local_string, format_timestamp_with_offset,
    hour_of_timestring, yyyymmdd_of_timestring,
};
