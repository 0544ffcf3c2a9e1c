//! Time-key derivation for hourly grouping.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use meter_model::{DATE_COLUMN, DAY_COLUMN, HOUR_COLUMN, MONTH_COLUMN, TIME_COLUMN};

use crate::error::{Result, TransformError};

/// Reads the two-digit number at `start..start + 2`.
fn two_digit_field(column: &str, value: &str, start: usize) -> Result<f64> {
    let end = start + 2;
    let Some(slice) = value.get(start..end) else {
        return Err(TransformError::malformed(
            column,
            value,
            format!("expected at least {end} characters"),
        ));
    };
    let bytes = slice.as_bytes();
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(TransformError::malformed(
            column,
            value,
            format!("'{slice}' is not numeric"),
        ));
    }
    Ok(f64::from((bytes[0] - b'0') * 10 + (bytes[1] - b'0')))
}

/// Month from a `YYYYMMDD` string (characters 4..6).
pub fn month_of(date: &str) -> Result<f64> {
    two_digit_field(DATE_COLUMN, date, 4)
}

/// Day of month from a `YYYYMMDD` string (characters 6..8).
pub fn day_of(date: &str) -> Result<f64> {
    two_digit_field(DATE_COLUMN, date, 6)
}

/// Hour from an `HHMMSS` string (characters 0..2).
pub fn hour_of(time: &str) -> Result<f64> {
    two_digit_field(TIME_COLUMN, time, 0)
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df
        .column(name)
        .map_err(|_| TransformError::MissingColumn {
            column: name.to_string(),
        })?;
    column
        .str()?
        .into_iter()
        .map(|value| {
            value
                .map(str::to_string)
                .ok_or_else(|| TransformError::malformed(name, "", "missing value"))
        })
        .collect()
}

/// Adds `Month`, `Day` and `Hour` columns (`Float64`) derived from the
/// `YYYYMMDD` and `hhmmss` string columns.
///
/// # Errors
///
/// [`TransformError::MissingColumn`] if either source column is absent,
/// [`TransformError::MalformedTimeField`] if a value is too short or not
/// numeric in the extracted slice.
pub fn derive_time_keys(df: &mut DataFrame) -> Result<()> {
    let dates = string_values(df, DATE_COLUMN)?;
    let times = string_values(df, TIME_COLUMN)?;

    let months = dates
        .iter()
        .map(String::as_str)
        .map(month_of)
        .collect::<Result<Vec<f64>>>()?;
    let days = dates
        .iter()
        .map(String::as_str)
        .map(day_of)
        .collect::<Result<Vec<f64>>>()?;
    let hours = times
        .iter()
        .map(String::as_str)
        .map(hour_of)
        .collect::<Result<Vec<f64>>>()?;

    df.with_column(Series::new(MONTH_COLUMN.into(), months).into_column())?;
    df.with_column(Series::new(DAY_COLUMN.into(), days).into_column())?;
    df.with_column(Series::new(HOUR_COLUMN.into(), hours).into_column())?;
    Ok(())
}
