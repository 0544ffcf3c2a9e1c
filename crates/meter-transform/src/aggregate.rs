//! Hourly aggregation.

use polars::prelude::{DataFrame, DataType, Expr, IntoLazy, SortMultipleOptions, col};

use meter_model::{DATE_COLUMN, HOUR_COLUMN};

use crate::error::{Result, TransformError};
use crate::time_keys::derive_time_keys;

/// Averages a batch per `(Hour, YYYYMMDD)` group.
///
/// Every `Float64` column other than the keys is reduced by arithmetic
/// mean; non-numeric columns outside the key (such as `hhmmss`) are
/// dropped. The result holds `Hour`, `YYYYMMDD`, then the averaged
/// columns in their original order, sorted by `Hour` and then date.
pub fn hourly_mean(df: &DataFrame) -> Result<DataFrame> {
    for key in [HOUR_COLUMN, DATE_COLUMN] {
        if df.column(key).is_err() {
            return Err(TransformError::MissingColumn {
                column: key.to_string(),
            });
        }
    }

    let aggregations: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|column| {
            let name = column.name().as_str();
            name != HOUR_COLUMN && name != DATE_COLUMN && column.dtype() == &DataType::Float64
        })
        .map(|column| col(column.name().as_str()).mean())
        .collect();

    let grouped = df
        .clone()
        .lazy()
        .group_by([col(HOUR_COLUMN), col(DATE_COLUMN)])
        .agg(aggregations)
        .sort_by_exprs(
            [col(HOUR_COLUMN), col(DATE_COLUMN)],
            SortMultipleOptions::default(),
        )
        .collect()?;
    Ok(grouped)
}

/// Derives the time keys and averages the batch per hour.
pub fn aggregate_hourly(mut df: DataFrame) -> Result<DataFrame> {
    derive_time_keys(&mut df)?;
    hourly_mean(&df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meter_model::TIME_COLUMN;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame(dates: &[&str], times: &[&str], power: &[f64]) -> DataFrame {
        let strings = |values: &[&str]| values.iter().map(|v| (*v).to_string()).collect::<Vec<_>>();
        DataFrame::new(vec![
            Series::new("AEZ-P_SUM".into(), power.to_vec()).into_column(),
            Series::new(DATE_COLUMN.into(), strings(dates)).into_column(),
            Series::new(TIME_COLUMN.into(), strings(times)).into_column(),
        ])
        .unwrap()
    }

    fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_two_rows_same_hour_average() {
        let df = frame(&["20230615", "20230615"], &["090000", "093000"], &[10.0, 20.0]);
        let out = aggregate_hourly(df).unwrap();

        assert_eq!(out.height(), 1);
        assert_eq!(f64_values(&out, "AEZ-P_SUM"), vec![Some(15.0)]);
        assert_eq!(f64_values(&out, HOUR_COLUMN), vec![Some(9.0)]);
    }

    #[test]
    fn test_output_layout_drops_time_text() {
        let df = frame(&["20230615"], &["090000"], &[10.0]);
        let out = aggregate_hourly(df).unwrap();
        let names: Vec<String> = out
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(
            names,
            vec![HOUR_COLUMN, DATE_COLUMN, "AEZ-P_SUM", "Month", "Day"]
        );
    }

    #[test]
    fn test_groups_sorted_by_hour_then_date() {
        let df = frame(
            &["20230616", "20230615", "20230615", "20230616"],
            &["100000", "100500", "090000", "091500"],
            &[40.0, 30.0, 10.0, 20.0],
        );
        let out = aggregate_hourly(df).unwrap();

        assert_eq!(out.height(), 4);
        assert_eq!(
            f64_values(&out, HOUR_COLUMN),
            vec![Some(9.0), Some(9.0), Some(10.0), Some(10.0)]
        );
        let dates: Vec<Option<String>> = out
            .column(DATE_COLUMN)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        assert_eq!(
            dates,
            vec![
                Some("20230615".to_string()),
                Some("20230616".to_string()),
                Some("20230615".to_string()),
                Some("20230616".to_string()),
            ]
        );
        assert_eq!(
            f64_values(&out, "AEZ-P_SUM"),
            vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0)]
        );
    }

    #[test]
    fn test_hourly_mean_requires_keys() {
        let df = frame(&["20230615"], &["090000"], &[10.0]);
        let err = hourly_mean(&df).unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn { column } if column == HOUR_COLUMN));
    }

    #[test]
    fn test_empty_batch_aggregates_to_empty() {
        let df = frame(&[], &[], &[]);
        let out = aggregate_hourly(df).unwrap();
        assert_eq!(out.height(), 0);
    }
}
