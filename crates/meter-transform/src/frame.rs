//! Typed frames from sanitized records.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use meter_model::{ColumnCatalog, RawTable, RawValue, SemanticType};

use crate::error::{Result, TransformError};

fn unresolved(column: &str, cell: Option<&RawValue>, target: SemanticType) -> TransformError {
    TransformError::TypeConversion {
        column: column.to_string(),
        value: cell.map(ToString::to_string).unwrap_or_default(),
        target,
    }
}

/// Builds a polars frame from a sanitized batch.
///
/// Float columns become `Float64`, every other semantic type becomes
/// `String`. Column order follows the batch. The batch must already be
/// coerced and free of missing values.
pub fn build_frame(table: &RawTable, catalog: &ColumnCatalog) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.width());
    for (idx, name) in table.columns.iter().enumerate() {
        let target = catalog.type_of(name)?;
        let column = if target.is_numeric() {
            let values = table
                .rows
                .iter()
                .map(|row| match row.get(idx) {
                    Some(RawValue::Number(value)) => Ok(*value),
                    other => Err(unresolved(name, other, target)),
                })
                .collect::<Result<Vec<f64>>>()?;
            Series::new(name.as_str().into(), values).into_column()
        } else {
            let values = table
                .rows
                .iter()
                .map(|row| match row.get(idx) {
                    Some(RawValue::Text(text)) => Ok(text.clone()),
                    other => Err(unresolved(name, other, target)),
                })
                .collect::<Result<Vec<String>>>()?;
            Series::new(name.as_str().into(), values).into_column()
        };
        columns.push(column);
    }
    Ok(DataFrame::new(columns)?)
}
