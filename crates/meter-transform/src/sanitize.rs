//! Record sanitization.
//!
//! A raw batch is cleaned in five steps, always in this order:
//!
//! 1. [`tag_errors`]: cells whose text contains [`ERROR_MARKER`] become missing
//! 2. [`drop_incomplete_rows`]: rows with any missing cell are removed
//! 3. [`coerce_types`]: cells are converted to their catalog type
//! 4. [`invalidate_out_of_range`]: a row with any value outside its
//!    catalog range is blanked entirely
//! 5. [`drop_incomplete_rows`] again, removing the blanked rows
//!
//! Instrument-reported errors are the expected failure mode and are handled
//! by omission. A value that cannot be coerced is not: it means the
//! selection and the catalog disagree, and the whole batch fails.

use polars::prelude::DataFrame;
use tracing::debug;

use meter_model::{ColumnCatalog, RawTable, RawValue, SemanticType, ValueRange, format_numeric};

use crate::error::{Result, TransformError};
use crate::frame::build_frame;

/// Marker that data loggers write into a cell when a reading failed.
pub const ERROR_MARKER: &str = "err";

/// Row accounting for one sanitized batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeStats {
    pub rows_read: usize,
    /// Cells replaced by missing values because they carried the error marker.
    pub cells_tagged: usize,
    /// Rows dropped for missing values (including tagged cells).
    pub incomplete_rows: usize,
    /// Rows dropped because a value fell outside its declared range.
    pub out_of_range_rows: usize,
    pub rows_kept: usize,
}

impl SanitizeStats {
    pub fn rows_dropped(&self) -> usize {
        self.incomplete_rows + self.out_of_range_rows
    }

    /// Adds another batch's counts to this one.
    pub fn absorb(&mut self, other: &SanitizeStats) {
        self.rows_read += other.rows_read;
        self.cells_tagged += other.cells_tagged;
        self.incomplete_rows += other.incomplete_rows;
        self.out_of_range_rows += other.out_of_range_rows;
        self.rows_kept += other.rows_kept;
    }
}

/// A cleaned record batch with its row accounting.
#[derive(Debug, Clone)]
pub struct Sanitized {
    pub data: DataFrame,
    pub stats: SanitizeStats,
}

/// Replaces every cell containing [`ERROR_MARKER`] with a missing value.
///
/// Applies to every column regardless of its type. Returns the number of
/// cells tagged.
pub fn tag_errors(table: &mut RawTable) -> usize {
    let mut tagged = 0;
    for row in &mut table.rows {
        for cell in row.iter_mut() {
            if !cell.is_missing() && cell.to_string().contains(ERROR_MARKER) {
                *cell = RawValue::Missing;
                tagged += 1;
            }
        }
    }
    tagged
}

/// Removes rows with a missing value in any column. Returns the number of
/// rows removed.
pub fn drop_incomplete_rows(table: &mut RawTable) -> usize {
    let before = table.rows.len();
    table
        .rows
        .retain(|row| row.iter().all(|cell| !cell.is_missing()));
    before - table.rows.len()
}

fn coerce_cell(column: &str, target: SemanticType, cell: RawValue) -> Result<RawValue> {
    match (target, cell) {
        (_, RawValue::Missing) => Ok(RawValue::Missing),
        (SemanticType::Float, RawValue::Number(value)) => Ok(RawValue::Number(value)),
        (SemanticType::Float, RawValue::Text(text)) => match text.trim().parse::<f64>() {
            Ok(value) if value.is_nan() => Ok(RawValue::Missing),
            Ok(value) => Ok(RawValue::Number(value)),
            Err(_) => Err(TransformError::TypeConversion {
                column: column.to_string(),
                value: text,
                target,
            }),
        },
        (_, RawValue::Number(value)) => Ok(RawValue::Text(format_numeric(value))),
        (_, text @ RawValue::Text(_)) => Ok(text),
    }
}

/// Converts every cell to its column's catalog type.
///
/// Float columns parse their (trimmed) text as `f64`; a parse yielding NaN
/// counts as missing. Text-like columns keep their text verbatim.
///
/// # Errors
///
/// [`TransformError::Catalog`] if a column is not in the catalog,
/// [`TransformError::TypeConversion`] if a cell cannot be parsed.
pub fn coerce_types(table: &mut RawTable, catalog: &ColumnCatalog) -> Result<()> {
    for (idx, column) in table.columns.iter().enumerate() {
        let target = catalog.type_of(column)?;
        for row in &mut table.rows {
            if let Some(cell) = row.get_mut(idx) {
                let raw = std::mem::replace(cell, RawValue::Missing);
                *cell = coerce_cell(column, target, raw)?;
            }
        }
    }
    Ok(())
}

/// Blanks every row holding a value outside its column's declared range.
///
/// The whole row is replaced with missing values, not just the offending
/// cell: one implausible reading makes the rest of the sample untrusted.
/// Returns the number of rows blanked.
pub fn invalidate_out_of_range(table: &mut RawTable, catalog: &ColumnCatalog) -> usize {
    let ranged: Vec<(usize, ValueRange)> = table
        .columns
        .iter()
        .enumerate()
        .filter_map(|(idx, column)| catalog.range_of(column).map(|range| (idx, range)))
        .collect();
    if ranged.is_empty() {
        return 0;
    }

    let mut invalidated = 0;
    for row in &mut table.rows {
        let violates = ranged.iter().any(|(idx, range)| {
            row.get(*idx)
                .and_then(RawValue::as_number)
                .is_some_and(|value| !range.contains(value))
        });
        if violates {
            row.iter_mut().for_each(|cell| *cell = RawValue::Missing);
            invalidated += 1;
        }
    }
    invalidated
}

/// Runs the five sanitization steps on a raw batch.
pub fn sanitize_table(
    mut table: RawTable,
    catalog: &ColumnCatalog,
) -> Result<(RawTable, SanitizeStats)> {
    let mut stats = SanitizeStats {
        rows_read: table.height(),
        ..SanitizeStats::default()
    };

    stats.cells_tagged = tag_errors(&mut table);
    stats.incomplete_rows = drop_incomplete_rows(&mut table);
    coerce_types(&mut table, catalog)?;
    stats.out_of_range_rows = invalidate_out_of_range(&mut table, catalog);
    // Coercion can also yield missing values (NaN text); those rows are
    // dropped here too but count as incomplete.
    let dropped = drop_incomplete_rows(&mut table);
    stats.incomplete_rows += dropped - stats.out_of_range_rows;
    stats.rows_kept = table.height();

    debug!(
        rows_read = stats.rows_read,
        cells_tagged = stats.cells_tagged,
        incomplete = stats.incomplete_rows,
        out_of_range = stats.out_of_range_rows,
        kept = stats.rows_kept,
        "sanitized batch"
    );
    Ok((table, stats))
}

/// Sanitizes a raw batch into a typed frame.
pub fn sanitize(table: RawTable, catalog: &ColumnCatalog) -> Result<Sanitized> {
    let (table, stats) = sanitize_table(table, catalog)?;
    let data = build_frame(&table, catalog)?;
    Ok(Sanitized { data, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use meter_model::CatalogEntry;

    fn catalog() -> ColumnCatalog {
        ColumnCatalog::new(vec![
            CatalogEntry::numeric("AEZ-P_SUM", Some(ValueRange::new(5.0, 75.0))),
            CatalogEntry::numeric("T_AMB", None),
            CatalogEntry::new("hhmmss", SemanticType::TimeString),
        ])
        .unwrap()
    }

    fn text(value: &str) -> RawValue {
        RawValue::Text(value.to_string())
    }

    fn table(rows: Vec<Vec<RawValue>>) -> RawTable {
        RawTable {
            columns: vec!["AEZ-P_SUM".into(), "T_AMB".into(), "hhmmss".into()],
            rows,
        }
    }

    #[test]
    fn test_tag_errors_any_column() {
        let mut raw = table(vec![
            vec![text("10"), text("err"), text("093000")],
            vec![text("10"), text("20"), text("Xerr_io")],
            vec![text("10"), text("20"), text("ERR")],
        ]);
        assert_eq!(tag_errors(&mut raw), 2);
        assert!(raw.rows[0][1].is_missing());
        assert!(raw.rows[1][2].is_missing());
        // The marker is case-sensitive.
        assert_eq!(raw.rows[2][2], text("ERR"));
    }

    #[test]
    fn test_coerce_types() {
        let mut raw = table(vec![vec![text(" 10.5 "), text("-3"), text("093000")]]);
        coerce_types(&mut raw, &catalog()).unwrap();
        assert_eq!(
            raw.rows[0],
            vec![RawValue::Number(10.5), RawValue::Number(-3.0), text("093000")]
        );
    }

    #[test]
    fn test_coerce_types_failure() {
        let mut raw = table(vec![vec![text("10"), text("warm"), text("093000")]]);
        let err = coerce_types(&mut raw, &catalog()).unwrap_err();
        assert!(matches!(
            err,
            TransformError::TypeConversion { ref column, ref value, .. }
                if column == "T_AMB" && value == "warm"
        ));
    }

    #[test]
    fn test_coerce_unknown_column() {
        let mut raw = RawTable {
            columns: vec!["E_GLOBAL".into()],
            rows: vec![vec![text("1")]],
        };
        let err = coerce_types(&mut raw, &catalog()).unwrap_err();
        assert!(matches!(err, TransformError::Catalog(_)));
    }

    #[test]
    fn test_invalidate_blanks_whole_row() {
        let mut raw = table(vec![
            vec![RawValue::Number(80.0), RawValue::Number(20.0), text("093000")],
            vec![RawValue::Number(75.0), RawValue::Number(20.0), text("093100")],
        ]);
        assert_eq!(invalidate_out_of_range(&mut raw, &catalog()), 1);
        assert!(raw.rows[0].iter().all(RawValue::is_missing));
        assert!(raw.rows[1].iter().all(|cell| !cell.is_missing()));
    }

    #[test]
    fn test_sanitize_table_stats() {
        let raw = table(vec![
            vec![text("10"), text("20"), text("093000")],
            vec![text("err_timeout"), text("20"), text("093100")],
            vec![text("80"), text("20"), text("093200")],
            vec![text("10"), RawValue::Missing, text("093300")],
            vec![text("nan "), text("20"), text("093400")],
            vec![text("4.9"), text("20"), text("093500")],
        ]);
        let (clean, stats) = sanitize_table(raw, &catalog()).unwrap();
        assert_eq!(clean.height(), 1);
        assert_eq!(
            stats,
            SanitizeStats {
                rows_read: 6,
                cells_tagged: 1,
                incomplete_rows: 3,
                out_of_range_rows: 2,
                rows_kept: 1,
            }
        );
        assert_eq!(stats.rows_dropped(), 5);
    }

    #[test]
    fn test_stats_absorb() {
        let mut total = SanitizeStats::default();
        total.absorb(&SanitizeStats {
            rows_read: 3,
            cells_tagged: 1,
            incomplete_rows: 1,
            out_of_range_rows: 1,
            rows_kept: 1,
        });
        total.absorb(&SanitizeStats {
            rows_read: 2,
            rows_kept: 2,
            ..SanitizeStats::default()
        });
        assert_eq!(total.rows_read, 5);
        assert_eq!(total.rows_kept, 3);
    }
}
