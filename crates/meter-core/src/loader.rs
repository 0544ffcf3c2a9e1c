//! Single-source batch loading.

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::debug;

use meter_ingest::{CsvFormat, read_raw_table};
use meter_model::ColumnCatalog;
use meter_transform::{SanitizeStats, Sanitized, aggregate_hourly, sanitize};

use crate::error::Result;

/// One loaded record source.
#[derive(Debug, Clone)]
pub struct LoadedBatch {
    /// Cleaned batch, or its hourly means when aggregation was requested.
    pub data: DataFrame,
    pub stats: SanitizeStats,
}

/// Reads, sanitizes and optionally aggregates single record sources.
///
/// The selection is expected to be validated against the catalog already.
#[derive(Debug, Clone, Copy)]
pub struct BatchLoader<'a> {
    catalog: &'a ColumnCatalog,
    format: CsvFormat,
}

impl<'a> BatchLoader<'a> {
    pub fn new(catalog: &'a ColumnCatalog, format: CsvFormat) -> Self {
        Self { catalog, format }
    }

    pub fn load(&self, source: &Path, columns: &[String], aggregate: bool) -> Result<LoadedBatch> {
        let raw = read_raw_table(source, columns, &self.format)?;
        let Sanitized { data, stats } = sanitize(raw, self.catalog)?;
        let data = if aggregate {
            aggregate_hourly(data)?
        } else {
            data
        };

        debug!(
            path = %source.display(),
            rows_read = stats.rows_read,
            rows_kept = stats.rows_kept,
            rows_out = data.height(),
            aggregate,
            "loaded record source"
        );
        Ok(LoadedBatch { data, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meter_model::HOUR_COLUMN;
    use meter_standards::builtin_catalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    fn columns() -> Vec<String> {
        ["AEZ-P_SUM", "YYYYMMDD", "hhmmss"]
            .iter()
            .map(|c| (*c).to_string())
            .collect()
    }

    #[test]
    fn test_load_without_aggregation() {
        let file = source(
            "YYYYMMDD;hhmmss;AEZ-P_SUM;T_AMB\n\
             20230615;090000;10.0;21\n\
             20230615;091000;err_timeout;21\n\
             20230615;092000;80.0;21\n",
        );
        let catalog = builtin_catalog();
        let loader = BatchLoader::new(&catalog, CsvFormat::default());
        let batch = loader.load(file.path(), &columns(), false).unwrap();

        assert_eq!(batch.data.height(), 1);
        assert_eq!(batch.data.width(), 3);
        assert_eq!(batch.stats.rows_read, 3);
        assert_eq!(batch.stats.rows_kept, 1);
    }

    #[test]
    fn test_load_with_aggregation() {
        let file = source(
            "YYYYMMDD;hhmmss;AEZ-P_SUM\n\
             20230615;090000;10.0\n\
             20230615;093000;20.0\n\
             20230615;100000;30.0\n",
        );
        let catalog = builtin_catalog();
        let loader = BatchLoader::new(&catalog, CsvFormat::default());
        let batch = loader.load(file.path(), &columns(), true).unwrap();

        assert_eq!(batch.data.height(), 2);
        let hours: Vec<Option<f64>> = batch
            .data
            .column(HOUR_COLUMN)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(hours, vec![Some(9.0), Some(10.0)]);
        let means: Vec<Option<f64>> = batch
            .data
            .column("AEZ-P_SUM")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(means, vec![Some(15.0), Some(30.0)]);
    }

    #[test]
    fn test_missing_header_column_is_source_read() {
        let file = source("YYYYMMDD;hhmmss\n20230615;090000\n");
        let catalog = builtin_catalog();
        let loader = BatchLoader::new(&catalog, CsvFormat::default());
        let err = loader.load(file.path(), &columns(), false).unwrap_err();
        assert!(err.is_source_read());
    }
}
