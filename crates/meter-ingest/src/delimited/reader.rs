//! Delimited file reading into raw records.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::trace;

use meter_model::{RawTable, RawValue};

use crate::error::{IngestError, Result};

use super::header::{normalize_header, select_positions};

/// Field separator used by the meter data loggers.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Layout of a record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    /// Field separator byte.
    pub delimiter: u8,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

fn parse_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Reads one record source, keeping only the `selected` columns.
///
/// The first row is the header. Every cell is read as text so fixed-width
/// fields such as `hhmmss` keep their leading zeros; empty cells and NA
/// tokens become [`RawValue::Missing`]. Rows shorter than the header are
/// padded with missing values, rows longer than the header are rejected.
///
/// The file handle is released before this function returns, on success
/// and on every error path.
pub fn read_raw_table(path: &Path, selected: &[String], format: &CsvFormat) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(path, &e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let positions = select_positions(path, &headers, selected)?;

    let mut table = RawTable::new(selected.to_vec());
    for record in reader.records() {
        let record = record.map_err(|e| parse_error(path, &e))?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, csv::Position::line);
            return Err(IngestError::CsvParse {
                path: path.to_path_buf(),
                message: format!(
                    "line {line}: expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }
        let row = positions
            .iter()
            .map(|&idx| RawValue::from_field(record.get(idx).unwrap_or("")))
            .collect();
        table.push_row(row);
    }

    trace!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "read record source"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn test_read_keeps_time_text() {
        let file = create_temp_csv("YYYYMMDD;hhmmss;T_AMB\n20230615;093000;21.5\n");
        let table = read_raw_table(
            file.path(),
            &columns(&["hhmmss", "T_AMB"]),
            &CsvFormat::default(),
        )
        .unwrap();

        assert_eq!(table.columns, vec!["hhmmss", "T_AMB"]);
        assert_eq!(
            table.rows,
            vec![vec![
                RawValue::Text("093000".to_string()),
                RawValue::Text("21.5".to_string())
            ]]
        );
    }

    #[test]
    fn test_read_empty_cells_are_missing() {
        let file = create_temp_csv("A;B\n1;\n;NaN\n");
        let table =
            read_raw_table(file.path(), &columns(&["A", "B"]), &CsvFormat::default()).unwrap();

        assert_eq!(table.rows[0][1], RawValue::Missing);
        assert_eq!(table.rows[1][0], RawValue::Missing);
        assert_eq!(table.rows[1][1], RawValue::Missing);
    }

    #[test]
    fn test_read_short_row_is_padded() {
        let file = create_temp_csv("A;B;C\n1;2\n");
        let table = read_raw_table(file.path(), &columns(&["C"]), &CsvFormat::default()).unwrap();
        assert_eq!(table.rows, vec![vec![RawValue::Missing]]);
    }

    #[test]
    fn test_read_long_row_is_rejected() {
        let file = create_temp_csv("A;B\n1;2;3\n");
        let result = read_raw_table(file.path(), &columns(&["A"]), &CsvFormat::default());
        assert!(matches!(result, Err(IngestError::CsvParse { .. })));
    }

    #[test]
    fn test_read_missing_column() {
        let file = create_temp_csv("A;B\n1;2\n");
        let result = read_raw_table(file.path(), &columns(&["A", "Z"]), &CsvFormat::default());
        assert!(matches!(
            result,
            Err(IngestError::MissingColumn { column, .. }) if column == "Z"
        ));
    }

    #[test]
    fn test_read_empty_file() {
        let file = create_temp_csv("");
        let result = read_raw_table(file.path(), &columns(&["A"]), &CsvFormat::default());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_raw_table(
            &dir.path().join("absent.csv"),
            &columns(&["A"]),
            &CsvFormat::default(),
        );
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_custom_delimiter() {
        let file = create_temp_csv("A,B\n1,2\n");
        let format = CsvFormat { delimiter: b',' };
        let table = read_raw_table(file.path(), &columns(&["B"]), &format).unwrap();
        assert_eq!(table.rows, vec![vec![RawValue::Text("2".to_string())]]);
    }
}
