//! Header normalization and column selection.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Maps each selected column to its position in the header row of `path`.
///
/// Fails with [`IngestError::MissingColumn`] for the first selected column
/// that the header does not contain. When a header name repeats, the first
/// occurrence wins.
pub fn select_positions(
    path: &Path,
    headers: &[String],
    selected: &[String],
) -> Result<Vec<usize>> {
    selected
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| IngestError::MissingColumn {
                    column: column.clone(),
                    path: path.to_path_buf(),
                })
        })
        .collect()
}
