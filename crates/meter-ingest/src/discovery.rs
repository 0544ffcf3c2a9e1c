//! Record source discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// File extension of record sources, without the dot.
pub const DEFAULT_EXTENSION: &str = "csv";

/// Order in which discovered sources are processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceOrder {
    /// Directory listing order. Platform-defined, so the concatenated
    /// output order may differ between machines.
    #[default]
    Listing,
    /// Sorted by file name.
    Sorted,
}

/// Lists the record sources in a directory.
///
/// A record source is a regular file whose name ends in `.{extension}`
/// (case-sensitive). Subdirectories are ignored.
pub fn list_record_sources(dir: &Path, extension: &str, order: SourceOrder) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let suffix = format!(".{extension}");
    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        let matches = entry.file_name().to_string_lossy().ends_with(&suffix);
        if matches {
            files.push(path);
        }
    }

    if order == SourceOrder::Sorted {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    debug!(
        directory = %dir.display(),
        sources = files.len(),
        ?order,
        "discovered record sources"
    );
    Ok(files)
}
