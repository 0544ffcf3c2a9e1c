//! Meter dataset assembly.
//!
//! A [`Pipeline`] ties the column catalog to the ingestion and
//! transformation crates: it validates a column selection, discovers the
//! record sources of each location, loads every source through
//! [`BatchLoader`] and concatenates the results.
//!
//! The free functions below run a default pipeline over the built-in
//! catalog.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//!
//! let columns = ["YYYYMMDD", "hhmmss", "AEZ-P_SUM"];
//! let hourly = meter_core::load_directory_hourly_averaged(Path::new("data/2023"), &columns)?;
//! ```

pub mod assembler;
pub mod error;
pub mod loader;
pub mod options;
pub mod progress;

use std::path::Path;

use polars::prelude::DataFrame;

pub use assembler::{Assembly, Pipeline, SkippedSource, SourceSummary};
pub use error::{PipelineError, Result};
pub use loader::{BatchLoader, LoadedBatch};
pub use options::{LoadOptions, ReadFailurePolicy};
pub use progress::{LogProgress, NoProgress, ProgressObserver};

pub use meter_ingest::{CsvFormat, SourceOrder};
pub use meter_transform::{
    LEGACY_TIMESTAMP_OFFSET_SECS, SanitizeStats, convert_timestamp_to_local_string,
    format_timestamp_with_offset, hour_of_timestring, yyyymmdd_of_timestring,
};

/// Loads every cleaned record of `dir` with the built-in catalog.
pub fn load_directory<S: AsRef<str>>(dir: &Path, columns: &[S]) -> Result<DataFrame> {
    Pipeline::default().load_directory(dir, columns)
}

/// Hourly means of `dir` with the built-in catalog.
pub fn load_directory_hourly_averaged<S: AsRef<str>>(dir: &Path, columns: &[S]) -> Result<DataFrame> {
    Pipeline::default().load_directory_hourly_averaged(dir, columns)
}

/// Hourly means of several directories with the built-in catalog.
pub fn load_multiple_directories_hourly_averaged<P, S>(dirs: &[P], columns: &[S]) -> Result<DataFrame>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    Pipeline::default().load_multiple_directories_hourly_averaged(dirs, columns)
}
