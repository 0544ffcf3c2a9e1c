//! Meter data ingestion.
//!
//! This crate finds record sources (one delimited file per measurement
//! period) inside a directory and reads them into [`RawTable`]s restricted
//! to the selected columns.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use meter_ingest::{SourceOrder, list_record_sources, read_raw_table, CsvFormat};
//!
//! let sources = list_record_sources(Path::new("data/2023"), "csv", SourceOrder::Sorted)?;
//! let columns = vec!["YYYYMMDD".to_string(), "AEZ-P_SUM".to_string()];
//! let table = read_raw_table(&sources[0], &columns, &CsvFormat::default())?;
//! ```
//!
//! [`RawTable`]: meter_model::RawTable

mod delimited;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use delimited::{CsvFormat, DEFAULT_DELIMITER, read_raw_table};

// === File Discovery ===
pub use discovery::{DEFAULT_EXTENSION, SourceOrder, list_record_sources};
