//! Delimited record source reading.

mod header;
mod reader;

pub use reader::{CsvFormat, DEFAULT_DELIMITER, read_raw_table};
