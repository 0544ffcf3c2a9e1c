//! Delimited export of assembled datasets.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

/// Writes `df` as delimited text with a header row.
pub fn write_delimited<W: Write>(writer: W, df: &mut DataFrame, delimiter: u8) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(delimiter)
        .finish(df)
        .context("write delimited output")
}

/// Writes `df` to `path`, replacing any existing file.
pub fn write_delimited_file(path: &Path, df: &mut DataFrame, delimiter: u8) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create output file {}", path.display()))?;
    write_delimited(file, df, delimiter)
        .with_context(|| format!("write output file {}", path.display()))
}
