use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, CellAlignment, Table};

use meter_cli::export::{write_delimited, write_delimited_file};
use meter_cli::progress::BarProgress;
use meter_core::{
    Assembly, CsvFormat, LEGACY_TIMESTAMP_OFFSET_SECS, LoadOptions, Pipeline, ReadFailurePolicy,
    SourceOrder, format_timestamp_with_offset, hour_of_timestring, yyyymmdd_of_timestring,
};
use meter_model::ColumnCatalog;
use meter_standards::{builtin_catalog, load_catalog};
use tracing::info;

use crate::cli::{CatalogArgs, LoadArgs, TimestampArgs};
use crate::summary::apply_table_style;

fn resolve_catalog(path: Option<&Path>) -> Result<ColumnCatalog> {
    match path {
        Some(path) => {
            load_catalog(path).with_context(|| format!("load catalog {}", path.display()))
        }
        None => Ok(builtin_catalog()),
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got '{delimiter}'");
    }
    Ok(delimiter as u8)
}

pub fn run_load(args: &LoadArgs) -> Result<Assembly> {
    let catalog = Arc::new(resolve_catalog(args.catalog.as_deref())?);
    let delimiter = delimiter_byte(args.delimiter)?;
    let options = LoadOptions::default()
        .with_format(CsvFormat { delimiter })
        .with_extension(args.extension.clone())
        .with_source_order(if args.sorted {
            SourceOrder::Sorted
        } else {
            SourceOrder::Listing
        })
        .with_read_failure(if args.skip_unreadable {
            ReadFailurePolicy::SkipAndWarn
        } else {
            ReadFailurePolicy::Abort
        });
    let pipeline = Pipeline::new(catalog).with_options(options);

    let mut progress = if args.no_progress || !io::stderr().is_terminal() {
        BarProgress::hidden()
    } else {
        BarProgress::new()
    };
    let mut assembly = pipeline
        .run(&args.dirs, &args.columns, args.hourly, &mut progress)
        .context("assemble dataset")?;

    match &args.output {
        Some(path) => {
            write_delimited_file(path, &mut assembly.data, delimiter)?;
            info!(path = %path.display(), rows = assembly.data.height(), "wrote dataset");
        }
        None => write_delimited(io::stdout().lock(), &mut assembly.data, delimiter)?,
    }
    Ok(assembly)
}

pub fn run_catalog(args: &CatalogArgs) -> Result<()> {
    let catalog = resolve_catalog(args.catalog.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec!["Column", "Type", "Min", "Max"]);
    apply_table_style(&mut table);
    for entry in catalog.entries() {
        let (min, max) = match entry.valid_range {
            Some(range) => (range.min.to_string(), range.max.to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(entry.semantic_type),
            Cell::new(min).set_alignment(CellAlignment::Right),
            Cell::new(max).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_timestamp(args: &TimestampArgs) -> Result<()> {
    let offset = args.offset.unwrap_or(LEGACY_TIMESTAMP_OFFSET_SECS);
    let mut table = Table::new();
    table.set_header(vec!["Unix", "Date-time", "Hour", "YYYYMMDD"]);
    apply_table_style(&mut table);
    for &value in &args.values {
        let formatted = format_timestamp_with_offset(value, offset)
            .with_context(|| format!("convert timestamp {value}"))?;
        let hour = hour_of_timestring(&formatted)?;
        let date = yyyymmdd_of_timestring(&formatted)?;
        table.add_row(vec![
            Cell::new(value),
            Cell::new(&formatted),
            Cell::new(hour).set_alignment(CellAlignment::Right),
            Cell::new(date),
        ]);
    }
    println!("{table}");
    Ok(())
}
