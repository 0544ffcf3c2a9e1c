//! Multi-location dataset assembly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use meter_ingest::list_record_sources;
use meter_model::{ColumnCatalog, DATE_COLUMN, TIME_COLUMN};
use meter_standards::builtin_catalog;
use meter_transform::SanitizeStats;

use crate::error::{PipelineError, Result};
use crate::loader::{BatchLoader, LoadedBatch};
use crate::options::{LoadOptions, ReadFailurePolicy};
use crate::progress::{LogProgress, ProgressObserver};

/// Outcome of one loaded record source.
#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub location: PathBuf,
    pub path: PathBuf,
    pub stats: SanitizeStats,
    /// Rows contributed to the dataset (hourly groups when aggregating).
    pub rows_out: usize,
}

/// A record source left out under [`ReadFailurePolicy::SkipAndWarn`].
#[derive(Debug, Clone)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub reason: String,
}

/// A combined dataset with per-source accounting.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub data: DataFrame,
    pub sources: Vec<SourceSummary>,
    pub skipped: Vec<SkippedSource>,
}

impl Assembly {
    /// Sanitization counts summed over every loaded source.
    pub fn totals(&self) -> SanitizeStats {
        let mut totals = SanitizeStats::default();
        for source in &self.sources {
            totals.absorb(&source.stats);
        }
        totals
    }
}

/// Loads record sources from one or more locations into a single frame.
///
/// Holds the shared, immutable column catalog and the load options. Cheap
/// to clone.
#[derive(Debug, Clone)]
pub struct Pipeline {
    catalog: Arc<ColumnCatalog>,
    options: LoadOptions,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Arc::new(builtin_catalog()))
    }
}

impl Pipeline {
    pub fn new(catalog: Arc<ColumnCatalog>) -> Self {
        Self {
            catalog,
            options: LoadOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &ColumnCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    fn selection<S: AsRef<str>>(&self, columns: &[S], aggregate: bool) -> Result<Vec<String>> {
        self.catalog.validate_columns(columns)?;
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        if aggregate {
            for key in [DATE_COLUMN, TIME_COLUMN] {
                if !columns.iter().any(|c| c == key) {
                    return Err(PipelineError::MissingTimeKey {
                        column: key.to_string(),
                    });
                }
            }
        }
        Ok(columns)
    }

    /// Loads a single record source.
    pub fn load_batch<S: AsRef<str>>(
        &self,
        source: &Path,
        columns: &[S],
        aggregate: bool,
    ) -> Result<LoadedBatch> {
        let columns = self.selection(columns, aggregate)?;
        BatchLoader::new(&self.catalog, self.options.format).load(source, &columns, aggregate)
    }

    /// Assembles every location, in the given order, into one frame.
    ///
    /// The selection is validated before anything is read; hourly
    /// aggregation also requires the date and time columns. Within a
    /// location, sources are loaded in discovery order and appended as each
    /// completes. No matching sources yields an empty frame.
    ///
    /// # Errors
    ///
    /// Catalog errors for the selection, discovery errors for a location,
    /// and any batch error not covered by the read failure policy.
    pub fn run<P, S>(
        &self,
        locations: &[P],
        columns: &[S],
        aggregate: bool,
        observer: &mut dyn ProgressObserver,
    ) -> Result<Assembly>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let columns = self.selection(columns, aggregate)?;
        let loader = BatchLoader::new(&self.catalog, self.options.format);

        let mut combined: Option<DataFrame> = None;
        let mut sources = Vec::new();
        let mut skipped = Vec::new();

        for location in locations {
            let location = location.as_ref();
            let span = info_span!("location", path = %location.display());
            let _guard = span.enter();

            let paths = list_record_sources(
                location,
                &self.options.extension,
                self.options.source_order,
            )?;
            let total = paths.len();
            observer.location_started(location, total);

            for (idx, path) in paths.iter().enumerate() {
                match loader.load(path, &columns, aggregate) {
                    Ok(batch) => {
                        let rows_out = batch.data.height();
                        match combined.as_mut() {
                            Some(acc) => {
                                acc.vstack_mut(&batch.data)?;
                            }
                            None => combined = Some(batch.data),
                        }
                        sources.push(SourceSummary {
                            location: location.to_path_buf(),
                            path: path.clone(),
                            stats: batch.stats,
                            rows_out,
                        });
                    }
                    Err(err)
                        if err.is_source_read()
                            && self.options.read_failure == ReadFailurePolicy::SkipAndWarn =>
                    {
                        warn!(path = %path.display(), error = %err, "skipping unreadable record source");
                        skipped.push(SkippedSource {
                            path: path.clone(),
                            reason: err.to_string(),
                        });
                    }
                    Err(err) => return Err(err),
                }
                observer.source_loaded(idx + 1, total);
            }
            observer.location_finished(location);
        }

        let data = combined.unwrap_or_else(DataFrame::empty);
        info!(
            rows = data.height(),
            sources = sources.len(),
            skipped = skipped.len(),
            "dataset assembled"
        );
        Ok(Assembly {
            data,
            sources,
            skipped,
        })
    }

    /// [`run`](Self::run) with tracing progress, returning only the frame.
    pub fn assemble<P, S>(&self, locations: &[P], columns: &[S], aggregate: bool) -> Result<DataFrame>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        Ok(self.run(locations, columns, aggregate, &mut LogProgress)?.data)
    }

    /// All cleaned records of one location, unaggregated.
    pub fn load_directory<S: AsRef<str>>(&self, dir: &Path, columns: &[S]) -> Result<DataFrame> {
        self.assemble(&[dir], columns, false)
    }

    /// Hourly means of one location, each source aggregated on its own.
    pub fn load_directory_hourly_averaged<S: AsRef<str>>(
        &self,
        dir: &Path,
        columns: &[S],
    ) -> Result<DataFrame> {
        self.assemble(&[dir], columns, true)
    }

    /// Hourly means of several locations, concatenated in the given order.
    pub fn load_multiple_directories_hourly_averaged<P, S>(
        &self,
        dirs: &[P],
        columns: &[S],
    ) -> Result<DataFrame>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        self.assemble(dirs, columns, true)
    }
}
