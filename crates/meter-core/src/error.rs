//! Error type for dataset assembly.

use thiserror::Error;

use meter_ingest::IngestError;
use meter_model::CatalogError;
use meter_transform::TransformError;

/// Errors raised while loading or assembling a dataset.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Column selection rejected by the catalog. Raised before any read.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Hourly aggregation was requested without a date or time column
    /// in the selection. Raised before any read.
    #[error("hourly aggregation requires column '{column}' in the selection")]
    MissingTimeKey { column: String },

    /// A location or record source could not be read.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A batch could not be sanitized or aggregated.
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl PipelineError {
    /// Whether this is a source read failure (unreadable or malformed
    /// source, or a selected column missing from its header).
    pub fn is_source_read(&self) -> bool {
        matches!(self, Self::Ingest(_))
    }
}

impl From<polars::prelude::PolarsError> for PipelineError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
