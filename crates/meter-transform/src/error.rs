//! Error types for record transformation.

use thiserror::Error;

use meter_model::{CatalogError, SemanticType};

#[derive(Debug, Error)]
pub enum TransformError {
    /// A cell could not be coerced to its catalog type.
    #[error("cannot convert value '{value}' in column '{column}' to {target}")]
    TypeConversion {
        column: String,
        value: String,
        target: SemanticType,
    },

    /// A date or time-of-day string is too short or not numeric where a
    /// time key is extracted.
    #[error("malformed {column} value '{value}': {reason}")]
    MalformedTimeField {
        column: String,
        value: String,
        reason: String,
    },

    #[error("column '{column}' not found in batch")]
    MissingColumn { column: String },

    #[error("timestamp {value} is outside the representable range")]
    TimestampOutOfRange { value: f64 },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl TransformError {
    pub(crate) fn malformed(
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedTimeField {
            column: column.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
