use thiserror::Error;

/// Errors raised while building or querying a column catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A requested column has no catalog entry.
    #[error("unknown column '{column}': not present in the column catalog")]
    UnknownColumn { column: String },

    /// The caller selected no columns at all.
    #[error("no columns selected")]
    EmptySelection,

    /// The same column appears twice in a selection.
    #[error("column '{column}' selected more than once")]
    DuplicateSelection { column: String },

    /// The same column is defined twice in the catalog.
    #[error("column '{column}' is defined more than once in the catalog")]
    DuplicateEntry { column: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
