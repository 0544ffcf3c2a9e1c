pub mod catalog;
pub mod error;
pub mod table;

pub use catalog::{
    CatalogEntry, ColumnCatalog, DATE_COLUMN, DAY_COLUMN, HOUR_COLUMN, MONTH_COLUMN,
    SemanticType, TIME_COLUMN, TIMESTAMP_COLUMN, ValueRange,
};
pub use error::{CatalogError, Result};
pub use table::{RawTable, RawValue, format_numeric, is_na_token};
