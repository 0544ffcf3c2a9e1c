//! Column catalog: the fixed registry of recognized columns.
//!
//! Every column a pipeline run touches must be declared here with its
//! semantic type. Numeric measurement columns may also carry a physical
//! value range; readings outside it invalidate the whole row.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Date column, `YYYYMMDD`.
pub const DATE_COLUMN: &str = "YYYYMMDD";
/// Time-of-day column, `HHMMSS`. Always kept as text.
pub const TIME_COLUMN: &str = "hhmmss";
/// Unix timestamp column.
pub const TIMESTAMP_COLUMN: &str = "unixtimestamp";
/// Derived month column.
pub const MONTH_COLUMN: &str = "Month";
/// Derived day-of-month column.
pub const DAY_COLUMN: &str = "Day";
/// Derived hour column.
pub const HOUR_COLUMN: &str = "Hour";

/// The declared type of a catalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// 64-bit floating point measurement.
    Float,
    /// Free text, kept verbatim.
    Text,
    /// Fixed-width `YYYYMMDD` date string.
    DateString,
    /// Fixed-width `HHMMSS` time string.
    TimeString,
}

impl SemanticType {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Text => "text",
            Self::DateString => "date_string",
            Self::TimeString => "time_string",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive physical range `[min, max]` for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies inside the range, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub semantic_type: SemanticType,
    pub valid_range: Option<ValueRange>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            valid_range: None,
        }
    }

    pub fn numeric(name: impl Into<String>, valid_range: Option<ValueRange>) -> Self {
        Self {
            name: name.into(),
            semantic_type: SemanticType::Float,
            valid_range,
        }
    }
}

/// Immutable lookup table from column name to [`CatalogEntry`].
///
/// Built once at startup and shared by reference (usually behind an `Arc`).
/// Entries keep their declaration order for display.
#[derive(Debug, Clone, Default)]
pub struct ColumnCatalog {
    entries: Vec<CatalogEntry>,
    index: BTreeMap<String, usize>,
}

impl ColumnCatalog {
    /// Builds a catalog, rejecting duplicate column names.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), position).is_some() {
                return Err(CatalogError::DuplicateEntry {
                    column: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    pub fn entry(&self, column: &str) -> Option<&CatalogEntry> {
        self.index.get(column).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Semantic type of `column`, or [`CatalogError::UnknownColumn`].
    pub fn type_of(&self, column: &str) -> Result<SemanticType> {
        self.entry(column)
            .map(|entry| entry.semantic_type)
            .ok_or_else(|| CatalogError::UnknownColumn {
                column: column.to_string(),
            })
    }

    /// Declared range of `column`, if any. Unknown columns have no range.
    pub fn range_of(&self, column: &str) -> Option<ValueRange> {
        self.entry(column).and_then(|entry| entry.valid_range)
    }

    /// Checks a column selection before any file is read.
    ///
    /// The selection must be non-empty, free of duplicates, and every name
    /// must be present in the catalog.
    pub fn validate_columns<S: AsRef<str>>(&self, columns: &[S]) -> Result<()> {
        if columns.is_empty() {
            return Err(CatalogError::EmptySelection);
        }
        let mut seen = BTreeSet::new();
        for column in columns {
            let column = column.as_ref();
            if !self.contains(column) {
                return Err(CatalogError::UnknownColumn {
                    column: column.to_string(),
                });
            }
            if !seen.insert(column) {
                return Err(CatalogError::DuplicateSelection {
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
