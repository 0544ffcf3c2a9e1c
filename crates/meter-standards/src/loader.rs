//! TOML catalog files.
//!
//! ```toml
//! [[column]]
//! name = "AEZ-P_SUM"
//! type = "float"
//! min = 5
//! max = 75
//!
//! [[column]]
//! name = "hhmmss"
//! type = "time_string"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use meter_model::{CatalogEntry, ColumnCatalog, SemanticType, ValueRange};

use crate::error::StandardsError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(rename = "column", default)]
    columns: Vec<ColumnSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnSpec {
    name: String,
    #[serde(rename = "type")]
    semantic_type: SemanticType,
    min: Option<f64>,
    max: Option<f64>,
}

impl ColumnSpec {
    fn into_entry(self) -> Result<CatalogEntry, StandardsError> {
        if self.name.trim().is_empty() {
            return Err(StandardsError::invalid("column with empty name"));
        }
        let valid_range = match (self.min, self.max) {
            (None, None) => None,
            (Some(min), Some(max)) => {
                if !self.semantic_type.is_numeric() {
                    return Err(StandardsError::invalid(format!(
                        "column '{}' of type {} cannot declare a range",
                        self.name, self.semantic_type
                    )));
                }
                if !(min.is_finite() && max.is_finite()) || min > max {
                    return Err(StandardsError::invalid(format!(
                        "column '{}' has invalid range [{min}, {max}]",
                        self.name
                    )));
                }
                Some(ValueRange::new(min, max))
            }
            _ => {
                return Err(StandardsError::invalid(format!(
                    "column '{}' must declare both min and max, or neither",
                    self.name
                )));
            }
        };
        Ok(CatalogEntry {
            name: self.name,
            semantic_type: self.semantic_type,
            valid_range,
        })
    }
}

/// Loads a catalog from a TOML file.
pub fn load_catalog(path: &Path) -> Result<ColumnCatalog, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let catalog = parse_catalog_at(&contents, path)?;
    debug!(path = %path.display(), columns = catalog.len(), "loaded column catalog");
    Ok(catalog)
}

/// Parses a catalog from TOML text.
pub fn parse_catalog(contents: &str) -> Result<ColumnCatalog, StandardsError> {
    parse_catalog_at(contents, Path::new("<inline>"))
}

fn parse_catalog_at(contents: &str, path: &Path) -> Result<ColumnCatalog, StandardsError> {
    let file: CatalogFile = toml::from_str(contents).map_err(|e| StandardsError::Toml {
        path: PathBuf::from(path),
        source: e,
    })?;
    if file.columns.is_empty() {
        return Err(StandardsError::invalid("catalog declares no columns"));
    }
    let entries = file
        .columns
        .into_iter()
        .map(ColumnSpec::into_entry)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ColumnCatalog::new(entries)?)
}
