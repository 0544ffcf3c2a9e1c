#![deny(unsafe_code)]

use std::fmt;

/// Tokens read as a missing value, matching the NA set of common
/// dataframe readers.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if `field` denotes a missing value.
pub fn is_na_token(field: &str) -> bool {
    NA_TOKENS.contains(&field)
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// One cell of a raw record.
///
/// Cells start out as text and are resolved to numbers only by
/// catalog-driven coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Missing,
    Text(String),
    Number(f64),
}

impl RawValue {
    /// Wraps a field as read from a source file.
    pub fn from_field(field: &str) -> Self {
        if is_na_token(field) {
            Self::Missing
        } else {
            Self::Text(field.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("nan"),
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => f.write_str(&format_numeric(*value)),
        }
    }
}

/// Rows read from one record source, restricted to the selected columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<RawValue>) {
        self.rows.push(row);
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Values of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<Vec<&RawValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_field_na_tokens() {
        assert_eq!(RawValue::from_field(""), RawValue::Missing);
        assert_eq!(RawValue::from_field("NaN"), RawValue::Missing);
        assert_eq!(RawValue::from_field("N/A"), RawValue::Missing);
        assert_eq!(
            RawValue::from_field("093000"),
            RawValue::Text("093000".to_string())
        );
        assert_eq!(
            RawValue::from_field("err_timeout"),
            RawValue::Text("err_timeout".to_string())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(RawValue::Number(10.0).to_string(), "10");
        assert_eq!(RawValue::Number(10.5).to_string(), "10.5");
        assert_eq!(RawValue::Text("abc".into()).to_string(), "abc");
        assert_eq!(RawValue::Missing.to_string(), "nan");
    }

    #[test]
    fn test_format_numeric_keeps_integers() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(1.25), "1.25");
        assert_eq!(format_numeric(-3.0), "-3");
    }

    #[test]
    fn test_column_values() {
        let mut table = RawTable::new(vec!["A".into(), "B".into()]);
        table.push_row(vec![RawValue::Text("1".into()), RawValue::Missing]);
        table.push_row(vec![RawValue::Text("2".into()), RawValue::Text("x".into())]);
        let values = table.column_values("B").unwrap();
        assert_eq!(values, vec![&RawValue::Missing, &RawValue::Text("x".into())]);
        assert!(table.column_values("C").is_none());
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 2);
    }
}
