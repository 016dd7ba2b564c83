//! In-memory tabular model: ordered, typed columns with explicit missing values.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScourError};

/// A single scalar cell value.
///
/// Missing entries are represented as `None` in column storage, not as a
/// variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    /// Total order used when assigning normalization codes: numeric order
    /// within numeric kinds (integers and floats compare by magnitude,
    /// floats via `total_cmp`), lexicographic byte order for text.
    ///
    /// Columns hold a single kind in practice; mixed kinds fall back to a
    /// fixed kind rank so the order stays total.
    pub fn natural_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::Text(_) => 2,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Declared element type of a column, decided once at the ingestion
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Calendar dates, stored as their raw text rendering.
    Date,
    /// Text/string values.
    Text,
}

impl DataType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }

    /// Returns true if this type is textual.
    pub fn is_textual(&self) -> bool {
        matches!(self, DataType::Text)
    }
}

/// A named column: declared type plus one value slot per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Declared element type.
    pub dtype: DataType,
    /// Cell values, `None` for missing entries.
    pub values: Vec<Option<Value>>,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, dtype: DataType, values: Vec<Option<Value>>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    /// Number of rows, including missing entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing entries.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Distinct non-missing values in natural order, deduplicated.
    pub fn distinct_sorted(&self) -> Vec<&Value> {
        let mut distinct: Vec<&Value> = self.values.iter().flatten().collect();
        distinct.sort_by(|a, b| a.natural_cmp(b));
        distinct.dedup_by(|a, b| a.natural_cmp(b) == Ordering::Equal);
        distinct
    }

    /// Number of distinct non-missing values.
    pub fn distinct_count(&self) -> usize {
        self.distinct_sorted().len()
    }
}

/// An ordered collection of named, equal-length columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: IndexMap<String, Column>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a sequence of columns, checking lengths.
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.insert_column(column)?;
        }
        Ok(table)
    }

    /// Insert a column, preserving overall column order.
    ///
    /// The column must match the table's row count. Inserting under an
    /// existing name overwrites that column in place, keeping its position.
    pub fn insert_column(&mut self, column: Column) -> Result<()> {
        let expected = self.row_count();
        let found = column.len();
        if !self.columns.is_empty() && found != expected {
            return Err(ScourError::LengthMismatch {
                column: column.name,
                expected,
                found,
            });
        }
        self.columns.insert(column.name.clone(), column);
        Ok(())
    }

    /// Number of rows; zero for a table with no columns.
    pub fn row_count(&self) -> usize {
        self.columns
            .first()
            .map(|(_, c)| c.len())
            .unwrap_or_default()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .get(name)
            .ok_or_else(|| ScourError::UnknownColumn {
                column: name.to_string(),
            })
    }

    /// True when a column with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Columns in table order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Check if a raw text field represents a missing/null value.
    pub fn is_null_token(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<Value> {
        Some(Value::Text(s.to_string()))
    }

    #[test]
    fn test_insert_rejects_length_mismatch() {
        let mut table = Table::new();
        table
            .insert_column(Column::new("a", DataType::Text, vec![text("x"), text("y")]))
            .unwrap();
        let err = table
            .insert_column(Column::new("b", DataType::Text, vec![text("z")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ScourError::LengthMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut table = Table::new();
        table
            .insert_column(Column::new("a", DataType::Text, vec![text("x")]))
            .unwrap();
        table
            .insert_column(Column::new("b", DataType::Text, vec![text("y")]))
            .unwrap();
        table
            .insert_column(Column::new("a", DataType::Integer, vec![Some(Value::Int(1))]))
            .unwrap();

        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(table.column("a").unwrap().dtype, DataType::Integer);
    }

    #[test]
    fn test_distinct_sorted_dedups_in_order() {
        let column = Column::new(
            "c",
            DataType::Text,
            vec![text("yes"), text("no"), text("yes"), None],
        );
        let distinct: Vec<String> = column
            .distinct_sorted()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(distinct, vec!["no", "yes"]);
        assert_eq!(column.distinct_count(), 2);
        assert_eq!(column.missing_count(), 1);
    }

    #[test]
    fn test_distinct_sorted_numeric_order() {
        let column = Column::new(
            "n",
            DataType::Integer,
            vec![
                Some(Value::Int(10)),
                Some(Value::Int(2)),
                Some(Value::Int(10)),
            ],
        );
        let distinct: Vec<String> = column
            .distinct_sorted()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(distinct, vec!["2", "10"]);
    }

    #[test]
    fn test_unknown_column() {
        let table = Table::new();
        assert!(matches!(
            table.column("missing"),
            Err(ScourError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_null_tokens() {
        for token in ["", "  ", "NA", "n/a", "NULL", "None", "nil", ".", "-"] {
            assert!(Table::is_null_token(token), "{token:?}");
        }
        assert!(!Table::is_null_token("0"));
        assert!(!Table::is_null_token("nan?"));
    }
}
