//! CSV ingestion: builds a typed [`Table`] from delimited text.
//!
//! The declared [`DataType`] of every column is decided here, once, by
//! scanning the non-missing raw fields: the narrowest of integer, float,
//! boolean, date, and text that fits them all. Integer/float mixes promote
//! to float.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ScourError};
use crate::table::{Column, DataType, Table, Value};

// Date patterns compiled once on first use.
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), // ISO date
        Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(), // US date
        Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap(), // European date
        Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap(), // Alt ISO
    ]
});

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Maximum data rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_rows: None,
        }
    }
}

/// Read a CSV file into a typed table using the default configuration.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Table> {
    read_csv_with(path, &ReaderConfig::default())
}

/// Read a CSV file into a typed table.
pub fn read_csv_with(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ScourError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    from_reader(file, config)
}

/// Read delimited text from any reader into a typed table.
///
/// The first record is taken as the header row; every data row must carry
/// the same field count or the read fails with
/// [`ScourError::RaggedRow`](crate::ScourError::RaggedRow). Blank lines
/// are skipped entirely rather than read as rows of missing values.
pub fn from_reader<R: Read>(reader: R, config: &ReaderConfig) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for (index, record) in csv_reader.records().enumerate() {
        if config.max_rows.is_some_and(|max_rows| index >= max_rows) {
            break;
        }
        let record = record?;
        if record.len() != headers.len() {
            return Err(ScourError::RaggedRow {
                row: index + 1,
                expected: headers.len(),
                found: record.len(),
            });
        }
        for (field, raw_column) in record.iter().zip(raw_columns.iter_mut()) {
            raw_column.push(if Table::is_null_token(field) {
                None
            } else {
                Some(field.trim().to_string())
            });
        }
    }

    let mut table = Table::new();
    for (name, raw) in headers.into_iter().zip(raw_columns) {
        table.insert_column(build_column(name, raw))?;
    }
    Ok(table)
}

/// Type a raw string column and convert its fields.
fn build_column(name: String, raw: Vec<Option<String>>) -> Column {
    let dtype = detect_dtype(raw.iter().flatten().map(String::as_str));
    let values = raw
        .into_iter()
        .map(|field| field.map(|f| convert(&f, dtype)))
        .collect();
    Column::new(name, dtype, values)
}

/// Narrowest declared type that fits every non-missing field.
fn detect_dtype<'a>(fields: impl Iterator<Item = &'a str>) -> DataType {
    let mut any = false;
    let mut all_int = true;
    let mut all_numeric = true;
    let mut all_bool = true;
    let mut all_date = true;

    for field in fields {
        any = true;
        all_int = all_int && field.parse::<i64>().is_ok();
        all_numeric = all_numeric && field.parse::<f64>().is_ok();
        all_bool = all_bool
            && (field.eq_ignore_ascii_case("true") || field.eq_ignore_ascii_case("false"));
        all_date = all_date && DATE_PATTERNS.iter().any(|pattern| pattern.is_match(field));
    }

    if !any {
        // Column of nothing but nulls; text is the safest declaration.
        return DataType::Text;
    }
    if all_int {
        DataType::Integer
    } else if all_numeric {
        DataType::Float
    } else if all_bool {
        DataType::Boolean
    } else if all_date {
        DataType::Date
    } else {
        DataType::Text
    }
}

/// Convert a validated field to a cell value for the declared type.
fn convert(field: &str, dtype: DataType) -> Value {
    match dtype {
        DataType::Integer => field
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or_else(|_| Value::Text(field.to_string())),
        DataType::Float => field
            .parse::<f64>()
            .map(Value::Float)
            .unwrap_or_else(|_| Value::Text(field.to_string())),
        DataType::Boolean => Value::Bool(field.eq_ignore_ascii_case("true")),
        // Dates keep their raw rendering; profiling only consults the
        // declared type and distinct/missing counts.
        DataType::Date | DataType::Text => Value::Text(field.to_string()),
    }
}
