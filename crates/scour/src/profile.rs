//! Column health scoring, semantic type inference, and the profiler that
//! ties them to normalization.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScourError};
use crate::normalize::{self, Recipe};
use crate::table::{Column, DataType, Table, Value};

/// Distinct-value ceiling for the consistency score: one distinct value
/// scores 100, and the score falls linearly to 0 at seven or more.
const MAX_VALUE_COUNT: usize = 6;

/// Default cutoff for the sparse/id branches of type inference.
///
/// The cutoff is compared directly against health values on a 0-100
/// percentage scale, so with the default a column only reads as sparse or
/// id-like when the metric rounds below 0.2 (e.g. one present value in a
/// thousand rows). This mirrors the behavior the scoring model was
/// calibrated against; pass an explicit threshold such as 20.0 to
/// [`Profiler::infer_type_with_threshold`] for a true 20% cutoff.
pub const DEFAULT_TYPE_THRESHOLD: f64 = 0.2;

/// Suffix appended to derived column names by default.
pub const DEFAULT_SUFFIX: &str = "_normalized";

/// Health metrics for a single column, both percentages in [0, 100]
/// rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnHealth {
    /// Percentage of non-missing values.
    pub completeness: f64,
    /// 100 for at most one distinct non-missing value, 0 beyond six.
    pub consistency: f64,
}

/// Inferred semantic category for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// High-diversity identifier-like column.
    Id,
    /// Continuous scale. Part of the taxonomy but never produced by the
    /// inference rule, which sends all healthy numeric columns to
    /// [`SemanticType::Flag`].
    Scale,
    /// Consistent numeric column.
    Flag,
    /// Consistent textual column.
    ObjectFlag,
    /// Column with at most two distinct values.
    BinaryFlag,
    /// Almost entirely missing column.
    Sparse,
}

impl SemanticType {
    /// Snake-case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Id => "id",
            SemanticType::Scale => "scale",
            SemanticType::Flag => "flag",
            SemanticType::ObjectFlag => "object_flag",
            SemanticType::BinaryFlag => "binary_flag",
            SemanticType::Sparse => "sparse",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile of a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the table.
    pub position: usize,
    /// Declared element type.
    pub dtype: DataType,
    /// Number of missing entries.
    pub missing_count: usize,
    /// Number of distinct non-missing values.
    pub distinct_count: usize,
    /// Health metrics.
    pub health: ColumnHealth,
    /// Inferred semantic type, when the decision order produces one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_type: Option<SemanticType>,
}

/// Whole-table profile report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProfile {
    /// Number of rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the profile was computed.
    pub profiled_at: DateTime<Utc>,
    /// Per-column profiles, in table order.
    pub columns: Vec<ColumnProfile>,
}

/// The column profiler and normalizer.
///
/// Owns the table it inspects; read operations are pure, and only
/// [`Profiler::normalize_columns`] mutates the table, by appending derived
/// columns.
#[derive(Debug, Clone)]
pub struct Profiler {
    table: Table,
    target_column: Option<String>,
}

impl Profiler {
    /// Wrap a table with no target column.
    pub fn new(table: Table) -> Self {
        Self {
            table,
            target_column: None,
        }
    }

    /// Wrap a table, excluding a target column (e.g. a prediction label)
    /// from scalar-column listings.
    pub fn with_target(table: Table, target: impl Into<String>) -> Self {
        Self {
            table,
            target_column: Some(target.into()),
        }
    }

    /// The wrapped table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Consume the profiler and return the table.
    pub fn into_table(self) -> Table {
        self.table
    }

    /// The configured target column, if any.
    pub fn target_column(&self) -> Option<&str> {
        self.target_column.as_deref()
    }

    /// Names of columns with a numeric declared type, in table order,
    /// excluding the target column.
    pub fn scalar_columns(&self) -> Vec<&str> {
        self.table
            .columns()
            .filter(|column| {
                column.dtype.is_numeric() && Some(column.name.as_str()) != self.target_column()
            })
            .map(|column| column.name.as_str())
            .collect()
    }

    /// Health metrics for one column.
    pub fn column_health(&self, name: &str) -> Result<ColumnHealth> {
        let column = self.table.column(name)?;
        if column.is_empty() {
            return Err(ScourError::EmptyColumn {
                column: name.to_string(),
            });
        }
        let rows = column.len();
        let present = rows - column.missing_count();
        let distinct = column.distinct_count();

        let completeness = round2(100.0 * present as f64 / rows as f64);
        // Zero distinct values (all missing) counts as "at most one", so
        // the headroom caps at the ceiling and the score at 100.
        let headroom =
            (MAX_VALUE_COUNT as f64 + 1.0 - distinct as f64).clamp(0.0, MAX_VALUE_COUNT as f64);
        let consistency = round2(100.0 * headroom / MAX_VALUE_COUNT as f64);

        Ok(ColumnHealth {
            completeness,
            consistency,
        })
    }

    /// Health metrics for every column, in table order.
    pub fn healthiness(&self) -> Result<IndexMap<String, ColumnHealth>> {
        self.table
            .column_names()
            .map(|name| Ok((name.to_string(), self.column_health(name)?)))
            .collect()
    }

    /// Infer a semantic type with the default threshold.
    pub fn infer_type(&self, name: &str) -> Result<Option<SemanticType>> {
        self.infer_type_with_threshold(name, DEFAULT_TYPE_THRESHOLD)
    }

    /// Infer a semantic type for one column. First matching rule wins:
    /// sparse, id, numeric flag, binary flag, object flag, then no label.
    pub fn infer_type_with_threshold(
        &self,
        name: &str,
        threshold: f64,
    ) -> Result<Option<SemanticType>> {
        let column = self.table.column(name)?;
        let health = self.column_health(name)?;

        let semantic = if health.completeness < threshold {
            Some(SemanticType::Sparse)
        } else if health.consistency < threshold {
            Some(SemanticType::Id)
        } else if column.dtype.is_numeric() {
            Some(SemanticType::Flag)
        } else if column.distinct_count() <= 2 {
            Some(SemanticType::BinaryFlag)
        } else if column.dtype.is_textual() {
            Some(SemanticType::ObjectFlag)
        } else {
            None
        };
        Ok(semantic)
    }

    /// Inferred semantic type for every column, in table order, using the
    /// default threshold.
    pub fn guess_types(&self) -> Result<IndexMap<String, Option<SemanticType>>> {
        self.table
            .column_names()
            .map(|name| Ok((name.to_string(), self.infer_type(name)?)))
            .collect()
    }

    /// Full profile report for the table.
    pub fn profile(&self) -> Result<TableProfile> {
        let mut columns = Vec::with_capacity(self.table.column_count());
        for (position, column) in self.table.columns().enumerate() {
            columns.push(ColumnProfile {
                name: column.name.clone(),
                position,
                dtype: column.dtype,
                missing_count: column.missing_count(),
                distinct_count: column.distinct_count(),
                health: self.column_health(&column.name)?,
                semantic_type: self.infer_type(&column.name)?,
            });
        }
        Ok(TableProfile {
            row_count: self.table.row_count(),
            column_count: self.table.column_count(),
            profiled_at: Utc::now(),
            columns,
        })
    }

    /// Normalize the inferred binary-flag columns in place, appending
    /// derived columns under the default suffix.
    pub fn normalize_inferred(&mut self) -> Result<&mut Self> {
        self.normalize_columns(None, DEFAULT_SUFFIX)
    }

    /// Normalize the named columns (or, when `names` is `None`, every
    /// column inferred as a binary flag) and append the derived integer
    /// columns as `<name><suffix>`.
    ///
    /// Pre-existing columns are never modified or removed, with one
    /// exception: a derived name that collides with an existing column
    /// overwrites it. Returns `&mut Self` for chaining.
    pub fn normalize_columns(
        &mut self,
        names: Option<&[&str]>,
        suffix: &str,
    ) -> Result<&mut Self> {
        let selected: Vec<String> = match names {
            Some(names) => names.iter().map(|n| n.to_string()).collect(),
            None => {
                let names: Vec<String> = self.table.column_names().map(str::to_string).collect();
                let mut binary = Vec::new();
                for name in names {
                    if self.infer_type(&name)? == Some(SemanticType::BinaryFlag) {
                        binary.push(name);
                    }
                }
                binary
            }
        };

        for name in &selected {
            let codes = self.normalize_column(name, None)?;
            let values = codes.into_iter().map(|code| Some(Value::Int(code))).collect();
            let derived = Column::new(format!("{name}{suffix}"), DataType::Integer, values);
            self.table.insert_column(derived)?;
        }
        Ok(self)
    }

    /// Compute the normalized codes for one column without touching the
    /// table.
    ///
    /// With no explicit recipe the column must be inferred as a binary
    /// flag, which selects [`Recipe::Binary`]; any other inference fails
    /// with [`ScourError::UnsupportedNormalization`]. The first-letter and
    /// size-word recipes are only ever applied on request.
    pub fn normalize_column(&self, name: &str, recipe: Option<Recipe>) -> Result<Vec<i64>> {
        let column = self.table.column(name)?;
        let recipe = match recipe {
            Some(recipe) => recipe,
            None => {
                if self.infer_type(name)? == Some(SemanticType::BinaryFlag) {
                    Recipe::Binary
                } else {
                    return Err(ScourError::UnsupportedNormalization {
                        column: name.to_string(),
                    });
                }
            }
        };

        match recipe {
            Recipe::Binary => Ok(normalize::binary_codes(column)),
            Recipe::FirstLetter => Ok(normalize::first_letter_codes(column)),
            Recipe::SizeWord => normalize::size_word_codes(column),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
