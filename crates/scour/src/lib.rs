//! Column profiling and normalization for tabular datasets.
//!
//! `scour` inspects each column of an in-memory [`Table`], scores its
//! health along completeness and consistency, infers a semantic type from
//! a closed taxonomy, and derives integer-coded columns through a small
//! set of deterministic normalization recipes.
//!
//! # Core Principles
//!
//! - **Per-column**: every metric is an independent function of one column
//! - **Additive**: normalization only appends derived columns, existing
//!   data is never modified
//! - **Deterministic**: identical column content always yields the same
//!   scores, labels, and codes
//!
//! # Example
//!
//! ```
//! # fn main() -> scour::Result<()> {
//! use scour::{Column, DataType, Profiler, SemanticType, Table, Value};
//!
//! let table = Table::from_columns([Column::new(
//!     "subscribed",
//!     DataType::Text,
//!     vec![
//!         Some(Value::Text("yes".into())),
//!         Some(Value::Text("no".into())),
//!         None,
//!     ],
//! )])?;
//!
//! let mut profiler = Profiler::new(table);
//! assert_eq!(
//!     profiler.infer_type("subscribed")?,
//!     Some(SemanticType::BinaryFlag)
//! );
//!
//! profiler.normalize_inferred()?;
//! assert!(profiler.table().contains("subscribed_normalized"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod input;
pub mod normalize;
pub mod profile;
pub mod table;

pub use error::{Result, ScourError};
pub use input::{ReaderConfig, from_reader, read_csv, read_csv_with};
pub use normalize::{Recipe, SIZE_WORDS};
pub use profile::{
    ColumnHealth, ColumnProfile, DEFAULT_SUFFIX, DEFAULT_TYPE_THRESHOLD, Profiler, SemanticType,
    TableProfile,
};
pub use table::{Column, DataType, Table, Value};
