//! Normalization recipes: deterministic value-to-integer code mappings.
//!
//! Every recipe maps missing entries to 0 and produces one code per input
//! row, positionally aligned with the source column.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScourError};
use crate::table::Column;

/// A normalization recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipe {
    /// Codes 0.. assigned to the sorted distinct values.
    Binary,
    /// Codes 0.. assigned to the sorted first characters of the distinct
    /// values.
    FirstLetter,
    /// Scores from the fixed size vocabulary, first match wins.
    SizeWord,
}

/// Ranked size vocabulary. Matching walks this list in order and the first
/// keyword found as a case-insensitive substring wins, so "large" beats
/// "mini" in "large mini-tower".
pub const SIZE_WORDS: &[(&str, i64)] = &[
    ("large", 10),
    ("high", 10),
    ("med", 5),
    ("small", 3),
    ("compact", 2),
    ("low", 1),
    ("mini", 1),
];

/// Sorted-distinct-value codes: the smallest distinct value maps to 0, the
/// next to 1, and so on. For a yes/no column this sends "yes" to 1.
pub(crate) fn binary_codes(column: &Column) -> Vec<i64> {
    let distinct = column.distinct_sorted();
    column
        .values
        .iter()
        .map(|cell| match cell {
            Some(value) => distinct
                .iter()
                .position(|d| d.natural_cmp(value) == Ordering::Equal)
                .map(|code| code as i64)
                .unwrap_or_default(),
            None => 0,
        })
        .collect()
}

/// First-character codes: distinct first characters, sorted, coded 0.. ;
/// each value maps to the code of its own first character.
///
/// A zero-length rendering has no first character and is coded 0, like a
/// missing entry.
pub(crate) fn first_letter_codes(column: &Column) -> Vec<i64> {
    let mut letters: Vec<char> = column
        .distinct_sorted()
        .iter()
        .filter_map(|value| value.to_string().chars().next())
        .collect();
    letters.sort_unstable();
    letters.dedup();

    column
        .values
        .iter()
        .map(|cell| match cell {
            Some(value) => value
                .to_string()
                .chars()
                .next()
                .and_then(|first| letters.iter().position(|l| *l == first))
                .map(|code| code as i64)
                .unwrap_or_default(),
            None => 0,
        })
        .collect()
}

/// Size-word scores from the ranked vocabulary.
pub(crate) fn size_word_codes(column: &Column) -> Result<Vec<i64>> {
    column
        .values
        .iter()
        .map(|cell| match cell {
            Some(value) => {
                let lowered = value.to_string().to_lowercase();
                SIZE_WORDS
                    .iter()
                    .find(|(keyword, _)| lowered.contains(keyword))
                    .map(|(_, score)| *score)
                    .ok_or_else(|| ScourError::NoSizeWordMatch {
                        column: column.name.clone(),
                        value: value.to_string(),
                    })
            }
            None => Ok(0),
        })
        .collect()
}
