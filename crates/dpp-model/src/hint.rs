//! Inferred characteristics of a source CSV column.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::value::{is_boolean_literal, is_numeric_literal};

/// Dominant value shape of a column, inferred from its non-empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Numeric,
    Boolean,
}

/// Hints about a source column's characteristics.
///
/// Used by suggestion filtering to avoid pairing e.g. numeric columns
/// with date or enum leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnHint {
    pub column_type: ColumnType,
    /// Ratio of empty cells to total rows (0.0 to 1.0).
    pub null_ratio: f64,
    /// Ratio of distinct values to non-empty cells (0.0 to 1.0).
    pub unique_ratio: f64,
}

impl Default for ColumnHint {
    fn default() -> Self {
        Self {
            column_type: ColumnType::Text,
            null_ratio: 0.0,
            unique_ratio: 0.0,
        }
    }
}

impl ColumnHint {
    /// Infer a hint from the column's raw cell values.
    ///
    /// The column is `Numeric` or `Boolean` only when every non-empty
    /// cell matches the respective literal grammar.
    pub fn from_samples<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut total = 0usize;
        let mut empty = 0usize;
        let mut numeric = 0usize;
        let mut boolean = 0usize;
        let mut distinct = BTreeSet::new();
        for value in values {
            total += 1;
            let trimmed = value.trim();
            if trimmed.is_empty() {
                empty += 1;
                continue;
            }
            distinct.insert(trimmed.to_string());
            if is_numeric_literal(trimmed) {
                numeric += 1;
            } else if is_boolean_literal(trimmed) {
                boolean += 1;
            }
        }
        let filled = total - empty;
        let column_type = if filled > 0 && numeric == filled {
            ColumnType::Numeric
        } else if filled > 0 && boolean == filled {
            ColumnType::Boolean
        } else {
            ColumnType::Text
        };
        Self {
            column_type,
            null_ratio: if total > 0 {
                empty as f64 / total as f64
            } else {
                0.0
            },
            unique_ratio: if filled > 0 {
                distinct.len() as f64 / filled as f64
            } else {
                0.0
            },
        }
    }
}
