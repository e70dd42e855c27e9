//! Advisory findings returned as data, never as errors.

use serde::{Deserialize, Serialize};

/// Kind of advisory problem attached to a mapped header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IssueKind {
    /// The header's target shares a `oneOf` branch set with another
    /// header's target, on a different branch. Only one branch may be
    /// populated per record.
    BranchConflict { with_header: String, set_id: usize },
    /// The column's inferred value shape is incompatible with the
    /// target's declared type or format.
    TypeIncompatible { target: String },
}

/// A per-header conflict flag. Surfaced for review, never auto-corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingIssue {
    pub header: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

/// Required schema fields with no approved mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub missing_required: Vec<String>,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// A cell value that could not be coerced to its target's declared type.
/// The raw string is kept in the record so the source data stays visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionWarning {
    pub row: usize,
    pub header: String,
    pub target: String,
    pub value: String,
}
