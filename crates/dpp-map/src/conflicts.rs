//! oneOf-branch and type-compatibility conflict detection.
//!
//! Conflicts are advisory: they are surfaced as per-header flags and
//! block approval in the consuming UI, but nothing here ever removes
//! or rewrites an entry.

use std::collections::BTreeMap;

use dpp_model::{
    ColumnHint, ColumnType, FieldDescriptor, FieldType, IssueKind, Mapping, MappingEntry,
    MappingIssue, base_path,
};

/// Outcome of checking one candidate field for one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateStatus {
    Ok,
    /// Mapping this field would populate a second branch of a oneOf
    /// set already claimed by another header.
    BranchConflict { with_header: String },
    /// The column's inferred value shape cannot feed this field.
    TypeIncompatible,
}

/// Per-header conflict flags for the current mapping.
///
/// Branch conflicts are reported symmetrically: if A conflicts with B,
/// B gets a flag naming A. Type flags cover mapped headers whose
/// inferred column shape is incompatible with the target.
pub fn mapping_issues(
    mapping: &Mapping,
    catalog: &[FieldDescriptor],
    hints: &BTreeMap<String, ColumnHint>,
) -> Vec<MappingIssue> {
    let resolved = resolve_entries(mapping, catalog);
    let mut issues = Vec::new();

    for (i, (entry_a, field_a)) in resolved.iter().enumerate() {
        for (entry_b, field_b) in &resolved[i + 1..] {
            if let Some(set_id) = branches_clash(field_a, field_b) {
                issues.push(MappingIssue {
                    header: entry_a.header.clone(),
                    kind: IssueKind::BranchConflict {
                        with_header: entry_b.header.clone(),
                        set_id,
                    },
                });
                issues.push(MappingIssue {
                    header: entry_b.header.clone(),
                    kind: IssueKind::BranchConflict {
                        with_header: entry_a.header.clone(),
                        set_id,
                    },
                });
            }
        }
    }

    for (entry, field) in &resolved {
        if let Some(hint) = hints.get(&entry.header)
            && !type_compatible(hint, field)
            && let Some(target) = entry.target.as_ref()
        {
            issues.push(MappingIssue {
                header: entry.header.clone(),
                kind: IssueKind::TypeIncompatible {
                    target: target.clone(),
                },
            });
        }
    }

    issues
}

/// Check a candidate field for a header being edited.
pub fn assess_candidate(
    field: &FieldDescriptor,
    mapping: &Mapping,
    catalog: &[FieldDescriptor],
    hint: Option<&ColumnHint>,
) -> CandidateStatus {
    for (entry, mapped_field) in resolve_entries(mapping, catalog) {
        if branches_clash(field, mapped_field).is_some() {
            return CandidateStatus::BranchConflict {
                with_header: entry.header.clone(),
            };
        }
    }
    if let Some(hint) = hint
        && !type_compatible(hint, field)
    {
        return CandidateStatus::TypeIncompatible;
    }
    CandidateStatus::Ok
}

/// Candidate fields for a header, with conflicting candidates either
/// excluded (default) or kept and marked (`include_conflicting`).
pub fn filter_candidates<'a>(
    catalog: &'a [FieldDescriptor],
    mapping: &Mapping,
    hint: Option<&ColumnHint>,
    include_conflicting: bool,
) -> Vec<(&'a FieldDescriptor, CandidateStatus)> {
    catalog
        .iter()
        .filter_map(|field| {
            let status = assess_candidate(field, mapping, catalog, hint);
            if status == CandidateStatus::Ok || include_conflicting {
                Some((field, status))
            } else {
                None
            }
        })
        .collect()
}

/// Numeric columns must not feed date or enum leaves; numeric into a
/// generic string is acceptable.
pub fn type_compatible(hint: &ColumnHint, field: &FieldDescriptor) -> bool {
    let is_date = matches!(field.format.as_deref(), Some("date" | "date-time"));
    match hint.column_type {
        ColumnType::Text => true,
        ColumnType::Numeric => {
            field.enum_values.is_none() && !is_date && field.field_type != FieldType::Boolean
        }
        ColumnType::Boolean => {
            matches!(field.field_type, FieldType::Boolean | FieldType::String)
                && field.enum_values.is_none()
                && !is_date
        }
    }
}

fn resolve_entries<'a>(
    mapping: &'a Mapping,
    catalog: &'a [FieldDescriptor],
) -> Vec<(&'a MappingEntry, &'a FieldDescriptor)> {
    mapping
        .mapped_entries()
        .filter_map(|entry| {
            let target = entry.target.as_deref()?;
            let base = base_path(target).ok()?;
            catalog
                .iter()
                .find(|field| field.path == base)
                .map(|field| (entry, field))
        })
        .collect()
}

fn branches_clash(a: &FieldDescriptor, b: &FieldDescriptor) -> Option<usize> {
    for group_a in &a.one_of_groups {
        for group_b in &b.one_of_groups {
            if group_a.set_id == group_b.set_id && group_a.branch != group_b.branch {
                return Some(group_a.set_id);
            }
        }
    }
    None
}
