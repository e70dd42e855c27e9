//! Interactive mapping session: catalog, column hints, and the live
//! mapping, with ranked candidate lookup and readiness checks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use dpp_model::{
    ColumnHint, CompletenessReport, FieldDescriptor, Mapping, MappingConfig, MappingIssue,
    base_path,
};

use crate::conflicts::{CandidateStatus, assess_candidate, mapping_issues};
use crate::engine::AutoMapper;
use crate::indices::{IndexSuggestion, index_suggestions, used_indices};
use crate::score::{MatchScore, score};

/// One ranked candidate field for a header being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate<'a> {
    pub field: &'a FieldDescriptor,
    pub score: MatchScore,
    pub status: CandidateStatus,
}

/// Header counts for progress display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSummary {
    pub total: usize,
    pub mapped: usize,
    pub approved: usize,
    pub skipped: usize,
    pub unmapped: usize,
}

/// Everything a mapping review session needs in one place.
///
/// Owns the field catalog and per-column hints for the lifetime of the
/// session; all edits funnel through the delegation methods so approval
/// semantics stay in [`Mapping`].
#[derive(Debug, Clone)]
pub struct MappingState {
    catalog: Vec<FieldDescriptor>,
    hints: BTreeMap<String, ColumnHint>,
    mapping: Mapping,
}

impl MappingState {
    /// Start a session from auto-mapped suggestions.
    pub fn from_headers(
        catalog: Vec<FieldDescriptor>,
        headers: &[String],
        hints: BTreeMap<String, ColumnHint>,
    ) -> Self {
        let mapping = AutoMapper::new(&catalog).suggest(headers);
        debug!(headers = headers.len(), fields = catalog.len(), "mapping session started");
        Self {
            catalog,
            hints,
            mapping,
        }
    }

    /// Start a session from a saved config; present headers come back
    /// approved, everything else starts unmapped.
    pub fn from_config(
        catalog: Vec<FieldDescriptor>,
        headers: &[String],
        hints: BTreeMap<String, ColumnHint>,
        config: &MappingConfig,
    ) -> Self {
        Self {
            catalog,
            hints,
            mapping: config.seed(headers),
        }
    }

    pub fn catalog(&self) -> &[FieldDescriptor] {
        &self.catalog
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn set_target(&mut self, header: &str, target: Option<String>) -> bool {
        self.mapping.set_target(header, target)
    }

    pub fn approve(&mut self, header: &str) -> bool {
        self.mapping.approve(header)
    }

    pub fn skip(&mut self, header: &str) -> bool {
        self.mapping.skip(header)
    }

    pub fn clear(&mut self, header: &str) -> bool {
        self.mapping.clear(header)
    }

    /// Current advisory conflicts across the whole mapping.
    pub fn issues(&self) -> Vec<MappingIssue> {
        mapping_issues(&self.mapping, &self.catalog, &self.hints)
    }

    /// Required catalog fields not covered by any approved entry.
    pub fn completeness(&self) -> CompletenessReport {
        let missing_required = self
            .catalog
            .iter()
            .filter(|field| field.required)
            .filter(|field| {
                !self.mapping.approved_entries().any(|entry| {
                    entry
                        .target
                        .as_deref()
                        .and_then(|target| base_path(target).ok())
                        .is_some_and(|base| base == field.path)
                })
            })
            .map(|field| field.path.clone())
            .collect();
        CompletenessReport { missing_required }
    }

    /// Scored candidates for one header, best first. The header's own
    /// current target never counts against a candidate; conflicts are
    /// assessed against the rest of the mapping. With
    /// `include_conflicting` off, only clean candidates come back.
    pub fn candidates_for(&self, header: &str, include_conflicting: bool) -> Vec<RankedCandidate<'_>> {
        let mut others = self.mapping.clone();
        others.clear(header);
        let hint = self.hints.get(header);

        let mut candidates: Vec<RankedCandidate<'_>> = self
            .catalog
            .iter()
            .filter_map(|field| {
                let score = score(header, field)?;
                let status = assess_candidate(field, &others, &self.catalog, hint);
                if status == CandidateStatus::Ok || include_conflicting {
                    Some(RankedCandidate {
                        field,
                        score,
                        status,
                    })
                } else {
                    None
                }
            })
            .collect();
        candidates.sort_by(|a, b| {
            a.score
                .cmp_rank(&b.score)
                .then_with(|| a.field.path.cmp(&b.field.path))
        });
        candidates
    }

    /// Index choices for a repeating group, existing positions first.
    pub fn index_suggestions_for(&self, family: &str) -> Vec<IndexSuggestion> {
        index_suggestions(&used_indices(&self.mapping, family))
    }

    pub fn summary(&self) -> MappingSummary {
        let mut summary = MappingSummary {
            total: self.mapping.entries().len(),
            ..MappingSummary::default()
        };
        for entry in self.mapping.entries() {
            match (&entry.target, entry.approved) {
                (Some(_), true) => {
                    summary.mapped += 1;
                    summary.approved += 1;
                }
                (Some(_), false) => summary.mapped += 1,
                (None, true) => summary.skipped += 1,
                (None, false) => summary.unmapped += 1,
            }
        }
        summary
    }

    /// Ready for record generation: every header reviewed and no
    /// outstanding conflicts.
    pub fn can_generate(&self) -> bool {
        self.mapping.is_fully_reviewed() && self.issues().is_empty()
    }

    /// Snapshot the approved entries for persistence.
    pub fn to_config(&self) -> MappingConfig {
        MappingConfig::from_mapping(&self.mapping)
    }
}
