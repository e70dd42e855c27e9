//! Tiered similarity scoring between a CSV header and a catalog field.
//!
//! The first applicable tier wins; ties within a tier are broken by
//! edit-distance strength, then by path depth (root fields beat deeply
//! nested fields sharing a leaf name).

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rapidfuzz::distance::levenshtein;

use dpp_model::FieldDescriptor;

use crate::patterns::synonym_targets;
use crate::utils::{acronym_forms, normalize_text, tokenize, word_tokens};

/// Match tiers in priority order; an earlier tier always outranks a
/// later one regardless of strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Normalized header equals the full path or its leaf segment.
    Exact,
    /// Synonym-table hit against the leaf or path tail.
    Synonym,
    /// Header token set equals the leaf token set.
    Token,
    /// Levenshtein distance within a length-proportional threshold.
    Edit,
    /// Acronym edit distance within a length-scaled threshold.
    Acronym,
}

/// A non-rejected score for one (header, field) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub tier: MatchTier,
    /// Tie-break strength within the tier, 0.0 to 1.0.
    pub strength: f64,
    /// Number of dotted segments in the field path.
    pub path_depth: usize,
}

impl MatchScore {
    /// Total ranking order: tier first, then strength descending, then
    /// shallower paths. `Ordering::Less` means "ranks higher".
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        self.tier
            .cmp(&other.tier)
            .then_with(|| other.strength.total_cmp(&self.strength))
            .then_with(|| self.path_depth.cmp(&other.path_depth))
    }
}

/// Strings shorter than this never enter the edit-distance tier;
/// short headers produce too many spurious near-matches.
const MIN_EDIT_LEN: usize = 4;

/// Score a header against a field. `None` is NO_MATCH.
pub fn score(header: &str, field: &FieldDescriptor) -> Option<MatchScore> {
    let header_tokens = word_tokens(header);
    if header_tokens.is_empty() {
        return None;
    }
    let norm_header = header_tokens.join(" ");
    let leaf_tokens = tokenize(field.leaf());
    let norm_leaf = leaf_tokens.join(" ");
    let norm_path = normalize_text(&field.path);
    let path_depth = field.path.split('.').count();
    let strength = similarity(&norm_header, &norm_leaf);

    if norm_header == norm_path || norm_header == norm_leaf {
        return Some(MatchScore {
            tier: MatchTier::Exact,
            strength: 1.0,
            path_depth,
        });
    }

    if let Some(phrases) = synonym_targets(&norm_header)
        && phrases
            .iter()
            .any(|phrase| norm_leaf == *phrase || norm_path.ends_with(phrase))
    {
        return Some(MatchScore {
            tier: MatchTier::Synonym,
            strength,
            path_depth,
        });
    }

    let header_set: BTreeSet<&str> = header_tokens.iter().map(String::as_str).collect();
    let leaf_set: BTreeSet<&str> = leaf_tokens.iter().map(String::as_str).collect();
    if header_set == leaf_set {
        return Some(MatchScore {
            tier: MatchTier::Token,
            strength,
            path_depth,
        });
    }

    let max_len = norm_header.chars().count().max(norm_leaf.chars().count());
    let dist = edit_distance(&norm_header, &norm_leaf);
    if max_len >= MIN_EDIT_LEN && dist <= max_len / 3 {
        return Some(MatchScore {
            tier: MatchTier::Edit,
            strength: 1.0 - dist as f64 / max_len as f64,
            path_depth,
        });
    }

    acronym_score(&header_tokens, field, path_depth)
}

fn acronym_score(
    header_tokens: &[String],
    field: &FieldDescriptor,
    path_depth: usize,
) -> Option<MatchScore> {
    let header_forms = acronym_forms(header_tokens);
    if header_forms.is_empty() {
        return None;
    }
    let mut field_forms = acronym_forms(&tokenize(field.leaf()));
    field_forms.extend(acronym_forms(&word_tokens(&field.path)));

    let mut best: Option<f64> = None;
    for header_form in &header_forms {
        for field_form in &field_forms {
            let h_len = header_form.chars().count();
            let f_len = field_form.chars().count();
            let threshold = (h_len.min(f_len) / 4).max(1);
            let dist = edit_distance(header_form, field_form);
            if dist <= threshold {
                let strength = 1.0 - dist as f64 / h_len.max(f_len) as f64;
                if best.is_none_or(|b| strength > b) {
                    best = Some(strength);
                }
            }
        }
    }
    best.map(|strength| MatchScore {
        tier: MatchTier::Acronym,
        strength,
        path_depth,
    })
}

fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// Length-scaled edit similarity, 1.0 for identical strings.
fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpp_model::FieldType;

    fn field(path: &str) -> FieldDescriptor {
        FieldDescriptor {
            path: path.to_string(),
            field_type: FieldType::String,
            format: None,
            enum_values: None,
            is_array: false,
            array_family: None,
            required: false,
            one_of_groups: Vec::new(),
        }
    }

    #[test]
    fn exact_leaf_match_tops_the_tiers() {
        let got = score("Weight", &field("physicalDimensions.weight")).unwrap();
        assert_eq!(got.tier, MatchTier::Exact);
        assert!((got.strength - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_full_path_match() {
        let got = score("Manufacturer Name", &field("manufacturer.name")).unwrap();
        assert_eq!(got.tier, MatchTier::Exact);
    }

    #[test]
    fn synonym_hit_when_no_exact_match() {
        let got = score("Brand", &field("tradeName")).unwrap();
        assert_eq!(got.tier, MatchTier::Synonym);
    }

    #[test]
    fn token_tie_prefers_shorter_path() {
        let shallow = score("Name", &field("name")).unwrap();
        let deep = score("Name", &field("manufacturer.plant.name")).unwrap();
        assert_eq!(shallow.cmp_rank(&deep), Ordering::Less);
    }

    #[test]
    fn edit_distance_tolerates_typos_in_long_names() {
        let got = score("Manufacturr", &field("manufacturer")).unwrap();
        assert_eq!(got.tier, MatchTier::Edit);
    }

    #[test]
    fn short_strings_do_not_fuzzy_match() {
        assert!(score("Id", &field("ean")).is_none());
    }

    #[test]
    fn dpp_id_is_a_synonym_for_the_passport_id() {
        let got = score("DPP ID", &field("digitalProductPassportId")).unwrap();
        assert_eq!(got.tier, MatchTier::Synonym);
    }

    #[test]
    fn acronym_matches_long_camel_case_names() {
        let got = score("CAS No", &field("chemicalAbstractsServiceNumber")).unwrap();
        assert_eq!(got.tier, MatchTier::Acronym);
    }

    #[test]
    fn acronym_rejects_unrelated_fields() {
        assert!(score("DPP ID", &field("uniqueProductId")).is_none());
    }

    #[test]
    fn numeric_tokens_are_ignored_for_matching() {
        let got = score("Material 1", &field("materials")).unwrap();
        assert_eq!(got.tier, MatchTier::Synonym);
    }

    #[test]
    fn blank_headers_never_match() {
        assert!(score("  ", &field("weight")).is_none());
        assert!(score("42", &field("weight")).is_none());
    }
}
