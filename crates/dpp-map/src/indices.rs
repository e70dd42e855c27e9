//! Array-index bookkeeping for repeating groups.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use dpp_model::{Mapping, PathSegment, parse_target_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// An index some entry already populates.
    Existing,
    /// The next fresh position for the family.
    New,
}

/// One selectable index for a repeating group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSuggestion {
    pub value: usize,
    pub kind: SuggestionKind,
}

/// Literal indices currently claimed under an array family.
///
/// Scans every mapped entry's target path for `family[i]...`. Targets
/// that fail to parse are ignored; a half-typed manual path must not
/// poison the suggestion list.
pub fn used_indices(mapping: &Mapping, family: &str) -> BTreeSet<usize> {
    let family_keys: Vec<&str> = family.split('.').collect();
    let mut used = BTreeSet::new();
    for entry in mapping.mapped_entries() {
        let Some(target) = entry.target.as_deref() else {
            continue;
        };
        let Ok(segments) = parse_target_path(target) else {
            continue;
        };
        if segments.len() <= family_keys.len() {
            continue;
        }
        let prefix_matches = family_keys.iter().enumerate().all(|(i, key)| {
            matches!(&segments[i], PathSegment::Key(k) if k == key)
        });
        if prefix_matches
            && let PathSegment::Index(index) = &segments[family_keys.len()]
        {
            used.insert(*index);
        }
    }
    used
}

/// Ordered index choices: each used index ascending (`Existing`),
/// then exactly one `New` — 0 when nothing is used, otherwise one
/// past the highest used index. `New` is always last.
pub fn index_suggestions(used: &BTreeSet<usize>) -> Vec<IndexSuggestion> {
    let mut suggestions: Vec<IndexSuggestion> = used
        .iter()
        .map(|&value| IndexSuggestion {
            value,
            kind: SuggestionKind::Existing,
        })
        .collect();
    let next = used.iter().next_back().map_or(0, |max| max + 1);
    suggestions.push(IndexSuggestion {
        value: next,
        kind: SuggestionKind::New,
    });
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping_with(targets: &[(&str, &str)]) -> Mapping {
        let headers: Vec<String> = targets.iter().map(|(h, _)| (*h).to_string()).collect();
        let mut mapping = Mapping::new(&headers);
        for (header, target) in targets {
            mapping.set_target(header, Some((*target).to_string()));
        }
        mapping
    }

    #[test]
    fn collects_indices_under_the_family() {
        let mapping = mapping_with(&[
            ("A", "materials[0].name"),
            ("B", "materials[5].name"),
            ("C", "manufacturer.name"),
            ("D", "substances[1].casNumber"),
        ]);
        let used = used_indices(&mapping, "materials");
        assert_eq!(used.into_iter().collect::<Vec<_>>(), vec![0, 5]);
    }

    #[test]
    fn suggestion_order_existing_then_new() {
        let used: BTreeSet<usize> = [0, 5].into_iter().collect();
        let suggestions = index_suggestions(&used);
        assert_eq!(
            suggestions,
            vec![
                IndexSuggestion { value: 0, kind: SuggestionKind::Existing },
                IndexSuggestion { value: 5, kind: SuggestionKind::Existing },
                IndexSuggestion { value: 6, kind: SuggestionKind::New },
            ]
        );
    }

    #[test]
    fn empty_family_suggests_index_zero() {
        let suggestions = index_suggestions(&BTreeSet::new());
        assert_eq!(
            suggestions,
            vec![IndexSuggestion { value: 0, kind: SuggestionKind::New }]
        );
    }

    #[test]
    fn unparseable_targets_are_ignored() {
        let mapping = mapping_with(&[("A", "materials[0].name"), ("B", "materials[")]);
        let used = used_indices(&mapping, "materials");
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn dotted_families_match_whole_prefix() {
        let mapping = mapping_with(&[("A", "packaging.layers[2].material")]);
        let used = used_indices(&mapping, "packaging.layers");
        assert_eq!(used.iter().copied().collect::<Vec<_>>(), vec![2]);
        assert!(used_indices(&mapping, "layers").is_empty());
    }
}
