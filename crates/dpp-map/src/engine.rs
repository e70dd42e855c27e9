//! Global greedy auto-mapping of CSV headers onto catalog fields.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use dpp_model::{FieldDescriptor, Mapping};

use crate::score::{MatchScore, score};
use crate::utils::group_number;

/// Seeds an initial [`Mapping`] from the header list and the field
/// catalog. All produced entries are unapproved suggestions.
///
/// The full header x field score matrix is computed once, then
/// assignments are made greedily in descending rank order, so a strong
/// global match is never starved by a weaker match that happens to
/// appear earlier in the header list. Repeating-group columns that
/// carry a trailing number land on matching array positions regardless
/// of column order.
pub struct AutoMapper<'a> {
    catalog: &'a [FieldDescriptor],
}

struct Candidate<'a> {
    header_idx: usize,
    field: &'a FieldDescriptor,
    score: MatchScore,
}

struct ArrayPick<'a> {
    header_idx: usize,
    field: &'a FieldDescriptor,
    number: Option<u64>,
}

impl<'a> AutoMapper<'a> {
    pub fn new(catalog: &'a [FieldDescriptor]) -> Self {
        Self { catalog }
    }

    pub fn suggest(&self, headers: &[String]) -> Mapping {
        let mut candidates: Vec<Candidate<'a>> = Vec::new();
        for (header_idx, header) in headers.iter().enumerate() {
            for field in self.catalog {
                if let Some(score) = score(header, field) {
                    candidates.push(Candidate {
                        header_idx,
                        field,
                        score,
                    });
                }
            }
        }
        // Total order keeps the pass deterministic, so identical inputs
        // always produce an identical mapping.
        candidates.sort_by(|a, b| {
            a.score
                .cmp_rank(&b.score)
                .then_with(|| a.header_idx.cmp(&b.header_idx))
                .then_with(|| a.field.path.cmp(&b.field.path))
        });

        let mut mapping = Mapping::new(headers);
        let mut assigned = vec![false; headers.len()];
        let mut claimed_scalars: BTreeSet<&str> = BTreeSet::new();
        let mut claimed_slots: BTreeSet<(&str, u64)> = BTreeSet::new();
        let mut array_picks: Vec<ArrayPick<'a>> = Vec::new();

        for candidate in candidates {
            if assigned[candidate.header_idx] {
                continue;
            }
            if candidate.field.is_array {
                let number = group_number(&headers[candidate.header_idx]);
                if let Some(n) = number
                    && !claimed_slots.insert((candidate.field.path.as_str(), n))
                {
                    // This (leaf, number) slot is already claimed.
                    continue;
                }
                assigned[candidate.header_idx] = true;
                array_picks.push(ArrayPick {
                    header_idx: candidate.header_idx,
                    field: candidate.field,
                    number,
                });
            } else {
                if claimed_scalars.contains(candidate.field.path.as_str()) {
                    continue;
                }
                claimed_scalars.insert(candidate.field.path.as_str());
                assigned[candidate.header_idx] = true;
                mapping.set_target(
                    &headers[candidate.header_idx],
                    Some(candidate.field.path.clone()),
                );
            }
        }

        self.resolve_array_indices(headers, &mut mapping, array_picks);

        debug!(
            headers = headers.len(),
            mapped = mapping.mapped_entries().count(),
            "auto-mapping complete"
        );
        mapping
    }

    /// Turn per-family group numbers into dense zero-based indices.
    ///
    /// Distinct numbers rank ascending by numeric value, so "Mat 1" gets
    /// a lower index than "Mat 3" whichever comes first in the file.
    /// Numberless headers take the next unused index per family.
    fn resolve_array_indices(
        &self,
        headers: &[String],
        mapping: &mut Mapping,
        mut picks: Vec<ArrayPick<'a>>,
    ) {
        let mut family_numbers: BTreeMap<&str, BTreeSet<u64>> = BTreeMap::new();
        for pick in &picks {
            if let Some(number) = pick.number {
                family_numbers
                    .entry(family_of(pick.field))
                    .or_default()
                    .insert(number);
            }
        }
        let mut rank: BTreeMap<(&str, u64), usize> = BTreeMap::new();
        let mut next_free: BTreeMap<&str, usize> = BTreeMap::new();
        for (family, numbers) in &family_numbers {
            for (index, number) in numbers.iter().enumerate() {
                rank.insert((family, *number), index);
            }
            next_free.insert(family, numbers.len());
        }

        // Header order for numberless picks keeps index handout stable.
        picks.sort_by_key(|pick| pick.header_idx);
        for pick in picks {
            let family = family_of(pick.field);
            let index = match pick.number {
                Some(number) => rank[&(family, number)],
                None => {
                    let slot = next_free.entry(family).or_insert(0);
                    let index = *slot;
                    *slot += 1;
                    index
                }
            };
            mapping.set_target(
                &headers[pick.header_idx],
                Some(pick.field.concrete_target(Some(index))),
            );
        }
    }
}

fn family_of(field: &FieldDescriptor) -> &str {
    field.array_family.as_deref().unwrap_or(&field.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpp_model::FieldType;

    fn scalar(path: &str) -> FieldDescriptor {
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

    fn array_leaf(path: &str, family: &str) -> FieldDescriptor {
        FieldDescriptor {
            array_family: Some(family.to_string()),
            is_array: true,
            ..scalar(path)
        }
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    fn target_of(mapping: &Mapping, header: &str) -> String {
        mapping.entry(header).unwrap().target.clone().unwrap()
    }

    #[test]
    fn stronger_global_match_wins_the_contested_field() {
        let catalog = vec![scalar("digitalProductPassportId"), scalar("uniqueProductId")];
        let mapper = AutoMapper::new(&catalog);
        let mapping = mapper.suggest(&headers(&["DPP ID", "Product ID"]));

        assert_eq!(target_of(&mapping, "DPP ID"), "digitalProductPassportId");
        assert_eq!(target_of(&mapping, "Product ID"), "uniqueProductId");
    }

    #[test]
    fn leaf_name_identity_pairing() {
        let catalog = vec![scalar("physicalDimensions.weight"), scalar("manufacturer.name")];
        let mapper = AutoMapper::new(&catalog);
        let mapping = mapper.suggest(&headers(&["Weight", "Name"]));

        assert_eq!(target_of(&mapping, "Weight"), "physicalDimensions.weight");
        assert_eq!(target_of(&mapping, "Name"), "manufacturer.name");
    }

    #[test]
    fn suggestions_start_unapproved() {
        let catalog = vec![scalar("weight")];
        let mapping = AutoMapper::new(&catalog).suggest(&headers(&["Weight"]));
        assert!(!mapping.entry("Weight").unwrap().approved);
    }

    #[test]
    fn numbered_group_columns_share_indices_across_leaves() {
        let catalog = vec![
            array_leaf("materials.name", "materials"),
            array_leaf("materials.percentage", "materials"),
        ];
        let mapper = AutoMapper::new(&catalog);
        let mapping = mapper.suggest(&headers(&[
            "Material 1 Name",
            "Material 2 Name",
            "Material 1 Percentage",
        ]));

        assert_eq!(target_of(&mapping, "Material 1 Name"), "materials[0].name");
        assert_eq!(target_of(&mapping, "Material 2 Name"), "materials[1].name");
        assert_eq!(
            target_of(&mapping, "Material 1 Percentage"),
            "materials[0].percentage"
        );
    }

    #[test]
    fn group_indices_follow_numeric_order_not_column_order() {
        let catalog = vec![array_leaf("materials.name", "materials")];
        let mapper = AutoMapper::new(&catalog);
        let reversed = mapper.suggest(&headers(&["Material 3 Name", "Material 1 Name"]));

        assert_eq!(target_of(&reversed, "Material 1 Name"), "materials[0].name");
        assert_eq!(target_of(&reversed, "Material 3 Name"), "materials[1].name");
    }

    #[test]
    fn numberless_array_headers_take_next_unused_index() {
        let catalog = vec![array_leaf("materials.name", "materials")];
        let mapper = AutoMapper::new(&catalog);
        let mapping = mapper.suggest(&headers(&["Material 2 Name", "Material Name"]));

        assert_eq!(target_of(&mapping, "Material 2 Name"), "materials[0].name");
        assert_eq!(target_of(&mapping, "Material Name"), "materials[1].name");
    }

    #[test]
    fn scalar_fields_are_claimed_at_most_once() {
        let catalog = vec![scalar("weight")];
        let mapper = AutoMapper::new(&catalog);
        let mapping = mapper.suggest(&headers(&["Weight", "Weight (kg)"]));

        let mapped: Vec<_> = mapping
            .mapped_entries()
            .filter(|entry| entry.target.as_deref() == Some("weight"))
            .collect();
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].header, "Weight");
    }

    #[test]
    fn unmatched_headers_stay_unmapped() {
        let catalog = vec![scalar("weight")];
        let mapping = AutoMapper::new(&catalog).suggest(&headers(&["Utterly Unrelated"]));
        assert_eq!(mapping.entry("Utterly Unrelated").unwrap().target, None);
    }

    #[test]
    fn identical_inputs_give_identical_mappings() {
        let catalog = vec![
            scalar("digitalProductPassportId"),
            scalar("uniqueProductId"),
            array_leaf("materials.name", "materials"),
        ];
        let names = headers(&["DPP ID", "Product ID", "Material 1 Name"]);
        let mapper = AutoMapper::new(&catalog);
        assert_eq!(mapper.suggest(&names), mapper.suggest(&names));
    }
}
