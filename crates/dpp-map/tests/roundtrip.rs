use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use serde_json::json;

use dpp_map::AutoMapper;
use dpp_model::MappingConfig;
use dpp_schema::build_catalog;

fn catalog() -> Vec<dpp_model::FieldDescriptor> {
    let schema = json!({
        "type": "object",
        "properties": {
            "uniqueProductId": { "type": "string" },
            "digitalProductPassportId": { "type": "string" },
            "tradeName": { "type": "string" },
            "physicalDimensions": {
                "type": "object",
                "properties": {
                    "weight": { "type": "number" },
                    "height": { "type": "number" }
                }
            },
            "manufacturer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "country": { "type": "string" }
                }
            },
            "materials": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "percentage": { "type": "number" }
                    }
                }
            }
        }
    });
    build_catalog(&schema).expect("catalog")
}

fn header_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[A-Za-z][A-Za-z0-9 ]{0,14}", 0..8)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn suggestion_is_deterministic(headers in header_strategy()) {
        let catalog = catalog();
        let mapper = AutoMapper::new(&catalog);
        prop_assert_eq!(mapper.suggest(&headers), mapper.suggest(&headers));
    }

    #[test]
    fn scalar_targets_are_never_shared(headers in header_strategy()) {
        let catalog = catalog();
        let mapping = AutoMapper::new(&catalog).suggest(&headers);

        let mut seen = BTreeSet::new();
        for entry in mapping.mapped_entries() {
            let target = entry.target.as_deref().unwrap();
            if !target.contains('[') {
                prop_assert!(seen.insert(target.to_string()), "duplicate scalar target {target}");
            }
        }
    }

    #[test]
    fn every_target_names_a_catalog_field(headers in header_strategy()) {
        let catalog = catalog();
        let mapping = AutoMapper::new(&catalog).suggest(&headers);

        for entry in mapping.mapped_entries() {
            let target = entry.target.as_deref().unwrap();
            let base = dpp_model::base_path(target).unwrap();
            prop_assert!(catalog.iter().any(|field| field.path == base));
        }
    }

    #[test]
    fn approved_config_round_trips(headers in header_strategy()) {
        let catalog = catalog();
        let mut mapping = AutoMapper::new(&catalog).suggest(&headers);
        for header in &headers {
            mapping.approve(header);
        }

        let config = MappingConfig::from_mapping(&mapping);
        let reloaded = config.seed(&headers);

        let original: BTreeMap<&str, Option<&str>> = mapping
            .mapped_entries()
            .map(|entry| (entry.header.as_str(), entry.target.as_deref()))
            .collect();
        for (header, target) in original {
            let entry = reloaded.entry(header).unwrap();
            prop_assert_eq!(entry.target.as_deref(), target);
            prop_assert!(entry.approved);
        }
    }
}
