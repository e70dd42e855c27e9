//! Applies an approved mapping to parsed rows and emits nested records.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use dpp_model::{
    CoercionWarning, FieldDescriptor, Mapping, PathParseError, PathSegment, base_path,
    parse_target_path,
};

use crate::coerce::{coerce_typed, coerce_untyped};
use crate::context::assemble_context;

/// Records plus the assembled `@context` and any coercion warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutput {
    pub records: Vec<Value>,
    pub context: Vec<String>,
    pub warnings: Vec<CoercionWarning>,
}

/// Build one record per row from the mapping's approved entries.
///
/// Cells that are absent or empty are skipped silently. Values are
/// coerced to the catalog's declared type where the target has a
/// descriptor, by shape otherwise; a cell that does not fit its
/// declared type is kept as the raw string and reported in
/// `warnings` with its zero-based row position. After each row every
/// array is compacted to a dense 0..n sequence in ascending original
/// index order.
///
/// Fails only on a target path that does not parse; advisory
/// conditions never abort the build.
pub fn build_records(
    rows: &[BTreeMap<String, String>],
    mapping: &Mapping,
    catalog: &[FieldDescriptor],
    sectors: &[String],
) -> Result<BuildOutput, PathParseError> {
    let mut plan = Vec::new();
    for entry in mapping.approved_entries() {
        let Some(target) = entry.target.as_deref() else {
            continue;
        };
        let segments = parse_target_path(target)?;
        let base = base_path(target)?;
        let descriptor = catalog.iter().find(|field| field.path == base);
        plan.push((entry.header.as_str(), target, segments, descriptor));
    }

    let mut output = BuildOutput {
        context: assemble_context(sectors),
        ..BuildOutput::default()
    };

    for (row_idx, row) in rows.iter().enumerate() {
        let mut record = Value::Object(Map::new());
        let mut applied = 0usize;
        for (header, target, segments, descriptor) in &plan {
            let Some(raw) = row.get(*header) else {
                continue;
            };
            if raw.trim().is_empty() {
                continue;
            }
            let value = match descriptor {
                Some(field) => match coerce_typed(raw, field.field_type) {
                    Some(value) => value,
                    None => {
                        output.warnings.push(CoercionWarning {
                            row: row_idx,
                            header: (*header).to_string(),
                            target: (*target).to_string(),
                            value: raw.clone(),
                        });
                        Value::String(raw.clone())
                    }
                },
                None => coerce_untyped(raw),
            };
            assign(&mut record, segments, value);
            applied += 1;
        }
        compact_arrays(&mut record);
        trace!(row = row_idx, applied, "row built");
        output.records.push(record);
    }

    debug!(
        rows = rows.len(),
        warnings = output.warnings.len(),
        "record build complete"
    );
    Ok(output)
}

/// Write `value` at the path, creating intermediate objects and arrays.
/// Array positions below the written index are padded with nulls; the
/// per-row compaction pass drops them afterwards.
fn assign(slot: &mut Value, segments: &[PathSegment], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };
    match head {
        PathSegment::Key(key) => {
            if !matches!(slot, Value::Object(_)) {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(map) = slot {
                assign(map.entry(key.clone()).or_insert(Value::Null), rest, value);
            }
        }
        PathSegment::Index(index) => {
            if !matches!(slot, Value::Array(_)) {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                while items.len() <= *index {
                    items.push(Value::Null);
                }
                assign(&mut items[*index], rest, value);
            }
        }
    }
}

/// Drop null padding from every array, preserving relative order, so
/// sparse source indices collapse to a dense sequence.
fn compact_arrays(value: &mut Value) {
    match value {
        Value::Array(items) => {
            items.retain(|item| !item.is_null());
            for item in items {
                compact_arrays(item);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                compact_arrays(item);
            }
        }
        _ => {}
    }
}
