//! The resolved-schema walk that flattens a schema into field descriptors.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::debug;

use dpp_model::{BranchRef, FieldDescriptor, FieldType};

use crate::error::{SchemaShapeError, json_type_name};

/// Recursion bound. A resolved schema is a finite tree; exceeding this
/// depth means a circular `$ref` slipped past the resolver.
const MAX_DEPTH: usize = 64;

/// Walk a fully `$ref`-resolved schema and return the deduplicated
/// field catalog. The first definition seen for a path wins.
pub fn build_catalog(schema: &Value) -> Result<Vec<FieldDescriptor>, SchemaShapeError> {
    let mut walker = Walker {
        next_set_id: 0,
        seen: BTreeSet::new(),
        out: Vec::new(),
    };
    walker.walk(schema, &Frame::root())?;
    debug!(fields = walker.out.len(), "field catalog built");
    Ok(walker.out)
}

#[derive(Clone)]
struct Frame {
    path: String,
    depth: usize,
    is_array: bool,
    family: Option<String>,
    branches: Vec<BranchRef>,
    required: bool,
    /// Required names contributed by allOf siblings, applied when this
    /// node's properties are resolved.
    extra_required: BTreeSet<String>,
}

impl Frame {
    fn root() -> Self {
        Self {
            path: String::new(),
            depth: 0,
            is_array: false,
            family: None,
            branches: Vec::new(),
            required: false,
            extra_required: BTreeSet::new(),
        }
    }

    fn display_path(&self) -> &str {
        if self.path.is_empty() { "#" } else { &self.path }
    }
}

struct Walker {
    next_set_id: usize,
    seen: BTreeSet<String>,
    out: Vec<FieldDescriptor>,
}

impl Walker {
    fn walk(&mut self, node: &Value, frame: &Frame) -> Result<(), SchemaShapeError> {
        if frame.depth > MAX_DEPTH {
            return Err(SchemaShapeError::TooDeep {
                path: frame.display_path().to_string(),
                max: MAX_DEPTH,
            });
        }
        let Some(obj) = node.as_object() else {
            return Err(SchemaShapeError::NotAnObject {
                path: frame.display_path().to_string(),
                found: json_type_name(node),
            });
        };

        let structural = ["properties", "items", "allOf", "oneOf", "anyOf", "then", "else"]
            .iter()
            .any(|key| obj.contains_key(*key));
        if !structural {
            self.emit_leaf(obj, frame);
            return Ok(());
        }

        let union_required = self.required_union(obj, frame);

        if let Some(properties) = obj.get("properties") {
            let Some(properties) = properties.as_object() else {
                return Err(SchemaShapeError::NotAnObject {
                    path: frame.display_path().to_string(),
                    found: json_type_name(properties),
                });
            };
            for (key, child) in properties {
                let child_path = if frame.path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{key}", frame.path)
                };
                let mut child_frame = frame.clone();
                child_frame.path = child_path;
                child_frame.depth = frame.depth + 1;
                child_frame.required = union_required.contains(key.as_str());
                child_frame.extra_required = BTreeSet::new();
                self.walk(child, &child_frame)?;
            }
        }

        if let Some(items) = obj.get("items") {
            let mut item_frame = frame.clone();
            item_frame.depth = frame.depth + 1;
            item_frame.is_array = true;
            if item_frame.family.is_none() && !frame.path.is_empty() {
                item_frame.family = Some(frame.path.clone());
            }
            self.walk(items, &item_frame)?;
        }

        if let Some(members) = obj.get("allOf") {
            let members = combinator_members(members, frame, "allOf")?;
            for member in members {
                let mut member_frame = frame.clone();
                member_frame.depth = frame.depth + 1;
                member_frame.extra_required = union_required.clone();
                self.walk(member, &member_frame)?;
            }
        }

        for keyword in ["oneOf", "anyOf"] {
            let Some(members) = obj.get(keyword) else {
                continue;
            };
            let members = combinator_members(members, frame, keyword)?;
            let set_id = self.next_set_id;
            self.next_set_id += 1;
            for (branch, member) in members.iter().enumerate() {
                let mut branch_frame = frame.clone();
                branch_frame.depth = frame.depth + 1;
                branch_frame.extra_required = union_required.clone();
                branch_frame.branches.push(BranchRef { set_id, branch });
                self.walk(member, &branch_frame)?;
            }
        }

        // if/then/else: both outcomes contribute fields; the condition
        // itself adds nothing addressable.
        for keyword in ["then", "else"] {
            if let Some(child) = obj.get(keyword) {
                let mut child_frame = frame.clone();
                child_frame.depth = frame.depth + 1;
                child_frame.extra_required = union_required.clone();
                self.walk(child, &child_frame)?;
            }
        }

        Ok(())
    }

    /// Own `required` list plus allOf siblings' lists plus whatever the
    /// parent combinator contributed.
    fn required_union(&self, obj: &Map<String, Value>, frame: &Frame) -> BTreeSet<String> {
        let mut union = frame.extra_required.clone();
        collect_required(obj, &mut union);
        if let Some(members) = obj.get("allOf").and_then(Value::as_array) {
            for member in members {
                if let Some(member_obj) = member.as_object() {
                    collect_required(member_obj, &mut union);
                }
            }
        }
        union
    }

    fn emit_leaf(&mut self, obj: &Map<String, Value>, frame: &Frame) {
        if frame.path.is_empty() {
            return;
        }
        let enum_values = obj.get("enum").and_then(Value::as_array).cloned();
        let field_type = match leaf_type(obj) {
            Some(field_type) => field_type,
            None if enum_values.is_some() => FieldType::String,
            None => return,
        };
        if !self.seen.insert(frame.path.clone()) {
            // First definition for a path wins.
            return;
        }
        self.out.push(FieldDescriptor {
            path: frame.path.clone(),
            field_type,
            format: obj
                .get("format")
                .and_then(Value::as_str)
                .map(String::from),
            enum_values,
            is_array: frame.is_array,
            array_family: if frame.is_array {
                frame.family.clone()
            } else {
                None
            },
            required: frame.required,
            one_of_groups: frame.branches.clone(),
        });
    }
}

fn collect_required(obj: &Map<String, Value>, into: &mut BTreeSet<String>) {
    if let Some(required) = obj.get("required").and_then(Value::as_array) {
        for name in required {
            if let Some(name) = name.as_str() {
                into.insert(name.to_string());
            }
        }
    }
}

fn combinator_members<'a>(
    members: &'a Value,
    frame: &Frame,
    keyword: &'static str,
) -> Result<&'a Vec<Value>, SchemaShapeError> {
    members
        .as_array()
        .ok_or_else(|| SchemaShapeError::BadCombinator {
            path: frame.display_path().to_string(),
            keyword,
        })
}

/// `type` may be a string or a list (e.g. `["string", "null"]`); the
/// first recognized primitive counts.
fn leaf_type(obj: &Map<String, Value>) -> Option<FieldType> {
    match obj.get("type") {
        Some(Value::String(name)) => FieldType::parse(name),
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .find_map(FieldType::parse),
        _ => None,
    }
}
