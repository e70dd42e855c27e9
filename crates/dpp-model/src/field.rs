use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive type of a schema leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
}

impl FieldType {
    /// Parse a JSON Schema `type` keyword value. Non-primitive types
    /// (`object`, `array`, `null`) have no field type.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "integer" => Some(FieldType::Integer),
            "boolean" => Some(FieldType::Boolean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Membership of a field in one branch of a `oneOf`/`anyOf` combinator.
///
/// `set_id` identifies the combinator node; `branch` is the member index.
/// Two fields with the same `set_id` but different `branch` are mutually
/// exclusive within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchRef {
    pub set_id: usize,
    pub branch: usize,
}

/// A flat, addressable schema leaf produced by the catalog builder.
///
/// `path` is the dotted leaf address without array indices
/// (e.g. `manufacturer.name`, `materials.percentage`). Concrete target
/// paths with literal indices are derived via [`Self::concrete_target`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub path: String,
    pub field_type: FieldType,
    pub format: Option<String>,
    pub enum_values: Option<Vec<serde_json::Value>>,
    /// True when any ancestor segment is a repeating group, or the leaf
    /// itself is an array of primitives.
    pub is_array: bool,
    /// Path prefix of the outermost array ancestor; equals `path` for an
    /// array-of-primitives leaf. `None` when `is_array` is false.
    pub array_family: Option<String>,
    /// Listed in the parent's `required` array (allOf members unioned).
    pub required: bool,
    /// Empty when the field is unconditional.
    pub one_of_groups: Vec<BranchRef>,
}

impl FieldDescriptor {
    /// Last dotted segment of the path.
    pub fn leaf(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// Concrete target path, splicing a literal index at the array family
    /// when one applies. Non-array fields return the path unchanged.
    pub fn concrete_target(&self, index: Option<usize>) -> String {
        match (&self.array_family, index) {
            (Some(family), Some(i)) if self.path.starts_with(family.as_str()) => {
                let rest = &self.path[family.len()..];
                format!("{family}[{i}]{rest}")
            }
            _ => self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(path: &str, family: Option<&str>) -> FieldDescriptor {
        FieldDescriptor {
            path: path.to_string(),
            field_type: FieldType::String,
            format: None,
            enum_values: None,
            is_array: family.is_some(),
            array_family: family.map(String::from),
            required: false,
            one_of_groups: Vec::new(),
        }
    }

    #[test]
    fn concrete_target_splices_index_at_family() {
        let field = descriptor("materials.name", Some("materials"));
        assert_eq!(field.concrete_target(Some(2)), "materials[2].name");
    }

    #[test]
    fn concrete_target_for_primitive_array_leaf() {
        let field = descriptor("items", Some("items"));
        assert_eq!(field.concrete_target(Some(0)), "items[0]");
    }

    #[test]
    fn concrete_target_without_index_is_plain_path() {
        let field = descriptor("manufacturer.name", None);
        assert_eq!(field.concrete_target(None), "manufacturer.name");
    }

    #[test]
    fn leaf_segment() {
        assert_eq!(descriptor("a.b.c", None).leaf(), "c");
        assert_eq!(descriptor("top", None).leaf(), "top");
    }
}
