/// Structural problems in an input schema.
///
/// Fatal to the catalog build: the whole schema load is rejected, no
/// partial catalog is returned.
#[derive(Debug, thiserror::Error)]
pub enum SchemaShapeError {
    #[error("schema nesting exceeds {max} levels at '{path}' (unresolved circular reference?)")]
    TooDeep { path: String, max: usize },

    #[error("expected a schema object at '{path}', found {found}")]
    NotAnObject { path: String, found: &'static str },

    #[error("expected an array of schemas for '{keyword}' at '{path}'")]
    BadCombinator { path: String, keyword: &'static str },
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
