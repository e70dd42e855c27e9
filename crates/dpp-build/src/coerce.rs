//! Cell-string to JSON value coercion.

use serde_json::Value;

use dpp_model::{FieldType, is_boolean_literal, is_numeric_literal};

/// Coerce a cell to its target's declared type. `None` means the value
/// does not fit; the caller keeps the raw string and records a warning.
pub fn coerce_typed(raw: &str, field_type: FieldType) -> Option<Value> {
    match field_type {
        FieldType::String => Some(Value::String(raw.to_string())),
        FieldType::Boolean => is_boolean_literal(raw).then(|| Value::Bool(raw == "true")),
        FieldType::Integer => raw.parse::<i64>().ok().map(Value::from),
        FieldType::Number => {
            if !is_numeric_literal(raw) {
                return None;
            }
            raw.parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
        }
    }
}

/// Shape-based coercion for targets without a catalog entry: exact
/// boolean literals become booleans, strings matching the numeric
/// grammar become numbers, everything else stays a string.
pub fn coerce_untyped(raw: &str) -> Value {
    if is_boolean_literal(raw) {
        return Value::Bool(raw == "true");
    }
    if is_numeric_literal(raw) {
        if let Ok(int) = raw.parse::<i64>() {
            return Value::from(int);
        }
        if let Some(number) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return Value::Number(number);
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_coercion_follows_the_declared_type() {
        assert_eq!(coerce_typed("42", FieldType::Integer), Some(json!(42)));
        assert_eq!(coerce_typed("3.5", FieldType::Number), Some(json!(3.5)));
        assert_eq!(coerce_typed("true", FieldType::Boolean), Some(json!(true)));
        assert_eq!(coerce_typed("42", FieldType::String), Some(json!("42")));
    }

    #[test]
    fn typed_coercion_rejects_misfits() {
        assert_eq!(coerce_typed("heavy", FieldType::Number), None);
        assert_eq!(coerce_typed("3.5", FieldType::Integer), None);
        assert_eq!(coerce_typed("yes", FieldType::Boolean), None);
    }

    #[test]
    fn untyped_coercion_goes_by_shape() {
        assert_eq!(coerce_untyped("true"), json!(true));
        assert_eq!(coerce_untyped("42"), json!(42));
        assert_eq!(coerce_untyped("-1.5e3"), json!(-1500.0));
        assert_eq!(coerce_untyped("42 kg"), json!("42 kg"));
        assert_eq!(coerce_untyped("True"), json!("True"));
    }
}
