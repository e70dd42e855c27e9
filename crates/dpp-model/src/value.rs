//! Literal grammars shared by column-type inference and record coercion.

/// True when the value is exactly the lowercase `true`/`false` literal.
pub fn is_boolean_literal(raw: &str) -> bool {
    matches!(raw, "true" | "false")
}

/// True when the whole string matches the numeric grammar:
/// optional sign, digits with optional fraction, optional exponent.
/// Rejects `inf`, `nan`, and surrounding whitespace.
pub fn is_numeric_literal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;
    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_forms() {
        for value in ["0", "42", "-7", "+3", "3.14", ".5", "2.", "1e9", "6.02e23", "-1.5E-3"] {
            assert!(is_numeric_literal(value), "should accept {value:?}");
        }
    }

    #[test]
    fn rejects_non_numeric_forms() {
        for value in ["", "abc", "1.2.3", "1e", "e5", " 1", "1 ", "0x1f", "inf", "NaN", "-", "."] {
            assert!(!is_numeric_literal(value), "should reject {value:?}");
        }
    }

    #[test]
    fn boolean_literals_are_exact() {
        assert!(is_boolean_literal("true"));
        assert!(is_boolean_literal("false"));
        assert!(!is_boolean_literal("True"));
        assert!(!is_boolean_literal("FALSE"));
        assert!(!is_boolean_literal("yes"));
    }
}
