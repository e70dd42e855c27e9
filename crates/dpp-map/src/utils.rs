//! Text normalization shared by the scorer and the auto-mapper.

/// Split into lowercase tokens at separators, camelCase boundaries,
/// and letter/digit boundaries. `"digitalProductPassportId"` becomes
/// `["digital", "product", "passport", "id"]`, `"Mat 1"` becomes
/// `["mat", "1"]`.
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            let boundary = prev.is_some_and(|p| {
                (p.is_ascii_lowercase() && ch.is_ascii_uppercase())
                    || (p.is_ascii_alphabetic() && ch.is_ascii_digit())
                    || (p.is_ascii_digit() && ch.is_ascii_alphabetic())
            });
            if boundary && !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            current.push(ch.to_ascii_lowercase());
            prev = Some(ch);
        } else {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            prev = None;
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Normalized form for comparison: tokens joined by single spaces.
pub fn normalize_text(raw: &str) -> String {
    tokenize(raw).join(" ")
}

/// Tokens with pure-digit tokens removed. Numeric tokens carry
/// repeating-group positions, not meaning, so matching ignores them.
pub fn word_tokens(raw: &str) -> Vec<String> {
    tokenize(raw)
        .into_iter()
        .filter(|token| !token.chars().all(|ch| ch.is_ascii_digit()))
        .collect()
}

/// Rightmost numeric token, used to group repeating-group columns
/// (`"Mat 1 Name"` -> 1).
pub fn group_number(raw: &str) -> Option<u64> {
    tokenize(raw)
        .into_iter()
        .rev()
        .find(|token| token.chars().all(|ch| ch.is_ascii_digit()))
        .and_then(|token| token.parse().ok())
}

/// Initial-letter acronym forms for a token list.
///
/// Three forms: initials of every token, initials of all but the last
/// token with the last kept whole, and the compact join of all tokens
/// (the form a header like `"DPP ID"` already carries its acronym in).
/// `["digital", "product", "passport", "id"]` yields `"dppi"`,
/// `"dppid"`, and `"digitalproductpassportid"`. Single-letter acronyms
/// are excluded entirely.
pub fn acronym_forms(tokens: &[String]) -> Vec<String> {
    if tokens.len() < 2 {
        return Vec::new();
    }
    let initials: String = tokens
        .iter()
        .filter_map(|token| token.chars().next())
        .collect();
    let head: String = tokens[..tokens.len() - 1]
        .iter()
        .filter_map(|token| token.chars().next())
        .collect();
    let tail_form = format!("{head}{}", tokens[tokens.len() - 1]);
    let compact = tokens.concat();

    let mut forms = Vec::new();
    for form in [initials, tail_form, compact] {
        if form.chars().count() > 1 && !forms.contains(&form) {
            forms.push(form);
        }
    }
    forms
}
