//! Fixed synonym dictionary from spreadsheet business terms to
//! catalog leaf phrases. Both sides are in normalized token form.

/// (normalized header phrase, normalized leaf phrases it maps to).
const SYNONYMS: &[(&str, &[&str])] = &[
    ("article number", &["unique product id", "gtin"]),
    ("best before", &["expiration date"]),
    ("brand", &["trade name", "brand name"]),
    ("brand name", &["trade name"]),
    ("color", &["colour", "color"]),
    ("colour", &["colour", "color"]),
    ("country", &["country of origin"]),
    ("dpp id", &["digital product passport id"]),
    ("ean", &["gtin"]),
    ("expiry date", &["expiration date"]),
    ("gtin", &["gtin", "global trade item number"]),
    ("made in", &["country of origin"]),
    ("manufacturer", &["manufacturer name"]),
    ("mass", &["weight"]),
    ("mat", &["material", "materials"]),
    ("material", &["material", "materials"]),
    ("origin", &["country of origin"]),
    ("passport id", &["digital product passport id"]),
    ("producer", &["manufacturer name"]),
    ("product id", &["unique product id", "product id"]),
    ("supplier", &["manufacturer name"]),
    ("weight", &["weight", "net weight", "gross weight"]),
];

/// Leaf phrases a normalized header is a known synonym for.
pub fn synonym_targets(normalized_header: &str) -> Option<&'static [&'static str]> {
    SYNONYMS
        .iter()
        .find(|(term, _)| *term == normalized_header)
        .map(|(_, phrases)| *phrases)
}
