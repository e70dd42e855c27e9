//! Parsing and printing of concrete target paths like `materials[2].name`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One segment of a concrete target path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("empty target path")]
    Empty,
    #[error("empty key segment in '{path}'")]
    EmptyKey { path: String },
    #[error("unclosed index bracket in '{path}'")]
    UnclosedBracket { path: String },
    #[error("invalid array index '{index}' in '{path}'")]
    InvalidIndex { path: String, index: String },
}

/// Parse a concrete target path into segments.
///
/// Accepts dotted keys with optional literal indices after any key,
/// e.g. `items[2]`, `materials[0].name`. Round-trips through
/// [`format_target_path`].
pub fn parse_target_path(raw: &str) -> Result<Vec<PathSegment>, PathParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathParseError::Empty);
    }
    let mut segments = Vec::new();
    for part in trimmed.split('.') {
        let key_end = part.find('[').unwrap_or(part.len());
        let key = &part[..key_end];
        if key.is_empty() {
            return Err(PathParseError::EmptyKey {
                path: trimmed.to_string(),
            });
        }
        segments.push(PathSegment::Key(key.to_string()));
        let mut rest = &part[key_end..];
        while !rest.is_empty() {
            let Some(stripped) = rest.strip_prefix('[') else {
                return Err(PathParseError::InvalidIndex {
                    path: trimmed.to_string(),
                    index: rest.to_string(),
                });
            };
            let Some(close) = stripped.find(']') else {
                return Err(PathParseError::UnclosedBracket {
                    path: trimmed.to_string(),
                });
            };
            let digits = &stripped[..close];
            let index: usize =
                digits
                    .parse()
                    .map_err(|_| PathParseError::InvalidIndex {
                        path: trimmed.to_string(),
                        index: digits.to_string(),
                    })?;
            segments.push(PathSegment::Index(index));
            rest = &stripped[close + 1..];
        }
    }
    Ok(segments)
}

/// Print segments back into the canonical target-path form.
pub fn format_target_path(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if let PathSegment::Key(_) = segment
            && !out.is_empty()
        {
            out.push('.');
        }
        out.push_str(&segment.to_string());
    }
    out
}

/// Strip literal indices from a target path, yielding the catalog path
/// that addresses the same leaf (`materials[2].name` -> `materials.name`).
pub fn base_path(raw: &str) -> Result<String, PathParseError> {
    let segments = parse_target_path(raw)?;
    let keys: Vec<&str> = segments
        .iter()
        .filter_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
        .collect();
    Ok(keys.join("."))
}
