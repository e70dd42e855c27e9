#![deny(unsafe_code)]

pub mod field;
pub mod hint;
pub mod issue;
pub mod mapping;
pub mod path;
pub mod value;

pub use field::{BranchRef, FieldDescriptor, FieldType};
pub use hint::{ColumnHint, ColumnType};
pub use issue::{CoercionWarning, CompletenessReport, IssueKind, MappingIssue};
pub use mapping::{ConfigDiff, Mapping, MappingConfig, MappingEntry};
pub use path::{PathParseError, PathSegment, base_path, format_target_path, parse_target_path};
pub use value::{is_boolean_literal, is_numeric_literal};
