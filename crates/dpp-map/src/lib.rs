#![deny(unsafe_code)]

//! Header-to-field mapping: fuzzy scoring, global auto-assignment,
//! array-index bookkeeping, and conflict detection.

pub mod conflicts;
pub mod engine;
pub mod indices;
pub mod patterns;
pub mod score;
pub mod state;
pub mod utils;

pub use conflicts::{CandidateStatus, assess_candidate, filter_candidates, mapping_issues};
pub use engine::AutoMapper;
pub use indices::{IndexSuggestion, SuggestionKind, index_suggestions, used_indices};
pub use score::{MatchScore, MatchTier, score};
pub use state::{MappingState, MappingSummary, RankedCandidate};
