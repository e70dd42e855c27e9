#![deny(unsafe_code)]

//! Record generation: applies an approved mapping to parsed rows,
//! coercing cell values and emitting nested passport records with
//! their `@context`.

pub mod builder;
pub mod coerce;
pub mod context;

pub use builder::{BuildOutput, build_records};
pub use coerce::{coerce_typed, coerce_untyped};
pub use context::{CORE_CONTEXT, assemble_context, sector_context};
