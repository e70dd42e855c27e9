#![deny(unsafe_code)]

//! Field catalog extraction from a resolved JSON Schema.
//!
//! The input schema must be fully `$ref`-resolved; resolution and
//! fetching belong to an external collaborator. The walk is a pure
//! recursive function over the schema tree and produces one
//! [`dpp_model::FieldDescriptor`] per addressable primitive leaf.

pub mod catalog;
pub mod error;

pub use catalog::build_catalog;
pub use error::SchemaShapeError;
