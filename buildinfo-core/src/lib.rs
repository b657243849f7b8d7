//! Core types for buildinfo-om.
//!
//! This crate provides the record model the builder engine operates on:
//! declared field types, record types with their constructor, and the
//! dynamic values records hold. It also carries the generated file trait
//! shared by the emitters.

mod file;
mod record;
mod types;
mod utils;
mod value;

// Generated files
pub use file::GeneratedFile;
// Record model
pub use record::{ConstructionError, FieldDef, Model, RecordType};
pub use types::{TypeExpr, TypeExprError};
pub use value::{Record, Value};
// String utilities
pub use utils::is_snake_case;
