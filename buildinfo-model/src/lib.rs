//! Declarative record model files for buildinfo-om.
//!
//! A model file lists record types and their fields in TOML:
//!
//! ```text
//! model.toml (TOML) → buildinfo-model (parsing) → Model → builder synthesis
//! ```
//!
//! The crate also embeds the build-info model, see [`builtin`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod builtin;
mod decl;
mod error;
mod parse;
mod validate;

pub use builtin::{BUILTIN_MODEL, builtin};
pub use decl::{FieldDecl, ModelFile, RecordDecl, toml_to_value};
pub use error::{Error, Result, SourceContext};
pub use parse::{parse_file, parse_str, parse_str_with_filename};
