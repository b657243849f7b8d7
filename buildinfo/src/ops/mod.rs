//! Core operations.
//!
//! This module contains the logic behind the commands, separated from CLI
//! argument parsing and output rendering.

pub mod build;
pub mod check;
pub mod emit;

pub use build::{BuildOptions, build};
pub use check::check;
pub use emit::emit;
