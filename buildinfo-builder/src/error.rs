use buildinfo_core::ConstructionError;
use thiserror::Error;

/// Errors raised by builder synthesis and setter calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    /// Synthesis was requested for something that is not a record type.
    #[error("cannot synthesize a builder for '{found}': not a record type")]
    NotARecord { found: String },

    #[error("{builder} has no method '{method}'")]
    UnknownMethod { builder: String, method: String },

    #[error("{builder}.{method}() takes {expected}, got {found}")]
    ArgumentShape {
        builder: String,
        method: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{builder}.{method}() expects a {expected}, got a {found}")]
    BuilderMismatch {
        builder: String,
        method: String,
        expected: String,
        found: String,
    },

    /// A nested builder failed to build; the constructor error is passed
    /// through unchanged.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

pub type Result<T> = std::result::Result<T, BuilderError>;
