//! Fluent builder synthesis for declarative record types.
//!
//! Given a [`Model`](buildinfo_core::Model), this crate derives one builder
//! type per record type at runtime. Each field gets one `with_<field>` setter
//! whose calling convention follows the field's declared type, and `build`
//! hands the accumulated values to the record constructor.
//!
//! # Module Organization
//!
//! - [`shape`] - Field shape classification (scalar, builder, sequence, mapping)
//! - [`arguments`] - Per-builder value storage and snapshots
//! - [`registry`] - Builder synthesis and the builder type cache
//! - [`builder`] - Build sessions and setter arguments
//! - [`signature`] - Method signature introspection for emitters
//! - [`env`] - The environment-sourced `BuildInfo` builder
//!
//! # Example
//!
//! ```ignore
//! let registry = BuilderRegistry::from_model(Arc::new(buildinfo_model::builtin()?));
//! let agent = registry.builder("Agent")?.with("with_name", "ci")?;
//! let info = BuildInfoBuilder::new(&registry)?
//!     .with("with_name", "release")?
//!     .with("with_number", "42")?
//!     .with("with_agent", agent)?
//!     .build()?;
//! ```

pub mod arguments;
pub mod builder;
pub mod env;
mod error;
pub mod registry;
pub mod shape;
pub mod signature;

pub use arguments::{BuildArguments, BuildSnapshot};
pub use builder::{Builder, SetterArgs};
pub use env::{BUILD_INFO, BuildInfoBuilder};
pub use error::{BuilderError, Result};
pub use registry::{BuilderRegistry, BuilderType, Setter, builder_name, setter_name};
pub use shape::{Classification, PARAM_TYPE_OVERRIDES, ParamKind, Shape, classify};
pub use signature::{MethodSignature, ParamSignature, ParamType, ReturnType, describe_param};
