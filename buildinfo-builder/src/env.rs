//! Build-info builder that can seed its properties from the environment.

use std::ops::{Deref, DerefMut};

use buildinfo_core::{ConstructionError, Record, Value};
use indexmap::IndexMap;

use crate::{Builder, BuilderError, BuilderRegistry, Result, SetterArgs, builder_name};

/// Name of the top-level build-metadata record type.
pub const BUILD_INFO: &str = "BuildInfo";

const PROPERTIES_SETTER: &str = "with_properties";

/// Builder for the `BuildInfo` record with environment collection.
///
/// The generic chaining setters are forwarded, so a `BuildInfoBuilder` chains
/// like any other builder. Read access goes through `Deref` to the inner
/// [`Builder`].
#[derive(Debug, Clone)]
pub struct BuildInfoBuilder {
    inner: Builder,
}

impl BuildInfoBuilder {
    /// Start a build session for the registry's `BuildInfo` record.
    pub fn new(registry: &BuilderRegistry) -> Result<Self> {
        registry.builder(BUILD_INFO).map(|inner| Self { inner })
    }

    /// Wrap an existing session. Fails when it builds some other record.
    pub fn from_builder(inner: Builder) -> Result<Self> {
        if inner.record_name() != BUILD_INFO {
            let expected = builder_name(BUILD_INFO);
            return Err(BuilderError::BuilderMismatch {
                builder: expected.clone(),
                method: "from_builder".to_string(),
                expected,
                found: inner.builder_type().name().to_string(),
            });
        }
        Ok(Self { inner })
    }

    pub fn with(self, method: &str, args: impl Into<SetterArgs>) -> Result<Self> {
        self.forward(|inner| inner.with(method, args))
    }

    pub fn with_value(self, method: &str, value: impl Into<Value>) -> Result<Self> {
        self.forward(|inner| inner.with_value(method, value))
    }

    pub fn with_values<I, V>(self, method: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.forward(|inner| inner.with_values(method, values))
    }

    pub fn with_mapping<I, K, V>(self, method: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.forward(|inner| inner.with_mapping(method, values))
    }

    pub fn with_builder(self, method: &str, builder: Builder) -> Result<Self> {
        self.forward(|inner| inner.with_builder(method, builder))
    }

    pub fn with_builders<I>(self, method: &str, builders: I) -> Result<Self>
    where
        I: IntoIterator<Item = Builder>,
    {
        self.forward(|inner| inner.with_builders(method, builders))
    }

    /// Set `properties` to `additional` merged with the process environment.
    ///
    /// Environment variables win over additional properties of the same name.
    pub fn collect_env<I, K, V>(self, additional: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.collect_from(process_env(), &[] as &[&str], additional)
    }

    /// Like [`BuildInfoBuilder::collect_env`], dropping `keys` from the merged
    /// properties.
    pub fn collect_env_without_keys<S, I, K, V>(self, keys: &[S], additional: I) -> Result<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.collect_from(process_env(), keys, additional)
    }

    /// Set `properties` from an explicit environment.
    pub fn collect_from<E, S, I, K, V>(self, env: E, exclude: &[S], additional: I) -> Result<Self>
    where
        E: IntoIterator<Item = (String, String)>,
        S: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut properties: IndexMap<String, Value> = additional
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        properties.extend(env.into_iter().map(|(k, v)| (k, Value::String(v))));

        let before = properties.len();
        properties.retain(|key, _| !exclude.iter().any(|excluded| excluded.as_ref() == key));
        tracing::debug!(
            properties = properties.len(),
            excluded = before - properties.len(),
            "collected build properties"
        );

        self.with(PROPERTIES_SETTER, SetterArgs::Named(properties))
    }

    fn forward(self, f: impl FnOnce(Builder) -> Result<Builder>) -> Result<Self> {
        Ok(Self {
            inner: f(self.inner)?,
        })
    }

    pub fn into_inner(self) -> Builder {
        self.inner
    }

    pub fn build(&self) -> std::result::Result<Record, ConstructionError> {
        self.inner.build()
    }
}

impl Deref for BuildInfoBuilder {
    type Target = Builder;

    fn deref(&self) -> &Builder {
        &self.inner
    }
}

impl DerefMut for BuildInfoBuilder {
    fn deref_mut(&mut self) -> &mut Builder {
        &mut self.inner
    }
}

/// Environment variables with valid UTF-8 names and values.
fn process_env() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}
