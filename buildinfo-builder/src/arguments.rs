//! Per-builder storage of the values supplied so far.

use buildinfo_core::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// Field values written by setter calls.
///
/// Only fields that were explicitly set are present; the record constructor
/// decides what happens to the rest.
#[derive(Debug, Clone, Default)]
pub struct BuildArguments {
    values: IndexMap<String, Value>,
}

impl BuildArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value for a field, returning the value it replaced.
    pub fn write(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(field.into(), value)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy the current values.
    ///
    /// Later writes do not affect a snapshot already taken.
    pub fn snapshot(&self) -> BuildSnapshot {
        BuildSnapshot(self.values.clone())
    }
}

/// Read-only copy of [`BuildArguments`], passed to the record constructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BuildSnapshot(IndexMap<String, Value>);

impl BuildSnapshot {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }
}
