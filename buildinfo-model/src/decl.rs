//! Declarations as they appear in a model file.

use buildinfo_core::{FieldDef, RecordType, TypeExpr, Value};
use serde::Deserialize;

/// Root of a model file.
///
/// ```toml
/// [[record]]
/// name = "Agent"
/// doc = "CI server that reported the build."
///
/// [[record.field]]
/// name = "name"
/// type = "string"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    /// Record declarations, in file order.
    #[serde(default, rename = "record")]
    pub records: Vec<RecordDecl>,
}

/// A `[[record]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordDecl {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    /// Field declarations; array order is the field order.
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldDecl>,
}

/// A `[[record.field]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Defaults to true unless the type is optional.
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub default: Option<toml::Value>,
    #[serde(default)]
    pub doc: Option<String>,
}

impl FieldDecl {
    /// Default value converted to a record value.
    pub fn default_value(&self) -> Option<Value> {
        self.default.as_ref().map(toml_to_value)
    }

    pub(crate) fn to_field(&self) -> FieldDef {
        let mut field = FieldDef::new(&self.name, self.ty.clone());
        if let Some(default) = self.default_value() {
            field = field.default_value(default);
        }
        if let Some(required) = self.required {
            field = field.required(required);
        }
        if let Some(doc) = &self.doc {
            field = field.doc(doc);
        }
        field
    }
}

impl RecordDecl {
    pub(crate) fn to_record(&self) -> RecordType {
        let mut record = RecordType::new(&self.name);
        if let Some(doc) = &self.doc {
            record = record.doc(doc);
        }
        self.fields
            .iter()
            .fold(record, |record, field| record.field(field.to_field()))
    }
}

/// Convert a TOML value to a record value.
pub fn toml_to_value(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Int(*i),
        toml::Value::Float(f) => Value::Float(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::List(items.iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Map(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_value(v)))
                .collect(),
        ),
    }
}
