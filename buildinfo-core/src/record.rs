//! Record types and the model that groups them.

use std::{collections::HashSet, sync::Arc};

use indexmap::IndexMap;
use thiserror::Error;

use crate::{Record, TypeExpr, Value};

/// A named, typed field of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeExpr,
    /// Whether the constructor rejects a missing value.
    pub required: bool,
    /// Value used when the field is not supplied (null when absent).
    pub default: Option<Value>,
    pub doc: Option<String>,
}

impl FieldDef {
    /// Create a field; it is required unless its type admits null.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        let required = !ty.is_optional();
        Self {
            name: name.into(),
            ty,
            required,
            default: None,
            doc: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Error raised by the record constructor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("{record}() got an unexpected argument '{argument}'")]
    UnexpectedArgument { record: String, argument: String },

    #[error("{record}() missing required field '{field}'")]
    MissingField { record: String, field: String },

    #[error("{record}.{field} expects {expected}, got {found}")]
    TypeMismatch {
        record: String,
        field: String,
        expected: String,
        found: &'static str,
    },
}

/// A structured record type with an ordered field list.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    name: String,
    doc: Option<String>,
    fields: Vec<FieldDef>,
}

impl RecordType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Append a field. Declaration order is preserved.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Construct a record from named arguments.
    ///
    /// Unexpected names are reported before missing fields; fields are then
    /// checked in declaration order and the first failure is returned.
    pub fn construct(&self, mut args: IndexMap<String, Value>) -> Result<Record, ConstructionError> {
        if let Some(argument) = args.keys().find(|k| self.get_field(k).is_none()) {
            return Err(ConstructionError::UnexpectedArgument {
                record: self.name.clone(),
                argument: argument.clone(),
            });
        }

        let mut values = IndexMap::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = match args.shift_remove(&field.name) {
                Some(value) => {
                    if !field.ty.accepts(&value) {
                        return Err(ConstructionError::TypeMismatch {
                            record: self.name.clone(),
                            field: field.name.clone(),
                            expected: field.ty.to_string(),
                            found: value.kind(),
                        });
                    }
                    value
                }
                None if field.required => {
                    return Err(ConstructionError::MissingField {
                        record: self.name.clone(),
                        field: field.name.clone(),
                    });
                }
                None => field.default.clone().unwrap_or(Value::Null),
            };
            values.insert(field.name.clone(), value);
        }

        Ok(Record::new(&self.name, values))
    }
}

/// The set of record types builders are synthesized for.
#[derive(Debug, Clone, Default)]
pub struct Model {
    records: IndexMap<String, Arc<RecordType>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record type, returning the one it replaced.
    pub fn insert(&mut self, record: RecordType) -> Option<Arc<RecordType>> {
        self.records.insert(record.name.clone(), Arc::new(record))
    }

    pub fn with(mut self, record: RecordType) -> Self {
        self.insert(record);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RecordType>> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Record types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RecordType>> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record types ordered so that nested record types come before the
    /// records that reference them.
    ///
    /// Cycles are broken at the back edge; ties keep declaration order.
    pub fn dependency_order(&self) -> Vec<&Arc<RecordType>> {
        let mut order = Vec::with_capacity(self.records.len());
        let mut done = HashSet::new();
        let mut visiting = HashSet::new();
        for name in self.records.keys() {
            self.visit(name, &mut visiting, &mut done, &mut order);
        }
        order
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        visiting: &mut HashSet<&'a str>,
        done: &mut HashSet<&'a str>,
        order: &mut Vec<&'a Arc<RecordType>>,
    ) {
        if done.contains(name) || visiting.contains(name) {
            return;
        }
        let Some(record) = self.records.get(name) else {
            return;
        };

        visiting.insert(name);
        for field in &record.fields {
            for nested in field.ty.named_refs() {
                self.visit(nested, visiting, done, order);
            }
        }
        visiting.remove(name);
        done.insert(name);
        order.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> RecordType {
        RecordType::new("Agent")
            .field(FieldDef::new("name", TypeExpr::String))
            .field(FieldDef::new("version", TypeExpr::optional(TypeExpr::String)))
    }

    fn args(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_field_required_follows_optionality() {
        assert!(FieldDef::new("a", TypeExpr::String).required);
        assert!(!FieldDef::new("a", TypeExpr::optional(TypeExpr::String)).required);
        assert!(!FieldDef::new("a", TypeExpr::Int).default_value(1).required);
    }

    #[test]
    fn test_construct_fills_defaults_in_declared_order() {
        let record = agent()
            .construct(args(&[("name", Value::from("ci"))]))
            .unwrap();

        assert_eq!(record.type_name(), "Agent");
        assert_eq!(record.get("name"), Some(&Value::from("ci")));
        assert_eq!(record.get("version"), Some(&Value::Null));
        let names: Vec<_> = record.fields().keys().collect();
        assert_eq!(names, ["name", "version"]);
    }

    #[test]
    fn test_construct_missing_field() {
        let err = agent().construct(IndexMap::new()).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::MissingField {
                record: "Agent".into(),
                field: "name".into()
            }
        );
        assert_eq!(err.to_string(), "Agent() missing required field 'name'");
    }

    #[test]
    fn test_construct_unexpected_argument_reported_first() {
        let err = agent()
            .construct(args(&[("bogus", Value::from(1))]))
            .unwrap_err();
        assert!(matches!(err, ConstructionError::UnexpectedArgument { argument, .. } if argument == "bogus"));
    }

    #[test]
    fn test_construct_type_mismatch() {
        let err = agent()
            .construct(args(&[("name", Value::from(7))]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Agent.name expects string, got int");
    }

    #[test]
    fn test_dependency_order_puts_nested_first() {
        let model = Model::new()
            .with(
                RecordType::new("BuildInfo")
                    .field(FieldDef::new("agent", TypeExpr::named("Agent")))
                    .field(FieldDef::new(
                        "modules",
                        TypeExpr::list(TypeExpr::named("Module")),
                    )),
            )
            .with(RecordType::new("Module").field(FieldDef::new(
                "parent",
                TypeExpr::optional(TypeExpr::named("Module")),
            )))
            .with(agent());

        let order: Vec<_> = model.dependency_order().iter().map(|r| r.name()).collect();
        assert_eq!(order, ["Agent", "Module", "BuildInfo"]);
    }
}
