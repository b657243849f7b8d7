//! Builder synthesis and the per-model builder type cache.

use std::sync::{Arc, Mutex, MutexGuard};

use buildinfo_core::{FieldDef, Model, RecordType, TypeExpr};
use indexmap::IndexMap;

use crate::{
    BuildArguments, Builder, BuilderError, Result,
    shape::{Classification, Shape, classify, param_type_override},
};

/// Name of the setter generated for a field.
pub fn setter_name(field: &str) -> String {
    format!("with_{}", field)
}

/// Name of the builder type generated for a record.
pub fn builder_name(record: &str) -> String {
    format!("{}Builder", record)
}

/// One generated setter method.
#[derive(Debug, Clone, PartialEq)]
pub struct Setter {
    method: String,
    field: String,
    classification: Classification,
    param_type: TypeExpr,
    doc: Option<String>,
}

impl Setter {
    fn new(field: &FieldDef, classification: Classification) -> Self {
        let param_type =
            param_type_override(&field.name).unwrap_or_else(|| classification.arg_type.clone());
        Self {
            method: setter_name(&field.name),
            field: field.name.clone(),
            classification,
            param_type,
            doc: field.doc.clone(),
        }
    }

    /// Method name, `with_<field>`.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Field the setter writes.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn shape(&self) -> Shape {
        self.classification.shape
    }

    /// Type of the stored value (or of each element).
    pub fn arg_type(&self) -> &TypeExpr {
        &self.classification.arg_type
    }

    /// Type advertised for the parameter. Differs from [`Setter::arg_type`]
    /// only for fields listed in the override table.
    pub fn param_type(&self) -> &TypeExpr {
        &self.param_type
    }

    /// Record type of the nested builders this setter takes.
    pub fn nested(&self) -> Option<&str> {
        self.classification.nested.as_deref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

/// A synthesized builder type for one record type.
#[derive(Debug)]
pub struct BuilderType {
    name: String,
    record: Arc<RecordType>,
    setters: IndexMap<String, Setter>,
}

impl BuilderType {
    /// Builder type name, `<Record>Builder`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The record type this builder constructs.
    pub fn record(&self) -> &Arc<RecordType> {
        &self.record
    }

    /// Setters in field declaration order.
    pub fn setters(&self) -> impl Iterator<Item = &Setter> {
        self.setters.values()
    }

    pub fn setter(&self, method: &str) -> Option<&Setter> {
        self.setters.get(method)
    }

    /// Start an empty build session.
    pub fn new_builder(self: &Arc<Self>) -> Builder {
        Builder::new(Arc::clone(self), BuildArguments::new())
    }
}

enum Slot {
    /// Synthesis is in progress further up the call stack.
    Reserved,
    Ready(Arc<BuilderType>),
}

/// Synthesizes builder types and caches them per record type name.
///
/// Each record type maps to exactly one [`BuilderType`] for the lifetime of
/// the registry: repeated synthesis returns the same `Arc`. The whole
/// check-reserve-recurse-insert sequence runs under one lock, so concurrent
/// callers cannot create two builder types for the same record.
pub struct BuilderRegistry {
    model: Arc<Model>,
    cache: Mutex<IndexMap<String, Slot>>,
}

impl BuilderRegistry {
    /// Create an empty registry; builders are synthesized on first request.
    pub fn new(model: Arc<Model>) -> Self {
        Self {
            model,
            cache: Mutex::new(IndexMap::new()),
        }
    }

    /// Create a registry with a builder for every record type, synthesized
    /// nested types first.
    pub fn from_model(model: Arc<Model>) -> Self {
        let registry = Self::new(model);
        {
            let mut cache = registry.lock();
            for record in registry.model.dependency_order() {
                registry.synthesize_locked(&mut cache, record);
            }
        }
        registry
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Get or create the builder type for a record type.
    ///
    /// Fails with [`BuilderError::NotARecord`] when `ty` is not a reference
    /// to a record type of the model.
    pub fn synthesize(&self, ty: &TypeExpr) -> Result<Arc<BuilderType>> {
        let record = match ty {
            TypeExpr::Named(name) => self.model.get(name),
            _ => None,
        }
        .ok_or_else(|| BuilderError::NotARecord {
            found: ty.to_string(),
        })?;

        let mut cache = self.lock();
        self.synthesize_locked(&mut cache, record)
            .ok_or_else(|| BuilderError::NotARecord {
                found: ty.to_string(),
            })
    }

    /// Get or create the builder type for a record type by name.
    pub fn synthesize_named(&self, record: &str) -> Result<Arc<BuilderType>> {
        self.synthesize(&TypeExpr::named(record))
    }

    /// Start a build session for a record type.
    pub fn builder(&self, record: &str) -> Result<Builder> {
        Ok(self.synthesize_named(record)?.new_builder())
    }

    /// Already synthesized builder type for a record, without synthesizing.
    pub fn get(&self, record: &str) -> Option<Arc<BuilderType>> {
        match self.lock().get(record) {
            Some(Slot::Ready(builder)) => Some(Arc::clone(builder)),
            _ => None,
        }
    }

    /// Every synthesized builder type, in model declaration order.
    pub fn builder_types(&self) -> Vec<Arc<BuilderType>> {
        let cache = self.lock();
        self.model
            .iter()
            .filter_map(|record| match cache.get(record.name()) {
                Some(Slot::Ready(builder)) => Some(Arc::clone(builder)),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<String, Slot>> {
        self.cache.lock().unwrap_or_else(|poisoned| {
            // A panic mid-synthesis may leave reservations behind.
            let mut cache = poisoned.into_inner();
            cache.retain(|_, slot| matches!(slot, Slot::Ready(_)));
            self.cache.clear_poison();
            cache
        })
    }

    /// Returns `None` when the record's synthesis is already in progress
    /// (a cyclic reference); its setters refer to it by name.
    fn synthesize_locked(
        &self,
        cache: &mut IndexMap<String, Slot>,
        record: &Arc<RecordType>,
    ) -> Option<Arc<BuilderType>> {
        match cache.get(record.name()) {
            Some(Slot::Ready(builder)) => {
                tracing::trace!(record = record.name(), "builder cache hit");
                return Some(Arc::clone(builder));
            }
            Some(Slot::Reserved) => {
                tracing::trace!(record = record.name(), "builder synthesis in progress");
                return None;
            }
            None => {}
        }

        cache.insert(record.name().to_string(), Slot::Reserved);

        let mut setters = IndexMap::with_capacity(record.fields().len());
        for field in record.fields() {
            let classification = classify(field, &self.model);
            if let Some(nested) = classification
                .nested
                .as_deref()
                .and_then(|name| self.model.get(name))
            {
                self.synthesize_locked(cache, nested);
            }
            let setter = Setter::new(field, classification);
            setters.insert(setter.method.clone(), setter);
        }

        let builder = Arc::new(BuilderType {
            name: builder_name(record.name()),
            record: Arc::clone(record),
            setters,
        });
        tracing::debug!(
            record = record.name(),
            builder = builder.name(),
            setters = builder.setters.len(),
            "synthesized builder"
        );

        cache.insert(record.name().to_string(), Slot::Ready(Arc::clone(&builder)));
        Some(builder)
    }
}

#[cfg(test)]
mod tests {
    use buildinfo_core::FieldDef;

    use super::*;

    fn model() -> Arc<Model> {
        Arc::new(
            Model::new()
                .with(
                    RecordType::new("Build")
                        .field(FieldDef::new("name", TypeExpr::String))
                        .field(FieldDef::new(
                            "agent",
                            TypeExpr::optional(TypeExpr::named("Agent")),
                        )),
                )
                .with(RecordType::new("Agent").field(FieldDef::new("name", TypeExpr::String))),
        )
    }

    #[test]
    fn test_names() {
        assert_eq!(setter_name("requestedBy"), "with_requestedBy");
        assert_eq!(builder_name("Agent"), "AgentBuilder");
    }

    #[test]
    fn test_synthesize_is_cached() {
        let registry = BuilderRegistry::new(model());
        let first = registry.synthesize_named("Build").unwrap();
        let second = registry.synthesize_named("Build").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_nested_builders_synthesized_first() {
        let registry = BuilderRegistry::new(model());
        assert!(registry.is_empty());

        registry.synthesize_named("Build").unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.get("Agent").is_some());
    }

    #[test]
    fn test_not_a_record() {
        let registry = BuilderRegistry::new(model());
        for ty in [
            TypeExpr::String,
            TypeExpr::named("Missing"),
            TypeExpr::optional(TypeExpr::named("Agent")),
        ] {
            let err = registry.synthesize(&ty).unwrap_err();
            assert!(matches!(err, BuilderError::NotARecord { .. }), "{}", ty);
        }
    }

    #[test]
    fn test_from_model_synthesizes_everything() {
        let registry = BuilderRegistry::from_model(model());
        let names: Vec<_> = registry
            .builder_types()
            .iter()
            .map(|b| b.name().to_string())
            .collect();
        assert_eq!(names, ["BuildBuilder", "AgentBuilder"]);
    }

    #[test]
    fn test_setters_follow_field_order() {
        let registry = BuilderRegistry::new(model());
        let builder = registry.synthesize_named("Build").unwrap();

        let methods: Vec<_> = builder.setters().map(|s| s.method()).collect();
        assert_eq!(methods, ["with_name", "with_agent"]);
        assert_eq!(builder.setter("with_agent").unwrap().shape(), Shape::Builder);
        assert_eq!(builder.setter("with_agent").unwrap().nested(), Some("Agent"));
    }

    #[test]
    fn test_poisoned_lock_drops_reservations() {
        let registry = Arc::new(BuilderRegistry::new(model()));

        let poisoner = Arc::clone(&registry);
        let panicked: std::thread::Result<()> = std::thread::spawn(move || {
            let mut cache = poisoner.cache.lock().unwrap();
            cache.insert("Build".to_string(), Slot::Reserved);
            panic!("synthesis interrupted");
        })
        .join();
        assert!(panicked.is_err());
        assert!(registry.cache.is_poisoned());

        let build = registry.synthesize_named("Build").unwrap();

        assert_eq!(build.name(), "BuildBuilder");
        assert!(!registry.cache.is_poisoned());
        assert_eq!(registry.len(), 2);
    }
}
