//! Build sessions: setter calls accumulate values until `build`.

use std::{fmt, sync::Arc};

use buildinfo_core::{ConstructionError, Record, Value};
use indexmap::IndexMap;

use crate::{
    BuildArguments, BuildSnapshot, BuilderError, BuilderType, Result, Setter, shape::Shape,
};

/// Arguments passed to a setter call.
#[derive(Debug, Clone)]
pub enum SetterArgs {
    Value(Value),
    Values(Vec<Value>),
    Named(IndexMap<String, Value>),
    Builder(Box<Builder>),
    Builders(Vec<Builder>),
}

impl SetterArgs {
    /// What was passed, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            SetterArgs::Value(_) => "a single value",
            SetterArgs::Values(_) => "a list of values",
            SetterArgs::Named(_) => "named values",
            SetterArgs::Builder(_) => "a builder",
            SetterArgs::Builders(_) => "a list of builders",
        }
    }
}

impl From<Value> for SetterArgs {
    fn from(value: Value) -> Self {
        SetterArgs::Value(value)
    }
}

impl From<&str> for SetterArgs {
    fn from(value: &str) -> Self {
        SetterArgs::Value(value.into())
    }
}

impl From<String> for SetterArgs {
    fn from(value: String) -> Self {
        SetterArgs::Value(value.into())
    }
}

impl From<i64> for SetterArgs {
    fn from(value: i64) -> Self {
        SetterArgs::Value(value.into())
    }
}

impl From<f64> for SetterArgs {
    fn from(value: f64) -> Self {
        SetterArgs::Value(value.into())
    }
}

impl From<bool> for SetterArgs {
    fn from(value: bool) -> Self {
        SetterArgs::Value(value.into())
    }
}

impl From<Vec<Value>> for SetterArgs {
    fn from(values: Vec<Value>) -> Self {
        SetterArgs::Values(values)
    }
}

impl From<IndexMap<String, Value>> for SetterArgs {
    fn from(values: IndexMap<String, Value>) -> Self {
        SetterArgs::Named(values)
    }
}

impl From<Builder> for SetterArgs {
    fn from(builder: Builder) -> Self {
        SetterArgs::Builder(Box::new(builder))
    }
}

impl From<Vec<Builder>> for SetterArgs {
    fn from(builders: Vec<Builder>) -> Self {
        SetterArgs::Builders(builders)
    }
}

/// One build session of a synthesized builder type.
///
/// Setters overwrite: the last call for a field wins. Nested builders are
/// finalized when passed to a setter, so later changes to them are not
/// observed.
#[derive(Clone)]
pub struct Builder {
    ty: Arc<BuilderType>,
    args: BuildArguments,
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("type", &self.ty.name())
            .field("args", &self.args)
            .finish()
    }
}

impl Builder {
    pub(crate) fn new(ty: Arc<BuilderType>, args: BuildArguments) -> Self {
        Self { ty, args }
    }

    /// The builder type this session belongs to.
    pub fn builder_type(&self) -> &Arc<BuilderType> {
        &self.ty
    }

    /// Name of the record type being built.
    pub fn record_name(&self) -> &str {
        self.ty.record().name()
    }

    /// Call a setter by method name, consuming and returning the builder.
    pub fn with(mut self, method: &str, args: impl Into<SetterArgs>) -> Result<Self> {
        self.set(method, args)?;
        Ok(self)
    }

    /// Call a setter by method name in place.
    pub fn set(&mut self, method: &str, args: impl Into<SetterArgs>) -> Result<&mut Self> {
        let setter = self
            .ty
            .setter(method)
            .ok_or_else(|| BuilderError::UnknownMethod {
                builder: self.ty.name().to_string(),
                method: method.to_string(),
            })?;

        let value = self.normalize(setter, args.into())?;
        tracing::trace!(
            builder = self.ty.name(),
            field = setter.field(),
            kind = value.kind(),
            "set field"
        );
        let field = setter.field().to_string();
        self.args.write(field, value);
        Ok(self)
    }

    /// Set a scalar field.
    pub fn with_value(self, method: &str, value: impl Into<Value>) -> Result<Self> {
        self.with(method, SetterArgs::Value(value.into()))
    }

    /// Set a sequence field from any number of values.
    pub fn with_values<I, V>(self, method: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.with(method, SetterArgs::Values(values))
    }

    /// Set a mapping field from named values.
    pub fn with_mapping<I, K, V>(self, method: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.with(method, SetterArgs::Named(values))
    }

    /// Set a nested record field from a builder.
    pub fn with_builder(self, method: &str, builder: Builder) -> Result<Self> {
        self.with(method, SetterArgs::Builder(Box::new(builder)))
    }

    /// Set a list-of-records field from builders.
    pub fn with_builders<I>(self, method: &str, builders: I) -> Result<Self>
    where
        I: IntoIterator<Item = Builder>,
    {
        self.with(method, SetterArgs::Builders(builders.into_iter().collect()))
    }

    /// Values supplied so far.
    pub fn arguments(&self) -> BuildSnapshot {
        self.args.snapshot()
    }

    /// Construct the record from the values supplied so far.
    ///
    /// Fields never set are left for the record constructor, so its errors
    /// come back unchanged.
    pub fn build(&self) -> std::result::Result<Record, ConstructionError> {
        tracing::debug!(builder = self.ty.name(), fields = self.args.len(), "build");
        self.ty.record().construct(self.args.snapshot().into_inner())
    }

    fn normalize(&self, setter: &Setter, args: SetterArgs) -> Result<Value> {
        match (setter.shape(), args) {
            (Shape::Scalar, SetterArgs::Value(value)) => Ok(value),
            (Shape::Sequence, SetterArgs::Values(values)) => Ok(Value::List(values)),
            (Shape::Sequence, SetterArgs::Value(value)) => Ok(Value::List(vec![value])),
            (Shape::Mapping, SetterArgs::Named(values)) => Ok(Value::Map(values)),
            (Shape::Builder, SetterArgs::Builder(builder)) => {
                Ok(Value::Record(self.finalize(setter, &builder)?))
            }
            (Shape::BuilderSequence, SetterArgs::Builder(builder)) => {
                Ok(Value::List(vec![Value::Record(self.finalize(setter, &builder)?)]))
            }
            (Shape::BuilderSequence, SetterArgs::Builders(builders)) => builders
                .iter()
                .map(|builder| self.finalize(setter, builder).map(Value::Record))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            (shape, args) => Err(BuilderError::ArgumentShape {
                builder: self.ty.name().to_string(),
                method: setter.method().to_string(),
                expected: shape.describe(),
                found: args.describe(),
            }),
        }
    }

    fn finalize(&self, setter: &Setter, nested: &Builder) -> Result<Record> {
        let expected = setter.nested().unwrap_or_default();
        if nested.record_name() != expected {
            return Err(BuilderError::BuilderMismatch {
                builder: self.ty.name().to_string(),
                method: setter.method().to_string(),
                expected: crate::builder_name(expected),
                found: nested.ty.name().to_string(),
            });
        }
        Ok(nested.build()?)
    }
}
