//! Field shape classification.
//!
//! Every field of a record gets exactly one setter whose calling convention
//! (its *shape*) is derived from the field's declared type. Classification
//! never fails: anything unrecognized is a scalar.

use buildinfo_core::{FieldDef, Model, TypeExpr};
use serde::Serialize;

/// Calling convention of a generated setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// One value, stored verbatim.
    Scalar,
    /// One nested builder, finalized on the call.
    Builder,
    /// Any number of values, stored as a list in call order.
    Sequence,
    /// Any number of nested builders, each finalized on the call.
    BuilderSequence,
    /// Named values, stored as a mapping.
    Mapping,
}

impl Shape {
    /// Kind of the setter's single parameter.
    pub fn param_kind(&self) -> ParamKind {
        match self {
            Shape::Scalar | Shape::Builder => ParamKind::Positional,
            Shape::Sequence | Shape::BuilderSequence => ParamKind::VarPositional,
            Shape::Mapping => ParamKind::VarKeyword,
        }
    }

    /// Name of the setter's single parameter.
    pub fn param_name(&self) -> &'static str {
        match self {
            Shape::Scalar => "value",
            Shape::Builder => "builder",
            Shape::Sequence | Shape::Mapping => "values",
            Shape::BuilderSequence => "builders",
        }
    }

    /// Whether the setter takes nested builders.
    pub fn takes_builders(&self) -> bool {
        matches!(self, Shape::Builder | Shape::BuilderSequence)
    }

    /// What the setter accepts, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Scalar => "a single value",
            Shape::Builder => "a builder",
            Shape::Sequence => "any number of values",
            Shape::BuilderSequence => "any number of builders",
            Shape::Mapping => "named values",
        }
    }
}

/// How a parameter binds its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Exactly one positional argument.
    Positional,
    /// Any number of positional arguments (`*values`).
    VarPositional,
    /// Any number of named arguments (`**values`).
    VarKeyword,
}

impl ParamKind {
    /// Prefix used when displaying the parameter.
    pub fn prefix(&self) -> &'static str {
        match self {
            ParamKind::Positional => "",
            ParamKind::VarPositional => "*",
            ParamKind::VarKeyword => "**",
        }
    }
}

/// Result of classifying one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub shape: Shape,
    /// Type of the stored value, or of each element for sequences and
    /// mappings, after the shape's inputs are normalized.
    pub arg_type: TypeExpr,
    /// Record type that needs its own builder.
    pub nested: Option<String>,
}

impl Classification {
    fn new(shape: Shape, arg_type: TypeExpr) -> Self {
        Self {
            shape,
            arg_type,
            nested: None,
        }
    }

    fn nested(shape: Shape, record: &str) -> Self {
        Self {
            shape,
            arg_type: TypeExpr::named(record),
            nested: Some(record.to_string()),
        }
    }
}

/// Fields whose advertised parameter type is fixed by name rather than
/// derived from the declared type.
///
/// `requestedBy` holds dependency paths, advertised as a tuple of strings.
/// Only the advertised type changes; the shape still follows the declared
/// type.
pub const PARAM_TYPE_OVERRIDES: &[(&str, &str)] = &[("requestedBy", "tuple<string>")];

/// Advertised parameter type override for a field, if any.
pub fn param_type_override(field: &str) -> Option<TypeExpr> {
    PARAM_TYPE_OVERRIDES
        .iter()
        .find(|(name, _)| *name == field)
        .and_then(|(_, ty)| ty.parse().ok())
}

/// Classify a field's declared type.
///
/// Optional wrappers are stripped first. Record references unknown to the
/// model, text and byte strings fall back to the scalar shape.
pub fn classify(field: &FieldDef, model: &Model) -> Classification {
    classify_type(field.ty.strip_optional(), model)
}

fn classify_type(ty: &TypeExpr, model: &Model) -> Classification {
    match ty {
        TypeExpr::Named(name) if model.contains(name) => Classification::nested(Shape::Builder, name),
        TypeExpr::Map(value) => Classification::new(Shape::Mapping, element_or_any(value.as_deref())),
        TypeExpr::List(element) => sequence(element.as_deref(), model),
        TypeExpr::Tuple(items) if items.len() == 1 => sequence(items.first(), model),
        TypeExpr::Tuple(_) => Classification::new(Shape::Sequence, TypeExpr::Any),
        other => Classification::new(Shape::Scalar, other.clone()),
    }
}

fn sequence(element: Option<&TypeExpr>, model: &Model) -> Classification {
    match element {
        Some(TypeExpr::Named(name)) if model.contains(name) => {
            Classification::nested(Shape::BuilderSequence, name)
        }
        other => Classification::new(Shape::Sequence, element_or_any(other)),
    }
}

fn element_or_any(element: Option<&TypeExpr>) -> TypeExpr {
    element.cloned().unwrap_or(TypeExpr::Any)
}

#[cfg(test)]
mod tests {
    use buildinfo_core::RecordType;

    use super::*;

    fn model() -> Model {
        Model::new()
            .with(RecordType::new("Agent"))
            .with(RecordType::new("Artifact"))
    }

    fn classify_str(ty: &str) -> Classification {
        classify(&FieldDef::new("f", ty.parse().unwrap()), &model())
    }

    #[test]
    fn test_scalars() {
        for ty in ["string", "int", "float", "bool", "bytes", "any", "string?"] {
            assert_eq!(classify_str(ty).shape, Shape::Scalar, "{}", ty);
        }
        assert_eq!(classify_str("string?").arg_type, TypeExpr::String);
    }

    #[test]
    fn test_unknown_named_type_is_scalar() {
        let c = classify_str("Timestamp");
        assert_eq!(c.shape, Shape::Scalar);
        assert_eq!(c.nested, None);
    }

    #[test]
    fn test_nested_record() {
        let c = classify_str("Agent?");
        assert_eq!(c.shape, Shape::Builder);
        assert_eq!(c.arg_type, TypeExpr::named("Agent"));
        assert_eq!(c.nested.as_deref(), Some("Agent"));
    }

    #[test]
    fn test_mapping() {
        let c = classify_str("map<string>?");
        assert_eq!(c.shape, Shape::Mapping);
        assert_eq!(c.arg_type, TypeExpr::String);
        assert_eq!(classify_str("map").arg_type, TypeExpr::Any);
    }

    #[test]
    fn test_sequences() {
        let c = classify_str("list<string>");
        assert_eq!(c.shape, Shape::Sequence);
        assert_eq!(c.arg_type, TypeExpr::String);

        let untyped = classify_str("list");
        assert_eq!(untyped.shape, Shape::Sequence);
        assert_eq!(untyped.arg_type, TypeExpr::Any);

        let nested = classify_str("list<list<string>>");
        assert_eq!(nested.shape, Shape::Sequence);
        assert_eq!(nested.arg_type, TypeExpr::list(TypeExpr::String));
    }

    #[test]
    fn test_builder_sequence() {
        let c = classify_str("list<Artifact>?");
        assert_eq!(c.shape, Shape::BuilderSequence);
        assert_eq!(c.nested.as_deref(), Some("Artifact"));
    }

    #[test]
    fn test_tuples() {
        assert_eq!(classify_str("tuple<string>").arg_type, TypeExpr::String);
        let pair = classify_str("tuple<string, int>");
        assert_eq!(pair.shape, Shape::Sequence);
        assert_eq!(pair.arg_type, TypeExpr::Any);
    }

    #[test]
    fn test_param_kinds() {
        assert_eq!(Shape::Scalar.param_kind(), ParamKind::Positional);
        assert_eq!(Shape::Builder.param_kind(), ParamKind::Positional);
        assert_eq!(Shape::Sequence.param_kind(), ParamKind::VarPositional);
        assert_eq!(Shape::BuilderSequence.param_kind(), ParamKind::VarPositional);
        assert_eq!(Shape::Mapping.param_kind(), ParamKind::VarKeyword);
        assert_eq!(Shape::Mapping.param_name(), "values");
        assert_eq!(Shape::BuilderSequence.param_name(), "builders");
    }

    #[test]
    fn test_requested_by_override() {
        assert_eq!(
            param_type_override("requestedBy"),
            Some(TypeExpr::Tuple(vec![TypeExpr::String]))
        );
        assert_eq!(param_type_override("scopes"), None);
    }
}
