//! Introspectable method signatures of synthesized builders.
//!
//! Stub and documentation emitters read builders only through these
//! signatures, so emitted output matches runtime behavior.

use buildinfo_core::TypeExpr;
use serde::Serialize;

use crate::{BuilderType, Setter, builder_name, shape::ParamKind};

/// Type of a setter parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "type")]
pub enum ParamType {
    /// A plain value (or each element of a sequence or mapping).
    Value(TypeExpr),
    /// A nested builder, by builder type name.
    Builder(String),
}

/// What a method returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "type")]
pub enum ReturnType {
    /// The builder itself, for chaining.
    SelfType,
    /// A constructed record of the named type.
    Record(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSignature {
    pub name: String,
    pub kind: ParamKind,
    #[serde(rename = "type")]
    pub ty: ParamType,
}

/// Signature of one builder method. The receiver is implicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSignature {
    pub name: String,
    pub doc: Option<String>,
    pub params: Vec<ParamSignature>,
    pub returns: ReturnType,
}

impl MethodSignature {
    fn setter(setter: &Setter) -> Self {
        let shape = setter.shape();
        let ty = match setter.nested() {
            Some(record) if shape.takes_builders() => ParamType::Builder(builder_name(record)),
            _ => ParamType::Value(setter.param_type().clone()),
        };
        Self {
            name: setter.method().to_string(),
            doc: setter.doc().map(str::to_string),
            params: vec![ParamSignature {
                name: shape.param_name().to_string(),
                kind: shape.param_kind(),
                ty,
            }],
            returns: ReturnType::SelfType,
        }
    }

    fn build(record: &str) -> Self {
        Self {
            name: "build".to_string(),
            doc: Some(format!("Build the `{}` from the values set so far.", record)),
            params: Vec::new(),
            returns: ReturnType::Record(record.to_string()),
        }
    }

    pub fn is_build(&self) -> bool {
        matches!(self.returns, ReturnType::Record(_))
    }
}

impl BuilderType {
    /// Signatures of every setter in field order, then `build`.
    pub fn signatures(&self) -> Vec<MethodSignature> {
        self.setters()
            .map(MethodSignature::setter)
            .chain(std::iter::once(MethodSignature::build(self.record().name())))
            .collect()
    }
}

/// Parameter type as written in docs, e.g. `*values: string`.
pub fn describe_param(param: &ParamSignature) -> String {
    let ty = match &param.ty {
        ParamType::Value(ty) => ty.to_string(),
        ParamType::Builder(name) => name.clone(),
    };
    format!("{}{}: {}", param.kind.prefix(), param.name, ty)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use buildinfo_core::{FieldDef, Model, RecordType};

    use super::*;
    use crate::BuilderRegistry;

    fn builder() -> Arc<BuilderType> {
        let model = Model::new()
            .with(
                RecordType::new("Module")
                    .field(FieldDef::new("id", TypeExpr::String).doc("Module identifier."))
                    .field(FieldDef::new(
                        "artifacts",
                        TypeExpr::optional(TypeExpr::list(TypeExpr::named("Artifact"))),
                    ))
                    .field(FieldDef::new(
                        "requestedBy",
                        TypeExpr::optional(TypeExpr::list(TypeExpr::list(TypeExpr::String))),
                    ))
                    .field(FieldDef::new(
                        "properties",
                        TypeExpr::optional(TypeExpr::map(TypeExpr::String)),
                    )),
            )
            .with(RecordType::new("Artifact"));
        BuilderRegistry::new(Arc::new(model))
            .synthesize_named("Module")
            .unwrap()
    }

    #[test]
    fn test_build_comes_last() {
        let signatures = builder().signatures();
        let names: Vec<_> = signatures.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "with_id",
                "with_artifacts",
                "with_requestedBy",
                "with_properties",
                "build"
            ]
        );
        let build = signatures.last().unwrap();
        assert!(build.is_build());
        assert!(build.params.is_empty());
        assert_eq!(build.returns, ReturnType::Record("Module".into()));
    }

    #[test]
    fn test_setter_params() {
        let signatures = builder().signatures();

        assert_eq!(describe_param(&signatures[0].params[0]), "value: string");
        assert_eq!(signatures[0].doc.as_deref(), Some("Module identifier."));
        assert_eq!(
            describe_param(&signatures[1].params[0]),
            "*builders: ArtifactBuilder"
        );
        assert_eq!(
            describe_param(&signatures[2].params[0]),
            "*values: tuple<string>"
        );
        assert_eq!(
            describe_param(&signatures[3].params[0]),
            "**values: string"
        );
        assert!(signatures[..4].iter().all(|s| s.returns == ReturnType::SelfType));
    }

    #[test]
    fn test_serialize() {
        let signatures = builder().signatures();
        let json = serde_json::to_value(&signatures[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "with_artifacts",
                "doc": null,
                "params": [{
                    "name": "builders",
                    "kind": "var_positional",
                    "type": {"kind": "builder", "type": "ArtifactBuilder"},
                }],
                "returns": {"kind": "self_type"},
            })
        );
    }
}
