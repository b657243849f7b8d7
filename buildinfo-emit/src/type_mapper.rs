//! Mapping of declared types and method signatures to a target notation.

use buildinfo_builder::{ParamKind, ParamSignature, ParamType, ReturnType};
use buildinfo_core::TypeExpr;

/// Renders types for one output notation.
pub trait TypeMapper {
    /// Render a declared type.
    fn map_type(&self, ty: &TypeExpr) -> String;

    /// Render a builder type reference.
    fn map_builder(&self, builder: &str) -> String;

    /// Render the full type of a setter parameter.
    fn map_param(&self, param: &ParamSignature) -> String;

    /// Render a method's return type. `builder` is the name of the builder
    /// the method belongs to.
    fn map_return(&self, returns: &ReturnType, builder: &str) -> String;
}

/// Rust type syntax, as used in emitted stubs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

impl RustTypeMapper {
    /// Name of the dynamic value type unconstrained types map to.
    pub const VALUE: &'static str = "Value";

    /// Name of the error type `build` returns.
    pub const ERROR: &'static str = "ConstructionError";

    /// Whether rendering `ty` refers to [`RustTypeMapper::VALUE`].
    pub fn uses_value(ty: &TypeExpr) -> bool {
        match ty {
            TypeExpr::Any | TypeExpr::List(None) | TypeExpr::Map(None) => true,
            TypeExpr::Optional(inner) | TypeExpr::List(Some(inner)) | TypeExpr::Map(Some(inner)) => {
                Self::uses_value(inner)
            }
            TypeExpr::Tuple(items) => items.iter().any(Self::uses_value),
            _ => false,
        }
    }
}

impl TypeMapper for RustTypeMapper {
    fn map_type(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::String => "String".to_string(),
            TypeExpr::Int => "i64".to_string(),
            TypeExpr::Float => "f64".to_string(),
            TypeExpr::Bool => "bool".to_string(),
            TypeExpr::Bytes => "Vec<u8>".to_string(),
            TypeExpr::Any => Self::VALUE.to_string(),
            TypeExpr::Optional(inner) => format!("Option<{}>", self.map_type(inner)),
            TypeExpr::Named(name) => name.clone(),
            TypeExpr::List(None) => format!("Vec<{}>", Self::VALUE),
            TypeExpr::List(Some(inner)) => format!("Vec<{}>", self.map_type(inner)),
            TypeExpr::Map(None) => format!("std::collections::HashMap<String, {}>", Self::VALUE),
            TypeExpr::Map(Some(inner)) => {
                format!("std::collections::HashMap<String, {}>", self.map_type(inner))
            }
            TypeExpr::Tuple(items) if items.len() == 1 => format!("({},)", self.map_type(&items[0])),
            TypeExpr::Tuple(items) => {
                let items: Vec<_> = items.iter().map(|t| self.map_type(t)).collect();
                format!("({})", items.join(", "))
            }
        }
    }

    fn map_builder(&self, builder: &str) -> String {
        format!("impl {}", builder)
    }

    fn map_param(&self, param: &ParamSignature) -> String {
        let item = match &param.ty {
            ParamType::Value(ty) => self.map_type(ty),
            ParamType::Builder(builder) => self.map_builder(builder),
        };
        match param.kind {
            ParamKind::Positional => item,
            ParamKind::VarPositional => format!("impl IntoIterator<Item = {}>", item),
            ParamKind::VarKeyword => format!("impl IntoIterator<Item = (String, {})>", item),
        }
    }

    fn map_return(&self, returns: &ReturnType, _builder: &str) -> String {
        match returns {
            ReturnType::SelfType => "Self".to_string(),
            ReturnType::Record(record) => format!("Result<{}, {}>", record, Self::ERROR),
        }
    }
}

/// The model file notation (`list<string>`, `Agent?`), as used in docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocTypeMapper;

impl TypeMapper for DocTypeMapper {
    fn map_type(&self, ty: &TypeExpr) -> String {
        ty.to_string()
    }

    fn map_builder(&self, builder: &str) -> String {
        builder.to_string()
    }

    fn map_param(&self, param: &ParamSignature) -> String {
        match &param.ty {
            ParamType::Value(ty) => self.map_type(ty),
            ParamType::Builder(builder) => self.map_builder(builder),
        }
    }

    fn map_return(&self, returns: &ReturnType, builder: &str) -> String {
        match returns {
            ReturnType::SelfType => builder.to_string(),
            ReturnType::Record(record) => record.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(kind: ParamKind, ty: ParamType) -> ParamSignature {
        ParamSignature {
            name: "values".to_string(),
            kind,
            ty,
        }
    }

    #[test]
    fn test_rust_types() {
        let mapper = RustTypeMapper;
        let cases = [
            ("string", "String"),
            ("int?", "Option<i64>"),
            ("bytes", "Vec<u8>"),
            ("list<list<string>>", "Vec<Vec<String>>"),
            ("map<string>", "std::collections::HashMap<String, String>"),
            ("list", "Vec<Value>"),
            ("tuple<string>", "(String,)"),
            ("tuple<string, int>", "(String, i64)"),
            ("Agent", "Agent"),
        ];
        for (input, expected) in cases {
            let ty: TypeExpr = input.parse().unwrap();
            assert_eq!(mapper.map_type(&ty), expected, "{}", input);
        }
    }

    #[test]
    fn test_rust_params() {
        let mapper = RustTypeMapper;
        assert_eq!(
            mapper.map_param(&param(ParamKind::Positional, ParamType::Builder("AgentBuilder".into()))),
            "impl AgentBuilder"
        );
        assert_eq!(
            mapper.map_param(&param(
                ParamKind::VarPositional,
                ParamType::Builder("ArtifactBuilder".into())
            )),
            "impl IntoIterator<Item = impl ArtifactBuilder>"
        );
        assert_eq!(
            mapper.map_param(&param(ParamKind::VarKeyword, ParamType::Value(TypeExpr::String))),
            "impl IntoIterator<Item = (String, String)>"
        );
    }

    #[test]
    fn test_uses_value() {
        assert!(RustTypeMapper::uses_value(&"map?".parse().unwrap()));
        assert!(RustTypeMapper::uses_value(&"tuple<string, any>".parse().unwrap()));
        assert!(!RustTypeMapper::uses_value(&"list<string>".parse().unwrap()));
    }

    #[test]
    fn test_doc_returns() {
        let mapper = DocTypeMapper;
        assert_eq!(mapper.map_return(&ReturnType::SelfType, "AgentBuilder"), "AgentBuilder");
        assert_eq!(
            mapper.map_return(&ReturnType::Record("Agent".into()), "AgentBuilder"),
            "Agent"
        );
        assert_eq!(
            RustTypeMapper.map_return(&ReturnType::Record("Agent".into()), "AgentBuilder"),
            "Result<Agent, ConstructionError>"
        );
    }
}
