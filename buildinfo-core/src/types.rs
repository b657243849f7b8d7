//! Declared field type expressions.
//!
//! A [`TypeExpr`] is the language-agnostic description of what a record
//! field holds. Its textual form is what model files use:
//!
//! ```text
//! string | int | float | bool | bytes | any
//! Name                      record reference
//! list | list<T>            ordered sequence
//! map | map<T>              string-keyed mapping
//! tuple<T, ...>             fixed-size sequence
//! optional<T> | T?          value or null
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::Value;

/// A declared field type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TypeExpr {
    /// Text.
    String,
    /// Signed integer.
    Int,
    /// Floating point number (also accepts integers).
    Float,
    /// Boolean.
    Bool,
    /// Byte string. Classified as a scalar, never as a sequence.
    Bytes,
    /// Unconstrained value.
    Any,
    /// A value of the inner type or null.
    Optional(Box<TypeExpr>),
    /// Reference to a record type by name.
    Named(String),
    /// Ordered sequence with an optional element type.
    List(Option<Box<TypeExpr>>),
    /// String-keyed mapping with an optional value type.
    Map(Option<Box<TypeExpr>>),
    /// Fixed-size sequence.
    Tuple(Vec<TypeExpr>),
}

impl TypeExpr {
    pub fn optional(inner: TypeExpr) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn list(element: TypeExpr) -> Self {
        Self::List(Some(Box::new(element)))
    }

    pub fn map(value: TypeExpr) -> Self {
        Self::Map(Some(Box::new(value)))
    }

    /// Check if this type admits null.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_) | Self::Any)
    }

    /// Strip every optional wrapper.
    pub fn strip_optional(&self) -> &TypeExpr {
        match self {
            Self::Optional(inner) => inner.strip_optional(),
            other => other,
        }
    }

    /// Names of every record type referenced anywhere inside this type.
    pub fn named_refs(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_refs(&mut refs);
        refs
    }

    fn collect_refs<'a>(&'a self, refs: &mut Vec<&'a str>) {
        match self {
            Self::Named(name) => refs.push(name),
            Self::Optional(inner) => inner.collect_refs(refs),
            Self::List(Some(inner)) | Self::Map(Some(inner)) => inner.collect_refs(refs),
            Self::Tuple(items) => items.iter().for_each(|t| t.collect_refs(refs)),
            _ => {}
        }
    }

    /// Check whether a value conforms to this type.
    ///
    /// Record references match records carrying the same type name.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::Optional(_), Value::Null) => true,
            (Self::Optional(inner), v) => inner.accepts(v),
            (Self::String, Value::String(_)) => true,
            (Self::Int, Value::Int(_)) => true,
            (Self::Float, Value::Float(_) | Value::Int(_)) => true,
            (Self::Bool, Value::Bool(_)) => true,
            (Self::Bytes, Value::Bytes(_)) => true,
            (Self::Named(name), Value::Record(record)) => record.type_name() == name,
            (Self::List(element), Value::List(items)) => match element {
                Some(element) => items.iter().all(|item| element.accepts(item)),
                None => true,
            },
            (Self::Map(inner), Value::Map(entries)) => match inner {
                Some(inner) => entries.values().all(|v| inner.accepts(v)),
                None => true,
            },
            (Self::Tuple(types), Value::List(items)) => {
                types.len() == items.len() && types.iter().zip(items).all(|(t, v)| t.accepts(v))
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Bool => f.write_str("bool"),
            Self::Bytes => f.write_str("bytes"),
            Self::Any => f.write_str("any"),
            Self::Optional(inner) => write!(f, "{}?", inner),
            Self::Named(name) => f.write_str(name),
            Self::List(None) => f.write_str("list"),
            Self::List(Some(inner)) => write!(f, "list<{}>", inner),
            Self::Map(None) => f.write_str("map"),
            Self::Map(Some(inner)) => write!(f, "map<{}>", inner),
            Self::Tuple(items) => {
                f.write_str("tuple<")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(">")
            }
        }
    }
}

impl Serialize for TypeExpr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = TypeExprError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Error returned when a type expression cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type expression '{input}': {reason}")]
pub struct TypeExprError {
    pub input: String,
    pub reason: String,
}

impl FromStr for TypeExpr {
    type Err = TypeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { src: s, pos: 0 };
        let ty = parser.parse_type().map_err(|reason| TypeExprError {
            input: s.to_string(),
            reason,
        })?;
        parser.skip_ws();
        if parser.pos < s.len() {
            return Err(TypeExprError {
                input: s.to_string(),
                reason: format!("unexpected trailing input at offset {}", parser.pos),
            });
        }
        Ok(ty)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        self.src.get(self.pos..).unwrap_or_default()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start().len();
        self.pos += skipped;
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<&str, String> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(format!("expected a type name at offset {}", self.pos));
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.src[start..self.pos])
    }

    fn parse_type(&mut self) -> Result<TypeExpr, String> {
        let name = self.ident()?.to_string();
        let args = if self.eat('<') {
            let mut args = vec![self.parse_type()?];
            while self.eat(',') {
                args.push(self.parse_type()?);
            }
            if !self.eat('>') {
                return Err(format!("expected '>' at offset {}", self.pos));
            }
            Some(args)
        } else {
            None
        };

        let mut ty = build(&name, args)?;
        while self.eat('?') {
            ty = TypeExpr::optional(ty);
        }
        Ok(ty)
    }
}

fn build(name: &str, args: Option<Vec<TypeExpr>>) -> Result<TypeExpr, String> {
    let single = |args: Option<Vec<TypeExpr>>| -> Result<Option<Box<TypeExpr>>, String> {
        match args {
            None => Ok(None),
            Some(mut args) if args.len() == 1 => Ok(args.pop().map(Box::new)),
            Some(args) => Err(format!(
                "'{}' takes one type argument, got {}",
                name,
                args.len()
            )),
        }
    };

    let ty = match name {
        "string" => TypeExpr::String,
        "int" => TypeExpr::Int,
        "float" => TypeExpr::Float,
        "bool" => TypeExpr::Bool,
        "bytes" => TypeExpr::Bytes,
        "any" => TypeExpr::Any,
        "list" => return Ok(TypeExpr::List(single(args)?)),
        "map" => return Ok(TypeExpr::Map(single(args)?)),
        "optional" => {
            return single(args)?
                .map(TypeExpr::Optional)
                .ok_or_else(|| "'optional' requires a type argument".to_string());
        }
        "tuple" => {
            return match args {
                Some(args) => Ok(TypeExpr::Tuple(args)),
                None => Err("'tuple' requires at least one type argument".to_string()),
            };
        }
        other => TypeExpr::Named(other.to_string()),
    };

    match args {
        Some(_) => Err(format!("'{}' does not take type arguments", name)),
        None => Ok(ty),
    }
}
