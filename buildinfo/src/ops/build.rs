//! Build operation - drive a builder from a JSON document.
//!
//! Each key of the input object is passed to the matching `with_<key>`
//! setter in the shape that setter takes; nested objects drive nested
//! builders.

use buildinfo_builder::{
    BUILD_INFO, BuildInfoBuilder, Builder, BuilderRegistry, SetterArgs, Shape, setter_name,
};
use buildinfo_core::{Record, Value};
use eyre::{Result, bail, eyre};
use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

pub struct BuildOptions<'a> {
    pub record: &'a str,
    /// Merge the process environment into `properties`.
    pub collect_env: bool,
    pub exclude: &'a [String],
}

/// Build one record from a JSON object.
pub fn build(
    registry: &BuilderRegistry,
    input: &Json,
    options: &BuildOptions<'_>,
) -> Result<Record> {
    let Json::Object(object) = input else {
        bail!("Input must be a JSON object, got {}", json_kind(input));
    };

    if !options.collect_env {
        let builder = apply(registry, registry.builder(options.record)?, object)?;
        return Ok(builder.build()?);
    }

    if options.record != BUILD_INFO {
        bail!("--collect-env is only supported for {}", BUILD_INFO);
    }

    // Explicit properties are seeded first so the environment overrides them.
    let mut object = object.clone();
    let additional: IndexMap<String, Value> = match object.remove("properties") {
        Some(Json::Object(properties)) => properties
            .into_iter()
            .map(|(k, v)| (k, to_value(v)))
            .collect(),
        Some(other) => bail!("'properties' must be an object, got {}", json_kind(&other)),
        None => IndexMap::new(),
    };

    let builder = apply(registry, registry.builder(BUILD_INFO)?, &object)?;
    let record = BuildInfoBuilder::from_builder(builder)?
        .collect_env_without_keys(options.exclude, additional)?
        .build()?;
    Ok(record)
}

fn apply(
    registry: &BuilderRegistry,
    mut builder: Builder,
    object: &Map<String, Json>,
) -> Result<Builder> {
    for (field, value) in object {
        let method = setter_name(field);
        let setter = builder
            .builder_type()
            .setter(&method)
            .ok_or_else(|| eyre!("{} has no field '{}'", builder.record_name(), field))?;
        // An unset nested record is null already.
        if value.is_null() && setter.shape().takes_builders() {
            continue;
        }

        let args = match (setter.shape(), setter.nested()) {
            (Shape::Scalar, _) => SetterArgs::Value(to_value(value.clone())),
            (Shape::Sequence, _) => match value {
                Json::Array(items) => {
                    SetterArgs::Values(items.iter().cloned().map(to_value).collect())
                }
                other => SetterArgs::Value(to_value(other.clone())),
            },
            (Shape::Mapping, _) => match value {
                Json::Object(entries) => SetterArgs::Named(
                    entries
                        .iter()
                        .map(|(k, v)| (k.clone(), to_value(v.clone())))
                        .collect(),
                ),
                other => bail!("'{}' must be an object, got {}", field, json_kind(other)),
            },
            (Shape::Builder, Some(nested)) => {
                SetterArgs::from(nested_builder(registry, nested, field, value)?)
            }
            (Shape::BuilderSequence, Some(nested)) => match value {
                Json::Array(items) => SetterArgs::Builders(
                    items
                        .iter()
                        .map(|item| nested_builder(registry, nested, field, item))
                        .collect::<Result<_>>()?,
                ),
                other => SetterArgs::from(nested_builder(registry, nested, field, other)?),
            },
            (shape, None) => bail!(
                "'{}' takes {} but names no record type",
                field,
                shape.describe()
            ),
        };

        builder.set(&method, args)?;
    }
    Ok(builder)
}

fn nested_builder(
    registry: &BuilderRegistry,
    record: &str,
    field: &str,
    value: &Json,
) -> Result<Builder> {
    match value {
        Json::Object(object) => apply(registry, registry.builder(record)?, object),
        other => bail!("'{}' must be an object, got {}", field, json_kind(other)),
    }
}

/// Convert JSON to a field value. Integral numbers become ints.
pub fn to_value(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::String(s),
        Json::Array(items) => Value::List(items.into_iter().map(to_value).collect()),
        Json::Object(entries) => {
            Value::Map(entries.into_iter().map(|(k, v)| (k, to_value(v))).collect())
        }
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
