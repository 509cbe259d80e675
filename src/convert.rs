//! Building bindings from serde data models.
//!
//! Callers typically already hold their data as JSON or YAML (a request
//! body, a config file), so [`Context`] can be built straight from
//! `serde_json::Value` and `serde_yaml::Value` trees. Objects and mappings
//! become nested contexts, arrays become sequences, and leaves become
//! scalars. Computed bindings have no serialized form and must be inserted
//! programmatically.

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::error::{RenderError, Result};
use crate::value::{Context, Scalar, Value};

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Scalar(Scalar::Null),
            JsonValue::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Scalar(Scalar::Int(i)),
                None => Value::Scalar(Scalar::Float(n.as_f64().unwrap_or(0.0))),
            },
            JsonValue::String(s) => Value::Scalar(Scalar::Text(s)),
            JsonValue::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            JsonValue::Object(map) => Value::Context(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<YamlValue> for Value {
    fn from(value: YamlValue) -> Self {
        match value {
            YamlValue::Null => Value::Scalar(Scalar::Null),
            YamlValue::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            YamlValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Scalar(Scalar::Int(i)),
                None => Value::Scalar(Scalar::Float(n.as_f64().unwrap_or(0.0))),
            },
            YamlValue::String(s) => Value::Scalar(Scalar::Text(s)),
            YamlValue::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            YamlValue::Mapping(map) => {
                let mut context = Context::new();
                for (key, value) in map {
                    // non-scalar mapping keys have no tag-name form
                    let key = match key {
                        YamlValue::String(s) => s,
                        YamlValue::Bool(b) => b.to_string(),
                        YamlValue::Number(n) => n.to_string(),
                        _ => continue,
                    };
                    context.insert(key, Value::from(value));
                }
                Value::Context(context)
            }
            YamlValue::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

impl Context {
    /// Build bindings from a JSON value; the top level must be an object.
    pub fn from_json(value: JsonValue) -> Result<Context> {
        match value {
            JsonValue::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect()),
            other => Err(RenderError::NonMappingBindings {
                found: json_kind(&other),
            }),
        }
    }

    /// Build bindings from a YAML value; the top level must be a mapping.
    pub fn from_yaml(value: YamlValue) -> Result<Context> {
        let found = yaml_kind(&value);
        match Value::from(value) {
            Value::Context(context) => Ok(context),
            _ => Err(RenderError::NonMappingBindings { found }),
        }
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "boolean",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}
