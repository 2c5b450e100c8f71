//! Document Encoder/Decoder
//!
//! Explicit, table-driven conversion between [`ParserConfiguration`] and a
//! `serde_json::Value` document tree. Lists are written in wrapped form,
//! e.g. `{"markers": {"item": ["TODO", "FIXME"]}}`.

use serde_json::{Map, Value};
use tracing::warn;

use super::{
    descriptor, lookup, suggest, Field, FieldDescriptor, FieldShape, MergePolicy, PARSER_FIELDS,
};
use crate::configuration::ParserConfiguration;
use crate::error::{ConfigError, Result};

/// A single field value lifted out of a document or a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

/// Current value of `field`, or `None` when it is unset.
pub fn read_field(config: &ParserConfiguration, field: Field) -> Option<FieldValue> {
    match field {
        Field::DefaultPackageName => {
            Some(FieldValue::Scalar(config.default_package_name().to_string()))
        }
        Field::Target => config.target().map(|t| FieldValue::Scalar(t.to_string())),
        Field::Visibility => Some(FieldValue::Scalar(config.visibility().to_string())),
        Field::Encoding => Some(FieldValue::Scalar(config.encoding().to_string())),
        Field::Markers => Some(FieldValue::List(config.markers().to_vec())),
        Field::Extensions => Some(FieldValue::List(config.extensions().to_vec())),
    }
}

/// Store `value` into `field` according to `policy`.
pub fn write_field(
    config: &mut ParserConfiguration,
    field: Field,
    value: FieldValue,
    policy: MergePolicy,
) -> Result<()> {
    let key = descriptor(field).key;
    match (field, value) {
        (Field::DefaultPackageName, FieldValue::Scalar(v)) => config.set_default_package_name(v),
        (Field::Target, FieldValue::Scalar(v)) => config.set_target(v),
        (Field::Visibility, FieldValue::Scalar(v)) => config.set_visibility(v),
        (Field::Encoding, FieldValue::Scalar(v)) => config.set_encoding(v),
        (Field::Markers, FieldValue::List(v)) => {
            let merged = merge_list(config.markers(), v, policy);
            config.set_markers(merged);
        }
        (Field::Extensions, FieldValue::List(v)) => {
            let merged = merge_list(config.extensions(), v, policy);
            config.set_extensions(merged);
        }
        (_, FieldValue::Scalar(_)) => {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                expected: "a list of strings",
            })
        }
        (_, FieldValue::List(_)) => {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                expected: "a string",
            })
        }
    }
    Ok(())
}

fn merge_list(current: &[String], incoming: Vec<String>, policy: MergePolicy) -> Vec<String> {
    match policy {
        MergePolicy::Replace => incoming,
        MergePolicy::Append => current.iter().cloned().chain(incoming).collect(),
    }
}

/// Encode the persisted fields of `config`. The rebuild flag is never written.
pub fn encode(config: &ParserConfiguration) -> Value {
    let mut doc = Map::new();

    for d in &PARSER_FIELDS {
        let value = match (read_field(config, d.field), d.shape) {
            (None, _) => continue,
            (Some(FieldValue::Scalar(s)), _) => Value::String(s),
            (Some(FieldValue::List(items)), FieldShape::List { item }) => {
                let mut wrapper = Map::new();
                wrapper.insert(
                    item.to_string(),
                    Value::Array(items.into_iter().map(Value::String).collect()),
                );
                Value::Object(wrapper)
            }
            (Some(FieldValue::List(items)), FieldShape::Scalar) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
        };
        doc.insert(d.key.to_string(), value);
    }

    Value::Object(doc)
}

/// Decode a document onto the default configuration.
pub fn decode(doc: &Value) -> Result<ParserConfiguration> {
    let mut config = ParserConfiguration::default();
    for (d, value) in extract(doc)? {
        write_field(&mut config, d.field, value, MergePolicy::Replace)?;
    }
    Ok(config)
}

/// Lift every known field out of `doc`, in table order.
///
/// Unknown keys are logged and skipped. `null` values count as absent.
pub fn extract(doc: &Value) -> Result<Vec<(&'static FieldDescriptor, FieldValue)>> {
    let map = match doc {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        _ => {
            return Err(ConfigError::InvalidValue {
                key: "<root>".to_string(),
                expected: "a table of settings",
            })
        }
    };

    for key in map.keys().filter(|k| lookup(k).is_none()) {
        match suggest(key) {
            Some(hint) => warn!(
                "Ignoring unknown configuration key '{}' (did you mean '{}'?)",
                key, hint
            ),
            None => warn!("Ignoring unknown configuration key '{}'", key),
        }
    }

    let mut fields = Vec::new();
    for d in &PARSER_FIELDS {
        let Some(raw) = map.get(d.key) else { continue };
        if raw.is_null() {
            continue;
        }
        let value = match d.shape {
            FieldShape::Scalar => FieldValue::Scalar(scalar(d.key, raw)?),
            FieldShape::List { item } => FieldValue::List(list(d.key, item, raw)?),
        };
        fields.push((d, value));
    }

    Ok(fields)
}

fn scalar(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            expected: "a string",
        }),
    }
}

/// Accepts `{item: [..]}`, `{item: ".."}`, a bare array or a single string.
fn list(key: &str, item: &str, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Array(entries) => entries.iter().map(|e| scalar(key, e)).collect(),
        Value::Object(wrapper) => match wrapper.get(item) {
            Some(Value::Object(_)) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                expected: "a list of strings",
            }),
            Some(inner) => list(key, item, inner),
            None if wrapper.is_empty() => Ok(Vec::new()),
            None => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                expected: "a list wrapped under its item key",
            }),
        },
        Value::Null => Ok(Vec::new()),
        other => Ok(vec![scalar(key, other)?]),
    }
}
