//! YAML decoder (`yaml` feature).
//!
//! Scalar mapping keys are stringified, tags are dropped and an empty
//! document is an empty mapping.

use super::{Decoder, not_a_mapping, read_text};
use crate::error::DecodeError;
use crate::types::{Tree, Value};
use serde_yaml::Value as Yaml;
use std::io::Read;

/// Decodes YAML documents, keeping key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDecoder;

impl Decoder for YamlDecoder {
    fn decode(&self, reader: &mut dyn Read, format: &str) -> Result<Tree, DecodeError> {
        let text = read_text(reader)?;
        if text.trim().is_empty() {
            return Ok(Tree::new());
        }
        let document: Yaml = serde_yaml::from_str(&text).map_err(DecodeError::new)?;
        match convert(document)? {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Tree::new()),
            _ => Err(not_a_mapping(format)),
        }
    }
}

fn convert(value: Yaml) -> Result<Value, DecodeError> {
    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => convert_number(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(convert)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut tree = Tree::new();
            for (key, value) in mapping {
                tree.insert(convert_key(key)?, convert(value)?);
            }
            Value::Object(tree)
        }
        Yaml::Tagged(tagged) => convert(tagged.value)?,
    })
}

fn convert_number(n: &serde_yaml::Number) -> Result<Value, DecodeError> {
    if let Some(i) = n.as_i64() {
        Ok(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::from(u))
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| DecodeError::new(format!("unsupported number {n}")))
    }
}

fn convert_key(key: Yaml) -> Result<String, DecodeError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Tagged(tagged) => convert_key(tagged.value),
        _ => Err(DecodeError::new("mapping keys must be scalars")),
    }
}
