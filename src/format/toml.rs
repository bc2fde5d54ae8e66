//! TOML decoder.
//!
//! Datetimes have no counterpart in the tree and are kept as their RFC 3339
//! text.

use super::{Decoder, read_text};
use crate::error::DecodeError;
use crate::types::{Tree, Value};
use std::io::Read;

/// Decodes TOML documents, keeping key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlDecoder;

impl Decoder for TomlDecoder {
    fn decode(&self, reader: &mut dyn Read, _format: &str) -> Result<Tree, DecodeError> {
        let text = read_text(reader)?;
        let table: ::toml::Table = ::toml::from_str(&text)?;
        convert_table(table)
    }
}

fn convert_table(table: ::toml::Table) -> Result<Tree, DecodeError> {
    table
        .into_iter()
        .map(|(key, value)| Ok((key, convert(value)?)))
        .collect()
}

fn convert(value: ::toml::Value) -> Result<Value, DecodeError> {
    use ::toml::Value as Toml;

    Ok(match value {
        Toml::String(s) => Value::String(s),
        Toml::Integer(i) => Value::from(i),
        Toml::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| DecodeError::new(format!("unsupported float value {f}")))?,
        Toml::Boolean(b) => Value::Bool(b),
        Toml::Datetime(dt) => Value::String(dt.to_string()),
        Toml::Array(items) => Value::Array(
            items
                .into_iter()
                .map(convert)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Toml::Table(table) => Value::Object(convert_table(table)?),
    })
}
