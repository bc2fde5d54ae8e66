//! JSON decoder.

use super::{Decoder, not_a_mapping};
use crate::error::DecodeError;
use crate::types::{Tree, Value};
use std::io::Read;

/// Decodes JSON objects, keeping key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode(&self, reader: &mut dyn Read, format: &str) -> Result<Tree, DecodeError> {
        match serde_json::from_reader::<_, Value>(reader)? {
            Value::Object(map) => Ok(map),
            _ => Err(not_a_mapping(format)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::keys;

    fn decode(text: &str) -> Result<Tree, DecodeError> {
        JsonDecoder.decode(&mut text.as_bytes(), "json")
    }

    #[test]
    fn test_decode_object() {
        let tree = decode(
            r#"{"section": {"string": "json", "integer": 3, "null": null, "unicode": "💩"}}"#,
        )
        .unwrap();
        assert_eq!(tree["section"]["integer"], 3);
        assert_eq!(tree["section"]["null"], Value::Null);
        assert_eq!(tree["section"]["unicode"], "💩");
    }

    #[test]
    fn test_key_order_follows_document() {
        let tree = decode(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        assert_eq!(keys(&tree), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_invalid_json() {
        assert!(decode(r#"{"invalid"}"#).is_err());
    }

    #[test]
    fn test_top_level_array_rejected() {
        let err = decode("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }
}
