//! HCL decoder (`hcl` feature).
//!
//! Attributes become keys and blocks become nested mappings keyed by block
//! type and labels, the same shape `hcl-rs` produces for JSON.

use super::{Decoder, not_a_mapping, read_text};
use crate::error::DecodeError;
use crate::types::{Tree, Value};
use std::io::Read;

/// Decodes HCL bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct HclDecoder;

impl Decoder for HclDecoder {
    fn decode(&self, reader: &mut dyn Read, format: &str) -> Result<Tree, DecodeError> {
        let text = read_text(reader)?;
        let value: Value = ::hcl::from_str(&text).map_err(DecodeError::new)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(not_a_mapping(format)),
        }
    }
}
