//! Config file formats.
//!
//! A format is identified by a short name (`toml`, `json`, ...). The
//! [`FormatRegistry`] maps file extensions to format names and format names to
//! [`Decoder`]s. Built-in decoders cover TOML, JSON and INI; YAML and HCL are
//! available behind the `yaml` and `hcl` cargo features.

pub mod ini;
pub mod json;
pub mod registry;
pub mod render;
pub mod toml;

#[cfg(feature = "hcl")]
pub mod hcl;
#[cfg(feature = "yaml")]
pub mod yaml;

use crate::error::DecodeError;
use crate::types::Tree;
use std::io::Read;

pub use registry::{FormatRegistry, FormatRegistryBuilder};

pub const JSON: &str = "json";
pub const TOML: &str = "toml";
pub const INI: &str = "ini";
pub const YAML: &str = "yaml";
pub const HCL: &str = "hcl";

/// Decodes one UTF-8 text stream into a configuration tree.
pub trait Decoder: Send + Sync {
    /// Decode `reader` as `format`. The top level must be a mapping.
    fn decode(&self, reader: &mut dyn Read, format: &str) -> Result<Tree, DecodeError>;
}

impl<F> Decoder for F
where
    F: Fn(&mut dyn Read, &str) -> Result<Tree, DecodeError> + Send + Sync,
{
    fn decode(&self, reader: &mut dyn Read, format: &str) -> Result<Tree, DecodeError> {
        self(reader, format)
    }
}

/// Read the whole stream as UTF-8 text.
pub(crate) fn read_text(reader: &mut dyn Read) -> Result<String, DecodeError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// Error for a document whose top level is not a mapping.
pub(crate) fn not_a_mapping(format: &str) -> DecodeError {
    DecodeError::new(format!("{format} document must be a mapping at the top level"))
}
