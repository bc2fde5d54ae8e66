//! Extension and decoder lookup.
//!
//! The registry is built once and is read-only afterwards; share it through
//! an `Arc`.

use super::{Decoder, INI, JSON, TOML};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Registered formats, their extensions and their decoders.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    extensions: IndexMap<String, String>,
    decoders: IndexMap<String, Arc<dyn Decoder>>,
}

impl FormatRegistry {
    /// Start an empty registry.
    pub fn builder() -> FormatRegistryBuilder {
        FormatRegistryBuilder::default()
    }

    /// Registry with every decoder compiled into this build.
    ///
    /// Always: `json` (`js`, `json`), `toml` (`toml`), `ini` (`ini`, `cfg`).
    /// With the `yaml` feature: `yaml` (`yml`, `yaml`). With the `hcl`
    /// feature: `hcl` (`hcl`).
    pub fn builtin() -> Self {
        Self::builder().with_builtin().build()
    }

    /// Whether `format` has a decoder.
    pub fn contains(&self, format: &str) -> bool {
        self.decoders.contains_key(format)
    }

    /// Registered format names in registration order.
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.decoders.keys().map(String::as_str)
    }

    /// `(extension, format)` pairs in registration order.
    pub fn extensions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.extensions
            .iter()
            .map(|(ext, format)| (ext.as_str(), format.as_str()))
    }

    /// Decoder for `format`.
    pub fn decoder(&self, format: &str) -> Option<&dyn Decoder> {
        self.decoders.get(format).map(|decoder| decoder.as_ref())
    }

    /// Resolve the format of `path` from its extension.
    ///
    /// The extension is the text after the last dot of the file name,
    /// compared case-sensitively; a name without a dot has an empty
    /// extension.
    pub fn format_from_path(&self, path: &Path) -> Result<&str> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.extensions
            .get(&extension)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownExtension {
                extension,
                path: path.to_path_buf(),
            })
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.decoders.keys().collect::<Vec<_>>())
            .field("extensions", &self.extensions)
            .finish()
    }
}

/// Builder for a [`FormatRegistry`].
#[derive(Default)]
pub struct FormatRegistryBuilder {
    registry: FormatRegistry,
}

impl FormatRegistryBuilder {
    /// Register `format` with its extension aliases and decoder.
    ///
    /// Registering a name or extension again replaces the earlier entry.
    pub fn format(
        mut self,
        format: &str,
        extensions: &[&str],
        decoder: impl Decoder + 'static,
    ) -> Self {
        for ext in extensions {
            self.registry
                .extensions
                .insert((*ext).to_string(), format.to_string());
        }
        self.registry
            .decoders
            .insert(format.to_string(), Arc::new(decoder));
        self
    }

    /// Register every built-in decoder enabled in this build.
    pub fn with_builtin(self) -> Self {
        let builder = self
            .format(JSON, &["js", "json"], super::json::JsonDecoder)
            .format(TOML, &["toml"], super::toml::TomlDecoder)
            .format(INI, &["ini", "cfg"], super::ini::IniDecoder);

        #[cfg(feature = "yaml")]
        let builder = builder.format(super::YAML, &["yml", "yaml"], super::yaml::YamlDecoder);
        #[cfg(feature = "hcl")]
        let builder = builder.format(super::HCL, &["hcl"], super::hcl::HclDecoder);

        builder
    }

    pub fn build(self) -> FormatRegistry {
        self.registry
    }
}
