//! Parsing of a single config file.

use crate::error::{Error, Result};
use crate::format::FormatRegistry;
use crate::types::Tree;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Strategy turning one file into a tree.
pub trait Parser {
    /// Parse `path` as `format`, or as the format implied by its extension.
    fn parse(&self, path: &Path, format: Option<&str>) -> Result<Tree>;
}

impl<F> Parser for F
where
    F: Fn(&Path, Option<&str>) -> Result<Tree>,
{
    fn parse(&self, path: &Path, format: Option<&str>) -> Result<Tree> {
        self(path, format)
    }
}

/// The default [`Parser`]: reads files from disk and decodes them with a
/// [`FormatRegistry`].
#[derive(Debug, Clone)]
pub struct FileParser {
    registry: Arc<FormatRegistry>,
}

impl FileParser {
    pub fn new(registry: Arc<FormatRegistry>) -> Self {
        Self { registry }
    }
}

impl Default for FileParser {
    fn default() -> Self {
        Self::new(Arc::new(FormatRegistry::builtin()))
    }
}

impl Parser for FileParser {
    fn parse(&self, path: &Path, format: Option<&str>) -> Result<Tree> {
        let format = match format {
            Some(format) => format,
            None => self.registry.format_from_path(path)?,
        };
        info!(format, path = %path.display(), "Parsing config file");

        let decoder = self
            .registry
            .decoder(format)
            .ok_or_else(|| Error::UnknownFormat {
                format: format.to_string(),
                path: path.to_path_buf(),
            })?;

        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        decoder
            .decode(&mut bytes.as_slice(), format)
            .map_err(|source| Error::Format {
                path: path.to_path_buf(),
                format: format.to_string(),
                source,
            })
    }
}

/// Parse `path` with the built-in formats.
pub fn parse(path: &Path, format: Option<&str>) -> Result<Tree> {
    FileParser::default().parse(path, format)
}
