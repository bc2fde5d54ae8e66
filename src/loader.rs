//! The loading pipeline: assemble locations, discover files, parse, merge.
//!
//! Every stage is pluggable. The defaults read the filesystem
//! ([`FsFinder`]), decode with the built-in formats ([`FileParser`]) and deep
//! merge ([`DeepMerger`]).
//!
//! Parsing is sequential and any failure aborts the load; there are no partial
//! results. Missing locations, on the other hand, are skipped during
//! discovery.

use crate::error::Result;
use crate::finder::{Finder, FsFinder};
use crate::format::FormatRegistry;
use crate::merge::{DeepMerger, Merger};
use crate::parser::{FileParser, Parser};
use crate::paths::{AppOptions, AppPaths};
use crate::types::Tree;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Configurable loading pipeline.
pub struct Loader {
    finder: Box<dyn Finder>,
    parser: Box<dyn Parser>,
    merger: Box<dyn Merger>,
    format: Option<String>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl Loader {
    /// Pipeline with the built-in formats.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(FormatRegistry::builtin()))
    }

    /// Pipeline decoding with `registry`.
    pub fn with_registry(registry: Arc<FormatRegistry>) -> Self {
        debug!(formats = ?registry.formats().collect::<Vec<_>>(), "Registered config formats");
        Self {
            finder: Box::new(FsFinder),
            parser: Box::new(FileParser::new(registry)),
            merger: Box::new(DeepMerger),
            format: None,
        }
    }

    /// Replace the discovery strategy.
    pub fn finder(mut self, finder: impl Finder + 'static) -> Self {
        self.finder = Box::new(finder);
        self
    }

    /// Replace the parsing strategy.
    pub fn parser(mut self, parser: impl Parser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Replace the merge strategy.
    pub fn merger(mut self, merger: impl Merger + 'static) -> Self {
        self.merger = Box::new(merger);
        self
    }

    /// Parse every file as `format` instead of guessing from extensions.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Parse `paths` in order and merge the results.
    pub fn load<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Tree> {
        let trees = paths
            .iter()
            .map(|path| self.parser.parse(path.as_ref(), self.format.as_deref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.merger.merge(trees))
    }

    /// Expand `paths` into files, then [`load`](Self::load) them.
    ///
    /// With `only_extension`, files not ending in `.<extension>` are skipped.
    pub fn load_paths<P: AsRef<Path>>(
        &self,
        paths: &[P],
        only_extension: Option<&str>,
    ) -> Result<Tree> {
        let mut files: Vec<PathBuf> = paths
            .iter()
            .flat_map(|path| self.finder.find(path.as_ref()))
            .collect();

        if let Some(extension) = only_extension {
            let suffix = format!(".{extension}");
            files.retain(|file| file.to_string_lossy().ends_with(&suffix));
        }

        debug!(files = ?files, "Discovered config files");
        self.load(&files)
    }

    /// Load every location of `app_paths` in precedence order.
    pub fn load_app_paths(
        &self,
        app_paths: &AppPaths,
        only_extension: Option<&str>,
    ) -> Result<Tree> {
        self.load_paths(&app_paths.candidates(), only_extension)
    }

    /// Load system config for application `name`.
    ///
    /// Reads `<prefix>/config.<ext>` then `<prefix>/conf.d/*`, where `prefix`
    /// defaults to `/etc/<name>`, followed by any extra paths in `options`.
    pub fn load_app(&self, name: &str, options: &AppOptions) -> Result<Tree> {
        let app_paths = AppPaths::for_app(name, options);
        self.load_app_paths(&app_paths, options.only_extension())
    }

    /// Load system then user config for application `name`.
    ///
    /// User locations default to `~/.config/<name>/config.<ext>` and
    /// `~/.config/<name>/conf.d/*` and take precedence over system ones.
    pub fn load_user_app(&self, name: &str, options: &AppOptions) -> Result<Tree> {
        let app_paths = AppPaths::for_user_app(name, options);
        self.load_app_paths(&app_paths, options.only_extension())
    }
}

/// Parse and merge `paths` with the default pipeline.
pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Tree> {
    Loader::new().load(paths)
}

/// Discover, parse and merge `paths` with the default pipeline.
pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Tree> {
    Loader::new().load_paths(paths, None)
}

/// [`Loader::load_app`] with the default pipeline.
pub fn load_app(name: &str, options: &AppOptions) -> Result<Tree> {
    Loader::new().load_app(name, options)
}

/// [`Loader::load_user_app`] with the default pipeline.
pub fn load_user_app(name: &str, options: &AppOptions) -> Result<Tree> {
    Loader::new().load_user_app(name, options)
}
