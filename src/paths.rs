//! Path normalization and default location assembly.
//!
//! Application config lives under a system prefix (`/etc/<name>`) and,
//! optionally, a per-user prefix (`~/.config/<name>`). Each prefix holds a
//! main file `config.<ext>` and a fragment directory `conf.d`. Candidates are
//! always loaded in this order, lowest precedence first:
//!
//! 1. embedded default file
//! 2. system file
//! 3. system fragment directory
//! 4. user file
//! 5. user fragment directory
//! 6. extra paths given by the caller
//!
//! Paths produced here are kept verbatim (including a leading `~`); expansion
//! happens during discovery.

use std::path::{Component, Path, PathBuf};

/// Root for system-wide application config.
pub const SYSTEM_CONFIG_ROOT: &str = "/etc";

/// Root for per-user application config, relative to the home directory.
pub const USER_CONFIG_ROOT: &str = "~/.config";

/// Name of the fragment directory inside a prefix.
pub const FRAGMENT_DIR: &str = "conf.d";

/// Extension used when none is given.
pub const DEFAULT_EXTENSION: &str = "toml";

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without a leading `~`, `~user` forms, and systems without a known
/// home directory are returned unchanged.
pub fn expand_user(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) if components.as_path().as_os_str().is_empty() => home,
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Make `path` absolute and lexically normalized.
///
/// `~` is expanded, relative paths are joined to the current directory and
/// `.`/`..` components are resolved without touching the filesystem, so
/// symlinks are left as they are.
pub fn normalize(path: &Path) -> PathBuf {
    let expanded = expand_user(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(expanded)
    };
    normalize_path_components(&absolute)
}

/// Resolve `.` and `..` components lexically.
fn normalize_path_components(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => components.push(component),
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            Component::Normal(_) => components.push(component),
        }
    }

    components.iter().collect()
}

/// Explicit overrides and options for application loading.
///
/// Unset locations are derived from the application name and prefixes; set
/// ones are used verbatim.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Extension of the main config file, also used for filtering.
    pub extension: String,
    /// Only load files ending in `.<extension>`.
    pub force_extension: bool,
    /// System prefix, defaults to `/etc/<name>`.
    pub prefix: Option<PathBuf>,
    /// User prefix, defaults to `~/.config/<name>`.
    pub user_prefix: Option<PathBuf>,
    /// Locations that win over the derived ones.
    pub locations: AppPaths,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            force_extension: false,
            prefix: None,
            user_prefix: None,
            locations: AppPaths::default(),
        }
    }
}

impl AppOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn force_extension(mut self, force: bool) -> Self {
        self.force_extension = force;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn user_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.user_prefix = Some(prefix.into());
        self
    }

    /// Embedded default file, loaded before everything else.
    pub fn default_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.locations.default = Some(path.into());
        self
    }

    /// Extra path loaded after all default locations.
    pub fn extra_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.locations.paths.push(path.into());
        self
    }

    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.locations.file_path = Some(path.into());
        self
    }

    pub fn dir_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.locations.dir_path = Some(path.into());
        self
    }

    pub fn user_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.locations.user_file_path = Some(path.into());
        self
    }

    pub fn user_dir_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.locations.user_dir_path = Some(path.into());
        self
    }

    /// Extension to filter discovered files by, if forced.
    pub fn only_extension(&self) -> Option<&str> {
        self.force_extension.then_some(self.extension.as_str())
    }

    fn config_file_name(&self) -> String {
        format!("config.{}", self.extension)
    }
}

/// Candidate locations for one load, in precedence slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppPaths {
    pub default: Option<PathBuf>,
    pub file_path: Option<PathBuf>,
    pub dir_path: Option<PathBuf>,
    pub user_file_path: Option<PathBuf>,
    pub user_dir_path: Option<PathBuf>,
    pub paths: Vec<PathBuf>,
}

impl AppPaths {
    /// System locations for `name`, keeping any explicit override.
    pub fn for_app(name: &str, options: &AppOptions) -> Self {
        let prefix = options
            .prefix
            .clone()
            .unwrap_or_else(|| Path::new(SYSTEM_CONFIG_ROOT).join(name));

        let mut paths = options.locations.clone();
        paths
            .file_path
            .get_or_insert_with(|| prefix.join(options.config_file_name()));
        paths.dir_path.get_or_insert_with(|| prefix.join(FRAGMENT_DIR));
        paths
    }

    /// System then user locations for `name`, keeping any explicit override.
    pub fn for_user_app(name: &str, options: &AppOptions) -> Self {
        let user_prefix = options
            .user_prefix
            .clone()
            .unwrap_or_else(|| Path::new(USER_CONFIG_ROOT).join(name));

        let mut paths = Self::for_app(name, options);
        paths
            .user_file_path
            .get_or_insert_with(|| user_prefix.join(options.config_file_name()));
        paths
            .user_dir_path
            .get_or_insert_with(|| user_prefix.join(FRAGMENT_DIR));
        paths
    }

    /// All configured locations in precedence order, empty ones dropped.
    pub fn candidates(&self) -> Vec<PathBuf> {
        [
            &self.default,
            &self.file_path,
            &self.dir_path,
            &self.user_file_path,
            &self.user_dir_path,
        ]
        .into_iter()
        .flatten()
        .chain(self.paths.iter())
        .filter(|path| !path.as_os_str().is_empty())
        .cloned()
        .collect()
    }
}
