//! Discovery of config files.
//!
//! A candidate location is either a single file or a fragment directory.
//! Directories expand to their immediate children sorted by path; there is no
//! recursion, and children are not re-checked for access.

use crate::access::can_access;
use crate::paths::normalize;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Strategy turning one candidate location into concrete files.
pub trait Finder {
    /// Files for `path` in load order. Never fails; unusable paths yield
    /// nothing.
    fn find(&self, path: &Path) -> Vec<PathBuf>;
}

impl<F> Finder for F
where
    F: Fn(&Path) -> Vec<PathBuf>,
{
    fn find(&self, path: &Path) -> Vec<PathBuf> {
        self(path)
    }
}

/// The default [`Finder`], backed by [`find`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFinder;

impl Finder for FsFinder {
    fn find(&self, path: &Path) -> Vec<PathBuf> {
        find(path)
    }
}

/// Find config files at `path` in load order.
///
/// The path is expanded and normalized to an absolute path first. Missing or
/// unreadable locations return an empty list. A file returns itself; a
/// directory returns its non-hidden children, files and subdirectories alike,
/// sorted lexicographically by full path.
pub fn find(path: &Path) -> Vec<PathBuf> {
    let path = if path.as_os_str().is_empty() {
        PathBuf::new()
    } else {
        normalize(path)
    };

    if !can_access(&path) {
        return Vec::new();
    }

    if path.is_file() {
        return vec![path];
    }

    let entries = match std::fs::read_dir(&path) {
        Ok(entries) => entries,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Could not list config directory");
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = readable_entries(&path, entries)
        .filter(|entry| !is_hidden(&entry.file_name()))
        .map(|entry| entry.path())
        .collect();
    found.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    debug!(path = %path.display(), count = found.len(), "Found config fragments");
    found
}

/// Entries that could be read; failures are logged and skipped.
fn readable_entries<'a, T>(
    dir: &'a Path,
    entries: impl Iterator<Item = std::io::Result<T>> + 'a,
) -> impl Iterator<Item = T> + 'a {
    entries.filter_map(move |entry| match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            error!(path = %dir.display(), error = %e, "Could not read config directory entry");
            None
        }
    })
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
