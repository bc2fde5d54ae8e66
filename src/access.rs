//! Permission checks for candidate config locations.
//!
//! A location that cannot be used is never an error: it is logged and left
//! out of discovery.

use std::path::Path;
use tracing::{error, info, warn};

/// Whether a config file or directory can be read.
///
/// - empty path: `false`
/// - missing path: `false`, logged at info level
/// - unreadable path or a directory that cannot be listed: `false`, logged as
///   an error
/// - a regular file with exec permission: `true`, with a warning
pub fn can_access(path: &Path) -> bool {
    if path.as_os_str().is_empty() {
        return false;
    }

    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => {
            info!(path = %path.display(), "Could not find config path");
            return false;
        }
    };

    if !is_readable(path, metadata.is_dir()) {
        error!(path = %path.display(), "Could not read config path");
        return false;
    }

    if metadata.is_dir() && !is_executable(path) {
        error!(path = %path.display(), "Could not list config directory");
        return false;
    }

    if metadata.is_file() && is_executable(path) {
        warn!(path = %path.display(), "Config file has exec permissions");
    }

    true
}

#[cfg(unix)]
fn is_readable(path: &Path, _is_dir: bool) -> bool {
    use nix::unistd::{AccessFlags, access};

    access(path, AccessFlags::R_OK).is_ok()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};

    access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn is_readable(path: &Path, is_dir: bool) -> bool {
    if is_dir {
        std::fs::read_dir(path).is_ok()
    } else {
        std::fs::File::open(path).is_ok()
    }
}

// No exec bit to inspect; directories are listable when readable.
#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_dir()
}
