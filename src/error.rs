//! Error types for the loading pipeline.
//!
//! Discovery never fails: missing or unreadable candidate locations are logged
//! and skipped. Everything that goes wrong after a file has been selected for
//! parsing surfaces as an [`Error`] and aborts the whole load.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while parsing or rendering configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// The file extension does not map to any registered format.
    #[error("unknown format extension '{extension}' for {}", path.display())]
    UnknownExtension {
        /// Extension without the leading dot (empty when the file has none).
        extension: String,
        /// File whose format could not be resolved.
        path: PathBuf,
    },

    /// The format name is not registered.
    #[error("unknown format '{format}' for file {}", path.display())]
    UnknownFormat {
        /// Requested format name.
        format: String,
        /// File being parsed.
        path: PathBuf,
    },

    /// The file could not be opened or read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        /// File being parsed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The decoder rejected the file contents.
    #[error("failed to parse {format} config file {}: {source}", path.display())]
    Format {
        /// File being parsed.
        path: PathBuf,
        /// Format used to decode the file.
        format: String,
        /// Decoder-specific error.
        source: DecodeError,
    },

    /// A merged tree could not be encoded for output.
    #[error("failed to render config as {format}: {message}")]
    Render {
        /// Output format name.
        format: String,
        /// Encoder message.
        message: String,
    },
}

impl Error {
    /// Whether this error belongs to the unknown-format family.
    pub fn is_unknown_format(&self) -> bool {
        matches!(
            self,
            Error::UnknownExtension { .. } | Error::UnknownFormat { .. }
        )
    }
}

/// Error produced by a [`Decoder`](crate::format::Decoder).
///
/// Wraps whatever the backing format library reports so that custom decoders
/// can return their own error types.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct DecodeError(Box<dyn std::error::Error + Send + Sync>);

impl DecodeError {
    /// Wrap an error or message.
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err)
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err)
    }
}

impl From<toml::de::Error> for DecodeError {
    fn from(err: toml::de::Error) -> Self {
        Self::new(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extension_message() {
        let err = Error::UnknownExtension {
            extension: "ext".to_string(),
            path: PathBuf::from("/tmp/file.ext"),
        };
        assert_eq!(
            err.to_string(),
            "unknown format extension 'ext' for /tmp/file.ext"
        );
        assert!(err.is_unknown_format());
    }

    #[test]
    fn test_format_error_wraps_decoder_message() {
        let err = Error::Format {
            path: PathBuf::from("/etc/app/config.json"),
            format: "json".to_string(),
            source: DecodeError::new("expected a mapping"),
        };
        let msg = err.to_string();
        assert!(msg.contains("json"));
        assert!(msg.contains("expected a mapping"));
        assert!(!err.is_unknown_format());
    }

    #[test]
    fn test_io_error_is_not_unknown_format() {
        let err = Error::Io {
            path: PathBuf::from("/nowhere.toml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("failed to read config file /nowhere.toml"));
        assert!(!err.is_unknown_format());
    }
}
