//! confight: layered configuration loading
//!
//! Reads an application's configuration from conventional system and user
//! locations, decodes each file according to its format and deep merges the
//! results, later sources overriding earlier ones.
//!
//! ```no_run
//! use confight::{AppOptions, load_user_app};
//!
//! let config = load_user_app("myapp", &AppOptions::new())?;
//! if let Some(port) = config.get("server").and_then(|s| s.get("port")) {
//!     println!("port = {port}");
//! }
//! # Ok::<(), confight::Error>(())
//! ```

pub mod access;
pub mod cli;
pub mod error;
pub mod finder;
pub mod format;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod parser;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use finder::{Finder, FsFinder, find};
pub use format::{Decoder, FormatRegistry};
pub use loader::{Loader, load, load_app, load_paths, load_user_app};
pub use merge::{DeepMerger, Merger, merge};
pub use parser::{FileParser, Parser, parse};
pub use paths::{AppOptions, AppPaths};
pub use types::{Tree, Value};
