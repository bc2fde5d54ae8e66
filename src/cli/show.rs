//! Show subcommand for confight CLI
//!
//! Loads the system and user configuration of an application and prints the
//! merged result.

use crate::format::render::{RenderFormat, render};
use crate::loader::Loader;
use crate::paths::{AppOptions, DEFAULT_EXTENSION};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Name of the application
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Base path for system locations (default: /etc/NAME)
    #[arg(long, value_name = "DIR")]
    pub prefix: Option<PathBuf>,

    /// Base path for user locations (default: ~/.config/NAME)
    #[arg(long, value_name = "DIR")]
    pub user_prefix: Option<PathBuf>,

    /// Extension of the main config files
    #[arg(long, default_value = DEFAULT_EXTENSION, value_name = "EXT")]
    pub extension: String,

    /// Only read files ending in the extension
    #[arg(long)]
    pub force_extension: bool,

    /// Extra file or directory to read after the standard locations (repeatable)
    #[arg(long = "path", value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format: toml (default) or json
    #[arg(short, long, default_value = "toml", value_name = "FORMAT")]
    pub format: RenderFormat,
}

impl ShowArgs {
    /// Loader options described by the flags.
    pub fn app_options(&self) -> AppOptions {
        let mut options = AppOptions::new()
            .extension(self.extension.as_str())
            .force_extension(self.force_extension);
        if let Some(prefix) = &self.prefix {
            options = options.prefix(prefix);
        }
        if let Some(prefix) = &self.user_prefix {
            options = options.user_prefix(prefix);
        }
        for path in &self.paths {
            options = options.extra_path(path);
        }
        options
    }
}

/// Run the show subcommand, writing the rendered configuration to `out`.
pub fn run(args: &ShowArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let config = Loader::new().load_user_app(&args.name, &args.app_options())?;
    let rendered = render(&config, args.format)?;
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}
