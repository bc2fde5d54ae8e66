//! Formats subcommand for confight CLI
//!
//! Lists the config formats compiled into this build and the file
//! extensions that select them.

use crate::format::FormatRegistry;
use std::io::Write;

/// Run the formats subcommand, one `format: ext, ext` line per format.
pub fn run(registry: &FormatRegistry, out: &mut dyn Write) -> anyhow::Result<()> {
    for format in registry.formats() {
        let extensions: Vec<&str> = registry
            .extensions()
            .filter(|(_, target)| *target == format)
            .map(|(ext, _)| ext)
            .collect();
        writeln!(out, "{format}: {}", extensions.join(", "))?;
    }
    out.flush()?;
    Ok(())
}
