//! Formats command handler.

use anyhow::Result;
use std::io::Write;

use casekit::{Format, Loader};

/// Lists every registered extension and whether it loads as a batch file,
/// a folder entry, or both.
pub fn cmd_formats(loader: &Loader) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{:<10} {:<8} {:<8} {}", "EXTENSION", "BATCH", "SINGLE", "PARSER")?;
    for extension in loader.single_registry().extensions() {
        let batch = loader.batch_registry().contains(extension);
        let parser = loader
            .single_registry()
            .get(extension)
            .map_or("-", |p| p.name());
        let mime = Format::from_extension(extension).map_or("", |f| f.mime_type());
        writeln!(
            out,
            "{:<10} {:<8} {:<8} {parser} {mime}",
            extension,
            if batch { "yes" } else { "no" },
            "yes",
        )?;
    }

    Ok(())
}
