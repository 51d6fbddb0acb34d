//! Load command handler.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;
use std::path::PathBuf;

use casekit::table::read_csv;
use casekit::{CaseView, Casebase, IndexedFrame, Loader, load_dataframe};

/// Output encoding for a loaded casebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Options for the load command.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// File or directory to load.
    pub path: PathBuf,
    /// Folder scan pattern.
    pub pattern: Option<String>,
    /// Output encoding.
    pub format: OutputFormat,
    /// Print case names only.
    pub names_only: bool,
    /// Read a CSV file through the table view instead of the batch parser.
    pub as_table: bool,
    /// Column whose values label the rows of a table.
    pub index: Option<String>,
}

/// Executes the load command.
pub fn cmd_load(loader: &Loader, options: &LoadOptions) -> Result<()> {
    let casebase = if options.as_table {
        let frame = read_csv(&options.path, &loader.config().csv)
            .with_context(|| format!("reading table {}", options.path.display()))?;
        match &options.index {
            Some(index) => {
                let indexed = IndexedFrame::new(frame, index.as_str())
                    .with_context(|| format!("using column {index} as the row index"))?;
                Casebase::snapshot(&load_dataframe(&indexed))
            },
            None => Casebase::snapshot(&load_dataframe(&frame)),
        }
    } else {
        loader
            .load_path(&options.path, options.pattern.as_deref())
            .with_context(|| format!("loading {}", options.path.display()))?
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if options.names_only {
        for name in casebase.case_names() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    match options.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &casebase)?;
            writeln!(out)?;
        },
        OutputFormat::Yaml => serde_yaml_ng::to_writer(&mut out, &casebase)?,
    }

    Ok(())
}
