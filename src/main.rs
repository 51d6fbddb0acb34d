//! Binary entry point for casekit.
//!
//! Loads a casebase from a file or folder and prints it.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use casekit::config::LoaderConfig;
use casekit::{Loader, observability};
use commands::{LoadOptions, OutputFormat, cmd_formats, cmd_load};

/// Casekit - casebase loading for case-based reasoning.
#[derive(Parser)]
#[command(name = "casekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "CASEKIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Load a casebase from a file or directory and print it.
    Load {
        /// File or directory to load.
        path: PathBuf,

        /// Glob pattern for directory scans (relative to the directory).
        #[arg(short, long)]
        pattern: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Print case names only, one per line.
        #[arg(long)]
        names_only: bool,

        /// Read a CSV file as a table and print it through the table view.
        #[arg(long)]
        as_table: bool,

        /// Column to label table rows with (requires --as-table).
        #[arg(long, requires = "as_table")]
        index: Option<String>,
    },

    /// List supported file extensions.
    Formats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Loads configuration from an explicit path or the default locations.
fn load_config(path: Option<&std::path::Path>) -> casekit::Result<LoaderConfig> {
    path.map_or_else(
        || Ok(LoaderConfig::load_default()),
        LoaderConfig::load_from_file,
    )
}

/// Runs the selected command.
fn run_command(command: Commands, config: LoaderConfig) -> anyhow::Result<()> {
    let loader = Loader::with_config(config);

    match command {
        Commands::Load {
            path,
            pattern,
            format,
            names_only,
            as_table,
            index,
        } => cmd_load(
            &loader,
            &LoadOptions {
                path,
                pattern,
                format,
                names_only,
                as_table,
                index,
            },
        ),
        Commands::Formats => cmd_formats(&loader),
    }
}
