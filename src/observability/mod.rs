//! Observability: structured logging through `tracing`.
//!
//! Library code only emits events. Binaries call [`init`] once to install a
//! subscriber writing to stderr or a log file.

mod logging;

pub use logging::{LOG_FILTER_ENV, LogFormat, LoggingConfig};

use crate::config::LoggingSettings;
use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Initializes logging from config settings with env overrides.
///
/// # Errors
///
/// Returns an error if logging has already been initialized or the log file
/// cannot be opened.
pub fn init_from_settings(settings: &LoggingSettings, verbose: bool) -> Result<()> {
    init(LoggingConfig::from_settings(settings, verbose))
}

/// Installs the global `tracing` subscriber.
///
/// Events go to the configured log file, or to stderr so that command output
/// on stdout stays machine-readable. ANSI colors are only used on stderr.
///
/// # Errors
///
/// Returns an error if logging has already been initialized or the log file
/// cannot be opened.
pub fn init(config: LoggingConfig) -> Result<()> {
    if LOGGING_INIT.get().is_some() {
        return Err(logging_error("logging already initialized"));
    }

    let (writer, ansi) = match &config.file {
        Some(path) => (BoxMakeWriter::new(Arc::new(open_log_file(path)?)), false),
        None => (BoxMakeWriter::new(io::stderr), true),
    };
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true);
    let registry = tracing_subscriber::registry().with(config.filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(layer.json().with_current_span(true))
            .try_init(),
        LogFormat::Pretty => registry.with(layer.with_ansi(ansi)).try_init(),
    };
    installed.map_err(logging_error)?;

    LOGGING_INIT
        .set(())
        .map_err(|()| logging_error("failed to mark logging initialized"))
}

/// Opens a log file for appending, creating parent directories.
///
/// `&File` is a writer, so the shared handle serves every event without a lock.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
            operation: "create_log_dir".to_string(),
            cause: format!("{}: {e}", parent.display()),
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::OperationFailed {
            operation: "open_log_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })
}

fn logging_error(cause: impl ToString) -> Error {
    Error::OperationFailed {
        operation: "logging_init".to_string(),
        cause: cause.to_string(),
    }
}
