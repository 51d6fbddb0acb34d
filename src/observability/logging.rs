//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "CASEKIT_LOG";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(crate::Error::InvalidInput(format!("Unknown log format: {s}"))),
        }
    }
}

/// Logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
    /// Event filter.
    pub filter: EnvFilter,
}

impl LoggingConfig {
    /// Builds logging configuration from settings with env overrides.
    ///
    /// Filter precedence: `CASEKIT_LOG`, `RUST_LOG`, the settings' filter,
    /// then `debug` when verbose or `warn` otherwise.
    #[must_use]
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        let format = settings
            .format
            .as_deref()
            .and_then(|raw| {
                raw.parse::<LogFormat>()
                    .map_err(|e| tracing::warn!(error = %e, "Falling back to pretty logs"))
                    .ok()
            })
            .unwrap_or_default();

        let fallback = settings
            .filter
            .clone()
            .unwrap_or_else(|| default_directive(verbose).to_string());
        let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(fallback));

        Self {
            format,
            file: settings.file.clone(),
            filter,
        }
    }
}

const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "casekit=debug" } else { "casekit=warn" }
}
