//! Configuration management.
//!
//! Loader settings come from defaults, an optional TOML config file, and
//! `CASEKIT_*` environment variables, applied in that order.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Folder scan pattern used when the caller passes none: every file at any depth.
pub const DEFAULT_PATTERN: &str = "**/*";

/// Main configuration for casekit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Glob pattern for folder scans when none is given.
    pub default_pattern: String,
    /// CSV reader settings.
    pub csv: CsvSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// CSV reader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvSettings {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Whether to trim whitespace around headers and fields.
    pub trim: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Output format: "pretty" or "json".
    pub format: Option<String>,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
    /// Filter directive (`tracing_subscriber::EnvFilter` syntax).
    pub filter: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Default folder scan pattern.
    pub default_pattern: Option<String>,
    /// CSV section.
    pub csv: Option<ConfigFileCsv>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// CSV section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileCsv {
    /// Delimiter, a single ASCII character or `tab`.
    pub delimiter: Option<String>,
    /// Trim whitespace.
    pub trim: Option<bool>,
}

/// Logging section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileLogging {
    /// Output format.
    pub format: Option<String>,
    /// Log file path.
    pub file: Option<String>,
    /// Filter directive.
    pub filter: Option<String>,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            default_pattern: DEFAULT_PATTERN.to_string(),
            csv: CsvSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl LoaderConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value
    /// in it is invalid.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let mut config = Self::from_config_file(file)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/casekit/` on macOS)
    /// 2. XDG config dir (`~/.config/casekit/`)
    ///
    /// Falls back to defaults when no readable config file is found.
    /// Environment overrides are applied in every case.
    #[must_use]
    pub fn load_default() -> Self {
        let candidates = directories::BaseDirs::new()
            .map(|dirs| {
                vec![
                    dirs.config_dir().join("casekit").join("config.toml"),
                    dirs.home_dir()
                        .join(".config")
                        .join("casekit")
                        .join("config.toml"),
                ]
            })
            .unwrap_or_default();

        for candidate in candidates.iter().filter(|p| p.is_file()) {
            match Self::load_from_file(candidate) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %candidate.display(), error = %e, "Ignoring unreadable config file");
                },
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Applies `CASEKIT_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Recognized keys: `CASEKIT_PATTERN`, `CASEKIT_CSV_DELIMITER`,
    /// `CASEKIT_CSV_TRIM`, `CASEKIT_LOG_FORMAT`, `CASEKIT_LOG_FILE`.
    /// Invalid values are logged and ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(pattern) = lookup("CASEKIT_PATTERN").filter(|p| !p.is_empty()) {
            self.default_pattern = pattern;
        }
        if let Some(raw) = lookup("CASEKIT_CSV_DELIMITER") {
            match parse_delimiter(&raw) {
                Ok(delimiter) => self.csv.delimiter = delimiter,
                Err(e) => tracing::warn!(error = %e, "Ignoring CASEKIT_CSV_DELIMITER"),
            }
        }
        if let Some(raw) = lookup("CASEKIT_CSV_TRIM") {
            match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.csv.trim = true,
                "0" | "false" | "no" | "off" => self.csv.trim = false,
                _ => tracing::warn!(value = %raw, "Ignoring CASEKIT_CSV_TRIM"),
            }
        }
        if let Some(format) = lookup("CASEKIT_LOG_FORMAT") {
            self.logging.format = Some(format);
        }
        if let Some(file) = lookup("CASEKIT_LOG_FILE").filter(|f| !f.is_empty()) {
            self.logging.file = Some(PathBuf::from(file));
        }
    }

    /// Converts a `ConfigFile` to `LoaderConfig`.
    fn from_config_file(file: ConfigFile) -> crate::Result<Self> {
        let mut config = Self::default();

        if let Some(pattern) = file.default_pattern {
            config.default_pattern = pattern;
        }
        if let Some(csv) = file.csv {
            if let Some(raw) = csv.delimiter {
                config.csv.delimiter = parse_delimiter(&raw)?;
            }
            if let Some(trim) = csv.trim {
                config.csv.trim = trim;
            }
        }
        if let Some(logging) = file.logging {
            config.logging.format = logging.format;
            config.logging.file = logging.file.map(PathBuf::from);
            config.logging.filter = logging.filter;
        }

        Ok(config)
    }

    /// Sets the default folder scan pattern.
    #[must_use]
    pub fn with_default_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.default_pattern = pattern.into();
        self
    }

    /// Sets the CSV settings.
    #[must_use]
    pub fn with_csv(mut self, csv: CsvSettings) -> Self {
        self.csv = csv;
        self
    }
}

/// Parses a CSV delimiter: one ASCII character, or `tab` / `\t`.
fn parse_delimiter(raw: &str) -> crate::Result<u8> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => Err(crate::Error::InvalidInput(format!(
            "CSV delimiter must be a single ASCII character, got {s:?}"
        ))),
    }
}
