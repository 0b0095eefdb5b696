//! Runtime configuration resolved from environment overrides.
//!
//! # Responsibility
//! - Resolve database path and log settings.
//! - Validate log level and directory once, for every logging caller.
//!
//! # Invariants
//! - Unset or blank environment values fall back to temp-dir defaults.
//! - A `LogSettings` value always holds a normalized level and an absolute dir.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "NOTES_DB_PATH";
pub const LOG_DIR_ENV: &str = "NOTES_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "NOTES_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "notes.db";
const DEFAULT_LOG_DIR_NAME: &str = "notes-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyLogDir,
    RelativeLogDir(PathBuf),
    UnsupportedLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLogDir => write!(f, "log directory cannot be empty"),
            Self::RelativeLogDir(path) => write!(
                f,
                "log directory must be an absolute path, got `{}`",
                path.display()
            ),
            Self::UnsupportedLogLevel(raw) => write!(
                f,
                "unsupported log level `{raw}`; expected trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Validated logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// One of `trace|debug|info|warn|error`.
    pub level: &'static str,
    /// Absolute directory for rolling log files.
    pub dir: PathBuf,
}

impl LogSettings {
    /// Validates raw values handed over by a host (e.g. the mobile shell).
    pub fn parse(level: &str, dir: &str) -> Result<Self, ConfigError> {
        let dir = dir.trim();
        if dir.is_empty() {
            return Err(ConfigError::EmptyLogDir);
        }
        Ok(Self {
            level: parse_log_level(level)?,
            dir: absolute_dir(PathBuf::from(dir))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log: LogSettings,
}

impl AppConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let db_path = value(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let dir = value(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));

        let level = match value(LOG_LEVEL_ENV) {
            Some(raw) => parse_log_level(&raw)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log: LogSettings {
                level,
                dir: absolute_dir(dir)?,
            },
        })
    }
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Case-insensitive; `warning` is accepted as `warn`.
pub fn parse_log_level(raw: &str) -> Result<&'static str, ConfigError> {
    let raw = raw.trim();
    match raw.to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(ConfigError::UnsupportedLogLevel(raw.to_string())),
    }
}

fn absolute_dir(dir: PathBuf) -> Result<PathBuf, ConfigError> {
    if dir.is_absolute() {
        Ok(dir)
    } else {
        Err(ConfigError::RelativeLogDir(dir))
    }
}
