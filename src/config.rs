/// Runner configuration
///
/// Loaded from a TOML file (default `./icemon.toml`, overridable through the
/// `ICEMON_CONFIG` environment variable, which may itself come from `.env`).
/// Every section and key is optional. Ice thresholds are deliberately absent:
/// they are fixed in `alert::thresholds`.

use crate::logging::LogLevel;
use crate::model::IceDataError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "./icemon.toml";
pub const CONFIG_ENV_VAR: &str = "ICEMON_CONFIG";

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "debug", "info", "warn" or "error".
    pub level: String,
    /// Append-only log file, in addition to the console.
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
            timestamps: false,
        }
    }
}

impl LoggingConfig {
    pub fn min_level(&self) -> Result<LogLevel, IceDataError> {
        self.level
            .parse()
            .map_err(|e: String| IceDataError::Config(format!("logging.level: {}", e)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Hourly series file used when none is given on the command line.
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    /// Reduce the event list to the worst event per hour boundary.
    pub worst_per_transition: bool,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parses configuration text.
pub fn parse_config(text: &str) -> Result<Config, IceDataError> {
    let config: Config = toml::from_str(text).map_err(|e| IceDataError::Config(e.to_string()))?;
    config.logging.min_level()?;
    Ok(config)
}

/// Loads configuration from `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config, IceDataError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}

/// Resolves the config path from the environment (after loading `.env`)
/// and loads it.
pub fn load_from_env() -> Result<(PathBuf, Config), IceDataError> {
    dotenv::dotenv().ok();
    let path = std::env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_config(&path)?;
    Ok((path, config))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
