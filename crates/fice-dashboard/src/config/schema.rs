//! TOML configuration schema types for the FICE dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial (or empty) file is always valid.
//!
//! Duration fields use human-readable strings (e.g. `"250ms"`, `"2s"`)
//! parsed by the `humantime` crate through the accessor methods.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::error::ConfigError;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [tui]
/// [data]
/// [backend]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terminal UI behavior.
    pub tui: TuiConfig,
    /// Mock data layer settings.
    pub data: DataConfig,
    /// Remote backend endpoints.
    pub backend: BackendConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl Config {
    /// Checks every field that is only interpreted lazily (durations).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tui.tick_rate()?;
        self.tui.toast_duration()?;
        self.data.latency()?;
        Ok(())
    }
}

/// Parses a humantime duration, naming the offending field on failure.
pub fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Render tick rate (e.g. `"250ms"`).
    pub tick_rate: String,
    /// How long a toast stays in the footer.
    pub toast_duration: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            toast_duration: "2s".to_string(),
        }
    }
}

impl TuiConfig {
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.tick_rate", &self.tick_rate)
    }

    pub fn toast_duration(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.toast_duration", &self.toast_duration)
    }
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// Simulated latency of every mock query.
    pub latency: String,
    /// User whose data is shown when nobody is logged in.
    pub fallback_user: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            latency: "450ms".to_string(),
            fallback_user: "u_user".to_string(),
        }
    }
}

impl DataConfig {
    pub fn latency(&self) -> Result<Duration, ConfigError> {
        parse_duration("data.latency", &self.latency)
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Base URLs of the remote services. Empty means "not configured".
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub talc_base_url: String,
    pub fice_base_url: String,
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Logging verbosity. `FICE_LOG` overrides it.
    pub level: LogLevel,
    /// Path to log file. Empty string means stderr for CLI commands and no
    /// logging for the TUI.
    pub file: String,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.tui.tick_rate, "250ms");
        assert_eq!(config.tui.toast_duration, "2s");
        assert_eq!(config.data.latency, "450ms");
        assert_eq!(config.data.fallback_user, "u_user");
        assert!(config.backend.talc_base_url.is_empty());
        assert_eq!(config.log.level, LogLevel::Info);
        assert!(config.log.file.is_empty());
    }

    #[test]
    fn default_durations_parse() {
        let config = Config::default();
        assert_eq!(config.tui.tick_rate().unwrap(), Duration::from_millis(250));
        assert_eq!(config.tui.toast_duration().unwrap(), Duration::from_secs(2));
        assert_eq!(config.data.latency().unwrap(), Duration::from_millis(450));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_duration_names_field() {
        let mut config = Config::default();
        config.data.latency = "soon".to_string();
        let err = config.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("data.latency"), "got: {msg}");
        assert!(msg.contains("soon"), "got: {msg}");
    }

    #[test]
    fn log_level_is_kebab_case() {
        let parsed: LogConfig = toml::from_str("level = \"debug\"").unwrap();
        assert_eq!(parsed.level, LogLevel::Debug);
        assert_eq!(parsed.level.as_filter(), "debug");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
