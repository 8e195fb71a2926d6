//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the `FICE_LOG`
//! environment variable, falling back to the configured `[log] level`.
//!
//! ```bash
//! # Debug level for one run
//! FICE_LOG=debug fice list audit
//!
//! # Module-specific filtering
//! FICE_LOG=fice_dashboard::layout=debug,warn fice tui
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::{LogConfig, LogLevel};
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "FICE_LOG";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
    /// Nothing is written; used by the TUI when no file is configured, since
    /// the alternate screen owns the terminal.
    Discard,
}

impl LogSink {
    /// Picks the sink for a `[log]` section.
    ///
    /// A configured file always wins; otherwise interactive sessions discard
    /// and CLI commands write to stderr.
    pub fn for_config(log: &LogConfig, interactive: bool) -> Self {
        if !log.file.is_empty() {
            LogSink::File(xdg::expand_tilde(&log.file))
        } else if interactive {
            LogSink::Discard
        } else {
            LogSink::Stderr
        }
    }
}

/// Builds the filter: `FICE_LOG` if set and valid, else `level`.
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Initialize the global tracing subscriber.
///
/// Calling it more than once is harmless: later calls leave the first
/// subscriber in place.
///
/// # Errors
///
/// Returns the I/O error when the log file cannot be opened.
pub fn init(level: LogLevel, sink: LogSink) -> std::io::Result<()> {
    let builder = fmt().with_env_filter(build_filter(level)).with_target(false);

    let installed = match sink {
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::Discard => builder.with_writer(std::io::sink).try_init(),
        LogSink::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
