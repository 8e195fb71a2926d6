//! Default configuration template and file creation.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! writes it to the XDG config path for `fice config init`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# FICE Dashboard Configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/fice-dashboard/config.toml

# ==============================================================================
# TUI
# ==============================================================================

[tui]

# How often the dashboard redraws and expires toasts.
# Examples: "100ms", "250ms", "1s"
tick_rate = "250ms"

# How long a notification stays visible in the footer.
toast_duration = "2s"

# ==============================================================================
# Data
# ==============================================================================

[data]

# Simulated latency of every mock query. Use "0ms" for instant widgets.
latency = "450ms"

# User whose records are shown when nobody is logged in.
fallback_user = "u_user"

# ==============================================================================
# Backend
# ==============================================================================

[backend]

# Base URL of the TALC auth/audit service, used by `fice login --remote`
# and `fice register`.
# Empty means not configured.
talc_base_url = ""

# Base URL of the FICE identity service. Empty means not configured.
fice_base_url = ""

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Options: "error", "warn", "info", "debug", "trace"
# The FICE_LOG environment variable takes priority over this value.
level = "info"

# Log file path. Empty means stderr for CLI commands; the TUI does not log
# unless a file is set.
file = ""
"#;

// ---------------------------------------------------------------------------
// File creation
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    Ok(path)
}

/// Writes the template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    xdg::ensure_config_dir().map_err(write_error)?;
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}
