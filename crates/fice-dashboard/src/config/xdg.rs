//! Platform-aware path resolution for fice-dashboard.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/fice-dashboard` or `~/.config/fice-dashboard`
//! - Data (key-value storage): `$XDG_DATA_HOME/fice-dashboard` or `~/.local/share/fice-dashboard`
//!
//! On **macOS**, the XDG variables still win; otherwise both directories live
//! under `~/Library/Application Support/fice-dashboard`.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "fice-dashboard";

/// Name of the key-value storage file inside [`data_dir`].
pub const STORAGE_FILE: &str = "storage.json";

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the configuration directory for fice-dashboard.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/fice-dashboard` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.config/fice-dashboard`
///    - macOS: `~/Library/Application Support/fice-dashboard`
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".config")
    }
}

/// Returns the path to the main configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory holding persisted dashboard state.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/fice-dashboard`
/// 2. Platform default:
///    - Linux: `~/.local/share/fice-dashboard`
///    - macOS: `~/Library/Application Support/fice-dashboard`
pub fn data_dir() -> PathBuf {
    if let Some(xdg) = non_empty_env("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_data_dir().join(APP_NAME)
}

fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".local/share")
    }
}

/// Returns the path of the JSON key-value storage file.
pub fn storage_path() -> PathBuf {
    data_dir().join(STORAGE_FILE)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the configuration directory if it does not exist, returning its path.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}
