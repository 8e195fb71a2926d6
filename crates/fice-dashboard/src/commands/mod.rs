//! Command implementations for the `fice` CLI.
//!
//! This module contains all command handler functions, organized by domain:
//! - `admin` - Account administration (user block/activate, session revoke)
//! - `config` - Configuration file management (init, path, validate)
//! - `data` - Mock data commands (list, add-input, snapshots compare, integrity)
//! - `layout` - Persisted layout inspection and reset
//! - `session` - Auth session commands (login, register, logout, whoami, role)
//! - `tui` - The interactive dashboard

pub(crate) mod admin;
pub(crate) mod config;
pub(crate) mod data;
pub(crate) mod layout;
pub(crate) mod session;
pub(crate) mod tui;

pub(crate) use admin::*;
pub(crate) use config::*;
pub(crate) use data::*;
pub(crate) use layout::*;
pub(crate) use session::*;
pub(crate) use tui::*;

use std::process::ExitCode;

use thiserror::Error;

use fice_dashboard::auth::{AuthError, AuthStore, Viewer};
use fice_dashboard::config::{xdg, Config, ConfigError, ConfigLoader};
use fice_dashboard::logging::{self, LogSink};
use fice_dashboard::storage::{FileStore, StorageError};
use fice_data::{ApiError, DataError};

/// Failure of a CLI command; the message is printed to stderr as is.
#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Error: {0}")]
    Auth(#[from] AuthError),

    #[error("Error: {0}")]
    Data(#[from] DataError),

    #[error("Error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("TUI error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Loaded configuration plus the storage file every command shares.
pub(crate) struct CommandContext {
    pub config: Config,
    pub storage: FileStore,
}

impl CommandContext {
    /// Loads the config and installs logging.
    ///
    /// `interactive` selects the TUI sink (file or nothing) over stderr.
    pub fn load(interactive: bool) -> Result<Self, CommandError> {
        let config = ConfigLoader::load_default()?;
        config.validate()?;
        if let Err(e) = logging::init(config.log.level, LogSink::for_config(&config.log, interactive))
        {
            eprintln!("Warning: logging disabled ({e})");
        }
        Ok(Self {
            config,
            storage: FileStore::new(xdg::storage_path()),
        })
    }

    pub fn auth(&self) -> AuthStore<FileStore> {
        AuthStore::new(self.storage.clone())
    }

    /// Viewer for data commands: the session user, or the fallback user.
    pub fn viewer(&self) -> Viewer {
        self.auth().state().viewer(&self.config.data.fallback_user)
    }
}

/// Maps a command result onto the process exit code.
pub(crate) fn finish(result: Result<(), CommandError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
