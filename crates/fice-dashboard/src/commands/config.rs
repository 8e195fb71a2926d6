//! Configuration file commands: `config init`, `config path`, `config validate`.

use std::process::ExitCode;

use fice_dashboard::config::{default, xdg, ConfigLoader};

use super::{finish, CommandError};

/// Writes the commented default config, backing up an existing one with `force`.
pub(crate) fn run_config_init_command(force: bool) -> ExitCode {
    finish(
        default::create_default_config(force)
            .map(|path| println!("Created configuration at {}", path.display()))
            .map_err(CommandError::from),
    )
}

pub(crate) fn run_config_path_command() -> ExitCode {
    println!("{}", xdg::config_path().display());
    ExitCode::SUCCESS
}

/// Parses the config file and checks every duration field.
pub(crate) fn run_config_validate_command() -> ExitCode {
    let result = ConfigLoader::load_default().and_then(|config| {
        config.validate()?;
        println!("Configuration is valid");
        println!("{config:#?}");
        Ok(())
    });
    finish(result.map_err(CommandError::from))
}
