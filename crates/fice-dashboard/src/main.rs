//! FICE Dashboard - CLI entry point
//!
//! This binary provides the command-line interface for the FICE console: the
//! interactive dashboard, the auth session, the persisted layout, the mock
//! data tables and a few admin actions.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use fice_dashboard::tables::TableKind;
use fice_data::{InputType, Role, UserStatus};

mod commands;

/// FICE financial identity console
#[derive(Parser)]
#[command(name = "fice")]
#[command(version, about = "FICE financial identity console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the fice CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal dashboard
    Tui,

    /// Log in and persist the session
    Login {
        /// Account email (demo: admin@devioz.pe, user@devioz.pe)
        email: String,
        /// Account password (not checked by the mock backend)
        #[arg(long)]
        password: Option<String>,
        /// Log in against the configured TALC backend instead of the mock
        #[arg(long)]
        remote: bool,
    },

    /// Create an account on the configured TALC backend
    Register {
        /// Account email
        email: String,
        /// Account password
        #[arg(long)]
        password: Option<String>,
    },

    /// Remove the persisted session
    Logout,

    /// Show the current session
    Whoami,

    /// Switch the role of the current session (demo)
    Role {
        /// admin or user
        role: Role,
    },

    /// Inspect or reset the persisted dashboard layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Print a data table
    List {
        /// users, sessions, inputs, snapshots, audit or integrity
        table: TableKind,
    },

    /// Record a financial profile input and recalculate the identity
    AddInput {
        /// salary, freelance, expenses, loan, savings or card_usage
        input_type: InputType,
        /// Free-form value, e.g. "S/ 3500"
        value: String,
        /// Snapshot change reason
        #[arg(long)]
        reason: Option<String>,
    },

    /// Work with identity snapshots
    Snapshots {
        #[command(subcommand)]
        action: SnapshotsAction,
    },

    /// Run a ledger integrity check
    Integrity {
        /// Alter the stored identity first so the check reports drift
        #[arg(long)]
        simulate_drift: bool,
    },

    /// Block or re-activate a user (admin)
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Revoke a login session (admin)
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
enum LayoutAction {
    /// Print widget order and collapse state
    Show,
    /// Restore the default layout
    Reset,
    /// Show the storage file path
    Path,
}

/// Actions for the `snapshots` subcommand.
#[derive(Subcommand)]
enum SnapshotsAction {
    /// Compare the two newest snapshots field by field
    Compare,
}

/// Actions for the `user` subcommand.
#[derive(Subcommand)]
enum UserAction {
    /// Block a user
    Block {
        /// User id, e.g. u_user
        id: String,
    },
    /// Re-activate a blocked user
    Activate {
        /// User id, e.g. u_user
        id: String,
    },
}

/// Actions for the `session` subcommand.
#[derive(Subcommand)]
enum SessionAction {
    /// Revoke a session
    Revoke {
        /// Session id, e.g. s_user_1
        id: String,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tui => commands::run_tui_command(),
        Commands::Login {
            email,
            password,
            remote,
        } => commands::run_login_command(&email, password.as_deref(), remote),
        Commands::Register { email, password } => {
            commands::run_register_command(&email, password.as_deref())
        }
        Commands::Logout => commands::run_logout_command(),
        Commands::Whoami => commands::run_whoami_command(),
        Commands::Role { role } => commands::run_role_command(role),
        Commands::Layout { action } => match action {
            LayoutAction::Show => commands::run_layout_show_command(),
            LayoutAction::Reset => commands::run_layout_reset_command(),
            LayoutAction::Path => commands::run_layout_path_command(),
        },
        Commands::List { table } => commands::run_list_command(table),
        Commands::AddInput {
            input_type,
            value,
            reason,
        } => commands::run_add_input_command(input_type, &value, reason.as_deref()),
        Commands::Snapshots { action } => match action {
            SnapshotsAction::Compare => commands::run_snapshots_compare_command(),
        },
        Commands::Integrity { simulate_drift } => commands::run_integrity_command(simulate_drift),
        Commands::User { action } => match action {
            UserAction::Block { id } => commands::run_user_status_command(&id, UserStatus::Blocked),
            UserAction::Activate { id } => {
                commands::run_user_status_command(&id, UserStatus::Active)
            }
        },
        Commands::Session { action } => match action {
            SessionAction::Revoke { id } => commands::run_session_revoke_command(&id),
        },
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::run_config_init_command(force),
            ConfigAction::Path => commands::run_config_path_command(),
            ConfigAction::Validate => commands::run_config_validate_command(),
        },
    }
}

#[cfg(test)]
mod cli_tests;
