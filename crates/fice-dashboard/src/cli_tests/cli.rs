//! CLI argument parsing tests.

use crate::{
    Cli, Commands, ConfigAction, LayoutAction, SessionAction, SnapshotsAction, UserAction,
};
use clap::{CommandFactory, Parser};
use fice_dashboard::tables::TableKind;
use fice_data::{InputType, Role};

fn parse(args: &[&str]) -> Commands {
    let argv = std::iter::once("fice").chain(args.iter().copied());
    match Cli::try_parse_from(argv) {
        Ok(cli) => cli.command,
        Err(e) => panic!("failed to parse {args:?}: {e}"),
    }
}

fn parse_fails(args: &[&str]) -> bool {
    let argv = std::iter::once("fice").chain(args.iter().copied());
    Cli::try_parse_from(argv).is_err()
}

#[test]
fn verify_cli() {
    // Verify the CLI configuration is valid
    Cli::command().debug_assert();
}

#[test]
fn test_no_subcommand_fails() {
    assert!(parse_fails(&[]));
}

#[test]
fn test_tui() {
    assert!(matches!(parse(&["tui"]), Commands::Tui));
}

#[test]
fn test_login_defaults() {
    match parse(&["login", "user@devioz.pe"]) {
        Commands::Login {
            email,
            password,
            remote,
        } => {
            assert_eq!(email, "user@devioz.pe");
            assert_eq!(password, None);
            assert!(!remote);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_login_with_password_and_remote() {
    match parse(&["login", "admin@devioz.pe", "--password", "s3cret", "--remote"]) {
        Commands::Login {
            password, remote, ..
        } => {
            assert_eq!(password.as_deref(), Some("s3cret"));
            assert!(remote);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_login_requires_email() {
    assert!(parse_fails(&["login"]));
}

#[test]
fn test_register() {
    match parse(&["register", "new@devioz.pe", "--password", "s3cret"]) {
        Commands::Register { email, password } => {
            assert_eq!(email, "new@devioz.pe");
            assert_eq!(password.as_deref(), Some("s3cret"));
        }
        _ => panic!("unexpected command variant"),
    }
    assert!(matches!(
        parse(&["register", "new@devioz.pe"]),
        Commands::Register { password: None, .. }
    ));
    assert!(parse_fails(&["register"]));
}

#[test]
fn test_session_commands() {
    assert!(matches!(parse(&["logout"]), Commands::Logout));
    assert!(matches!(parse(&["whoami"]), Commands::Whoami));
}

#[test]
fn test_role_is_case_insensitive() {
    assert!(matches!(
        parse(&["role", "admin"]),
        Commands::Role { role: Role::Admin }
    ));
    assert!(matches!(
        parse(&["role", "User"]),
        Commands::Role { role: Role::User }
    ));
    assert!(parse_fails(&["role", "root"]));
}

#[test]
fn test_layout_actions() {
    assert!(matches!(
        parse(&["layout", "show"]),
        Commands::Layout {
            action: LayoutAction::Show
        }
    ));
    assert!(matches!(
        parse(&["layout", "reset"]),
        Commands::Layout {
            action: LayoutAction::Reset
        }
    ));
    assert!(matches!(
        parse(&["layout", "path"]),
        Commands::Layout {
            action: LayoutAction::Path
        }
    ));
    assert!(parse_fails(&["layout"]));
}

#[test]
fn test_list_tables() {
    for kind in TableKind::ALL {
        match parse(&["list", kind.as_str()]) {
            Commands::List { table } => assert_eq!(table, kind),
            _ => panic!("unexpected command variant"),
        }
    }
    assert!(parse_fails(&["list", "ledgers"]));
}

#[test]
fn test_add_input() {
    match parse(&["add-input", "card-usage", "S/ 1200", "--reason", "Monthly card"]) {
        Commands::AddInput {
            input_type,
            value,
            reason,
        } => {
            assert_eq!(input_type, InputType::CardUsage);
            assert_eq!(value, "S/ 1200");
            assert_eq!(reason.as_deref(), Some("Monthly card"));
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_add_input_rejects_unknown_type() {
    assert!(parse_fails(&["add-input", "lottery", "S/ 1"]));
    assert!(parse_fails(&["add-input", "salary"]));
}

#[test]
fn test_snapshots_compare() {
    assert!(matches!(
        parse(&["snapshots", "compare"]),
        Commands::Snapshots {
            action: SnapshotsAction::Compare
        }
    ));
    assert!(parse_fails(&["snapshots"]));
}

#[test]
fn test_integrity() {
    assert!(matches!(
        parse(&["integrity"]),
        Commands::Integrity {
            simulate_drift: false
        }
    ));
    assert!(matches!(
        parse(&["integrity", "--simulate-drift"]),
        Commands::Integrity {
            simulate_drift: true
        }
    ));
}

#[test]
fn test_user_actions() {
    match parse(&["user", "block", "u_user"]) {
        Commands::User {
            action: UserAction::Block { id },
        } => assert_eq!(id, "u_user"),
        _ => panic!("unexpected command variant"),
    }
    match parse(&["user", "activate", "u_user"]) {
        Commands::User {
            action: UserAction::Activate { id },
        } => assert_eq!(id, "u_user"),
        _ => panic!("unexpected command variant"),
    }
    assert!(parse_fails(&["user", "block"]));
    assert!(parse_fails(&["user", "delete", "u_user"]));
}

#[test]
fn test_session_revoke() {
    match parse(&["session", "revoke", "s_user_1"]) {
        Commands::Session {
            action: SessionAction::Revoke { id },
        } => assert_eq!(id, "s_user_1"),
        _ => panic!("unexpected command variant"),
    }
    assert!(parse_fails(&["session", "revoke"]));
}

#[test]
fn test_config_init_force_flag() {
    match parse(&["config", "init", "--force"]) {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(force),
        _ => panic!("unexpected command variant"),
    }
    match parse(&["config", "init"]) {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(!force),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_path_and_validate() {
    assert!(matches!(
        parse(&["config", "path"]),
        Commands::Config {
            action: ConfigAction::Path
        }
    ));
    assert!(matches!(
        parse(&["config", "validate"]),
        Commands::Config {
            action: ConfigAction::Validate
        }
    ));
}
