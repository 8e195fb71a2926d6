//! Auth session commands: `login`, `register`, `logout`, `whoami` and
//! `role`.
//!
//! Local logins go through a freshly seeded mock database; `--remote`
//! logins call the configured TALC backend.

use std::process::ExitCode;

use chrono::Utc;

use fice_dashboard::auth::AuthState;
use fice_data::http::{auth_api, ApiClient};
use fice_data::{MockDb, Role};

use super::{finish, CommandContext, CommandError};

/// Logs in and persists the session.
pub(crate) fn run_login_command(email: &str, password: Option<&str>, remote: bool) -> ExitCode {
    finish(login(email, password.unwrap_or_default(), remote))
}

fn login(email: &str, password: &str, remote: bool) -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    let auth = ctx.auth();
    let session = if remote {
        let backend = &ctx.config.backend;
        let client = ApiClient::new(&backend.talc_base_url, &backend.fice_base_url);
        auth.login_remote(&client, email, password)?
    } else {
        let mut db = MockDb::seeded(Utc::now());
        auth.login(&mut db, email, password)?
    };
    println!("Logged in as {} ({})", email, session.role);
    Ok(())
}

/// Creates an account on the TALC backend. No session is stored; log in
/// afterwards.
pub(crate) fn run_register_command(email: &str, password: Option<&str>) -> ExitCode {
    finish(register(email, password.unwrap_or_default()))
}

fn register(email: &str, password: &str) -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    let backend = &ctx.config.backend;
    let client = ApiClient::new(&backend.talc_base_url, &backend.fice_base_url);
    auth_api::register(&client, email, password)?;
    println!("Registered {}", email);
    Ok(())
}

/// Removes the persisted session.
pub(crate) fn run_logout_command() -> ExitCode {
    finish(logout())
}

fn logout() -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    let auth = ctx.auth();
    let was_logged_in = matches!(auth.state(), AuthState::Authenticated(_));
    let mut db = MockDb::seeded(Utc::now());
    auth.logout(&mut db)?;
    if was_logged_in {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

/// Prints the current session, or who anonymous viewers see.
pub(crate) fn run_whoami_command() -> ExitCode {
    finish(whoami())
}

fn whoami() -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    match ctx.auth().state() {
        AuthState::Anonymous => {
            println!(
                "Not logged in (viewing {})",
                ctx.config.data.fallback_user
            );
        }
        AuthState::Authenticated(session) => {
            let db = MockDb::seeded(Utc::now());
            match db.user(&session.user_id) {
                Some(user) => println!("{} ({}, {})", user.email, session.user_id, session.role),
                None => println!("{} ({})", session.user_id, session.role),
            }
        }
    }
    Ok(())
}

/// Demo role switcher for the logged-in session.
pub(crate) fn run_role_command(role: Role) -> ExitCode {
    finish(switch_role(role))
}

fn switch_role(role: Role) -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    let session = ctx.auth().switch_role(role)?;
    println!("Role set to {}", session.role);
    Ok(())
}
