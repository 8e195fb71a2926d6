//! Admin commands: `user block|activate` and `session revoke`.
//!
//! These need a logged-in admin session. The change is applied to a freshly
//! seeded database, so it only lives for the duration of the command.

use std::process::ExitCode;

use chrono::Utc;

use fice_dashboard::tables::{render_table, Row, TableKind};
use fice_data::{MockDb, UserStatus};

use super::{finish, CommandContext, CommandError};

/// Blocks or re-activates a user and prints the updated row.
pub(crate) fn run_user_status_command(user_id: &str, status: UserStatus) -> ExitCode {
    finish(set_user_status(user_id, status))
}

fn set_user_status(user_id: &str, status: UserStatus) -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    ctx.auth().state().require_admin()?;

    let now = Utc::now();
    let mut db = MockDb::seeded(now);
    let user = db.set_user_status(user_id, status)?;
    println!("User {} is now {}", user.id, user.status.as_str());
    print!("{}", render_table(TableKind::Users, &[Row::User(user)], now));
    Ok(())
}

/// Revokes a login session and prints the updated row.
pub(crate) fn run_session_revoke_command(session_id: &str) -> ExitCode {
    finish(revoke_session(session_id))
}

fn revoke_session(session_id: &str) -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    ctx.auth().state().require_admin()?;

    let now = Utc::now();
    let mut db = MockDb::seeded(now);
    let session = db.revoke_session(session_id)?;
    println!("Session {} {}", session.id, session.status.as_str());
    print!(
        "{}",
        render_table(TableKind::Sessions, &[Row::Session(session)], now)
    );
    Ok(())
}
