//! The `tui` command: runs the interactive dashboard.

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use fice_dashboard::tui::{App, AppOptions};
use fice_data::MockDb;

use super::{finish, CommandContext, CommandError};

pub(crate) fn run_tui_command() -> ExitCode {
    finish(run_tui())
}

fn run_tui() -> Result<(), CommandError> {
    let ctx = CommandContext::load(true)?;
    let options = AppOptions::from_config(&ctx.config)?;
    let db = Arc::new(Mutex::new(MockDb::seeded(Utc::now())));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut app = App::new(ctx.storage, db, options);
        app.run().await
    })?;
    Ok(())
}
