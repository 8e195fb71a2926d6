//! Persisted layout commands: `layout show`, `layout reset`, `layout path`.

use std::process::ExitCode;

use fice_dashboard::config::xdg;
use fice_dashboard::dashboard::DashboardController;
use fice_dashboard::notify::Toast;

use super::{finish, CommandContext, CommandError};

/// Prints the layout the dashboard would open with.
pub(crate) fn run_layout_show_command() -> ExitCode {
    finish(show())
}

fn show() -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    let role = ctx.auth().state().role();
    let controller = DashboardController::new(role, ctx.storage.clone());

    if controller.store().has_custom() {
        println!("Layout (custom)");
    } else {
        match role {
            Some(role) => println!("Layout (default for {role})"),
            None => println!("Layout (default)"),
        }
    }
    for (i, widget) in controller.layout().widgets.iter().enumerate() {
        let collapsed = if widget.collapsed { "  [collapsed]" } else { "" };
        println!(
            "{:>2}. {:<18} {}{}",
            i + 1,
            widget.id.as_str(),
            widget.id.title(),
            collapsed
        );
    }
    Ok(())
}

/// Writes the canonical default layout.
pub(crate) fn run_layout_reset_command() -> ExitCode {
    finish(reset())
}

fn reset() -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    let role = ctx.auth().state().role();
    let mut controller = DashboardController::new(role, ctx.storage.clone());
    let mut toasts: Vec<Toast> = Vec::new();
    controller.reset(&mut toasts);
    for toast in toasts {
        println!("{toast}");
    }
    Ok(())
}

/// Prints the storage file holding the layout and session.
pub(crate) fn run_layout_path_command() -> ExitCode {
    println!("{}", xdg::storage_path().display());
    ExitCode::SUCCESS
}
