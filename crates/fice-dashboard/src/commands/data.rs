//! Mock data commands: `list`, `add-input`, `snapshots compare` and
//! `integrity`.
//!
//! Each invocation works on a freshly seeded database; only the session and
//! layout survive between runs.

use std::process::ExitCode;

use chrono::Utc;

use fice_dashboard::tables::{fetch_rows, render_comparison, render_table, TableKind};
use fice_data::{compare_snapshots, InputType, IntegrityStatus, MockDb, NewInput};

use super::{finish, CommandContext, CommandError};

/// Prints one table as the current viewer sees it. The account tables
/// need a logged-in session.
pub(crate) fn run_list_command(kind: TableKind) -> ExitCode {
    finish(list(kind))
}

fn list(kind: TableKind) -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    if kind.requires_session() {
        ctx.auth().state().require_session()?;
    }
    let viewer = ctx.viewer();
    let now = Utc::now();
    let db = MockDb::seeded(now);
    let rows = fetch_rows(&db, kind, &viewer);
    print!("{}", render_table(kind, &rows, now));
    Ok(())
}

/// Records an input for the viewer and prints the recalculated identity.
pub(crate) fn run_add_input_command(
    input_type: InputType,
    value: &str,
    reason: Option<&str>,
) -> ExitCode {
    finish(add_input(input_type, value, reason))
}

fn add_input(input_type: InputType, value: &str, reason: Option<&str>) -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    let viewer = ctx.viewer();
    let mut db = MockDb::seeded(Utc::now());

    let mut input = NewInput::new(input_type, value);
    if let Some(reason) = reason {
        input = input.with_reason(reason);
    }
    let outcome = db.add_input(&viewer.user_id, input)?;

    let identity = &outcome.identity;
    println!(
        "Added {} input {} ({})",
        outcome.input.input_type, outcome.input.id, outcome.input.input_value
    );
    println!(
        "Identity: {} • Stability {}/100 • Risk {} • {}",
        identity.income_type,
        identity.income_stability_score,
        identity.risk_tolerance,
        identity.decision_style
    );
    println!(
        "Snapshot {}: {}",
        outcome.snapshot.id,
        outcome.snapshot.change_reason.as_deref().unwrap_or_default()
    );
    Ok(())
}

/// Compares the viewer's two newest snapshots field by field.
pub(crate) fn run_snapshots_compare_command() -> ExitCode {
    finish(compare())
}

fn compare() -> Result<(), CommandError> {
    let ctx = CommandContext::load(false)?;
    let viewer = ctx.viewer();
    let db = MockDb::seeded(Utc::now());
    let snapshots = db.snapshots(&viewer.user_id);

    match compare_snapshots(&snapshots) {
        Some(diffs) => {
            println!("{} vs {}", snapshots[0].id, snapshots[1].id);
            print!("{}", render_comparison(&diffs));
        }
        None => println!("Need at least 2 snapshots to compare."),
    }
    Ok(())
}

/// Runs the ledger consistency check. A warning exits non-zero.
///
/// `simulate_drift` edits the stored identity first so the newest snapshot
/// no longer matches it.
pub(crate) fn run_integrity_command(simulate_drift: bool) -> ExitCode {
    if let Err(e) = CommandContext::load(false) {
        return finish(Err(e));
    }

    let mut db = MockDb::seeded(Utc::now());
    if simulate_drift {
        drift_identity(&mut db);
    }
    let check = db.run_integrity_check();
    println!("{}  {}", check.status, check.name);
    println!("{}", check.detail);

    match check.status {
        IntegrityStatus::Ok => ExitCode::SUCCESS,
        IntegrityStatus::Warn => ExitCode::FAILURE,
    }
}

/// Moves the identity's stability score by 10 without a new snapshot.
fn drift_identity(db: &mut MockDb) {
    let Some(mut identity) = db.identity().cloned() else {
        return;
    };
    let score = identity.income_stability_score;
    identity.income_stability_score = if score >= 10 { score - 10 } else { score + 10 };
    db.set_identity(Some(identity));
}
