//! Typed table rows for the list views.
//!
//! Each table has one [`Row`] variant and a fixed column list; cells are
//! produced by exhaustive matching, so adding a column or a table is a
//! compile-time change everywhere it matters.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use fice_data::{
    AuditEvent, FieldDiff, FinancialIdentitySnapshot, FinancialProfileInput, IntegrityCheck,
    MockDb, User, UserSession,
};

use crate::auth::Viewer;
use crate::format::{absolute_time, relative_time};

/// The list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Users,
    Sessions,
    Inputs,
    Snapshots,
    Audit,
    Integrity,
}

impl TableKind {
    pub const ALL: [TableKind; 6] = [
        TableKind::Users,
        TableKind::Sessions,
        TableKind::Inputs,
        TableKind::Snapshots,
        TableKind::Audit,
        TableKind::Integrity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Users => "users",
            TableKind::Sessions => "sessions",
            TableKind::Inputs => "inputs",
            TableKind::Snapshots => "snapshots",
            TableKind::Audit => "audit",
            TableKind::Integrity => "integrity",
        }
    }

    /// Tables that list other accounts and need a logged-in session.
    pub fn requires_session(self) -> bool {
        matches!(self, TableKind::Users | TableKind::Sessions)
    }

    /// Column headers, in cell order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Users => &["ID", "Name", "Email", "Role", "Status", "Created"],
            TableKind::Sessions => &["ID", "User ID", "Device", "IP", "Created", "Last seen", "Status"],
            TableKind::Inputs => &["ID", "Type", "Value", "Created"],
            TableKind::Snapshots => &["ID", "Reason", "Stability", "Risk", "Style", "Created"],
            TableKind::Audit => &["Action", "Actor", "Entity", "Entity ID", "Age"],
            TableKind::Integrity => &["Status", "Name", "Detail", "Age"],
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a [`TableKind`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTableKindError(pub String);

impl fmt::Display for ParseTableKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid table: {} (expected users, sessions, inputs, snapshots, audit or integrity)",
            self.0
        )
    }
}

impl std::error::Error for ParseTableKindError {}

impl FromStr for TableKind {
    type Err = ParseTableKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        TableKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| ParseTableKindError(s.to_string()))
    }
}

/// One row of one table.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    User(User),
    Session(UserSession),
    Input(FinancialProfileInput),
    Snapshot(FinancialIdentitySnapshot),
    Audit(AuditEvent),
    Integrity(IntegrityCheck),
}

impl Row {
    pub fn kind(&self) -> TableKind {
        match self {
            Row::User(_) => TableKind::Users,
            Row::Session(_) => TableKind::Sessions,
            Row::Input(_) => TableKind::Inputs,
            Row::Snapshot(_) => TableKind::Snapshots,
            Row::Audit(_) => TableKind::Audit,
            Row::Integrity(_) => TableKind::Integrity,
        }
    }

    /// One cell per column of [`Row::kind`].
    pub fn cells(&self, now: DateTime<Utc>) -> Vec<String> {
        match self {
            Row::User(u) => vec![
                u.id.clone(),
                u.full_name.clone(),
                u.email.clone(),
                u.role.to_string(),
                u.status.to_string(),
                absolute_time(u.created_at),
            ],
            Row::Session(s) => vec![
                s.id.clone(),
                s.user_id.clone(),
                s.device.clone(),
                s.ip.clone(),
                absolute_time(s.created_at),
                absolute_time(s.last_seen_at),
                s.status.to_string(),
            ],
            Row::Input(i) => vec![
                i.id.clone(),
                i.input_type.to_string(),
                i.input_value.clone(),
                absolute_time(i.created_at),
            ],
            Row::Snapshot(s) => vec![
                s.id.clone(),
                s.change_reason.clone().unwrap_or_else(|| "Snapshot".to_string()),
                format!("{}/100", s.snapshot_data.income_stability_score),
                s.snapshot_data.risk_tolerance.to_string(),
                s.snapshot_data.decision_style.to_string(),
                absolute_time(s.created_at),
            ],
            Row::Audit(e) => vec![
                e.action.to_string(),
                e.actor.clone(),
                e.entity.to_string(),
                e.entity_id.clone().unwrap_or_else(|| "-".to_string()),
                relative_time(e.created_at, now),
            ],
            Row::Integrity(c) => vec![
                c.status.to_string(),
                c.name.clone(),
                c.detail.clone(),
                relative_time(c.created_at, now),
            ],
        }
    }
}

/// Rows of `kind` as visible to `viewer`.
pub fn fetch_rows(db: &MockDb, kind: TableKind, viewer: &Viewer) -> Vec<Row> {
    match kind {
        TableKind::Users => db.users().into_iter().map(Row::User).collect(),
        TableKind::Sessions => db.sessions().into_iter().map(Row::Session).collect(),
        TableKind::Inputs => db.inputs(&viewer.user_id).into_iter().map(Row::Input).collect(),
        TableKind::Snapshots => db
            .snapshots(&viewer.user_id)
            .into_iter()
            .map(Row::Snapshot)
            .collect(),
        TableKind::Audit => db
            .audit_events(viewer.audit_scope())
            .into_iter()
            .map(Row::Audit)
            .collect(),
        TableKind::Integrity => db
            .integrity_checks()
            .into_iter()
            .map(Row::Integrity)
            .collect(),
    }
}

/// Plain-text table with left-aligned, space-padded columns.
pub fn render_table(kind: TableKind, rows: &[Row], now: DateTime<Utc>) -> String {
    let columns = kind.columns();
    let body: Vec<Vec<String>> = rows
        .iter()
        .filter(|r| r.kind() == kind)
        .map(|r| r.cells(now))
        .collect();

    if body.is_empty() {
        return format!("No {} found.\n", kind);
    }
    render_grid(columns, &body)
}

/// Columns of the snapshot comparison.
pub const COMPARISON_COLUMNS: [&str; 4] = ["Field", "A", "B", "Changed"];

/// Snapshot A (newest) against snapshot B, one line per trait.
pub fn render_comparison(diffs: &[FieldDiff]) -> String {
    let body: Vec<Vec<String>> = diffs
        .iter()
        .map(|d| {
            vec![
                d.field.to_string(),
                d.a.clone(),
                d.b.clone(),
                if d.changed { "*".to_string() } else { String::new() },
            ]
        })
        .collect();
    render_grid(&COMPARISON_COLUMNS, &body)
}

fn render_grid(columns: &[&str], body: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
