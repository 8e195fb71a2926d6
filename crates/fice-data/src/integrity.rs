//! Deterministic ledger consistency check.
//!
//! No hashing is involved: the check cross-references the current identity,
//! its snapshots and the audit trail, and reports every inconsistency found.

use crate::types::{
    AuditAction, AuditEvent, FinancialIdentity, FinancialIdentitySnapshot, IntegrityStatus,
};

pub const OK_NAME: &str = "Ledger consistency";
pub const OK_DETAIL: &str = "All checks passed for latest snapshots and audit chain.";
pub const WARN_NAME: &str = "Ledger drift detected";

/// Outcome of [`evaluate`], before it is stamped with an id and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: IntegrityStatus,
    pub name: String,
    pub detail: String,
}

/// A single inconsistency found by [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// The identity exists but has never been snapshotted.
    MissingSnapshot,
    /// The newest snapshot no longer matches the identity.
    LatestSnapshotDiffers { snapshot_id: String },
    /// A SNAPSHOT_CREATED event references a snapshot that does not exist.
    DanglingAuditReference { event_id: String },
    /// Snapshots are not ordered newest first.
    SnapshotsOutOfOrder,
}

impl Finding {
    fn describe(&self) -> String {
        match self {
            Finding::MissingSnapshot => "identity has no snapshot".to_string(),
            Finding::LatestSnapshotDiffers { snapshot_id } => {
                format!("latest snapshot {} differs from current identity", snapshot_id)
            }
            Finding::DanglingAuditReference { event_id } => {
                format!("audit event {} references a missing snapshot", event_id)
            }
            Finding::SnapshotsOutOfOrder => "snapshots are not ordered newest first".to_string(),
        }
    }
}

/// Collects every inconsistency between identity, snapshots and audit trail.
///
/// `snapshots` is expected newest first, as stored.
pub fn findings(
    identity: Option<&FinancialIdentity>,
    snapshots: &[FinancialIdentitySnapshot],
    events: &[AuditEvent],
) -> Vec<Finding> {
    let mut found = Vec::new();

    if let Some(identity) = identity {
        match snapshots.first() {
            None => found.push(Finding::MissingSnapshot),
            Some(latest) if latest.snapshot_data != identity.traits() => {
                found.push(Finding::LatestSnapshotDiffers {
                    snapshot_id: latest.id.clone(),
                });
            }
            Some(_) => {}
        }
    }

    for event in events
        .iter()
        .filter(|e| e.action == AuditAction::SnapshotCreated)
    {
        let known = event
            .entity_id
            .as_deref()
            .is_some_and(|id| snapshots.iter().any(|s| s.id == id));
        if !known {
            found.push(Finding::DanglingAuditReference {
                event_id: event.id.clone(),
            });
        }
    }

    if snapshots
        .windows(2)
        .any(|pair| pair[0].created_at < pair[1].created_at)
    {
        found.push(Finding::SnapshotsOutOfOrder);
    }

    found
}

/// Runs the consistency check and summarizes it as OK or WARN.
pub fn evaluate(
    identity: Option<&FinancialIdentity>,
    snapshots: &[FinancialIdentitySnapshot],
    events: &[AuditEvent],
) -> Verdict {
    let found = findings(identity, snapshots, events);
    if found.is_empty() {
        return Verdict {
            status: IntegrityStatus::Ok,
            name: OK_NAME.to_string(),
            detail: OK_DETAIL.to_string(),
        };
    }

    let detail = found
        .iter()
        .map(Finding::describe)
        .collect::<Vec<_>>()
        .join("; ");
    Verdict {
        status: IntegrityStatus::Warn,
        name: WARN_NAME.to_string(),
        detail: format!("{}. Review last snapshot and audit entries.", detail),
    }
}
