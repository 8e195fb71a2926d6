//! In-memory mock database seeded with demo records.
//!
//! Mirrors the behavior of the demo backend closely enough for the console
//! to be exercised offline: logins are recorded as sessions and audit
//! events, new inputs trigger a recalculation and a snapshot, and integrity
//! runs are appended to a bounded history.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::DataError;
use crate::integrity;
use crate::recalc::recalculate;
use crate::types::{
    AuditAction, AuditEntity, AuditEvent, AuthToken, DecisionStyle, FinancialIdentity,
    FinancialIdentitySnapshot, FinancialProfileInput, IdentityTraits, IncomeType, InputType,
    IntegrityCheck, IntegrityStatus, RiskTolerance, Role, SessionStatus, User, UserSession,
    UserStatus,
};

/// Maximum number of integrity checks retained.
pub const MAX_INTEGRITY_CHECKS: usize = 20;

/// Actor recorded for events raised by the system itself.
pub const SYSTEM_ACTOR: &str = "system";

/// Actor recorded for admin-initiated changes.
pub const ADMIN_ACTOR: &str = "admin@devioz.pe";

const LOGIN_DEVICE: &str = "fice terminal";
const LOGIN_IP: &str = "127.0.0.1";

/// A new input to record via [`MockDb::add_input`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewInput {
    pub input_type: InputType,
    pub input_value: String,
    /// Snapshot change reason; defaults to `Input update: <type>`.
    pub reason: Option<String>,
}

impl NewInput {
    pub fn new(input_type: InputType, input_value: impl Into<String>) -> Self {
        Self {
            input_type,
            input_value: input_value.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Everything [`MockDb::add_input`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct InputOutcome {
    pub input: FinancialProfileInput,
    pub identity: FinancialIdentity,
    pub snapshot: FinancialIdentitySnapshot,
}

/// The mock database.
///
/// Collections are kept newest first, matching how every getter returns
/// them. A single financial identity exists, owned by the demo user.
#[derive(Debug, Clone)]
pub struct MockDb {
    users: Vec<User>,
    sessions: Vec<UserSession>,
    inputs: Vec<FinancialProfileInput>,
    identity: Option<FinancialIdentity>,
    snapshots: Vec<FinancialIdentitySnapshot>,
    audit: Vec<AuditEvent>,
    integrity_checks: Vec<IntegrityCheck>,
    next_id: u64,
}

impl MockDb {
    /// Creates an empty database with no users.
    pub fn empty() -> Self {
        Self {
            users: Vec::new(),
            sessions: Vec::new(),
            inputs: Vec::new(),
            identity: None,
            snapshots: Vec::new(),
            audit: Vec::new(),
            integrity_checks: Vec::new(),
            next_id: 0x100,
        }
    }

    /// Creates the demo database with timestamps relative to `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let days = |n| now - Duration::days(n);
        let hours = |n| now - Duration::hours(n);
        let minutes = |n| now - Duration::minutes(n);

        let users = vec![
            User {
                id: "u_admin".into(),
                email: "admin@devioz.pe".into(),
                full_name: "Admin Demo".into(),
                role: Role::Admin,
                status: UserStatus::Active,
                created_at: days(30),
            },
            User {
                id: "u_user".into(),
                email: "user@devioz.pe".into(),
                full_name: "User Demo".into(),
                role: Role::User,
                status: UserStatus::Active,
                created_at: days(10),
            },
        ];

        let sessions = vec![
            UserSession {
                id: "s_admin_1".into(),
                user_id: "u_admin".into(),
                device: "Chrome on Windows".into(),
                ip: "190.12.34.56".into(),
                created_at: hours(5),
                last_seen_at: minutes(2),
                status: SessionStatus::Active,
            },
            UserSession {
                id: "s_user_1".into(),
                user_id: "u_user".into(),
                device: "Edge on Windows".into(),
                ip: "181.65.12.9".into(),
                created_at: hours(20),
                last_seen_at: minutes(7),
                status: SessionStatus::Active,
            },
        ];

        let input = |id: &str, input_type, value: &str, created_at| FinancialProfileInput {
            id: id.into(),
            user_id: "u_user".into(),
            input_type,
            input_value: value.into(),
            created_at,
        };
        let inputs = vec![
            input("i_3", InputType::Savings, "S/ 800", hours(12)),
            input("i_2", InputType::Expenses, "S/ 2100", days(2)),
            input("i_1", InputType::Salary, "S/ 5500", days(3)),
        ];

        let identity = FinancialIdentity {
            id: "fi_1".into(),
            user_id: "u_user".into(),
            income_type: IncomeType::Fixed,
            income_stability_score: 78,
            risk_tolerance: RiskTolerance::Medium,
            decision_style: DecisionStyle::Balanced,
            created_at: days(12),
            last_updated: hours(12),
        };

        let snapshots = vec![
            FinancialIdentitySnapshot {
                id: "snp_2".into(),
                financial_identity_id: "fi_1".into(),
                snapshot_data: identity.traits(),
                change_reason: Some("Input update: savings".into()),
                created_at: hours(12),
            },
            FinancialIdentitySnapshot {
                id: "snp_1".into(),
                financial_identity_id: "fi_1".into(),
                snapshot_data: IdentityTraits {
                    income_type: IncomeType::Fixed,
                    income_stability_score: 76,
                    risk_tolerance: RiskTolerance::Low,
                    decision_style: DecisionStyle::Conservative,
                },
                change_reason: Some("Initial onboarding".into()),
                created_at: days(9),
            },
        ];

        let audit = vec![
            AuditEvent {
                id: "ae_1".into(),
                user_id: "u_user".into(),
                actor: SYSTEM_ACTOR.into(),
                action: AuditAction::SnapshotCreated,
                entity: AuditEntity::FinancialIdentitySnapshot,
                entity_id: Some("snp_2".into()),
                meta: meta([("reason", "Input update: savings")]),
                created_at: hours(12),
            },
            AuditEvent {
                id: "ae_2".into(),
                user_id: "u_user".into(),
                actor: "user@devioz.pe".into(),
                action: AuditAction::InputAdded,
                entity: AuditEntity::FinancialProfileInput,
                entity_id: Some("i_3".into()),
                meta: meta([("input_type", "savings"), ("input_value", "S/ 800")]),
                created_at: hours(12),
            },
        ];

        let integrity_checks = vec![
            IntegrityCheck {
                id: "ic_2".into(),
                status: IntegrityStatus::Ok,
                name: "Audit immutability".into(),
                detail: "No anomalies detected.".into(),
                created_at: hours(6),
            },
            IntegrityCheck {
                id: "ic_1".into(),
                status: IntegrityStatus::Ok,
                name: "Snapshot hash chain".into(),
                detail: "Chain verified (2 snapshots).".into(),
                created_at: hours(7),
            },
        ];

        Self {
            users,
            sessions,
            inputs,
            identity: Some(identity),
            snapshots,
            audit,
            integrity_checks,
            ..Self::empty()
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}_{:x}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    fn record(&mut self, event: AuditEvent) {
        debug!(action = %event.action, user = %event.user_id, "audit event recorded");
        self.audit.insert(0, event);
    }

    #[allow(clippy::too_many_arguments)]
    fn audit_event(
        &mut self,
        user_id: &str,
        actor: &str,
        action: AuditAction,
        entity: AuditEntity,
        entity_id: Option<String>,
        meta: BTreeMap<String, String>,
        created_at: DateTime<Utc>,
    ) -> AuditEvent {
        AuditEvent {
            id: self.next_id("ae"),
            user_id: user_id.to_string(),
            actor: actor.to_string(),
            action,
            entity,
            entity_id,
            meta,
            created_at,
        }
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    /// Logs in by email (case-insensitive). The password is not checked.
    ///
    /// # Errors
    ///
    /// [`DataError::InvalidCredentials`] for an unknown email,
    /// [`DataError::UserBlocked`] for a blocked account.
    pub fn login(&mut self, email: &str, _password: &str) -> Result<AuthToken, DataError> {
        let user = self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or(DataError::InvalidCredentials)?;
        if user.status == UserStatus::Blocked {
            return Err(DataError::UserBlocked);
        }

        let now = Utc::now();
        let event = self.audit_event(
            &user.id,
            &user.email,
            AuditAction::Login,
            AuditEntity::UserSession,
            None,
            meta([("ip", LOGIN_IP), ("device", LOGIN_DEVICE)]),
            now,
        );
        self.record(event);

        let session = UserSession {
            id: self.next_id("sess"),
            user_id: user.id.clone(),
            device: LOGIN_DEVICE.into(),
            ip: LOGIN_IP.into(),
            created_at: now,
            last_seen_at: now,
            status: SessionStatus::Active,
        };
        self.sessions.insert(0, session);

        Ok(AuthToken {
            token: self.next_id("tk"),
            user_id: user.id,
            role: user.role,
            issued_at: now,
        })
    }

    /// Records a LOGOUT event if the user exists; unknown ids are ignored.
    pub fn logout(&mut self, user_id: &str) {
        let Some(user) = self.user(user_id).cloned() else {
            return;
        };
        let event = self.audit_event(
            &user.id,
            &user.email,
            AuditAction::Logout,
            AuditEntity::UserSession,
            None,
            BTreeMap::new(),
            Utc::now(),
        );
        self.record(event);
    }

    // -----------------------------------------------------------------------
    // Users and sessions
    // -----------------------------------------------------------------------

    pub fn users(&self) -> Vec<User> {
        self.users.clone()
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Blocks or re-activates a user and records the change.
    pub fn set_user_status(
        &mut self,
        user_id: &str,
        status: UserStatus,
    ) -> Result<User, DataError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DataError::UserNotFound(user_id.to_string()))?;
        user.status = status;
        let updated = user.clone();

        let action = match status {
            UserStatus::Blocked => AuditAction::UserBlocked,
            UserStatus::Active => AuditAction::UserActivated,
        };
        let event = self.audit_event(
            user_id,
            ADMIN_ACTOR,
            action,
            AuditEntity::User,
            Some(user_id.to_string()),
            meta([("email", updated.email.as_str())]),
            Utc::now(),
        );
        self.record(event);
        Ok(updated)
    }

    pub fn sessions(&self) -> Vec<UserSession> {
        self.sessions.clone()
    }

    /// Marks a session revoked and records the change.
    pub fn revoke_session(&mut self, session_id: &str) -> Result<UserSession, DataError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| DataError::SessionNotFound(session_id.to_string()))?;
        session.status = SessionStatus::Revoked;
        let updated = session.clone();

        let event = self.audit_event(
            "u_admin",
            ADMIN_ACTOR,
            AuditAction::SessionRevoked,
            AuditEntity::UserSession,
            Some(session_id.to_string()),
            BTreeMap::new(),
            Utc::now(),
        );
        self.record(event);
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Financial identity
    // -----------------------------------------------------------------------

    /// The user's financial identity.
    ///
    /// # Errors
    ///
    /// [`DataError::IdentityNotFound`] when the user owns no identity.
    pub fn financial_identity(&self, user_id: &str) -> Result<FinancialIdentity, DataError> {
        self.identity
            .as_ref()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .ok_or_else(|| DataError::IdentityNotFound(user_id.to_string()))
    }

    /// The user's inputs, newest first.
    pub fn inputs(&self, user_id: &str) -> Vec<FinancialProfileInput> {
        let mut list: Vec<_> = self
            .inputs
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    /// Records an input, recalculates the identity and snapshots it.
    ///
    /// Emits INPUT_ADDED and SNAPSHOT_CREATED audit events, in that order.
    ///
    /// # Errors
    ///
    /// [`DataError::IdentityNotFound`] when the user owns no identity; in
    /// that case nothing is recorded.
    pub fn add_input(&mut self, user_id: &str, input: NewInput) -> Result<InputOutcome, DataError> {
        let prev = self.financial_identity(user_id)?;
        let now = Utc::now();

        let created = FinancialProfileInput {
            id: self.next_id("inp"),
            user_id: user_id.to_string(),
            input_type: input.input_type,
            input_value: input.input_value,
            created_at: now,
        };
        self.inputs.insert(0, created.clone());

        let next = recalculate(&prev, input.input_type, now);
        self.identity = Some(next.clone());

        let snapshot = FinancialIdentitySnapshot {
            id: self.next_id("snp"),
            financial_identity_id: next.id.clone(),
            snapshot_data: next.traits(),
            change_reason: Some(
                input
                    .reason
                    .unwrap_or_else(|| format!("Input update: {}", input.input_type)),
            ),
            created_at: now,
        };
        self.snapshots.insert(0, snapshot.clone());

        let actor = self
            .user(user_id)
            .map(|u| u.email.clone())
            .unwrap_or_else(|| "unknown".to_string());
        let added = self.audit_event(
            user_id,
            &actor,
            AuditAction::InputAdded,
            AuditEntity::FinancialProfileInput,
            Some(created.id.clone()),
            meta([
                ("input_type", created.input_type.as_str()),
                ("input_value", created.input_value.as_str()),
            ]),
            now,
        );
        self.record(added);

        let reason = snapshot.change_reason.clone().unwrap_or_default();
        let snapped = self.audit_event(
            user_id,
            SYSTEM_ACTOR,
            AuditAction::SnapshotCreated,
            AuditEntity::FinancialIdentitySnapshot,
            Some(snapshot.id.clone()),
            meta([("reason", reason.as_str())]),
            now,
        );
        self.record(snapped);

        debug!(
            user = user_id,
            score = next.income_stability_score,
            "identity recalculated"
        );
        Ok(InputOutcome {
            input: created,
            identity: next,
            snapshot,
        })
    }

    /// Snapshots of the user's identity, newest first.
    ///
    /// Empty when the user owns no identity.
    pub fn snapshots(&self, user_id: &str) -> Vec<FinancialIdentitySnapshot> {
        let Some(identity) = self.identity.as_ref().filter(|i| i.user_id == user_id) else {
            return Vec::new();
        };
        let mut list: Vec<_> = self
            .snapshots
            .iter()
            .filter(|s| s.financial_identity_id == identity.id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    // -----------------------------------------------------------------------
    // Audit and integrity
    // -----------------------------------------------------------------------

    /// Audit events newest first, optionally restricted to one user.
    pub fn audit_events(&self, user_id: Option<&str>) -> Vec<AuditEvent> {
        let mut list: Vec<_> = self
            .audit
            .iter()
            .filter(|e| user_id.map_or(true, |id| e.user_id == id))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    /// Runs the ledger consistency check and records it.
    ///
    /// The check history is capped at [`MAX_INTEGRITY_CHECKS`].
    pub fn run_integrity_check(&mut self) -> IntegrityCheck {
        let verdict =
            integrity::evaluate(self.identity.as_ref(), &self.snapshots, &self.audit);
        let now = Utc::now();
        let check = IntegrityCheck {
            id: self.next_id("ic"),
            status: verdict.status,
            name: verdict.name,
            detail: verdict.detail,
            created_at: now,
        };
        self.integrity_checks.insert(0, check.clone());
        self.integrity_checks.truncate(MAX_INTEGRITY_CHECKS);

        let event = self.audit_event(
            "u_admin",
            SYSTEM_ACTOR,
            AuditAction::IntegrityCheck,
            AuditEntity::AuditEvent,
            None,
            meta([("status", check.status.as_str()), ("check_id", check.id.as_str())]),
            now,
        );
        self.record(event);
        check
    }

    /// Integrity checks, newest first.
    pub fn integrity_checks(&self) -> Vec<IntegrityCheck> {
        self.integrity_checks.clone()
    }

    /// The single stored identity, whoever owns it.
    pub fn identity(&self) -> Option<&FinancialIdentity> {
        self.identity.as_ref()
    }

    /// Overwrites the stored identity; used to simulate drift.
    pub fn set_identity(&mut self, identity: Option<FinancialIdentity>) {
        self.identity = identity;
    }
}

impl Default for MockDb {
    fn default() -> Self {
        Self::seeded(Utc::now())
    }
}

fn meta<const N: usize>(pairs: [(&str, &str); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
