//! Domain records for the FICE (financial identity) and TACL (audit) demo.
//!
//! Field names and enum spellings match the JSON the web backends emit, so
//! the same types decode HTTP responses and serialize mock data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Implements `Display` by delegating to the type's `as_str`.
macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

// ---------------------------------------------------------------------------
// Roles and users
// ---------------------------------------------------------------------------

/// Coarse permission context selecting default layouts and audit scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Administrator: sees all audit events.
    Admin,
    /// Regular user: sees only their own records.
    User,
}

impl Role {
    /// Wire spelling (`"Admin"` / `"User"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    /// The other role; used by the demo role switcher.
    pub fn toggled(self) -> Role {
        match self {
            Role::Admin => Role::User,
            Role::User => Role::Admin,
        }
    }
}

/// Error type for parsing a [`Role`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role: {} (expected admin or user)", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Blocked,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Blocked => "blocked",
        }
    }
}

/// A console account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

/// Login session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Revoked,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Revoked => "revoked",
        }
    }
}

/// A device login tracked for the sessions admin view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: String,
    pub user_id: String,
    pub device: String,
    pub ip: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    pub status: SessionStatus,
}

/// Token issued by a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthToken {
    pub token: String,
    pub user_id: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Financial identity
// ---------------------------------------------------------------------------

/// Kind of financial profile input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Salary,
    Freelance,
    Expenses,
    Loan,
    Savings,
    CardUsage,
}

impl InputType {
    /// All input types in display order.
    pub const ALL: [InputType; 6] = [
        InputType::Salary,
        InputType::Freelance,
        InputType::Expenses,
        InputType::Loan,
        InputType::Savings,
        InputType::CardUsage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Salary => "salary",
            InputType::Freelance => "freelance",
            InputType::Expenses => "expenses",
            InputType::Loan => "loan",
            InputType::Savings => "savings",
            InputType::CardUsage => "card_usage",
        }
    }
}

/// Error type for parsing an [`InputType`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseInputTypeError(pub String);

impl fmt::Display for ParseInputTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid input type: {}", self.0)
    }
}

impl std::error::Error for ParseInputTypeError {}

impl FromStr for InputType {
    type Err = ParseInputTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('-', "_");
        InputType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ParseInputTypeError(s.to_string()))
    }
}

/// A raw financial fact entered by the user (salary, expenses, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfileInput {
    pub id: String,
    pub user_id: String,
    pub input_type: InputType,
    pub input_value: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeType {
    Fixed,
    Mixed,
    Variable,
}

impl IncomeType {
    pub fn as_str(self) -> &'static str {
        match self {
            IncomeType::Fixed => "fixed",
            IncomeType::Mixed => "mixed",
            IncomeType::Variable => "variable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskTolerance::Low => "low",
            RiskTolerance::Medium => "medium",
            RiskTolerance::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStyle {
    Conservative,
    Balanced,
    Aggressive,
}

impl DecisionStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionStyle::Conservative => "conservative",
            DecisionStyle::Balanced => "balanced",
            DecisionStyle::Aggressive => "aggressive",
        }
    }
}

/// The derived traits of a financial identity.
///
/// This is also the payload captured by every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityTraits {
    pub income_type: IncomeType,
    /// Stability score in `0..=100`.
    pub income_stability_score: u8,
    pub risk_tolerance: RiskTolerance,
    pub decision_style: DecisionStyle,
}

/// The current financial identity of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialIdentity {
    pub id: String,
    pub user_id: String,
    pub income_type: IncomeType,
    pub income_stability_score: u8,
    pub risk_tolerance: RiskTolerance,
    pub decision_style: DecisionStyle,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl FinancialIdentity {
    /// Extracts the trait set captured by snapshots.
    pub fn traits(&self) -> IdentityTraits {
        IdentityTraits {
            income_type: self.income_type,
            income_stability_score: self.income_stability_score,
            risk_tolerance: self.risk_tolerance,
            decision_style: self.decision_style,
        }
    }
}

/// A historical record of an identity, captured on each input change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialIdentitySnapshot {
    pub id: String,
    pub financial_identity_id: String,
    pub snapshot_data: IdentityTraits,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Audit and integrity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Login,
    Logout,
    InputAdded,
    SnapshotCreated,
    IntegrityCheck,
    UserBlocked,
    UserActivated,
    SessionRevoked,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Login => "LOGIN",
            AuditAction::Logout => "LOGOUT",
            AuditAction::InputAdded => "INPUT_ADDED",
            AuditAction::SnapshotCreated => "SNAPSHOT_CREATED",
            AuditAction::IntegrityCheck => "INTEGRITY_CHECK",
            AuditAction::UserBlocked => "USER_BLOCKED",
            AuditAction::UserActivated => "USER_ACTIVATED",
            AuditAction::SessionRevoked => "SESSION_REVOKED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntity {
    User,
    UserSession,
    FinancialProfileInput,
    FinancialIdentity,
    FinancialIdentitySnapshot,
    AuditEvent,
}

impl AuditEntity {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditEntity::User => "user",
            AuditEntity::UserSession => "user_session",
            AuditEntity::FinancialProfileInput => "financial_profile_input",
            AuditEntity::FinancialIdentity => "financial_identity",
            AuditEntity::FinancialIdentitySnapshot => "financial_identity_snapshot",
            AuditEntity::AuditEvent => "audit_event",
        }
    }
}

/// An entry in the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: String,
    pub user_id: String,
    /// Email of the acting user, or `"system"`.
    pub actor: String,
    pub action: AuditAction,
    pub entity: AuditEntity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntegrityStatus {
    Ok,
    Warn,
}

impl IntegrityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IntegrityStatus::Ok => "OK",
            IntegrityStatus::Warn => "WARN",
        }
    }
}

/// Result of one ledger verification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityCheck {
    pub id: String,
    pub status: IntegrityStatus,
    pub name: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
}

display_as_str!(
    Role,
    UserStatus,
    SessionStatus,
    InputType,
    IncomeType,
    RiskTolerance,
    DecisionStyle,
    AuditAction,
    AuditEntity,
    IntegrityStatus,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("USER".parse::<Role>(), Ok(Role::User));
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_with_capitalized_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
        let parsed: Role = serde_json::from_str("\"User\"").unwrap();
        assert_eq!(parsed, Role::User);
    }

    #[test]
    fn role_toggled_flips() {
        assert_eq!(Role::Admin.toggled(), Role::User);
        assert_eq!(Role::User.toggled(), Role::Admin);
    }

    #[test]
    fn input_type_accepts_dash_or_underscore() {
        assert_eq!("card_usage".parse::<InputType>(), Ok(InputType::CardUsage));
        assert_eq!("card-usage".parse::<InputType>(), Ok(InputType::CardUsage));
        assert_eq!("Salary".parse::<InputType>(), Ok(InputType::Salary));
        assert!("bonus".parse::<InputType>().is_err());
    }

    #[test]
    fn wire_spellings_match_backend() {
        assert_eq!(
            serde_json::to_string(&AuditAction::SnapshotCreated).unwrap(),
            "\"SNAPSHOT_CREATED\""
        );
        assert_eq!(
            serde_json::to_string(&AuditEntity::FinancialProfileInput).unwrap(),
            "\"financial_profile_input\""
        );
        assert_eq!(serde_json::to_string(&IntegrityStatus::Warn).unwrap(), "\"WARN\"");
        assert_eq!(serde_json::to_string(&InputType::CardUsage).unwrap(), "\"card_usage\"");
    }

    #[test]
    fn display_uses_wire_spelling() {
        assert_eq!(AuditAction::InputAdded.to_string(), "INPUT_ADDED");
        assert_eq!(RiskTolerance::Medium.to_string(), "medium");
        assert_eq!(IntegrityStatus::Ok.to_string(), "OK");
    }

    #[test]
    fn audit_event_omits_empty_optional_fields() {
        let event = AuditEvent {
            id: "ae_1".to_string(),
            user_id: "u_user".to_string(),
            actor: "system".to_string(),
            action: AuditAction::Logout,
            entity: AuditEntity::UserSession,
            entity_id: None,
            meta: BTreeMap::new(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("entity_id").is_none());
        assert!(json.get("meta").is_none());
    }
}
