//! Widget identifiers, widget state and the role-default layouts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use fice_data::Role;

/// Current layout schema version. Stored layouts with any other version are
/// discarded.
pub const LAYOUT_VERSION: u32 = 1;

/// The five dashboard widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKey {
    IdentitySummary,
    RecentInputs,
    RecentSnapshots,
    RecentAudit,
    IntegrityStatus,
}

impl WidgetKey {
    pub const ALL: [WidgetKey; 5] = [
        WidgetKey::IdentitySummary,
        WidgetKey::RecentInputs,
        WidgetKey::RecentSnapshots,
        WidgetKey::RecentAudit,
        WidgetKey::IntegrityStatus,
    ];

    /// Stable identifier, as persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKey::IdentitySummary => "identity_summary",
            WidgetKey::RecentInputs => "recent_inputs",
            WidgetKey::RecentSnapshots => "recent_snapshots",
            WidgetKey::RecentAudit => "recent_audit",
            WidgetKey::IntegrityStatus => "integrity_status",
        }
    }

    /// Card title.
    pub fn title(self) -> &'static str {
        match self {
            WidgetKey::IdentitySummary => "Financial Identity Summary",
            WidgetKey::RecentInputs => "Recent Inputs",
            WidgetKey::RecentSnapshots => "Recent Snapshots",
            WidgetKey::RecentAudit => "Recent Audit",
            WidgetKey::IntegrityStatus => "Integrity",
        }
    }

    /// Card subtitle naming the backing entity.
    pub fn subtitle(self) -> &'static str {
        match self {
            WidgetKey::IdentitySummary => "financial_identity",
            WidgetKey::RecentInputs => "financial_profile_input",
            WidgetKey::RecentSnapshots => "financial_identity_snapshot",
            WidgetKey::RecentAudit => "audit_event",
            WidgetKey::IntegrityStatus => "TACL Integrity",
        }
    }
}

impl fmt::Display for WidgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a [`WidgetKey`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWidgetKeyError(pub String);

impl fmt::Display for ParseWidgetKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid widget: {}", self.0)
    }
}

impl std::error::Error for ParseWidgetKeyError {}

impl FromStr for WidgetKey {
    type Err = ParseWidgetKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseWidgetKeyError(s.to_string()))
    }
}

/// One widget's slot in the layout.
///
/// Persisted as `{ "key": "<id>", "collapsed": true }`; `collapsed` is
/// omitted when false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetState {
    #[serde(rename = "key")]
    pub id: WidgetKey,
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl WidgetState {
    pub fn new(id: WidgetKey) -> Self {
        Self {
            id,
            collapsed: false,
        }
    }
}

/// An ordered, versioned list of widget states. Order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardLayout {
    pub version: u32,
    pub widgets: Vec<WidgetState>,
}

impl DashboardLayout {
    /// Builds a current-version layout with every widget expanded.
    pub fn from_keys(keys: &[WidgetKey]) -> Self {
        Self {
            version: LAYOUT_VERSION,
            widgets: keys.iter().copied().map(WidgetState::new).collect(),
        }
    }

    /// Widget ids in display order.
    pub fn ids(&self) -> Vec<WidgetKey> {
        self.widgets.iter().map(|w| w.id).collect()
    }

    pub fn position(&self, id: WidgetKey) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }

    pub fn get(&self, id: WidgetKey) -> Option<&WidgetState> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// True when no id appears twice.
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::new();
        self.widgets.iter().all(|w| seen.insert(w.id))
    }
}

/// The canonical default: identity first, audit last. Used for User, for
/// no role, and by reset.
pub fn default_layout() -> DashboardLayout {
    DashboardLayout::from_keys(&[
        WidgetKey::IdentitySummary,
        WidgetKey::IntegrityStatus,
        WidgetKey::RecentInputs,
        WidgetKey::RecentSnapshots,
        WidgetKey::RecentAudit,
    ])
}

/// Default layout for a role. Admin sees integrity and audit first.
pub fn default_layout_for_role(role: Option<Role>) -> DashboardLayout {
    match role {
        Some(Role::Admin) => DashboardLayout::from_keys(&[
            WidgetKey::IntegrityStatus,
            WidgetKey::RecentAudit,
            WidgetKey::RecentSnapshots,
            WidgetKey::RecentInputs,
            WidgetKey::IdentitySummary,
        ]),
        Some(Role::User) | None => default_layout(),
    }
}
