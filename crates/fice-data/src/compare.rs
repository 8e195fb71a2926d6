//! Field-by-field comparison of the two newest identity snapshots.

use crate::types::{FinancialIdentitySnapshot, IdentityTraits};

/// One trait of snapshot A (newest) next to the same trait of snapshot B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    /// Wire name of the trait, e.g. `income_stability_score`.
    pub field: &'static str,
    pub a: String,
    pub b: String,
    pub changed: bool,
}

impl FieldDiff {
    fn new(field: &'static str, a: String, b: String) -> Self {
        let changed = a != b;
        Self { field, a, b, changed }
    }
}

/// Compares two trait sets in wire field order.
pub fn compare_traits(a: &IdentityTraits, b: &IdentityTraits) -> Vec<FieldDiff> {
    vec![
        FieldDiff::new("income_type", a.income_type.to_string(), b.income_type.to_string()),
        FieldDiff::new(
            "income_stability_score",
            a.income_stability_score.to_string(),
            b.income_stability_score.to_string(),
        ),
        FieldDiff::new(
            "risk_tolerance",
            a.risk_tolerance.to_string(),
            b.risk_tolerance.to_string(),
        ),
        FieldDiff::new(
            "decision_style",
            a.decision_style.to_string(),
            b.decision_style.to_string(),
        ),
    ]
}

/// Compares snapshot 0 with snapshot 1 of a newest-first list.
///
/// `None` when fewer than two snapshots exist.
pub fn compare_snapshots(snapshots: &[FinancialIdentitySnapshot]) -> Option<Vec<FieldDiff>> {
    match snapshots {
        [a, b, ..] => Some(compare_traits(&a.snapshot_data, &b.snapshot_data)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DecisionStyle, IncomeType, RiskTolerance};
    use chrono::Utc;

    fn snapshot(id: &str, score: u8, risk: RiskTolerance) -> FinancialIdentitySnapshot {
        FinancialIdentitySnapshot {
            id: id.into(),
            financial_identity_id: "fi_1".into(),
            snapshot_data: IdentityTraits {
                income_type: IncomeType::Fixed,
                income_stability_score: score,
                risk_tolerance: risk,
                decision_style: DecisionStyle::Balanced,
            },
            change_reason: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn changed_fields_are_flagged() {
        let diffs = compare_snapshots(&[
            snapshot("snp_2", 80, RiskTolerance::High),
            snapshot("snp_1", 76, RiskTolerance::Medium),
        ])
        .unwrap();

        let score = diffs
            .iter()
            .find(|d| d.field == "income_stability_score")
            .unwrap();
        assert_eq!((score.a.as_str(), score.b.as_str()), ("80", "76"));
        assert!(score.changed);

        let risk = diffs.iter().find(|d| d.field == "risk_tolerance").unwrap();
        assert!(risk.changed);
    }

    #[test]
    fn unchanged_fields_are_not_flagged() {
        let diffs = compare_snapshots(&[
            snapshot("snp_2", 80, RiskTolerance::High),
            snapshot("snp_1", 80, RiskTolerance::High),
        ])
        .unwrap();
        assert_eq!(diffs.len(), 4);
        assert!(diffs.iter().all(|d| !d.changed));
        assert_eq!(diffs[0].field, "income_type");
    }

    #[test]
    fn only_the_two_newest_are_compared() {
        let diffs = compare_snapshots(&[
            snapshot("snp_3", 70, RiskTolerance::Medium),
            snapshot("snp_2", 70, RiskTolerance::Medium),
            snapshot("snp_1", 40, RiskTolerance::Low),
        ])
        .unwrap();
        assert!(diffs.iter().all(|d| !d.changed));
    }

    #[test]
    fn fewer_than_two_snapshots_is_none() {
        assert_eq!(compare_snapshots(&[]), None);
        assert_eq!(
            compare_snapshots(&[snapshot("snp_1", 76, RiskTolerance::Low)]),
            None
        );
    }
}
