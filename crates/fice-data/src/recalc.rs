//! Deterministic identity recalculation.
//!
//! Recording a new input nudges the stability score by a fixed amount per
//! input type and re-derives risk tolerance and decision style. Income type
//! is never changed by an input.

use chrono::{DateTime, Utc};

use crate::types::{DecisionStyle, FinancialIdentity, InputType, RiskTolerance};

/// Lowest stability score an input can push the identity to.
pub const MIN_SCORE: u8 = 30;
/// Highest stability score an input can push the identity to.
pub const MAX_SCORE: u8 = 95;

/// Score change contributed by one input of the given type.
pub fn score_delta(input_type: InputType) -> i16 {
    match input_type {
        InputType::Salary | InputType::Savings => 2,
        InputType::Freelance | InputType::Expenses | InputType::CardUsage => -1,
        InputType::Loan => -2,
    }
}

/// Risk tolerance implied by a stability score.
pub fn risk_for_score(score: u8) -> RiskTolerance {
    match score {
        80.. => RiskTolerance::High,
        60..=79 => RiskTolerance::Medium,
        _ => RiskTolerance::Low,
    }
}

/// Decision style implied by the most recent input type.
pub fn style_for_input(input_type: InputType) -> DecisionStyle {
    match input_type {
        InputType::Savings => DecisionStyle::Conservative,
        InputType::Loan | InputType::CardUsage => DecisionStyle::Aggressive,
        InputType::Salary | InputType::Freelance | InputType::Expenses => DecisionStyle::Balanced,
    }
}

/// Returns the identity that results from recording `input_type` at `now`.
pub fn recalculate(
    prev: &FinancialIdentity,
    input_type: InputType,
    now: DateTime<Utc>,
) -> FinancialIdentity {
    let raw = i16::from(prev.income_stability_score) + score_delta(input_type);
    let score = raw.clamp(i16::from(MIN_SCORE), i16::from(MAX_SCORE)) as u8;

    FinancialIdentity {
        income_stability_score: score,
        risk_tolerance: risk_for_score(score),
        decision_style: style_for_input(input_type),
        last_updated: now,
        ..prev.clone()
    }
}
