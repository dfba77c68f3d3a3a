//! Materiality, goal progress, and scenario risk scoring
//!
//! Global invariants enforced:
//! - Pure functions, no I/O, no clocks
//! - Degenerate inputs yield 0, unknown vocabulary yields `InvalidEnumValue`
//! - Level ladders are monotonic in the score

use crate::error::ScoringError;
use crate::normalize::{clamp_percentage, or_zero};
use crate::vocab::{MaterialityLevel, Probability, RiskLevel, Severity};
use serde::{Deserialize, Serialize};

/// Combined double-materiality score and its level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MaterialityClassification {
    pub combined_score: f64,
    pub level: MaterialityLevel,
}

/// Lower bounds (inclusive) of each materiality level above `low`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialityThresholds {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for MaterialityThresholds {
    fn default() -> Self {
        MaterialityThresholds {
            medium: 2.5,
            high: 3.5,
            critical: 4.5,
        }
    }
}

/// Assign a materiality level to a combined score with the default ladder
pub fn assign_materiality_level(combined_score: f64) -> MaterialityLevel {
    assign_materiality_level_with_thresholds(combined_score, &MaterialityThresholds::default())
}

pub fn assign_materiality_level_with_thresholds(
    combined_score: f64,
    thresholds: &MaterialityThresholds,
) -> MaterialityLevel {
    if combined_score >= thresholds.critical {
        MaterialityLevel::Critical
    } else if combined_score >= thresholds.high {
        MaterialityLevel::High
    } else if combined_score >= thresholds.medium {
        MaterialityLevel::Medium
    } else {
        MaterialityLevel::Low
    }
}

/// Classify a topic from its impact and financial scores (conventionally 1-5)
///
/// Missing scores count as 0, so a topic with no scores reports `low`.
/// Use [`classify_materiality_checked`] to distinguish "no data" from "low".
pub fn classify_materiality(
    impact_score: Option<f64>,
    financial_score: Option<f64>,
) -> MaterialityClassification {
    classify_materiality_with_thresholds(
        impact_score,
        financial_score,
        &MaterialityThresholds::default(),
    )
}

pub fn classify_materiality_with_thresholds(
    impact_score: Option<f64>,
    financial_score: Option<f64>,
    thresholds: &MaterialityThresholds,
) -> MaterialityClassification {
    let combined_score = (or_zero(impact_score) + or_zero(financial_score)) / 2.0;
    MaterialityClassification {
        combined_score,
        level: assign_materiality_level_with_thresholds(combined_score, thresholds),
    }
}

/// Like [`classify_materiality`], but `None` when either score is missing
pub fn classify_materiality_checked(
    impact_score: Option<f64>,
    financial_score: Option<f64>,
    thresholds: &MaterialityThresholds,
) -> Option<MaterialityClassification> {
    match (impact_score, financial_score) {
        (Some(impact), Some(financial)) => Some(classify_materiality_with_thresholds(
            Some(impact),
            Some(financial),
            thresholds,
        )),
        _ => None,
    }
}

/// Percentage of the baseline→target interval covered by `current`, clamped to [0, 100]
///
/// Returns 0 when baseline or target is missing, or when they are equal.
/// Works for decreasing goals (target below baseline). A missing current value counts as 0.
pub fn compute_goal_progress(
    baseline: Option<f64>,
    target: Option<f64>,
    current: Option<f64>,
) -> f64 {
    let (baseline, target) = match (baseline, target) {
        (Some(b), Some(t)) if t != b => (b, t),
        _ => return 0.0,
    };
    let current = or_zero(current);
    clamp_percentage((current - baseline) / (target - baseline) * 100.0)
}

/// Scenario risk score: severity rank (1-4) × probability rank (1-5), range [1, 20]
pub fn compute_scenario_risk_score(severity: Severity, probability: Probability) -> u32 {
    severity.ordinal() * probability.ordinal()
}

/// Scenario risk score from raw vocabulary strings
pub fn score_scenario(severity: &str, probability: &str) -> Result<u32, ScoringError> {
    let severity: Severity = severity.parse()?;
    let probability: Probability = probability.parse()?;
    Ok(compute_scenario_risk_score(severity, probability))
}

/// Display bucket for a scenario risk score
///
/// 1-4 low, 5-9 medium, 10-14 high, 15-20 critical
pub fn scenario_risk_level(score: u32) -> RiskLevel {
    match score {
        0..=4 => RiskLevel::Low,
        5..=9 => RiskLevel::Medium,
        10..=14 => RiskLevel::High,
        _ => RiskLevel::Critical,
    }
}
