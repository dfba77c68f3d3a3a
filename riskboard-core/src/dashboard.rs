//! Dashboard rollup
//!
//! Pulls every collection from a [`RecordSource`] and runs the scoring and aggregation
//! functions over it.
//!
//! Global invariants enforced:
//! - Deterministic ordering of per-item score lists
//! - Source records are read, never modified

use crate::config::ResolvedConfig;
use crate::metrics::{
    compute_carbon_summary, compute_crisis_metrics, compute_incident_metrics,
    compute_program_metrics_with_window, CarbonSummary, CrisisMetrics, IncidentMetrics,
    ProgramMetrics,
};
use crate::records::{Goal, MaterialityAssessment, ScenarioRiskInput};
use crate::scoring::{
    classify_materiality_with_thresholds, compute_goal_progress, compute_scenario_risk_score,
    scenario_risk_level, MaterialityThresholds,
};
use crate::source::RecordSource;
use crate::vocab::{MaterialityLevel, Probability, RiskLevel, Severity};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Materiality classification for one topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TopicMateriality {
    pub topic: String,
    pub combined_score: f64,
    pub level: MaterialityLevel,
    /// One or both scores were missing and counted as 0
    pub insufficient_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GoalProgress {
    pub name: String,
    pub progress_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScenarioScore {
    pub name: String,
    pub severity: Severity,
    pub probability: Probability,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
}

/// Everything the dashboards display, computed at `generated_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub programs: ProgramMetrics,
    pub incidents: IncidentMetrics,
    pub crises: CrisisMetrics,
    pub carbon: CarbonSummary,
    pub materiality: Vec<TopicMateriality>,
    pub goals: Vec<GoalProgress>,
    pub scenarios: Vec<ScenarioScore>,
}

/// Score every assessment, highest combined score first, then by topic
pub fn score_materiality(
    assessments: &[MaterialityAssessment],
    thresholds: &MaterialityThresholds,
) -> Vec<TopicMateriality> {
    let mut topics: Vec<TopicMateriality> = assessments
        .iter()
        .map(|a| {
            let classification =
                classify_materiality_with_thresholds(a.impact_score, a.financial_score, thresholds);
            TopicMateriality {
                topic: a.topic.clone(),
                combined_score: classification.combined_score,
                level: classification.level,
                insufficient_data: a.impact_score.is_none() || a.financial_score.is_none(),
            }
        })
        .collect();

    topics.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.topic.cmp(&b.topic))
    });
    topics
}

/// Progress for every goal, in input order
pub fn score_goals(goals: &[Goal]) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|g| GoalProgress {
            name: g.name.clone(),
            progress_percentage: compute_goal_progress(
                g.baseline_value,
                g.target_value,
                g.current_value,
            ),
        })
        .collect()
}

/// Score every scenario, highest risk first, then by name
pub fn score_scenarios(scenarios: &[ScenarioRiskInput]) -> Vec<ScenarioScore> {
    let mut scores: Vec<ScenarioScore> = scenarios
        .iter()
        .map(|s| {
            let risk_score = compute_scenario_risk_score(s.severity, s.probability);
            ScenarioScore {
                name: s.name.clone(),
                severity: s.severity,
                probability: s.probability,
                risk_score,
                risk_level: scenario_risk_level(risk_score),
            }
        })
        .collect();

    scores.sort_by(|a, b| {
        b.risk_score
            .cmp(&a.risk_score)
            .then_with(|| a.name.cmp(&b.name))
    });
    scores
}

/// Build the full dashboard from a record source
pub fn build_dashboard(
    source: &dyn RecordSource,
    now: DateTime<Utc>,
    config: &ResolvedConfig,
) -> Result<Dashboard> {
    let programs = source.programs().context("failed to fetch programs")?;
    let incidents = source.incidents().context("failed to fetch incidents")?;
    let crises = source.crises().context("failed to fetch crises")?;
    let carbon = source
        .carbon_records()
        .context("failed to fetch carbon records")?;
    let goals = source.goals().context("failed to fetch goals")?;
    let assessments = source
        .materiality_assessments()
        .context("failed to fetch materiality assessments")?;
    let scenarios = source.scenarios().context("failed to fetch scenarios")?;

    tracing::debug!(
        programs = programs.len(),
        incidents = incidents.len(),
        crises = crises.len(),
        carbon = carbon.len(),
        goals = goals.len(),
        materiality = assessments.len(),
        scenarios = scenarios.len(),
        "building dashboard"
    );

    let materiality = score_materiality(&assessments, &config.materiality);
    let missing = materiality.iter().filter(|t| t.insufficient_data).count();
    if missing > 0 {
        tracing::warn!(
            topics = missing,
            "materiality topics with missing scores were counted as 0"
        );
    }

    Ok(Dashboard {
        generated_at: now,
        programs: compute_program_metrics_with_window(&programs, now, config.review_window_days),
        incidents: compute_incident_metrics(&incidents),
        crises: compute_crisis_metrics(&crises),
        carbon: compute_carbon_summary(&carbon),
        materiality,
        goals: score_goals(&goals),
        scenarios: score_scenarios(&scenarios),
    })
}
