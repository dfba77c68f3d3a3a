//! Record shapes supplied by the record source
//!
//! Records are read-only inputs. Nullable columns are `Option`; enum columns use the
//! closed vocabularies in [`crate::vocab`] so malformed rows fail at deserialization
//! instead of flowing into a rollup with a guessed rank.

use crate::vocab::{
    CrisisStatus, EmissionScope, IncidentStatus, MaturityLevel, Priority, Probability,
    ProgramStatus, Severity,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Double-materiality assessment for one topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MaterialityAssessment {
    pub topic: String,
    #[serde(default)]
    pub impact_score: Option<f64>,
    #[serde(default)]
    pub financial_score: Option<f64>,
}

/// ESG goal tracked from a baseline toward a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Goal {
    pub name: String,
    #[serde(default)]
    pub baseline_value: Option<f64>,
    #[serde(default)]
    pub target_value: Option<f64>,
    #[serde(default)]
    pub current_value: Option<f64>,
}

/// Scenario analysis inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScenarioRiskInput {
    pub name: String,
    pub severity: Severity,
    pub probability: Probability,
}

/// Single emissions entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CarbonRecord {
    pub scope: EmissionScope,
    #[serde(default)]
    pub co2_equivalent: Option<f64>,
}

/// Resilience programme row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProgramRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    pub status: ProgramStatus,
    pub maturity_level: MaturityLevel,
    #[serde(default)]
    pub next_review_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IncidentRecord {
    pub id: String,
    pub title: String,
    pub status: IncidentStatus,
    pub severity: Severity,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CrisisRecord {
    pub id: String,
    pub title: String,
    pub status: CrisisStatus,
    pub severity: Severity,
    pub declared_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}
