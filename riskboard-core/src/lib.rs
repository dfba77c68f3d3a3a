//! Riskboard core library - scoring and metrics for ESG and resilience dashboards

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Scoring and aggregation functions are pure and synchronous
// - No global mutable state, no hidden clocks (callers pass `now`)
// - Unknown vocabulary values are errors, never a default rank
// - Degenerate arithmetic (empty sets, zero-length intervals) yields 0
// - Identical input yields byte-for-byte identical output

pub mod config;
pub mod dashboard;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod query;
pub mod records;
pub mod report;
pub mod scoring;
pub mod source;
pub mod vocab;

pub use config::ResolvedConfig;
pub use dashboard::{build_dashboard, Dashboard};
pub use error::ScoringError;
pub use metrics::{
    compute_carbon_summary, compute_crisis_metrics, compute_incident_metrics,
    compute_program_metrics, CarbonSummary, CrisisMetrics, IncidentMetrics, ProgramMetrics,
};
pub use query::{filter_and_sort_programs, ProgramQuery, RawProgramQuery};
pub use report::{render_json, render_programs_json, render_programs_text, render_text};
pub use scoring::{
    classify_materiality, compute_goal_progress, compute_scenario_risk_score, score_scenario,
    MaterialityClassification,
};
pub use source::{Dataset, JsonFileSource, RecordSource};
