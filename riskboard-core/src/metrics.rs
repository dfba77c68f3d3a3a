//! Dashboard rollups over fetched records
//!
//! Global invariants enforced:
//! - Rollups are strictly derived (never stored, always computed)
//! - Input collections are never modified
//! - The current time is an explicit argument; review dates compare in UTC calendar days
//! - Averages over empty sets are 0

use crate::normalize::{hours_between, mean, or_zero};
use crate::records::{CarbonRecord, CrisisRecord, IncidentRecord, ProgramRecord};
use crate::vocab::{CrisisStatus, EmissionScope, IncidentStatus, ProgramStatus, Severity};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default look-ahead for upcoming programme reviews
pub const DEFAULT_REVIEW_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProgramMetrics {
    pub total_programs: usize,
    pub active_programs: usize,
    pub draft_programs: usize,
    pub inactive_programs: usize,
    pub under_review_programs: usize,
    /// Mean maturity score (25-100), rounded
    pub avg_maturity_score: u32,
    /// Review date is today or already past
    pub programs_needing_review: usize,
    /// Review date falls within the look-ahead window
    pub upcoming_reviews: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IncidentMetrics {
    pub total_incidents: usize,
    pub open_incidents: usize,
    pub investigating_incidents: usize,
    pub resolved_incidents: usize,
    pub critical_incidents: usize,
    pub high_priority_incidents: usize,
    pub avg_resolution_time_hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CrisisMetrics {
    pub total_crises: usize,
    pub active_crises: usize,
    pub escalated_crises: usize,
    pub resolved_crises: usize,
    pub critical_crises: usize,
    pub avg_resolution_time_hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CarbonSummary {
    pub scope1_total: f64,
    pub scope2_total: f64,
    pub scope3_total: f64,
    pub total_emissions: f64,
}

/// Compute programme metrics with the default 30-day review window
pub fn compute_program_metrics(programs: &[ProgramRecord], now: DateTime<Utc>) -> ProgramMetrics {
    compute_program_metrics_with_window(programs, now, DEFAULT_REVIEW_WINDOW_DAYS)
}

pub fn compute_program_metrics_with_window(
    programs: &[ProgramRecord],
    now: DateTime<Utc>,
    review_window_days: u32,
) -> ProgramMetrics {
    let today = now.date_naive();
    let horizon = today
        .checked_add_signed(Duration::days(i64::from(review_window_days)))
        .unwrap_or(NaiveDate::MAX);
    let count_status =
        |status: ProgramStatus| programs.iter().filter(|p| p.status == status).count();

    let avg_maturity = mean(
        programs
            .iter()
            .map(|p| f64::from(p.maturity_level.score())),
    );

    let mut programs_needing_review = 0;
    let mut upcoming_reviews = 0;
    for review in programs.iter().filter_map(|p| p.next_review_date) {
        if review <= today {
            programs_needing_review += 1;
        } else if review <= horizon {
            upcoming_reviews += 1;
        }
    }

    ProgramMetrics {
        total_programs: programs.len(),
        active_programs: count_status(ProgramStatus::Active),
        draft_programs: count_status(ProgramStatus::Draft),
        inactive_programs: count_status(ProgramStatus::Inactive),
        under_review_programs: count_status(ProgramStatus::UnderReview),
        avg_maturity_score: avg_maturity.round() as u32,
        programs_needing_review,
        upcoming_reviews,
    }
}

pub fn compute_incident_metrics(incidents: &[IncidentRecord]) -> IncidentMetrics {
    let count_status =
        |status: IncidentStatus| incidents.iter().filter(|i| i.status == status).count();

    let avg_resolution_time_hours = mean(
        incidents
            .iter()
            .filter_map(|i| i.resolved_at.map(|resolved| hours_between(i.created_at, resolved))),
    );

    IncidentMetrics {
        total_incidents: incidents.len(),
        open_incidents: count_status(IncidentStatus::Open),
        investigating_incidents: count_status(IncidentStatus::Investigating),
        resolved_incidents: count_status(IncidentStatus::Resolved),
        critical_incidents: incidents
            .iter()
            .filter(|i| i.severity == Severity::Critical)
            .count(),
        high_priority_incidents: incidents.iter().filter(|i| i.priority.is_high_plus()).count(),
        avg_resolution_time_hours,
    }
}

pub fn compute_crisis_metrics(crises: &[CrisisRecord]) -> CrisisMetrics {
    let count_status = |status: CrisisStatus| crises.iter().filter(|c| c.status == status).count();

    let avg_resolution_time_hours = mean(
        crises
            .iter()
            .filter_map(|c| c.resolved_at.map(|resolved| hours_between(c.declared_at, resolved))),
    );

    CrisisMetrics {
        total_crises: crises.len(),
        active_crises: count_status(CrisisStatus::Active),
        escalated_crises: count_status(CrisisStatus::Escalated),
        resolved_crises: count_status(CrisisStatus::Resolved),
        critical_crises: crises
            .iter()
            .filter(|c| c.severity == Severity::Critical)
            .count(),
        avg_resolution_time_hours,
    }
}

/// Sum CO2-equivalent per scope (missing values count as 0)
pub fn compute_carbon_summary(records: &[CarbonRecord]) -> CarbonSummary {
    let mut summary = CarbonSummary::default();

    for record in records {
        let amount = or_zero(record.co2_equivalent);
        match record.scope {
            EmissionScope::Scope1 => summary.scope1_total += amount,
            EmissionScope::Scope2 => summary.scope2_total += amount,
            EmissionScope::Scope3 => summary.scope3_total += amount,
        }
    }

    summary.total_emissions = summary.scope1_total + summary.scope2_total + summary.scope3_total;
    summary
}
