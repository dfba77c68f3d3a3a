//! Invariant Tests
//!
//! These tests explicitly validate properties that must always hold for the
//! scoring and aggregation functions. Run in CI to prevent regressions.

use chrono::{Duration, TimeZone, Utc};
use riskboard_core::records::{CarbonRecord, IncidentRecord};
use riskboard_core::vocab::{
    EmissionScope, IncidentStatus, MaterialityLevel, Priority, Probability, Severity,
};
use riskboard_core::{
    classify_materiality, compute_carbon_summary, compute_goal_progress,
    compute_incident_metrics, compute_program_metrics, compute_scenario_risk_score,
    score_scenario, ProgramMetrics, ScoringError,
};

fn incident(hours: Option<i64>) -> IncidentRecord {
    let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    IncidentRecord {
        id: "i".to_string(),
        title: "synthetic".to_string(),
        status: if hours.is_some() {
            IncidentStatus::Resolved
        } else {
            IncidentStatus::Open
        },
        severity: Severity::Medium,
        priority: Priority::Low,
        created_at,
        resolved_at: hours.map(|h| created_at + Duration::hours(h)),
    }
}

#[test]
fn test_materiality_level_is_monotonic_in_scores() {
    let mut previous = MaterialityLevel::Low;
    for step in 0..=40 {
        let score = step as f64 * 0.125;
        let level = classify_materiality(Some(score), Some(score)).level;
        assert!(
            level.ordinal() >= previous.ordinal(),
            "level dropped at combined score {}",
            score
        );
        previous = level;
    }
    assert_eq!(previous, MaterialityLevel::Critical);
}

#[test]
fn test_goal_progress_always_within_bounds() {
    let values = [-1000.0, -1.0, 0.0, 0.5, 7.0, 99.0, 100.0, 1e6];
    for baseline in values {
        for target in values {
            for current in values {
                let p = compute_goal_progress(Some(baseline), Some(target), Some(current));
                assert!(
                    (0.0..=100.0).contains(&p),
                    "progress {} out of range for ({}, {}, {})",
                    p,
                    baseline,
                    target,
                    current
                );
            }
        }
    }
}

#[test]
fn test_scenario_score_matches_string_and_typed_paths() {
    for severity in Severity::ALL {
        for probability in Probability::ALL {
            let typed = compute_scenario_risk_score(*severity, *probability);
            let parsed = score_scenario(severity.as_str(), probability.as_str()).unwrap();
            assert_eq!(typed, parsed);
            assert_eq!(typed, severity.ordinal() * probability.ordinal());
        }
    }
    assert_eq!(score_scenario("critical", "very_high"), Ok(20));
    assert_eq!(score_scenario("low", "very_low"), Ok(1));
}

#[test]
fn test_unknown_vocabulary_never_defaults() {
    assert!(matches!(
        score_scenario("unknown", "low"),
        Err(ScoringError::InvalidEnumValue {
            field: "severity",
            ..
        })
    ));
    assert!(matches!(
        score_scenario("low", "never"),
        Err(ScoringError::InvalidEnumValue {
            field: "probability",
            ..
        })
    ));
}

#[test]
fn test_incident_average_over_resolved_subset() {
    for resolved in 0..=5usize {
        let mut incidents: Vec<IncidentRecord> = (0..3).map(|_| incident(None)).collect();
        let durations: Vec<i64> = (1..=resolved as i64).map(|n| n * 3).collect();
        incidents.extend(durations.iter().map(|h| incident(Some(*h))));

        let metrics = compute_incident_metrics(&incidents);
        let expected = if durations.is_empty() {
            0.0
        } else {
            durations.iter().sum::<i64>() as f64 / durations.len() as f64
        };
        assert_eq!(metrics.total_incidents, 3 + resolved);
        assert_eq!(metrics.resolved_incidents, resolved);
        assert_eq!(metrics.avg_resolution_time_hours, expected);
    }
}

#[test]
fn test_carbon_total_is_sum_of_scopes() {
    let records: Vec<CarbonRecord> = [
        (EmissionScope::Scope1, Some(1.5)),
        (EmissionScope::Scope3, Some(40.0)),
        (EmissionScope::Scope2, None),
        (EmissionScope::Scope3, Some(2.5)),
    ]
    .into_iter()
    .map(|(scope, co2_equivalent)| CarbonRecord {
        scope,
        co2_equivalent,
    })
    .collect();

    let summary = compute_carbon_summary(&records);
    assert_eq!(summary.scope1_total, 1.5);
    assert_eq!(summary.scope2_total, 0.0);
    assert_eq!(summary.scope3_total, 42.5);
    assert_eq!(
        summary.total_emissions,
        summary.scope1_total + summary.scope2_total + summary.scope3_total
    );
}

#[test]
fn test_empty_inputs_never_panic() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(compute_program_metrics(&[], now), ProgramMetrics::default());
    assert_eq!(compute_incident_metrics(&[]).avg_resolution_time_hours, 0.0);
    assert_eq!(compute_carbon_summary(&[]).total_emissions, 0.0);
}
