//! Integration tests for dashboard rollups over an exported dataset

use chrono::{DateTime, TimeZone, Utc};
use riskboard_core::config::load_and_resolve;
use riskboard_core::vocab::{MaterialityLevel, RiskLevel, SortDirection, SortKey};
use riskboard_core::{
    build_dashboard, filter_and_sort_programs, render_json, render_text, Dashboard,
    JsonFileSource, ProgramQuery, RawProgramQuery, RecordSource, ResolvedConfig,
};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join("datasets")
        .join(name)
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
}

fn quarterly_dashboard() -> Dashboard {
    let source = JsonFileSource::open(&fixture_path("org-2026q3.json")).unwrap();
    build_dashboard(&source, now(), &ResolvedConfig::defaults().unwrap()).unwrap()
}

#[test]
fn test_program_metrics_from_fixture() {
    let dashboard = quarterly_dashboard();
    let p = &dashboard.programs;
    assert_eq!(p.total_programs, 4);
    assert_eq!(p.active_programs, 2);
    assert_eq!(p.draft_programs, 1);
    assert_eq!(p.inactive_programs, 0);
    assert_eq!(p.under_review_programs, 1);
    // (75 + 100 + 25 + 50) / 4 = 62.5
    assert_eq!(p.avg_maturity_score, 63);
    assert_eq!(p.programs_needing_review, 1);
    assert_eq!(p.upcoming_reviews, 1);
}

#[test]
fn test_incident_and_crisis_metrics_from_fixture() {
    let dashboard = quarterly_dashboard();
    assert_eq!(dashboard.incidents.total_incidents, 3);
    assert_eq!(dashboard.incidents.open_incidents, 1);
    assert_eq!(dashboard.incidents.resolved_incidents, 2);
    assert_eq!(dashboard.incidents.critical_incidents, 1);
    assert_eq!(dashboard.incidents.high_priority_incidents, 2);
    assert_eq!(dashboard.incidents.avg_resolution_time_hours, 6.0);

    assert_eq!(dashboard.crises.total_crises, 2);
    assert_eq!(dashboard.crises.resolved_crises, 1);
    assert_eq!(dashboard.crises.critical_crises, 1);
    assert_eq!(dashboard.crises.avg_resolution_time_hours, 48.0);
}

#[test]
fn test_carbon_and_goals_from_fixture() {
    let dashboard = quarterly_dashboard();
    assert_eq!(dashboard.carbon.scope1_total, 10.0);
    assert_eq!(dashboard.carbon.scope2_total, 5.0);
    assert_eq!(dashboard.carbon.scope3_total, 0.0);
    assert_eq!(dashboard.carbon.total_emissions, 15.0);

    let progress: Vec<f64> = dashboard
        .goals
        .iter()
        .map(|g| g.progress_percentage)
        .collect();
    assert_eq!(progress, vec![50.0, 0.0, 0.0]);
}

#[test]
fn test_materiality_and_scenarios_from_fixture() {
    let dashboard = quarterly_dashboard();
    let levels: Vec<(&str, MaterialityLevel)> = dashboard
        .materiality
        .iter()
        .map(|t| (t.topic.as_str(), t.level))
        .collect();
    assert_eq!(
        levels,
        vec![
            ("Climate change", MaterialityLevel::Critical),
            ("Workforce wellbeing", MaterialityLevel::High),
            ("Water stewardship", MaterialityLevel::Medium),
            ("Biodiversity", MaterialityLevel::Low),
            ("Community relations", MaterialityLevel::Low),
        ]
    );
    assert!(dashboard.materiality[3].insufficient_data);

    let scores: Vec<(u32, RiskLevel)> = dashboard
        .scenarios
        .iter()
        .map(|s| (s.risk_score, s.risk_level))
        .collect();
    assert_eq!(
        scores,
        vec![
            (20, RiskLevel::Critical),
            (9, RiskLevel::Medium),
            (1, RiskLevel::Low)
        ]
    );
}

#[test]
fn test_program_listing_from_fixture() {
    let source = JsonFileSource::open(&fixture_path("org-2026q3.json")).unwrap();
    let programs = source.programs().unwrap();

    let query = ProgramQuery::parse(RawProgramQuery {
        query: Some("treasury"),
        status: Some("all"),
        ..Default::default()
    })
    .unwrap();
    let listed = filter_and_sort_programs(&programs, &query);
    let ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["prg-001", "prg-004"]);
}

#[test]
fn test_config_changes_review_window_and_thresholds() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".riskboardrc.json"),
        r#"{
            "review_window_days": 120,
            "materiality_thresholds": {"medium": 2.0, "high": 3.0, "critical": 4.0},
            "default_sort": {"by": "name", "dir": "asc"}
        }"#,
    )
    .unwrap();
    let config = load_and_resolve(dir.path(), None).unwrap();

    let source = JsonFileSource::open(&fixture_path("org-2026q3.json")).unwrap();
    let dashboard = build_dashboard(&source, now(), &config).unwrap();
    // 2027-01-15 now falls inside the window
    assert_eq!(dashboard.programs.upcoming_reviews, 2);
    // Biodiversity (combined 2.0) reaches the lowered medium bound
    assert_eq!(dashboard.materiality[3].topic, "Biodiversity");
    assert_eq!(dashboard.materiality[3].level, MaterialityLevel::Medium);

    let query = config.apply_default_sort(ProgramQuery::default());
    assert_eq!(query.sort_by, Some(SortKey::Name));
    assert_eq!(query.sort_dir, Some(SortDirection::Asc));
    let listed = filter_and_sort_programs(&source.programs().unwrap(), &query);
    assert_eq!(listed[0].name, "Crisis Communications");
}

#[test]
fn test_rendered_outputs_are_stable() {
    let dashboard = quarterly_dashboard();
    let text = render_text(&dashboard);
    assert!(text.contains("reviews due: 1  upcoming: 1"));
    assert!(text.contains("avg resolution 6.0h"));

    let json = render_json(&dashboard);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["programs"]["avg_maturity_score"], 63);
    assert_eq!(value["materiality"][0]["level"], "critical");
    assert_eq!(value["scenarios"][0]["probability"], "very_high");
}
