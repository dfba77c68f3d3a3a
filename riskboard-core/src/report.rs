//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output for identical input

use crate::dashboard::Dashboard;
use crate::records::ProgramRecord;
use std::fmt::Write as _;

/// Render the dashboard as a plain-text summary
pub fn render_text(dashboard: &Dashboard) -> String {
    let mut output = String::new();
    let p = &dashboard.programs;
    let i = &dashboard.incidents;
    let c = &dashboard.crises;
    let e = &dashboard.carbon;

    let _ = writeln!(output, "Generated: {}", dashboard.generated_at.to_rfc3339());
    output.push('\n');

    output.push_str("Resilience programmes\n");
    let _ = writeln!(
        output,
        "  total {}  active {}  draft {}  inactive {}  under review {}",
        p.total_programs,
        p.active_programs,
        p.draft_programs,
        p.inactive_programs,
        p.under_review_programs
    );
    let _ = writeln!(output, "  avg maturity score: {}", p.avg_maturity_score);
    let _ = writeln!(
        output,
        "  reviews due: {}  upcoming: {}",
        p.programs_needing_review, p.upcoming_reviews
    );
    output.push('\n');

    output.push_str("Incidents\n");
    let _ = writeln!(
        output,
        "  total {}  open {}  investigating {}  resolved {}",
        i.total_incidents, i.open_incidents, i.investigating_incidents, i.resolved_incidents
    );
    let _ = writeln!(
        output,
        "  critical {}  high priority {}  avg resolution {:.1}h",
        i.critical_incidents, i.high_priority_incidents, i.avg_resolution_time_hours
    );
    output.push('\n');

    output.push_str("Crises\n");
    let _ = writeln!(
        output,
        "  total {}  active {}  escalated {}  resolved {}",
        c.total_crises, c.active_crises, c.escalated_crises, c.resolved_crises
    );
    let _ = writeln!(
        output,
        "  critical {}  avg resolution {:.1}h",
        c.critical_crises, c.avg_resolution_time_hours
    );
    output.push('\n');

    output.push_str("Carbon (tCO2e)\n");
    let _ = writeln!(
        output,
        "  scope1 {:.2}  scope2 {:.2}  scope3 {:.2}  total {:.2}",
        e.scope1_total, e.scope2_total, e.scope3_total, e.total_emissions
    );

    if !dashboard.materiality.is_empty() {
        output.push('\n');
        let _ = writeln!(output, "{:<8} {:<10} {}", "SCORE", "LEVEL", "TOPIC");
        for topic in &dashboard.materiality {
            let marker = if topic.insufficient_data { " *" } else { "" };
            let _ = writeln!(
                output,
                "{:<8} {:<10} {}{}",
                format!("{:.2}", topic.combined_score),
                topic.level.as_str(),
                topic.topic,
                marker
            );
        }
        if dashboard.materiality.iter().any(|t| t.insufficient_data) {
            output.push_str("  * missing score counted as 0\n");
        }
    }

    if !dashboard.goals.is_empty() {
        output.push('\n');
        let _ = writeln!(output, "{:<8} {}", "PROGRESS", "GOAL");
        for goal in &dashboard.goals {
            let _ = writeln!(
                output,
                "{:<8} {}",
                format!("{:.0}%", goal.progress_percentage),
                goal.name
            );
        }
    }

    if !dashboard.scenarios.is_empty() {
        output.push('\n');
        let _ = writeln!(
            output,
            "{:<6} {:<10} {:<10} {:<10} {}",
            "RISK", "LEVEL", "SEVERITY", "LIKELIHOOD", "SCENARIO"
        );
        for s in &dashboard.scenarios {
            let _ = writeln!(
                output,
                "{:<6} {:<10} {:<10} {:<10} {}",
                s.risk_score,
                s.risk_level.as_str(),
                s.severity.as_str(),
                s.probability.as_str(),
                s.name
            );
        }
    }

    output
}

/// Render the dashboard as JSON output
pub fn render_json(dashboard: &Dashboard) -> String {
    serde_json::to_string_pretty(dashboard).unwrap_or_else(|_| "{}".to_string())
}

/// Render a programme listing as a fixed-width table
pub fn render_programs_text(programs: &[ProgramRecord]) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<30} {:<13} {:<13} {:<16} {:<11} {}",
        "NAME", "STATUS", "MATURITY", "OWNER", "REVIEW", "UPDATED"
    );

    for program in programs {
        let review = program
            .next_review_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            output,
            "{} {:<13} {:<13} {} {:<11} {}",
            truncate_or_pad(&program.name, 30),
            program.status.as_str(),
            program.maturity_level.as_str(),
            truncate_or_pad(program.owner.as_deref().unwrap_or("-"), 16),
            review,
            program.updated_at.format("%Y-%m-%d %H:%M")
        );
    }

    output
}

pub fn render_programs_json(programs: &[ProgramRecord]) -> String {
    serde_json::to_string_pretty(programs).unwrap_or_else(|_| "[]".to_string())
}

/// Truncate or pad string to fixed width (in characters)
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolvedConfig;
    use crate::dashboard::build_dashboard;
    use crate::source::Dataset;
    use chrono::{TimeZone, Utc};

    fn sample_dashboard() -> Dashboard {
        let dataset = Dataset::from_json(
            r#"{
                "carbon": [
                    {"scope": "scope1", "co2_equivalent": 10},
                    {"scope": "scope2", "co2_equivalent": 5}
                ],
                "materiality": [
                    {"topic": "Climate", "impact_score": 5, "financial_score": 4},
                    {"topic": "Labour", "impact_score": 4}
                ],
                "goals": [
                    {"name": "Renewables share", "baseline_value": 0, "target_value": 80, "current_value": 20}
                ],
                "scenarios": [
                    {"name": "Flood", "severity": "critical", "probability": "very_high"}
                ]
            }"#,
        )
        .unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap();
        build_dashboard(&dataset, now, &ResolvedConfig::defaults().unwrap()).unwrap()
    }

    #[test]
    fn test_render_text_sections() {
        let text = render_text(&sample_dashboard());
        assert!(text.contains("Generated: 2026-10-17T00:00:00+00:00"));
        assert!(text.contains("scope1 10.00  scope2 5.00  scope3 0.00  total 15.00"));
        assert!(text.contains("4.50     critical   Climate\n"));
        assert!(text.contains("Labour *"));
        assert!(text.contains("25%      Renewables share"));
        assert!(text.contains("20     critical   critical   very_high  Flood"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let dashboard = sample_dashboard();
        assert_eq!(render_text(&dashboard), render_text(&dashboard));
        assert_eq!(render_json(&dashboard), render_json(&dashboard));
    }

    #[test]
    fn test_render_json_round_trips() {
        let dashboard = sample_dashboard();
        let parsed: Dashboard = serde_json::from_str(&render_json(&dashboard)).unwrap();
        assert_eq!(parsed, dashboard);
    }

    #[test]
    fn test_truncate_or_pad() {
        assert_eq!(truncate_or_pad("abc", 5), "abc  ");
        assert_eq!(truncate_or_pad("abcdefgh", 6), "abc...");
        assert_eq!(truncate_or_pad("résumé-plan", 8), "résum...");
    }
}
