//! Riskboard CLI - scores ESG and resilience datasets

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input (including --now) yields byte-for-byte identical output

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use riskboard_core::config::{self, ResolvedConfig};
use riskboard_core::scoring::{
    classify_materiality_checked, classify_materiality_with_thresholds, scenario_risk_level,
};
use riskboard_core::{
    build_dashboard, compute_goal_progress, filter_and_sort_programs, render_json,
    render_programs_json, render_programs_text, render_text, score_scenario, JsonFileSource,
    ProgramQuery, RawProgramQuery, RecordSource,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "riskboard")]
#[command(about = "Scoring and KPI rollups for ESG and organisational resilience datasets")]
#[command(version = env!("RISKBOARD_VERSION"))]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full dashboard for an exported dataset
    Summary {
        /// Path to dataset JSON export
        dataset: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Reference time as RFC 3339 (default: current UTC time)
        #[arg(long)]
        now: Option<String>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List resilience programmes with filters and ordering
    Programs {
        /// Path to dataset JSON export
        dataset: PathBuf,

        /// Case-insensitive text matched against name, description, and owner
        #[arg(long)]
        query: Option<String>,

        /// draft, active, inactive, under_review, or all
        #[arg(long)]
        status: Option<String>,

        /// basic, intermediate, advanced, world_class, or all
        #[arg(long)]
        maturity: Option<String>,

        /// Exact owner (case-insensitive)
        #[arg(long)]
        owner: Option<String>,

        /// updated, name, maturity, or status (overrides config file)
        #[arg(long)]
        sort: Option<String>,

        /// asc or desc (overrides config file)
        #[arg(long)]
        dir: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Score a single item without a dataset
    Score {
        #[command(subcommand)]
        action: ScoreAction,
    },
    /// Validate or show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ScoreAction {
    /// Double-materiality level from impact and financial scores (1-5)
    Materiality {
        #[arg(long)]
        impact: Option<f64>,
        #[arg(long)]
        financial: Option<f64>,
        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Goal progress percentage
    Goal {
        #[arg(long)]
        baseline: Option<f64>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        current: Option<f64>,
    },
    /// Scenario risk score from severity and probability
    Scenario {
        /// low, medium, high, or critical
        #[arg(long)]
        severity: String,
        /// very_low, low, medium, high, or very_high
        #[arg(long)]
        probability: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without scoring anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Summary {
            dataset,
            format,
            now,
            config: config_path,
        } => {
            let resolved_config = load_config(config_path.as_deref())?;
            let now = parse_now(now.as_deref())?;
            let source = open_dataset(&dataset)?;

            let dashboard = build_dashboard(&source, now, &resolved_config)?;

            match format {
                OutputFormat::Text => print!("{}", render_text(&dashboard)),
                OutputFormat::Json => println!("{}", render_json(&dashboard)),
            }
        }
        Commands::Programs {
            dataset,
            query,
            status,
            maturity,
            owner,
            sort,
            dir,
            format,
            config: config_path,
        } => {
            let resolved_config = load_config(config_path.as_deref())?;

            // CLI flags override config file values
            let parsed = ProgramQuery::parse(RawProgramQuery {
                query: query.as_deref(),
                status: status.as_deref(),
                maturity_level: maturity.as_deref(),
                owner: owner.as_deref(),
                sort_by: sort.as_deref(),
                sort_dir: dir.as_deref(),
            })?;
            let program_query = resolved_config.apply_default_sort(parsed);

            let source = open_dataset(&dataset)?;
            let programs = source.programs()?;
            let listed = filter_and_sort_programs(&programs, &program_query);
            tracing::debug!(
                total = programs.len(),
                matched = listed.len(),
                "filtered programmes"
            );

            match format {
                OutputFormat::Text => print!("{}", render_programs_text(&listed)),
                OutputFormat::Json => println!("{}", render_programs_json(&listed)),
            }
        }
        Commands::Score { action } => match action {
            ScoreAction::Materiality {
                impact,
                financial,
                config: config_path,
            } => {
                let resolved_config = load_config(config_path.as_deref())?;
                let thresholds = &resolved_config.materiality;
                let result = classify_materiality_with_thresholds(impact, financial, thresholds);
                println!("combined score: {}", result.combined_score);
                println!("level: {}", result.level);
                if classify_materiality_checked(impact, financial, thresholds).is_none() {
                    eprintln!("note: missing score counted as 0");
                }
            }
            ScoreAction::Goal {
                baseline,
                target,
                current,
            } => {
                let progress = compute_goal_progress(baseline, target, current);
                println!("progress: {}%", progress);
            }
            ScoreAction::Scenario {
                severity,
                probability,
            } => {
                let score = score_scenario(&severity, &probability)?;
                println!("risk score: {}", score);
                println!("level: {}", scenario_risk_level(score));
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                match config::load_and_resolve(&project_root, path.as_deref()) {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let resolved = load_config(path.as_deref())?;
                print_config(&resolved);
            }
        },
    }

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let project_root = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&project_root, config_path)
        .context("failed to load configuration")?;
    if let Some(ref p) = resolved.config_path {
        tracing::info!("Using config: {}", p.display());
    }
    Ok(resolved)
}

fn open_dataset(path: &Path) -> anyhow::Result<JsonFileSource> {
    if !path.exists() {
        anyhow::bail!("Dataset does not exist: {}", path.display());
    }
    JsonFileSource::open(path)
}

fn parse_now(now: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match now {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("invalid --now timestamp: {}", s))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn print_config(resolved: &ResolvedConfig) {
    println!("Configuration:");
    if let Some(ref p) = resolved.config_path {
        println!("  Source: {}", p.display());
    } else {
        println!("  Source: defaults (no config file found)");
    }
    println!();
    println!("Materiality thresholds:");
    println!("  medium: {}", resolved.materiality.medium);
    println!("  high: {}", resolved.materiality.high);
    println!("  critical: {}", resolved.materiality.critical);
    println!();
    println!("Programmes:");
    println!("  review window: {} days", resolved.review_window_days);
    println!(
        "  default sort: {} {}",
        resolved.sort_by, resolved.sort_dir
    );
}
