//! Configuration file support for Riskboard
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.riskboardrc.json` in project root
//! 3. `riskboard.config.json` in project root
//! 4. `"riskboard"` key in `package.json`
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::metrics::DEFAULT_REVIEW_WINDOW_DAYS;
use crate::query::ProgramQuery;
use crate::scoring::MaterialityThresholds;
use crate::vocab::{SortDirection, SortKey};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MAX_REVIEW_WINDOW_DAYS: u32 = 365;

/// Riskboard configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskboardConfig {
    /// Custom materiality level breakpoints
    #[serde(default)]
    pub materiality_thresholds: Option<MaterialityThresholdConfig>,

    /// Days ahead a programme review counts as upcoming (default: 30)
    #[serde(default)]
    pub review_window_days: Option<u32>,

    /// Default ordering for programme listings
    #[serde(default)]
    pub default_sort: Option<SortConfig>,
}

/// Lower bounds of each materiality level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialityThresholdConfig {
    /// Combined score for medium (default: 2.5)
    pub medium: Option<f64>,
    /// Combined score for high (default: 3.5)
    pub high: Option<f64>,
    /// Combined score for critical (default: 4.5)
    pub critical: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortConfig {
    /// updated, name, maturity, or status (default: updated)
    pub by: Option<SortKey>,
    /// asc or desc (default: desc)
    pub dir: Option<SortDirection>,
}

/// Resolved configuration with defaults applied
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub materiality: MaterialityThresholds,
    pub review_window_days: u32,
    pub sort_by: SortKey,
    pub sort_dir: SortDirection,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl RiskboardConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        // Validate thresholds are positive and ordered
        if let Some(ref t) = self.materiality_thresholds {
            let defaults = MaterialityThresholds::default();
            let medium = t.medium.unwrap_or(defaults.medium);
            let high = t.high.unwrap_or(defaults.high);
            let critical = t.critical.unwrap_or(defaults.critical);

            for (name, val) in [("medium", medium), ("high", high), ("critical", critical)] {
                if val <= 0.0 {
                    anyhow::bail!(
                        "materiality_thresholds.{} must be positive (got {})",
                        name,
                        val
                    );
                }
            }
            if medium >= high {
                anyhow::bail!(
                    "materiality_thresholds.medium ({}) must be less than materiality_thresholds.high ({})",
                    medium,
                    high
                );
            }
            if high >= critical {
                anyhow::bail!(
                    "materiality_thresholds.high ({}) must be less than materiality_thresholds.critical ({})",
                    high,
                    critical
                );
            }
        }

        if let Some(days) = self.review_window_days {
            if days == 0 || days > MAX_REVIEW_WINDOW_DAYS {
                anyhow::bail!(
                    "review_window_days must be between 1 and {} (got {})",
                    MAX_REVIEW_WINDOW_DAYS,
                    days
                );
            }
        }

        Ok(())
    }

    /// Resolve config into the form used by the scoring functions
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let defaults = MaterialityThresholds::default();
        let materiality = match &self.materiality_thresholds {
            Some(t) => MaterialityThresholds {
                medium: t.medium.unwrap_or(defaults.medium),
                high: t.high.unwrap_or(defaults.high),
                critical: t.critical.unwrap_or(defaults.critical),
            },
            None => defaults,
        };

        let (sort_by, sort_dir) = match &self.default_sort {
            Some(s) => (
                s.by.unwrap_or(SortKey::Updated),
                s.dir.unwrap_or(SortDirection::Desc),
            ),
            None => (SortKey::Updated, SortDirection::Desc),
        };

        Ok(ResolvedConfig {
            materiality,
            review_window_days: self
                .review_window_days
                .unwrap_or(DEFAULT_REVIEW_WINDOW_DAYS),
            sort_by,
            sort_dir,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Fill in sort options the query leaves unspecified
    pub fn apply_default_sort(&self, mut query: ProgramQuery) -> ProgramQuery {
        query.sort_by = query.sort_by.or(Some(self.sort_by));
        query.sort_dir = query.sort_dir.or(Some(self.sort_dir));
        query
    }

    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        RiskboardConfig::default().resolve()
    }
}

/// Discover and load a config file from the project root
///
/// Search order:
/// 1. `.riskboardrc.json`
/// 2. `riskboard.config.json`
/// 3. `"riskboard"` key in `package.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(RiskboardConfig, PathBuf)>> {
    for name in [".riskboardrc.json", "riskboard.config.json"] {
        let path = project_root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }

    let pkg_path = project_root.join("package.json");
    if pkg_path.exists() {
        if let Some(config) = load_from_package_json(&pkg_path)? {
            return Ok(Some((config, pkg_path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<RiskboardConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: RiskboardConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load riskboard config from the "riskboard" key in package.json
fn load_from_package_json(path: &Path) -> Result<Option<RiskboardConfig>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let pkg: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    match pkg.get("riskboard") {
        Some(value) => {
            let config: RiskboardConfig = serde_json::from_value(value.clone())
                .with_context(|| format!("invalid riskboard config in {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("invalid riskboard config in {}", path.display()))?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (RiskboardConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    tracing::debug!(
        source = ?resolved.config_path,
        review_window_days = resolved.review_window_days,
        "resolved configuration"
    );
    Ok(resolved)
}
