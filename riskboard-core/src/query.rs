//! Programme listing filters and ordering
//!
//! Filtering is conjunctive across all supplied criteria. Sorting is stable, so
//! repeated calls on identical input return identical output and ties keep input order
//! in both directions.

use crate::error::ScoringError;
use crate::records::ProgramRecord;
use crate::vocab::{MaturityLevel, ProgramStatus, SortDirection, SortKey};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Filter and sort options for a programme listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProgramQuery {
    /// Case-insensitive substring matched against name, description, and owner
    pub query: Option<String>,
    pub status: Option<ProgramStatus>,
    pub maturity_level: Option<MaturityLevel>,
    /// Case-insensitive exact owner match
    pub owner: Option<String>,
    pub sort_by: Option<SortKey>,
    pub sort_dir: Option<SortDirection>,
}

/// Raw string options as they arrive from a form or CLI
#[derive(Debug, Clone, Copy, Default)]
pub struct RawProgramQuery<'a> {
    pub query: Option<&'a str>,
    pub status: Option<&'a str>,
    pub maturity_level: Option<&'a str>,
    pub owner: Option<&'a str>,
    pub sort_by: Option<&'a str>,
    pub sort_dir: Option<&'a str>,
}

/// `None`, empty, or `"all"` means no filter on the field
fn parse_filter<T>(value: Option<&str>) -> Result<Option<T>, ScoringError>
where
    T: std::str::FromStr<Err = ScoringError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

/// `None` or empty means "use the default"
fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, ScoringError>
where
    T: std::str::FromStr<Err = ScoringError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ProgramQuery {
    /// Build a query from raw strings, rejecting unknown vocabulary values
    pub fn parse(raw: RawProgramQuery<'_>) -> Result<Self, ScoringError> {
        Ok(ProgramQuery {
            query: non_empty(raw.query),
            status: parse_filter(raw.status)?,
            maturity_level: parse_filter(raw.maturity_level)?,
            owner: non_empty(raw.owner),
            sort_by: parse_optional::<SortKey>(raw.sort_by)?,
            sort_dir: parse_optional::<SortDirection>(raw.sort_dir)?,
        })
    }

    /// Check a single programme against every supplied criterion
    pub fn matches(&self, program: &ProgramRecord) -> bool {
        if let Some(status) = self.status {
            if program.status != status {
                return false;
            }
        }
        if let Some(maturity) = self.maturity_level {
            if program.maturity_level != maturity {
                return false;
            }
        }
        if let Some(ref owner) = self.owner {
            match program.owner {
                Some(ref o) if o.to_lowercase() == owner.to_lowercase() => {}
                _ => return false,
            }
        }
        if let Some(ref needle) = self.query {
            let needle = needle.to_lowercase();
            let hit = |field: Option<&str>| {
                field.is_some_and(|f| f.to_lowercase().contains(&needle))
            };
            if !(hit(Some(program.name.as_str()))
                || hit(program.description.as_deref())
                || hit(program.owner.as_deref()))
            {
                return false;
            }
        }
        true
    }
}

/// Ascending comparison for a sort key
fn compare_by(key: SortKey, a: &ProgramRecord, b: &ProgramRecord) -> Ordering {
    match key {
        SortKey::Updated => a.updated_at.cmp(&b.updated_at),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Maturity => a.maturity_level.ordinal().cmp(&b.maturity_level.ordinal()),
        SortKey::Status => a.status.ordinal().cmp(&b.status.ordinal()),
    }
}

/// Filter and order programmes without touching the input
///
/// Defaults to `updated` descending.
pub fn filter_and_sort_programs(
    programs: &[ProgramRecord],
    query: &ProgramQuery,
) -> Vec<ProgramRecord> {
    let key = query.sort_by.unwrap_or(SortKey::Updated);
    let dir = query.sort_dir.unwrap_or(SortDirection::Desc);

    let mut result: Vec<ProgramRecord> = programs
        .iter()
        .filter(|p| query.matches(p))
        .cloned()
        .collect();

    // Reverse the comparator rather than the output so ties stay in input order
    result.sort_by(|a, b| match dir {
        SortDirection::Asc => compare_by(key, a, b),
        SortDirection::Desc => compare_by(key, b, a),
    });

    result
}
