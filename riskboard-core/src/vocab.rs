//! Closed vocabularies for record fields
//!
//! Every enum-valued field carries exactly one ordinal table, defined here and shared
//! by scoring, aggregation, and sorting. Parsing an unknown string fails with
//! [`ScoringError::InvalidEnumValue`]; there is no fallback rank.

use crate::error::ScoringError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => ($text:literal, $rank:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All values in ascending ordinal order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Rank of this value within its vocabulary (1-based)
            pub fn ordinal(&self) -> u32 {
                match self {
                    $($name::$variant => $rank),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ScoringError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ScoringError::invalid($field, s)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ScoringError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Impact severity shared by incidents, crises, and scenario analyses
    Severity, "severity" {
        Low => ("low", 1),
        Medium => ("medium", 2),
        High => ("high", 3),
        Critical => ("critical", 4),
    }
}

vocabulary! {
    /// Likelihood of a scenario materializing
    Probability, "probability" {
        VeryLow => ("very_low", 1),
        Low => ("low", 2),
        Medium => ("medium", 3),
        High => ("high", 4),
        VeryHigh => ("very_high", 5),
    }
}

vocabulary! {
    /// Handling priority of an incident
    Priority, "priority" {
        Low => ("low", 1),
        Medium => ("medium", 2),
        High => ("high", 3),
        Critical => ("critical", 4),
    }
}

vocabulary! {
    /// Lifecycle status of a resilience programme
    ProgramStatus, "status" {
        Draft => ("draft", 1),
        Active => ("active", 2),
        Inactive => ("inactive", 3),
        UnderReview => ("under_review", 4),
    }
}

vocabulary! {
    /// Maturity classification of a resilience programme
    MaturityLevel, "maturity_level" {
        Basic => ("basic", 1),
        Intermediate => ("intermediate", 2),
        Advanced => ("advanced", 3),
        WorldClass => ("world_class", 4),
    }
}

vocabulary! {
    IncidentStatus, "incident status" {
        Open => ("open", 1),
        Investigating => ("investigating", 2),
        Contained => ("contained", 3),
        Resolved => ("resolved", 4),
        Closed => ("closed", 5),
    }
}

vocabulary! {
    CrisisStatus, "crisis status" {
        Active => ("active", 1),
        Escalated => ("escalated", 2),
        Monitoring => ("monitoring", 3),
        Resolved => ("resolved", 4),
        Closed => ("closed", 5),
    }
}

vocabulary! {
    /// Greenhouse-gas accounting scope
    EmissionScope, "scope" {
        Scope1 => ("scope1", 1),
        Scope2 => ("scope2", 2),
        Scope3 => ("scope3", 3),
    }
}

vocabulary! {
    /// Double-materiality classification of a topic
    MaterialityLevel, "materiality level" {
        Low => ("low", 1),
        Medium => ("medium", 2),
        High => ("high", 3),
        Critical => ("critical", 4),
    }
}

vocabulary! {
    /// Bucketed scenario risk for display
    RiskLevel, "risk level" {
        Low => ("low", 1),
        Medium => ("medium", 2),
        High => ("high", 3),
        Critical => ("critical", 4),
    }
}

vocabulary! {
    /// Programme listing sort key
    SortKey, "sort_by" {
        Updated => ("updated", 1),
        Name => ("name", 2),
        Maturity => ("maturity", 3),
        Status => ("status", 4),
    }
}

vocabulary! {
    SortDirection, "sort_dir" {
        Asc => ("asc", 1),
        Desc => ("desc", 2),
    }
}

impl MaturityLevel {
    /// Numeric score used when averaging maturity across programmes
    ///
    /// basic=25, intermediate=50, advanced=75, world_class=100
    pub fn score(&self) -> u32 {
        self.ordinal() * 25
    }
}

impl Priority {
    /// High or critical
    pub fn is_high_plus(&self) -> bool {
        matches!(self, Priority::High | Priority::Critical)
    }
}
