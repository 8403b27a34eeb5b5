//! Urgency levels chosen in Slack and the OpsGenie priorities they map to.

use serde::{Deserialize, Serialize};

/// Errors from parsing an [`Urgency`] or [`Priority`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseLevelError {
    /// Not one of `critical`, `high`, `medium` or `low`.
    #[error("invalid urgency: {0}")]
    Urgency(String),
    /// Not one of `P1` to `P4`.
    #[error("invalid priority: {0}")]
    Priority(String),
}

/// Urgency level selected in the incident form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Urgency {
    /// All urgency levels, in the order they are offered in the form.
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// The option value used in the Slack select element.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Human readable label shown in the select element.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// The OpsGenie priority for this urgency.
    #[must_use]
    pub const fn priority(self) -> Priority {
        match self {
            Self::Critical => Priority::P1,
            Self::High => Priority::P2,
            Self::Medium => Priority::P3,
            Self::Low => Priority::P4,
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Urgency {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseLevelError::Urgency(s.to_string())),
        }
    }
}

/// OpsGenie alert priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    P1,
    P2,
    #[default]
    P3,
    P4,
}

impl Priority {
    /// The wire value (`P1`..`P4`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
        }
    }

    /// Urgency label matching this priority, for display in Slack.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::P1 => "Critical",
            Self::P2 => "High",
            Self::P3 => "Medium",
            Self::P4 => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "P1" | "p1" => Ok(Self::P1),
            "P2" | "p2" => Ok(Self::P2),
            "P3" | "p3" => Ok(Self::P3),
            "P4" | "p4" => Ok(Self::P4),
            _ => Err(ParseLevelError::Priority(s.to_string())),
        }
    }
}

/// Map a raw urgency value from the form to a priority.
///
/// Total: anything that is not a recognised urgency (including an empty
/// string) maps to [`Priority::P3`].
#[must_use]
pub fn priority_for_urgency(urgency: &str) -> Priority {
    urgency
        .parse::<Urgency>()
        .map_or(Priority::default(), Urgency::priority)
}
