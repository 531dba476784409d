//! Closed observation-level enums and their numeric mappings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reported noise level at the moment of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseLevel {
    Quiet,
    Moderate,
    Loud,
}

impl NoiseLevel {
    /// All levels in canonical (quietest-first) order.
    pub const ALL: [Self; 3] = [Self::Quiet, Self::Moderate, Self::Loud];
}

/// Error returned when parsing a noise level from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseNoiseLevelError;

impl fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => f.write_str("quiet"),
            Self::Moderate => f.write_str("moderate"),
            Self::Loud => f.write_str("loud"),
        }
    }
}

impl fmt::Display for ParseNoiseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid noise level")
    }
}

impl std::error::Error for ParseNoiseLevelError {}

impl FromStr for NoiseLevel {
    type Err = ParseNoiseLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "quiet" => Ok(Self::Quiet),
            "moderate" => Ok(Self::Moderate),
            "loud" => Ok(Self::Loud),
            _ => Err(ParseNoiseLevelError),
        }
    }
}

/// Reported crowding at the moment of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdingLevel {
    Empty,
    Some,
    Full,
}

impl CrowdingLevel {
    /// All levels in canonical (least-crowded-first) order.
    pub const ALL: [Self; 3] = [Self::Empty, Self::Some, Self::Full];

    /// Integer severity feeding the occupancy score numerator.
    pub const fn severity(self) -> u32 {
        match self {
            Self::Empty => 1,
            Self::Some => 2,
            Self::Full => 3,
        }
    }

    /// Normalised utilization value feeding the crowding average.
    pub const fn utilization(self) -> f64 {
        match self {
            Self::Empty => 0.0,
            Self::Some => 0.5,
            Self::Full => 1.0,
        }
    }
}

/// Error returned when parsing a crowding level from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCrowdingLevelError;

impl fmt::Display for CrowdingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Some => f.write_str("some"),
            Self::Full => f.write_str("full"),
        }
    }
}

impl fmt::Display for ParseCrowdingLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid crowding level")
    }
}

impl std::error::Error for ParseCrowdingLevelError {}

impl FromStr for CrowdingLevel {
    type Err = ParseCrowdingLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "empty" => Ok(Self::Empty),
            "some" => Ok(Self::Some),
            "full" => Ok(Self::Full),
            _ => Err(ParseCrowdingLevelError),
        }
    }
}

/// Reported power-outlet availability at the moment of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutletAvailability {
    Yes,
    Some,
    No,
}

/// Error returned when parsing outlet availability from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOutletAvailabilityError;

impl fmt::Display for OutletAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("yes"),
            Self::Some => f.write_str("some"),
            Self::No => f.write_str("no"),
        }
    }
}

impl fmt::Display for ParseOutletAvailabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outlet availability")
    }
}

impl std::error::Error for ParseOutletAvailabilityError {}

impl FromStr for OutletAvailability {
    type Err = ParseOutletAvailabilityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "yes" => Ok(Self::Yes),
            "some" => Ok(Self::Some),
            "no" => Ok(Self::No),
            _ => Err(ParseOutletAvailabilityError),
        }
    }
}
