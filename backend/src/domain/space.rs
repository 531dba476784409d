//! Study space data model.
//!
//! Study spaces are reference entities: rarely mutated, each owning an
//! unbounded, unordered collection of check-ins. The ownership relation is
//! enforced by the store adapter (a check-in must reference an existing
//! space, and deleting a space removes its check-ins).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable study-space identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(Uuid);

impl SpaceId {
    /// Wrap an existing UUID.
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors raised by study-space constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceValidationError {
    EmptyField { field: &'static str },
    LatitudeOutOfRange { value: f64 },
    LongitudeOutOfRange { value: f64 },
    InvalidCapacity { value: u32 },
}

impl fmt::Display for SpaceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "study space {field} must not be blank"),
            Self::LatitudeOutOfRange { value } => {
                write!(f, "study space latitude must be finite and within [-90, 90] (got {value})")
            }
            Self::LongitudeOutOfRange { value } => write!(
                f,
                "study space longitude must be finite and within [-180, 180] (got {value})"
            ),
            Self::InvalidCapacity { value } => {
                write!(f, "study space capacity must be at least 1 (got {value})")
            }
        }
    }
}

impl std::error::Error for SpaceValidationError {}

/// A validated study space.
///
/// ## Invariants
/// - `name` and `building` are trimmed and non-empty; `name` is unique
///   store-wide (uniqueness is the store adapter's concern).
/// - `latitude` ∈ [-90, 90] and `longitude` ∈ [-180, 180], both finite.
/// - `capacity`, when present, is at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "StudySpaceDraft")]
pub struct StudySpace {
    id: SpaceId,
    name: String,
    building: String,
    floor: Option<String>,
    latitude: f64,
    longitude: f64,
    capacity: Option<u32>,
    created_at: DateTime<Utc>,
}

/// Draft payload for a study space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySpaceDraft {
    pub id: SpaceId,
    pub name: String,
    pub building: String,
    pub floor: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl StudySpace {
    /// Validate a draft into a study space.
    pub fn new(draft: StudySpaceDraft) -> Result<Self, SpaceValidationError> {
        Self::try_from(draft)
    }

    /// Stable identifier.
    pub const fn id(&self) -> SpaceId {
        self.id
    }

    /// Unique human-readable name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Building the space is located in.
    pub fn building(&self) -> &str {
        self.building.as_str()
    }

    /// Optional floor designation.
    pub fn floor(&self) -> Option<&str> {
        self.floor.as_deref()
    }

    /// Latitude in decimal degrees.
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Optional seat capacity, at least 1 when present.
    pub const fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    /// Creation instant.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl TryFrom<StudySpaceDraft> for StudySpace {
    type Error = SpaceValidationError;

    fn try_from(value: StudySpaceDraft) -> Result<Self, Self::Error> {
        let name = validate_non_empty_field(value.name, "name")?;
        let building = validate_non_empty_field(value.building, "building")?;
        let floor = normalise_optional_field(value.floor);

        if !value.latitude.is_finite() || !(-90.0..=90.0).contains(&value.latitude) {
            return Err(SpaceValidationError::LatitudeOutOfRange {
                value: value.latitude,
            });
        }
        if !value.longitude.is_finite() || !(-180.0..=180.0).contains(&value.longitude) {
            return Err(SpaceValidationError::LongitudeOutOfRange {
                value: value.longitude,
            });
        }
        if value.capacity == Some(0) {
            return Err(SpaceValidationError::InvalidCapacity { value: 0 });
        }

        Ok(Self {
            id: value.id,
            name,
            building,
            floor,
            latitude: value.latitude,
            longitude: value.longitude,
            capacity: value.capacity,
            created_at: value.created_at,
        })
    }
}

fn validate_non_empty_field(
    value: String,
    field: &'static str,
) -> Result<String, SpaceValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SpaceValidationError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

fn normalise_optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
