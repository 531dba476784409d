//! Check-in aggregate: a single crowdsourced observation of a study space.
//!
//! Check-ins are immutable facts. The store appends them, an administrator
//! may delete them, and nothing ever mutates one in place. Validation
//! happens here, at the boundary, so the analytics functions can assume
//! every record they receive is well formed.

use std::fmt;

use uuid::Uuid;

mod levels;
mod record;
mod validation;

pub use levels::{
    CrowdingLevel, NoiseLevel, OutletAvailability, ParseCrowdingLevelError, ParseNoiseLevelError,
    ParseOutletAvailabilityError,
};
pub use record::{CheckIn, CheckInDraft};

/// Stable check-in identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CheckInId(Uuid);

impl CheckInId {
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

impl fmt::Display for CheckInId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors raised by check-in constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInValidationError {
    NotesTooLong { max: usize, actual: usize },
    BlankUserId,
    UserIdTooLong { max: usize, actual: usize },
}

impl fmt::Display for CheckInValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotesTooLong { max, actual } => {
                write!(f, "check-in notes must be at most {max} characters (got {actual})")
            }
            Self::BlankUserId => write!(f, "check-in user id must not be blank"),
            Self::UserIdTooLong { max, actual } => {
                write!(f, "check-in user id must be at most {max} characters (got {actual})")
            }
        }
    }
}

impl std::error::Error for CheckInValidationError {}
