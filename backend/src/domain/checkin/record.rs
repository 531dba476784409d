//! Check-in entity and draft payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::space::SpaceId;

use super::{CheckInId, CheckInValidationError, CrowdingLevel, NoiseLevel, OutletAvailability};

/// Maximum character length of the free-text notes field.
pub(super) const NOTES_MAX_CHARS: usize = 500;

/// Maximum character length of the submitter pseudonym.
pub(super) const USER_ID_MAX_CHARS: usize = 64;

/// A validated, immutable check-in record.
///
/// ## Invariants
/// - `notes`, when present, is trimmed, non-empty, and at most 500
///   characters.
/// - `user_id` is a trimmed, non-empty pseudonym of at most 64 characters;
///   drafts without a submitter receive a generated `anon-` pseudonym.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "CheckInDraft")]
pub struct CheckIn {
    pub(super) id: CheckInId,
    pub(super) space_id: SpaceId,
    pub(super) noise_level: NoiseLevel,
    pub(super) crowding: CrowdingLevel,
    pub(super) outlets_available: OutletAvailability,
    pub(super) notes: Option<String>,
    pub(super) user_id: String,
    pub(super) timestamp: DateTime<Utc>,
}

/// Draft payload for a check-in, as submitted at the boundary.
///
/// `user_id` is optional; absent or blank submitters are assigned a
/// generated anonymous pseudonym during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDraft {
    pub id: CheckInId,
    pub space_id: SpaceId,
    pub noise_level: NoiseLevel,
    pub crowding: CrowdingLevel,
    pub outlets_available: OutletAvailability,
    pub notes: Option<String>,
    pub user_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl CheckIn {
    /// Validate a draft into an immutable check-in.
    pub fn new(draft: CheckInDraft) -> Result<Self, CheckInValidationError> {
        Self::try_from(draft)
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> CheckInId {
        self.id
    }

    /// Identifier of the owning study space.
    pub const fn space_id(&self) -> SpaceId {
        self.space_id
    }

    /// Reported noise level.
    pub const fn noise_level(&self) -> NoiseLevel {
        self.noise_level
    }

    /// Reported crowding level.
    pub const fn crowding(&self) -> CrowdingLevel {
        self.crowding
    }

    /// Reported outlet availability.
    pub const fn outlets_available(&self) -> OutletAvailability {
        self.outlets_available
    }

    /// Optional free-text observation notes.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Submitter pseudonym.
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Store-assigned creation instant.
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Generate an anonymous submitter pseudonym.
///
/// Mirrors the store's defaulting behaviour for check-ins submitted without
/// a user id: `anon-` followed by eight hex characters.
pub(super) fn anonymous_user_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    let short: String = hex.chars().take(8).collect();
    format!("anon-{short}")
}
