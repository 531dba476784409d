//! Check-in draft validation and conversion.

use super::record::{NOTES_MAX_CHARS, USER_ID_MAX_CHARS, anonymous_user_id};
use super::{CheckIn, CheckInDraft, CheckInValidationError};

impl TryFrom<CheckInDraft> for CheckIn {
    type Error = CheckInValidationError;

    fn try_from(value: CheckInDraft) -> Result<Self, Self::Error> {
        let notes = normalise_notes(value.notes)?;
        let user_id = normalise_user_id(value.user_id)?;

        Ok(Self {
            id: value.id,
            space_id: value.space_id,
            noise_level: value.noise_level,
            crowding: value.crowding,
            outlets_available: value.outlets_available,
            notes,
            user_id,
            timestamp: value.timestamp,
        })
    }
}

/// Trim notes, collapsing blank input to `None`.
fn normalise_notes(notes: Option<String>) -> Result<Option<String>, CheckInValidationError> {
    let Some(raw) = notes else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let actual = trimmed.chars().count();
    if actual > NOTES_MAX_CHARS {
        return Err(CheckInValidationError::NotesTooLong {
            max: NOTES_MAX_CHARS,
            actual,
        });
    }
    Ok(Some(trimmed.to_owned()))
}

/// Trim the pseudonym, defaulting absent submitters to a generated one.
///
/// An explicitly supplied but blank pseudonym is rejected rather than
/// silently anonymised.
fn normalise_user_id(user_id: Option<String>) -> Result<String, CheckInValidationError> {
    let Some(raw) = user_id else {
        return Ok(anonymous_user_id());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CheckInValidationError::BlankUserId);
    }
    let actual = trimmed.chars().count();
    if actual > USER_ID_MAX_CHARS {
        return Err(CheckInValidationError::UserIdTooLong {
            max: USER_ID_MAX_CHARS,
            actual,
        });
    }
    Ok(trimmed.to_owned())
}
