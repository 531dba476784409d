//! In-memory store adapter.
//!
//! Backs both driven ports with plain vectors behind a lock. Serves tests
//! and embedding callers; a production deployment would substitute a
//! database-backed adapter behind the same ports. Enforces the ownership
//! relation the relational store provides elsewhere: a check-in must
//! reference an existing space, and deleting a space removes its check-ins.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::checkin::{CheckIn, CheckInId};
use crate::domain::ports::{
    CheckInRepository, CheckInRepositoryError, StudySpaceRepository, StudySpaceRepositoryError,
};
use crate::domain::space::{SpaceId, StudySpace};

#[derive(Debug, Default)]
struct StoreState {
    spaces: Vec<StudySpace>,
    checkins: Vec<CheckIn>,
}

/// In-memory implementation of the check-in and study-space ports.
#[derive(Debug, Default)]
pub struct InMemoryStudyStore {
    state: RwLock<StoreState>,
}

impl InMemoryStudyStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with spaces.
    #[must_use]
    pub fn with_spaces(spaces: Vec<StudySpace>) -> Self {
        Self {
            state: RwLock::new(StoreState {
                spaces,
                checkins: Vec::new(),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        // Writers never panic while holding the lock; recover regardless.
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StudySpaceRepository for InMemoryStudyStore {
    async fn list(&self) -> Result<Vec<StudySpace>, StudySpaceRepositoryError> {
        let mut spaces = self.read().spaces.clone();
        spaces.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(spaces)
    }

    async fn find_by_id(
        &self,
        space_id: SpaceId,
    ) -> Result<Option<StudySpace>, StudySpaceRepositoryError> {
        Ok(self
            .read()
            .spaces
            .iter()
            .find(|space| space.id() == space_id)
            .cloned())
    }

    async fn save(&self, space: &StudySpace) -> Result<(), StudySpaceRepositoryError> {
        let mut state = self.write();
        let duplicate_name = state
            .spaces
            .iter()
            .any(|existing| existing.id() != space.id() && existing.name() == space.name());
        if duplicate_name {
            return Err(StudySpaceRepositoryError::query(format!(
                "study space name {:?} already exists",
                space.name()
            )));
        }

        if let Some(existing) = state
            .spaces
            .iter_mut()
            .find(|existing| existing.id() == space.id())
        {
            *existing = space.clone();
        } else {
            state.spaces.push(space.clone());
        }
        Ok(())
    }

    async fn delete(&self, space_id: SpaceId) -> Result<bool, StudySpaceRepositoryError> {
        let mut state = self.write();
        let before = state.spaces.len();
        state.spaces.retain(|space| space.id() != space_id);
        let removed = state.spaces.len() != before;
        if removed {
            // Cascade: check-ins are owned by their space.
            state.checkins.retain(|checkin| checkin.space_id() != space_id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl CheckInRepository for InMemoryStudyStore {
    async fn list_for_space(
        &self,
        space_id: SpaceId,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        Ok(self
            .read()
            .checkins
            .iter()
            .filter(|checkin| checkin.space_id() == space_id)
            .cloned()
            .collect())
    }

    async fn list_recent_for_space(
        &self,
        space_id: SpaceId,
        limit: usize,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        let mut checkins: Vec<CheckIn> = self
            .read()
            .checkins
            .iter()
            .filter(|checkin| checkin.space_id() == space_id)
            .cloned()
            .collect();
        checkins.sort_by_key(|checkin| std::cmp::Reverse(checkin.timestamp()));
        checkins.truncate(limit);
        Ok(checkins)
    }

    async fn list_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        Ok(self
            .read()
            .checkins
            .iter()
            .filter(|checkin| checkin.timestamp() >= cutoff)
            .cloned()
            .collect())
    }

    async fn save(&self, checkin: &CheckIn) -> Result<(), CheckInRepositoryError> {
        let mut state = self.write();
        let space_exists = state
            .spaces
            .iter()
            .any(|space| space.id() == checkin.space_id());
        if !space_exists {
            return Err(CheckInRepositoryError::query(format!(
                "check-in references unknown study space {}",
                checkin.space_id()
            )));
        }
        state.checkins.push(checkin.clone());
        Ok(())
    }

    async fn delete(&self, checkin_id: CheckInId) -> Result<bool, CheckInRepositoryError> {
        let mut state = self.write();
        let before = state.checkins.len();
        state.checkins.retain(|checkin| checkin.id() != checkin_id);
        Ok(state.checkins.len() != before)
    }
}
