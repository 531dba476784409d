//! Driven port for check-in store reads and administrative writes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::checkin::{CheckIn, CheckInId};
use crate::domain::space::SpaceId;

/// Errors raised by check-in store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckInRepositoryError {
    /// Store connection could not be established.
    #[error("check-in store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("check-in store query failed: {message}")]
    Query { message: String },
}

impl CheckInRepositoryError {
    /// Build a [`CheckInRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`CheckInRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port over the append-only check-in store.
///
/// Check-ins are never mutated: the store appends via [`save`], reads via
/// the list methods, and removes only through the administrative
/// [`delete`] or a space-level cascade.
///
/// [`save`]: CheckInRepository::save
/// [`delete`]: CheckInRepository::delete
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// All check-ins belonging to one space, in unspecified order.
    async fn list_for_space(
        &self,
        space_id: SpaceId,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError>;

    /// A space's latest check-ins, newest first, at most `limit` entries.
    async fn list_recent_for_space(
        &self,
        space_id: SpaceId,
        limit: usize,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError>;

    /// All check-ins across all spaces with `timestamp >= cutoff`.
    async fn list_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError>;

    /// Append a check-in. The check-in's space must exist.
    async fn save(&self, checkin: &CheckIn) -> Result<(), CheckInRepositoryError>;

    /// Administrative removal. Returns whether the check-in existed.
    async fn delete(&self, checkin_id: CheckInId) -> Result<bool, CheckInRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCheckInRepository;

#[async_trait]
impl CheckInRepository for FixtureCheckInRepository {
    async fn list_for_space(
        &self,
        _space_id: SpaceId,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_recent_for_space(
        &self,
        _space_id: SpaceId,
        _limit: usize,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_since(
        &self,
        _cutoff: DateTime<Utc>,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        Ok(Vec::new())
    }

    async fn save(&self, _checkin: &CheckIn) -> Result<(), CheckInRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _checkin_id: CheckInId) -> Result<bool, CheckInRepositoryError> {
        Ok(false)
    }
}
