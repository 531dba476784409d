//! Driven port for study-space reads and administrative writes.

use async_trait::async_trait;

use crate::domain::space::{SpaceId, StudySpace};

/// Errors raised by study-space store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudySpaceRepositoryError {
    /// Store connection could not be established.
    #[error("study space store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("study space store query failed: {message}")]
    Query { message: String },
}

impl StudySpaceRepositoryError {
    /// Build a [`StudySpaceRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`StudySpaceRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port over the study-space reference store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudySpaceRepository: Send + Sync {
    /// All known spaces, ordered by name ascending (ordinal).
    async fn list(&self) -> Result<Vec<StudySpace>, StudySpaceRepositoryError>;

    /// Find a space by id.
    async fn find_by_id(
        &self,
        space_id: SpaceId,
    ) -> Result<Option<StudySpace>, StudySpaceRepositoryError>;

    /// Persist a space.
    async fn save(&self, space: &StudySpace) -> Result<(), StudySpaceRepositoryError>;

    /// Remove a space and, by cascade, its check-ins. Returns whether the
    /// space existed.
    async fn delete(&self, space_id: SpaceId) -> Result<bool, StudySpaceRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStudySpaceRepository;

#[async_trait]
impl StudySpaceRepository for FixtureStudySpaceRepository {
    async fn list(&self) -> Result<Vec<StudySpace>, StudySpaceRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _space_id: SpaceId,
    ) -> Result<Option<StudySpace>, StudySpaceRepositoryError> {
        Ok(None)
    }

    async fn save(&self, _space: &StudySpace) -> Result<(), StudySpaceRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _space_id: SpaceId) -> Result<bool, StudySpaceRepositoryError> {
        Ok(false)
    }
}
