//! Ports connecting the engine to the boundary layer.
//!
//! Driven ports ([`CheckInRepository`], [`StudySpaceRepository`]) describe
//! the check-in store adapter the engine is handed snapshots from. The
//! driving port ([`AnalyticsQuery`]) is what inbound adapters call to read
//! derived metrics. Each port ships a fixture implementation for tests that
//! do not exercise a real store.

mod analytics_query;
mod check_in_repository;
mod space_repository;

pub use analytics_query::{
    AnalyticsQuery, CheckInPayload, FixtureAnalyticsQuery, GetSpaceOccupancyRequest,
    GetSpaceOccupancyResponse, ListRecentCheckInsRequest, ListRecentCheckInsResponse,
};
pub use check_in_repository::{
    CheckInRepository, CheckInRepositoryError, FixtureCheckInRepository,
};
pub use space_repository::{
    FixtureStudySpaceRepository, StudySpaceRepository, StudySpaceRepositoryError,
};

#[cfg(test)]
pub use analytics_query::MockAnalyticsQuery;
#[cfg(test)]
pub use check_in_repository::MockCheckInRepository;
#[cfg(test)]
pub use space_repository::MockStudySpaceRepository;
