//! Analytics domain service.
//!
//! Implements the [`AnalyticsQuery`] driving port by pulling snapshots from
//! the store-adapter ports, taking `now` from an injected clock, and
//! delegating every computation to the pure functions in
//! [`crate::domain::analytics`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::Error;
use crate::domain::analytics::{
    AnalyticsConfig, PeakTimeRecord, UtilizationRecord, occupancy_snapshot, peak_times,
    space_utilization,
};
use crate::domain::checkin::CheckIn;
use crate::domain::ports::{
    AnalyticsQuery, CheckInRepository, CheckInRepositoryError, GetSpaceOccupancyRequest,
    GetSpaceOccupancyResponse, ListRecentCheckInsRequest, ListRecentCheckInsResponse,
    StudySpaceRepository, StudySpaceRepositoryError,
};
use crate::domain::space::{SpaceId, StudySpace};

/// Number of check-ins returned by the recent-check-ins read.
const RECENT_CHECKINS_LIMIT: usize = 10;

fn map_checkin_error(error: CheckInRepositoryError) -> Error {
    match error {
        CheckInRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("check-in store unavailable: {message}"))
        }
        CheckInRepositoryError::Query { message } => {
            Error::internal(format!("check-in store error: {message}"))
        }
    }
}

fn map_space_error(error: StudySpaceRepositoryError) -> Error {
    match error {
        StudySpaceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("study space store unavailable: {message}"))
        }
        StudySpaceRepositoryError::Query { message } => {
            Error::internal(format!("study space store error: {message}"))
        }
    }
}

/// Analytics service implementing the derived-metrics driving port.
#[derive(Clone)]
pub struct AnalyticsQueryService<C, S> {
    checkin_repo: Arc<C>,
    space_repo: Arc<S>,
    clock: Arc<dyn Clock>,
    config: AnalyticsConfig,
}

impl<C, S> AnalyticsQueryService<C, S> {
    /// Create a new analytics service over the store-adapter ports.
    pub fn new(
        checkin_repo: Arc<C>,
        space_repo: Arc<S>,
        clock: Arc<dyn Clock>,
        config: AnalyticsConfig,
    ) -> Self {
        Self {
            checkin_repo,
            space_repo,
            clock,
            config,
        }
    }
}

impl<C, S> AnalyticsQueryService<C, S>
where
    S: StudySpaceRepository,
{
    async fn require_space(&self, space_id: SpaceId) -> Result<StudySpace, Error> {
        self.space_repo
            .find_by_id(space_id)
            .await
            .map_err(map_space_error)?
            .ok_or_else(|| Error::not_found(format!("study space {space_id} not found")))
    }
}

#[async_trait]
impl<C, S> AnalyticsQuery for AnalyticsQueryService<C, S>
where
    C: CheckInRepository,
    S: StudySpaceRepository,
{
    async fn space_occupancy(
        &self,
        request: GetSpaceOccupancyRequest,
    ) -> Result<GetSpaceOccupancyResponse, Error> {
        let space = self.require_space(request.space_id).await?;
        let checkins = self
            .checkin_repo
            .list_for_space(space.id())
            .await
            .map_err(map_checkin_error)?;

        let now = self.clock.utc();
        let snapshot = occupancy_snapshot(&checkins, now, &self.config);
        debug!(
            space = %space.id(),
            checkins = checkins.len(),
            "computed occupancy snapshot"
        );

        Ok(GetSpaceOccupancyResponse {
            space_id: space.id(),
            space_name: space.name().to_owned(),
            snapshot,
        })
    }

    async fn peak_times(&self) -> Result<Vec<PeakTimeRecord>, Error> {
        let spaces = self.space_repo.list().await.map_err(map_space_error)?;
        let now = self.clock.utc();
        let cutoff = now - self.config.lookback();
        let checkins = self
            .checkin_repo
            .list_since(cutoff)
            .await
            .map_err(map_checkin_error)?;

        debug!(
            spaces = spaces.len(),
            checkins = checkins.len(),
            "computing peak times"
        );
        Ok(peak_times(&spaces, &checkins, now, &self.config))
    }

    async fn space_utilization(&self) -> Result<Vec<UtilizationRecord>, Error> {
        let spaces = self.space_repo.list().await.map_err(map_space_error)?;

        // The adapter contract offers per-space history reads; fetch each
        // space's full history rather than widening the port.
        let mut checkins: Vec<CheckIn> = Vec::new();
        for space in &spaces {
            let mut history = self
                .checkin_repo
                .list_for_space(space.id())
                .await
                .map_err(map_checkin_error)?;
            checkins.append(&mut history);
        }

        debug!(
            spaces = spaces.len(),
            checkins = checkins.len(),
            "computing space utilization"
        );
        Ok(space_utilization(&spaces, &checkins))
    }

    async fn recent_checkins(
        &self,
        request: ListRecentCheckInsRequest,
    ) -> Result<ListRecentCheckInsResponse, Error> {
        let space = self.require_space(request.space_id).await?;
        let checkins = self
            .checkin_repo
            .list_recent_for_space(space.id(), RECENT_CHECKINS_LIMIT)
            .await
            .map_err(map_checkin_error)?;

        Ok(ListRecentCheckInsResponse {
            checkins: checkins.into_iter().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
#[path = "analytics_service_tests.rs"]
mod tests;
