//! Driving port for derived-metrics reads.
//!
//! Inbound adapters use this port to read occupancy snapshots, peak-time
//! records, and utilization aggregates without depending on the store or
//! the engine internals.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::analytics::{OccupancySnapshot, PeakTimeRecord, UtilizationRecord};
use crate::domain::checkin::{
    CheckIn, CheckInId, CrowdingLevel, NoiseLevel, OutletAvailability,
};
use crate::domain::error::Error;
use crate::domain::space::SpaceId;

/// Request to fetch one space's occupancy snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSpaceOccupancyRequest {
    pub space_id: SpaceId,
}

/// Response for a single occupancy lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSpaceOccupancyResponse {
    pub space_id: SpaceId,
    pub space_name: String,
    #[serde(flatten)]
    pub snapshot: OccupancySnapshot,
}

/// Request to list a space's latest check-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecentCheckInsRequest {
    pub space_id: SpaceId,
}

/// Response containing a space's latest check-ins, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecentCheckInsResponse {
    pub checkins: Vec<CheckInPayload>,
}

/// Read-model projection of a check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInPayload {
    pub id: CheckInId,
    pub space_id: SpaceId,
    pub noise_level: NoiseLevel,
    pub crowding: CrowdingLevel,
    pub outlets_available: OutletAvailability,
    pub notes: Option<String>,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

impl From<CheckIn> for CheckInPayload {
    fn from(value: CheckIn) -> Self {
        Self {
            id: value.id(),
            space_id: value.space_id(),
            noise_level: value.noise_level(),
            crowding: value.crowding(),
            outlets_available: value.outlets_available(),
            notes: value.notes().map(str::to_owned),
            user_id: value.user_id().to_owned(),
            timestamp: value.timestamp(),
        }
    }
}

/// Driving port for derived-metrics reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsQuery: Send + Sync {
    /// Current occupancy snapshot for one space.
    ///
    /// Returns [`Error::not_found`] when the space does not exist; a space
    /// with no check-in history yields a snapshot with all derived fields
    /// absent.
    async fn space_occupancy(
        &self,
        request: GetSpaceOccupancyRequest,
    ) -> Result<GetSpaceOccupancyResponse, Error>;

    /// Busiest hour bucket per known space over the configured lookback.
    async fn peak_times(&self) -> Result<Vec<PeakTimeRecord>, Error>;

    /// Whole-history utilization statistics per known space, ordered by
    /// space name ascending.
    async fn space_utilization(&self) -> Result<Vec<UtilizationRecord>, Error>;

    /// A space's latest check-ins, newest first.
    async fn recent_checkins(
        &self,
        request: ListRecentCheckInsRequest,
    ) -> Result<ListRecentCheckInsResponse, Error>;
}

/// Fixture query implementation for tests that do not need analytics.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnalyticsQuery;

#[async_trait]
impl AnalyticsQuery for FixtureAnalyticsQuery {
    async fn space_occupancy(
        &self,
        request: GetSpaceOccupancyRequest,
    ) -> Result<GetSpaceOccupancyResponse, Error> {
        Err(Error::not_found(format!(
            "study space {} not found",
            request.space_id
        )))
    }

    async fn peak_times(&self) -> Result<Vec<PeakTimeRecord>, Error> {
        Ok(Vec::new())
    }

    async fn space_utilization(&self) -> Result<Vec<UtilizationRecord>, Error> {
        Ok(Vec::new())
    }

    async fn recent_checkins(
        &self,
        request: ListRecentCheckInsRequest,
    ) -> Result<ListRecentCheckInsResponse, Error> {
        Err(Error::not_found(format!(
            "study space {} not found",
            request.space_id
        )))
    }
}
