//! Occupancy scorer: decaying freshness/occupancy snapshot for one space.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::checkin::{CheckIn, CrowdingLevel, NoiseLevel, OutletAvailability};

use super::AnalyticsConfig;
use super::round_to_hundredths;

/// Current freshness/occupancy signal for a single space.
///
/// Every field is `None` exactly when the space has no check-in history —
/// the defined "no data yet" state, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancySnapshot {
    /// Whole minutes since the latest check-in, never negative.
    pub last_updated_minutes: Option<u64>,
    /// Noise level reported by the latest check-in.
    pub recent_noise_level: Option<NoiseLevel>,
    /// Crowding reported by the latest check-in.
    pub recent_crowding: Option<CrowdingLevel>,
    /// Outlet availability reported by the latest check-in.
    pub recent_outlets: Option<OutletAvailability>,
    /// Decaying composite of recent crowding severity and check-in volume.
    /// Unbounded above, approaches zero with staleness, never negative.
    pub occupancy_score: Option<f64>,
}

impl OccupancySnapshot {
    /// Snapshot for a space with no check-in history.
    #[must_use]
    pub const fn no_data() -> Self {
        Self {
            last_updated_minutes: None,
            recent_noise_level: None,
            recent_crowding: None,
            recent_outlets: None,
            occupancy_score: None,
        }
    }
}

/// Compute a space's occupancy snapshot from its check-in history.
///
/// The latest check-in supplies the echoed recent-condition fields and the
/// crowding severity (empty=1, some=2, full=3). The score divides
/// `severity + recent_count` by a decay factor of
/// `1 + age_seconds / decay_window_seconds`, where `recent_count` is the
/// number of check-ins inside the trailing recent window (boundary
/// inclusive). Age is clamped to zero so a future-dated latest check-in
/// (clock skew) never inflates the score: the factor is always >= 1.
#[must_use]
pub fn occupancy_snapshot(
    checkins: &[CheckIn],
    now: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> OccupancySnapshot {
    let Some(latest) = checkins.iter().max_by_key(|checkin| checkin.timestamp()) else {
        return OccupancySnapshot::no_data();
    };

    let age = now.signed_duration_since(latest.timestamp());
    let last_updated_minutes = u64::try_from(age.num_minutes().max(0)).unwrap_or(0);

    let age_seconds = age.num_seconds().max(0);
    let decay_seconds = config.occupancy_decay().num_seconds().max(1);
    let decay_factor = 1.0 + fractional(age_seconds, decay_seconds);

    let recent_cutoff = now - config.recent_window();
    let recent = checkins
        .iter()
        .filter(|checkin| checkin.timestamp() >= recent_cutoff)
        .count();
    // Campus-scale histories stay far below u32::MAX; saturate rather than wrap.
    let recent_count = u32::try_from(recent).unwrap_or(u32::MAX);

    let numerator = f64::from(latest.crowding().severity().saturating_add(recent_count));
    let occupancy_score = round_to_hundredths(numerator / decay_factor);

    OccupancySnapshot {
        last_updated_minutes: Some(last_updated_minutes),
        recent_noise_level: Some(latest.noise_level()),
        recent_crowding: Some(latest.crowding()),
        recent_outlets: Some(latest.outlets_available()),
        occupancy_score: Some(occupancy_score),
    }
}

/// Ratio of two non-negative second counts as a float.
#[expect(
    clippy::cast_precision_loss,
    reason = "second counts are far below 2^52; the ratio is presentational"
)]
fn fractional(numerator: i64, denominator: i64) -> f64 {
    numerator as f64 / denominator as f64
}
