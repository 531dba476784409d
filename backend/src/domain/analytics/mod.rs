//! Pure derived-metrics functions over check-in histories.
//!
//! Each function takes an immutable snapshot of check-ins plus a reference
//! instant and returns a value: no shared state, no locks, no I/O.
//! Concurrent invocations are trivially safe, and results are recomputed on
//! every query — no caching or invalidation, a deliberate simplicity choice
//! given campus-scale data volumes.
//!
//! - [`occupancy_snapshot`] — decaying freshness/occupancy score per space.
//! - [`peak_times`] — busiest hour bucket per space over a lookback window.
//! - [`space_utilization`] — crowding average and noise distribution per
//!   space over its entire history.

mod config;
mod occupancy;
mod peak_times;
#[cfg(test)]
mod tests;
mod utilization;

pub use config::{
    ANALYTICS_LOOKBACK_DAYS_ENV, AnalyticsConfig, AnalyticsEnv, DefaultAnalyticsEnv,
    OCCUPANCY_DECAY_MINUTES_ENV, RECENT_CHECKIN_WINDOW_MINUTES_ENV,
};
pub use occupancy::{OccupancySnapshot, occupancy_snapshot};
pub use peak_times::{PeakTimeRecord, peak_times};
pub use utilization::{NoiseDistribution, UtilizationRecord, space_utilization};

/// Round a score to two decimal places for presentation stability.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
