//! Peak-time analyzer: busiest hour bucket per space over a lookback window.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::checkin::CheckIn;
use crate::domain::space::{SpaceId, StudySpace};

use super::AnalyticsConfig;

/// Busiest hour bucket for one space within the lookback window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakTimeRecord {
    pub space_id: SpaceId,
    pub space_name: String,
    /// Start of the busiest hour, truncated to the hour. `None` when the
    /// space has no qualifying check-ins.
    pub peak_hour_start: Option<DateTime<Utc>>,
    /// Check-in count inside the peak hour; zero without qualifying data.
    pub checkins_during_peak: u64,
}

/// Compute the busiest hour bucket for every known space.
///
/// Check-ins qualify when their timestamp is at or after
/// `now - config.lookback()`. Each qualifying check-in is bucketed by
/// `(space, start of its UTC hour)`; for every space the bucket with the
/// strictly greatest count wins, and ties resolve to the earliest hour so
/// the result is deterministic regardless of map iteration order. One
/// record is emitted per known space, in the caller's enumeration order,
/// including spaces with zero qualifying check-ins.
#[must_use]
pub fn peak_times(
    spaces: &[StudySpace],
    checkins: &[CheckIn],
    now: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> Vec<PeakTimeRecord> {
    let cutoff = now - config.lookback();

    let mut buckets: HashMap<SpaceId, HashMap<DateTime<Utc>, u64>> = HashMap::new();
    for checkin in checkins {
        if checkin.timestamp() < cutoff {
            continue;
        }
        let hour = truncate_to_hour(checkin.timestamp());
        *buckets
            .entry(checkin.space_id())
            .or_default()
            .entry(hour)
            .or_insert(0) += 1;
    }

    spaces
        .iter()
        .map(|space| {
            let best = buckets.get(&space.id()).map_or((None, 0), best_bucket);
            let (peak_hour_start, checkins_during_peak) = best;
            PeakTimeRecord {
                space_id: space.id(),
                space_name: space.name().to_owned(),
                peak_hour_start,
                checkins_during_peak,
            }
        })
        .collect()
}

/// Pick the bucket with the greatest count, earliest hour on ties.
fn best_bucket(counts: &HashMap<DateTime<Utc>, u64>) -> (Option<DateTime<Utc>>, u64) {
    let mut best: Option<(DateTime<Utc>, u64)> = None;
    for (&hour, &count) in counts {
        let replace = match best {
            None => true,
            Some((best_hour, best_count)) => {
                count > best_count || (count == best_count && hour < best_hour)
            }
        };
        if replace {
            best = Some((hour, count));
        }
    }
    best.map_or((None, 0), |(hour, count)| (Some(hour), count))
}

/// Truncate a timestamp down to the start of its UTC hour.
fn truncate_to_hour(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let seconds = timestamp.timestamp();
    let floored = seconds - seconds.rem_euclid(3600);
    // Flooring by an hour cannot leave the representable range.
    DateTime::from_timestamp(floored, 0).unwrap_or(timestamp)
}
