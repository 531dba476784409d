//! Utilization aggregator: whole-history crowding and noise statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::checkin::{CheckIn, CrowdingLevel, NoiseLevel};
use crate::domain::space::{SpaceId, StudySpace};

use super::round_to_hundredths;

/// Check-in counts per noise level.
///
/// The distribution always carries exactly the three fixed levels; a level
/// never observed simply counts zero. Counts sum to the history length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseDistribution {
    pub quiet: u64,
    pub moderate: u64,
    pub loud: u64,
}

impl NoiseDistribution {
    /// Count for a single noise level.
    #[must_use]
    pub const fn count(&self, level: NoiseLevel) -> u64 {
        match level {
            NoiseLevel::Quiet => self.quiet,
            NoiseLevel::Moderate => self.moderate,
            NoiseLevel::Loud => self.loud,
        }
    }

    /// Total observations across all levels.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.quiet + self.moderate + self.loud
    }

    fn record(&mut self, level: NoiseLevel) {
        match level {
            NoiseLevel::Quiet => self.quiet += 1,
            NoiseLevel::Moderate => self.moderate += 1,
            NoiseLevel::Loud => self.loud += 1,
        }
    }
}

/// Aggregate crowding/noise statistics for one space over its full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationRecord {
    pub space_id: SpaceId,
    pub space_name: String,
    /// Mean crowding mapped to [0, 1] (empty=0.0, some=0.5, full=1.0),
    /// rounded to two decimals. `None` for an empty history.
    pub avg_crowding_score: Option<f64>,
    /// Most frequent crowding label. `None` for an empty history.
    pub dominant_crowding_label: Option<CrowdingLevel>,
    pub noise_distribution: NoiseDistribution,
}

/// Compute utilization statistics for every known space.
///
/// Records are ordered by space name ascending (case-sensitive ordinal
/// ordering). The dominant crowding label scans levels in the fixed order
/// empty, some, full and keeps the first label attaining the maximal count,
/// so ties resolve to the least-crowded label deterministically.
#[must_use]
pub fn space_utilization(spaces: &[StudySpace], checkins: &[CheckIn]) -> Vec<UtilizationRecord> {
    let mut by_space: HashMap<SpaceId, Vec<&CheckIn>> = HashMap::new();
    for checkin in checkins {
        by_space.entry(checkin.space_id()).or_default().push(checkin);
    }

    let mut records: Vec<UtilizationRecord> = spaces
        .iter()
        .map(|space| {
            let history = by_space.get(&space.id()).map_or(&[][..], Vec::as_slice);
            build_record(space, history)
        })
        .collect();
    records.sort_by(|a, b| a.space_name.cmp(&b.space_name));
    records
}

fn build_record(space: &StudySpace, history: &[&CheckIn]) -> UtilizationRecord {
    let mut noise_distribution = NoiseDistribution::default();
    for checkin in history {
        noise_distribution.record(checkin.noise_level());
    }

    let (avg_crowding_score, dominant_crowding_label) = if history.is_empty() {
        (None, None)
    } else {
        (
            Some(average_crowding(history)),
            dominant_crowding(history),
        )
    };

    UtilizationRecord {
        space_id: space.id(),
        space_name: space.name().to_owned(),
        avg_crowding_score,
        dominant_crowding_label,
        noise_distribution,
    }
}

/// Mean of the per-check-in utilization values, rounded to two decimals.
#[expect(
    clippy::cast_precision_loss,
    reason = "history lengths are far below 2^52; the mean is presentational"
)]
fn average_crowding(history: &[&CheckIn]) -> f64 {
    let sum: f64 = history
        .iter()
        .map(|checkin| checkin.crowding().utilization())
        .sum();
    round_to_hundredths(sum / history.len() as f64)
}

/// Most frequent crowding label, least-crowded first on ties.
fn dominant_crowding(history: &[&CheckIn]) -> Option<CrowdingLevel> {
    let mut counts = [0_u64; 3];
    for checkin in history {
        let index = match checkin.crowding() {
            CrowdingLevel::Empty => 0,
            CrowdingLevel::Some => 1,
            CrowdingLevel::Full => 2,
        };
        if let Some(slot) = counts.get_mut(index) {
            *slot += 1;
        }
    }

    // Scan in canonical order, keeping the first label with the max count.
    let mut best: Option<(CrowdingLevel, u64)> = None;
    for (&level, count) in CrowdingLevel::ALL.iter().zip(counts) {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((level, count));
        }
    }
    best.map(|(level, _)| level)
}
