//! Regression coverage for the derived-metrics functions.

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::rstest;

use crate::domain::checkin::{
    CheckIn, CheckInDraft, CheckInId, CrowdingLevel, NoiseLevel, OutletAvailability,
};
use crate::domain::space::{SpaceId, StudySpace, StudySpaceDraft};

use super::config::{AnalyticsEnv, OCCUPANCY_DECAY_MINUTES_ENV, RECENT_CHECKIN_WINDOW_MINUTES_ENV};
use super::{
    ANALYTICS_LOOKBACK_DAYS_ENV, AnalyticsConfig, OccupancySnapshot, occupancy_snapshot,
    peak_times, space_utilization,
};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0)
        .single()
        .expect("valid base timestamp")
}

fn build_space(name: &str) -> StudySpace {
    StudySpace::new(StudySpaceDraft {
        id: SpaceId::random(),
        name: name.to_owned(),
        building: "Main Library".to_owned(),
        floor: None,
        latitude: 41.79,
        longitude: -87.6,
        capacity: Some(40),
        created_at: base_time() - Duration::days(30),
    })
    .expect("valid space")
}

fn build_checkin(
    space_id: SpaceId,
    crowding: CrowdingLevel,
    timestamp: DateTime<Utc>,
) -> CheckIn {
    build_checkin_with_noise(space_id, crowding, NoiseLevel::Moderate, timestamp)
}

fn build_checkin_with_noise(
    space_id: SpaceId,
    crowding: CrowdingLevel,
    noise_level: NoiseLevel,
    timestamp: DateTime<Utc>,
) -> CheckIn {
    CheckIn::new(CheckInDraft {
        id: CheckInId::random(),
        space_id,
        noise_level,
        crowding,
        outlets_available: OutletAvailability::Some,
        notes: None,
        user_id: Some("tester".to_owned()),
        timestamp,
    })
    .expect("valid check-in")
}

// --- occupancy scorer ---------------------------------------------------

#[rstest]
fn empty_history_yields_no_data_snapshot() {
    let snapshot = occupancy_snapshot(&[], base_time(), &AnalyticsConfig::default());
    assert_eq!(snapshot, OccupancySnapshot::no_data());
}

#[rstest]
fn fresh_history_scores_severity_plus_recent_count() {
    // Check-ins at crowding=full (t=0) and crowding=empty (t=10min), with
    // now=t=10min: latest is the empty one, severity 1, both recent,
    // decay factor 1 => score 3.0.
    let space_id = SpaceId::random();
    let start = base_time();
    let checkins = vec![
        build_checkin(space_id, CrowdingLevel::Full, start),
        build_checkin(space_id, CrowdingLevel::Empty, start + Duration::minutes(10)),
    ];

    let snapshot = occupancy_snapshot(
        &checkins,
        start + Duration::minutes(10),
        &AnalyticsConfig::default(),
    );

    assert_eq!(snapshot.last_updated_minutes, Some(0));
    assert_eq!(snapshot.recent_crowding, Some(CrowdingLevel::Empty));
    assert_eq!(snapshot.recent_noise_level, Some(NoiseLevel::Moderate));
    assert_eq!(snapshot.recent_outlets, Some(OutletAvailability::Some));
    assert_eq!(snapshot.occupancy_score, Some(3.0));
}

#[rstest]
fn stale_history_decays_and_drops_old_recent_checkins() {
    // Same two check-ins but now=t=40min: 30 minutes since latest, decay
    // factor 2, only the t=10min check-in is inside the trailing window
    // (cutoff t=10 inclusive) => score (1+1)/2 = 1.0.
    let space_id = SpaceId::random();
    let start = base_time();
    let checkins = vec![
        build_checkin(space_id, CrowdingLevel::Full, start),
        build_checkin(space_id, CrowdingLevel::Empty, start + Duration::minutes(10)),
    ];

    let snapshot = occupancy_snapshot(
        &checkins,
        start + Duration::minutes(40),
        &AnalyticsConfig::default(),
    );

    assert_eq!(snapshot.last_updated_minutes, Some(30));
    assert_eq!(snapshot.occupancy_score, Some(1.0));
}

#[rstest]
fn score_is_non_increasing_with_staleness_at_fixed_recent_count() {
    let space_id = SpaceId::random();
    let start = base_time();
    let checkins = vec![build_checkin(space_id, CrowdingLevel::Some, start)];
    let config = AnalyticsConfig::default();

    // Both instants keep the single check-in inside the recent window, so
    // recent_count is fixed at 1 while the decay factor grows.
    let earlier = occupancy_snapshot(&checkins, start + Duration::minutes(5), &config);
    let later = occupancy_snapshot(&checkins, start + Duration::minutes(25), &config);

    let earlier_score = earlier.occupancy_score.expect("score present");
    let later_score = later.occupancy_score.expect("score present");
    assert!(later_score <= earlier_score);
    assert!(later_score > 0.0);
}

#[rstest]
fn last_updated_minutes_floors_partial_minutes() {
    let space_id = SpaceId::random();
    let start = base_time();
    let checkins = vec![build_checkin(space_id, CrowdingLevel::Some, start)];

    let snapshot = occupancy_snapshot(
        &checkins,
        start + Duration::seconds(119),
        &AnalyticsConfig::default(),
    );

    assert_eq!(snapshot.last_updated_minutes, Some(1));
}

#[rstest]
fn future_dated_latest_check_in_is_treated_as_age_zero() {
    let space_id = SpaceId::random();
    let start = base_time();
    let checkins = vec![build_checkin(space_id, CrowdingLevel::Full, start + Duration::minutes(5))];

    let snapshot = occupancy_snapshot(&checkins, start, &AnalyticsConfig::default());

    assert_eq!(snapshot.last_updated_minutes, Some(0));
    // severity 3 + recent_count 1, decay factor clamped to 1.
    assert_eq!(snapshot.occupancy_score, Some(4.0));
}

#[rstest]
fn score_is_rounded_to_two_decimals() {
    let space_id = SpaceId::random();
    let start = base_time();
    let checkins = vec![build_checkin(space_id, CrowdingLevel::Some, start)];

    // 9 minutes of staleness: factor 1.3, score (2+1)/1.3 = 2.30769... => 2.31.
    let snapshot = occupancy_snapshot(
        &checkins,
        start + Duration::minutes(9),
        &AnalyticsConfig::default(),
    );

    assert_eq!(snapshot.occupancy_score, Some(2.31));
}

#[rstest]
fn recent_window_boundary_is_inclusive() {
    let space_id = SpaceId::random();
    let start = base_time();
    let checkins = vec![
        build_checkin(space_id, CrowdingLevel::Some, start),
        build_checkin(space_id, CrowdingLevel::Some, start + Duration::minutes(30)),
    ];

    let snapshot = occupancy_snapshot(
        &checkins,
        start + Duration::minutes(30),
        &AnalyticsConfig::default(),
    );

    // The t=0 check-in sits exactly on the cutoff and still counts.
    // severity 2 + recent_count 2 over factor 1.
    assert_eq!(snapshot.occupancy_score, Some(4.0));
}

// --- peak-time analyzer -------------------------------------------------

#[rstest]
fn space_without_qualifying_checkins_yields_null_peak() {
    let space = build_space("Quiet Annex");
    let records = peak_times(
        std::slice::from_ref(&space),
        &[],
        base_time(),
        &AnalyticsConfig::default(),
    );

    assert_eq!(records.len(), 1);
    let record = records.first().expect("one record");
    assert_eq!(record.space_id, space.id());
    assert_eq!(record.space_name, "Quiet Annex");
    assert_eq!(record.peak_hour_start, None);
    assert_eq!(record.checkins_during_peak, 0);
}

#[rstest]
fn busiest_hour_bucket_wins() {
    let space = build_space("Harper Reading Room");
    let hour = Utc
        .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid hour");
    let checkins = vec![
        build_checkin(space.id(), CrowdingLevel::Some, hour + Duration::minutes(5)),
        build_checkin(space.id(), CrowdingLevel::Full, hour + Duration::minutes(40)),
        build_checkin(space.id(), CrowdingLevel::Some, hour + Duration::hours(2)),
    ];

    let records = peak_times(
        std::slice::from_ref(&space),
        &checkins,
        base_time(),
        &AnalyticsConfig::default(),
    );

    let record = records.first().expect("one record");
    assert_eq!(record.peak_hour_start, Some(hour));
    assert_eq!(record.checkins_during_peak, 2);
}

#[rstest]
fn peak_hour_is_truncated_to_the_hour() {
    let space = build_space("Map Room");
    let timestamp = Utc
        .with_ymd_and_hms(2026, 3, 2, 9, 42, 17)
        .single()
        .expect("valid timestamp");
    let checkins = vec![build_checkin(space.id(), CrowdingLevel::Some, timestamp)];

    let records = peak_times(
        std::slice::from_ref(&space),
        &checkins,
        base_time(),
        &AnalyticsConfig::default(),
    );

    let expected = Utc
        .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid hour");
    assert_eq!(
        records.first().expect("one record").peak_hour_start,
        Some(expected)
    );
}

#[rstest]
fn tied_buckets_resolve_to_the_earliest_hour() {
    let space = build_space("Commons");
    let early = Utc
        .with_ymd_and_hms(2026, 3, 1, 14, 0, 0)
        .single()
        .expect("valid hour");
    let late = early + Duration::hours(4);
    let checkins = vec![
        build_checkin(space.id(), CrowdingLevel::Some, late + Duration::minutes(1)),
        build_checkin(space.id(), CrowdingLevel::Some, late + Duration::minutes(2)),
        build_checkin(space.id(), CrowdingLevel::Some, early + Duration::minutes(1)),
        build_checkin(space.id(), CrowdingLevel::Some, early + Duration::minutes(2)),
    ];

    let records = peak_times(
        std::slice::from_ref(&space),
        &checkins,
        base_time(),
        &AnalyticsConfig::default(),
    );

    let record = records.first().expect("one record");
    assert_eq!(record.peak_hour_start, Some(early));
    assert_eq!(record.checkins_during_peak, 2);
}

#[rstest]
fn checkins_outside_the_lookback_are_ignored() {
    let space = build_space("Basement Lab");
    let now = base_time();
    let checkins = vec![
        build_checkin(space.id(), CrowdingLevel::Full, now - Duration::days(8)),
        build_checkin(space.id(), CrowdingLevel::Some, now - Duration::days(1)),
    ];

    let records = peak_times(
        std::slice::from_ref(&space),
        &checkins,
        now,
        &AnalyticsConfig::default(),
    );

    let record = records.first().expect("one record");
    assert_eq!(record.checkins_during_peak, 1);
    let expected = truncate_expectation(now - Duration::days(1));
    assert_eq!(record.peak_hour_start, Some(expected));
}

#[rstest]
fn peak_records_preserve_space_enumeration_order() {
    let spaces = vec![build_space("Zoology Stacks"), build_space("Atrium")];
    let records = peak_times(&spaces, &[], base_time(), &AnalyticsConfig::default());

    let names: Vec<&str> = records.iter().map(|r| r.space_name.as_str()).collect();
    assert_eq!(names, vec!["Zoology Stacks", "Atrium"]);
}

fn truncate_expectation(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let seconds = timestamp.timestamp();
    DateTime::from_timestamp(seconds - seconds.rem_euclid(3600), 0).expect("in range")
}

// --- utilization aggregator ---------------------------------------------

#[rstest]
fn empty_history_yields_null_stats_and_zero_distribution() {
    let space = build_space("Silent Room");
    let records = space_utilization(std::slice::from_ref(&space), &[]);

    let record = records.first().expect("one record");
    assert_eq!(record.avg_crowding_score, None);
    assert_eq!(record.dominant_crowding_label, None);
    assert_eq!(record.noise_distribution.quiet, 0);
    assert_eq!(record.noise_distribution.moderate, 0);
    assert_eq!(record.noise_distribution.loud, 0);
}

#[rstest]
fn noise_distribution_counts_sum_to_history_length() {
    let space = build_space("Loud Lounge");
    let start = base_time();
    let checkins = vec![
        build_checkin_with_noise(space.id(), CrowdingLevel::Some, NoiseLevel::Quiet, start),
        build_checkin_with_noise(
            space.id(),
            CrowdingLevel::Full,
            NoiseLevel::Loud,
            start + Duration::minutes(1),
        ),
        build_checkin_with_noise(
            space.id(),
            CrowdingLevel::Full,
            NoiseLevel::Loud,
            start + Duration::minutes(2),
        ),
    ];

    let records = space_utilization(std::slice::from_ref(&space), &checkins);
    let distribution = records.first().expect("one record").noise_distribution;

    assert_eq!(distribution.quiet, 1);
    assert_eq!(distribution.moderate, 0);
    assert_eq!(distribution.loud, 2);
    assert_eq!(distribution.total(), 3);
}

#[rstest]
fn average_crowding_is_the_exact_severity_mean() {
    let space = build_space("Mezzanine");
    let start = base_time();
    let checkins = vec![
        build_checkin(space.id(), CrowdingLevel::Empty, start),
        build_checkin(space.id(), CrowdingLevel::Full, start + Duration::minutes(1)),
    ];

    let records = space_utilization(std::slice::from_ref(&space), &checkins);
    let record = records.first().expect("one record");

    assert_eq!(record.avg_crowding_score, Some(0.5));
}

#[rstest]
fn average_crowding_stays_within_unit_interval_and_rounds() {
    let space = build_space("Stacks");
    let start = base_time();
    let checkins = vec![
        build_checkin(space.id(), CrowdingLevel::Some, start),
        build_checkin(space.id(), CrowdingLevel::Some, start + Duration::minutes(1)),
        build_checkin(space.id(), CrowdingLevel::Full, start + Duration::minutes(2)),
    ];

    let records = space_utilization(std::slice::from_ref(&space), &checkins);
    let score = records
        .first()
        .expect("one record")
        .avg_crowding_score
        .expect("score present");

    // (0.5 + 0.5 + 1.0) / 3 = 0.666... => 0.67
    assert_eq!(score, 0.67);
    assert!((0.0..=1.0).contains(&score));
}

#[rstest]
fn dominant_crowding_picks_the_most_frequent_label() {
    let space = build_space("Reading Room");
    let start = base_time();
    let checkins = vec![
        build_checkin(space.id(), CrowdingLevel::Full, start),
        build_checkin(space.id(), CrowdingLevel::Full, start + Duration::minutes(1)),
        build_checkin(space.id(), CrowdingLevel::Empty, start + Duration::minutes(2)),
    ];

    let records = space_utilization(std::slice::from_ref(&space), &checkins);
    assert_eq!(
        records.first().expect("one record").dominant_crowding_label,
        Some(CrowdingLevel::Full)
    );
}

#[rstest]
fn dominant_crowding_ties_resolve_to_the_least_crowded_label() {
    let space = build_space("Atrium");
    let start = base_time();
    let checkins = vec![
        build_checkin(space.id(), CrowdingLevel::Full, start),
        build_checkin(space.id(), CrowdingLevel::Empty, start + Duration::minutes(1)),
    ];

    let records = space_utilization(std::slice::from_ref(&space), &checkins);
    assert_eq!(
        records.first().expect("one record").dominant_crowding_label,
        Some(CrowdingLevel::Empty)
    );
}

#[rstest]
fn utilization_records_are_ordered_by_name_ordinal() {
    // Ordinal ordering is case-sensitive: uppercase sorts before lowercase.
    let spaces = vec![
        build_space("annex"),
        build_space("Zoology Stacks"),
        build_space("Atrium"),
    ];

    let records = space_utilization(&spaces, &[]);
    let names: Vec<&str> = records.iter().map(|r| r.space_name.as_str()).collect();
    assert_eq!(names, vec!["Atrium", "Zoology Stacks", "annex"]);
}

#[rstest]
fn checkins_are_attributed_to_their_own_space() {
    let first = build_space("North Hall");
    let second = build_space("South Hall");
    let start = base_time();
    let checkins = vec![
        build_checkin(first.id(), CrowdingLevel::Full, start),
        build_checkin(second.id(), CrowdingLevel::Empty, start),
    ];

    let records = space_utilization(&[first.clone(), second], &checkins);
    let north = records
        .iter()
        .find(|r| r.space_id == first.id())
        .expect("north record");

    assert_eq!(north.avg_crowding_score, Some(1.0));
    assert_eq!(north.dominant_crowding_label, Some(CrowdingLevel::Full));
}

// --- configuration ------------------------------------------------------

struct MapEnv(HashMap<&'static str, &'static str>);

impl AnalyticsEnv for MapEnv {
    fn string(&self, name: &str) -> Option<String> {
        self.0.get(name).map(|value| (*value).to_owned())
    }
}

#[rstest]
fn config_defaults_match_documented_windows() {
    let config = AnalyticsConfig::default();
    assert_eq!(config.occupancy_decay(), Duration::minutes(30));
    assert_eq!(config.recent_window(), Duration::minutes(30));
    assert_eq!(config.lookback(), Duration::days(7));
}

#[rstest]
fn config_reads_overrides_from_the_environment() {
    let env = MapEnv(HashMap::from([
        (OCCUPANCY_DECAY_MINUTES_ENV, "45"),
        (RECENT_CHECKIN_WINDOW_MINUTES_ENV, "15"),
        (ANALYTICS_LOOKBACK_DAYS_ENV, "14"),
    ]));

    let config = AnalyticsConfig::from_env_with(&env);
    assert_eq!(config.occupancy_decay(), Duration::minutes(45));
    assert_eq!(config.recent_window(), Duration::minutes(15));
    assert_eq!(config.lookback(), Duration::days(14));
}

#[rstest]
#[case::not_a_number("soon")]
#[case::negative("-3")]
#[case::empty("")]
fn invalid_environment_values_fall_back_to_defaults(#[case] raw: &'static str) {
    let env = MapEnv(HashMap::from([
        (OCCUPANCY_DECAY_MINUTES_ENV, raw),
        (ANALYTICS_LOOKBACK_DAYS_ENV, raw),
    ]));

    let config = AnalyticsConfig::from_env_with(&env);
    assert_eq!(config, AnalyticsConfig::default());
}

#[rstest]
fn out_of_range_environment_values_are_clamped() {
    let env = MapEnv(HashMap::from([
        (OCCUPANCY_DECAY_MINUTES_ENV, "0"),
        (RECENT_CHECKIN_WINDOW_MINUTES_ENV, "999999"),
        (ANALYTICS_LOOKBACK_DAYS_ENV, "10000"),
    ]));

    let config = AnalyticsConfig::from_env_with(&env);
    assert_eq!(config.occupancy_decay(), Duration::minutes(1));
    assert_eq!(config.recent_window(), Duration::minutes(24 * 60));
    assert_eq!(config.lookback(), Duration::days(365));
}
