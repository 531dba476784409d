//! Environment-driven configuration for the analytics engine.

use chrono::Duration;

/// Environment variable controlling the occupancy decay window, in minutes.
pub const OCCUPANCY_DECAY_MINUTES_ENV: &str = "OCCUPANCY_DECAY_MINUTES";

/// Environment variable controlling the recent-check-in window, in minutes.
pub const RECENT_CHECKIN_WINDOW_MINUTES_ENV: &str = "RECENT_CHECKIN_WINDOW_MINUTES";

/// Environment variable controlling the peak-time lookback, in days.
pub const ANALYTICS_LOOKBACK_DAYS_ENV: &str = "ANALYTICS_LOOKBACK_DAYS";

/// Environment abstraction for analytics configuration lookups.
///
/// This trait allows testing with mock environments without unsafe env var
/// mutations.
pub trait AnalyticsEnv {
    /// Fetch a string value by name.
    fn string(&self, name: &str) -> Option<String>;
}

/// Environment access backed by the real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAnalyticsEnv;

impl DefaultAnalyticsEnv {
    /// Create a new environment reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AnalyticsEnv for DefaultAnalyticsEnv {
    fn string(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Tuning knobs for the derived-metrics functions.
///
/// All three windows affect only the algorithms, nothing structural.
/// Invalid or missing environment values fall back to defaults; accepted
/// values are clamped to sane ranges.
///
/// # Example
///
/// ```
/// use studyspaces_backend::domain::AnalyticsConfig;
///
/// let config = AnalyticsConfig::default();
/// assert_eq!(config.occupancy_decay().num_minutes(), 30);
/// assert_eq!(config.recent_window().num_minutes(), 30);
/// assert_eq!(config.lookback().num_days(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    occupancy_decay_minutes: u32,
    recent_window_minutes: u32,
    lookback_days: u32,
}

impl AnalyticsConfig {
    /// Default occupancy decay window in minutes.
    const DEFAULT_DECAY_MINUTES: u32 = 30;

    /// Default recent-check-in window in minutes.
    const DEFAULT_RECENT_MINUTES: u32 = 30;

    /// Default peak-time lookback in days.
    const DEFAULT_LOOKBACK_DAYS: u32 = 7;

    /// Minute windows are clamped to [1 minute, 1 day].
    const MINUTES_RANGE: (u32, u32) = (1, 24 * 60);

    /// Lookback is clamped to [1 day, 1 year].
    const LOOKBACK_RANGE: (u32, u32) = (1, 365);

    /// Load configuration from the real process environment.
    ///
    /// Reads `OCCUPANCY_DECAY_MINUTES` (default 30),
    /// `RECENT_CHECKIN_WINDOW_MINUTES` (default 30), and
    /// `ANALYTICS_LOOKBACK_DAYS` (default 7).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(&DefaultAnalyticsEnv)
    }

    /// Load configuration from a custom environment source.
    ///
    /// Useful for testing without unsafe env var mutations.
    pub fn from_env_with(env: &impl AnalyticsEnv) -> Self {
        let (min_minutes, max_minutes) = Self::MINUTES_RANGE;
        let (min_days, max_days) = Self::LOOKBACK_RANGE;

        let read = |name: &str, default: u32| {
            env.string(name)
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                .unwrap_or(default)
        };

        Self {
            occupancy_decay_minutes: read(OCCUPANCY_DECAY_MINUTES_ENV, Self::DEFAULT_DECAY_MINUTES)
                .clamp(min_minutes, max_minutes),
            recent_window_minutes: read(
                RECENT_CHECKIN_WINDOW_MINUTES_ENV,
                Self::DEFAULT_RECENT_MINUTES,
            )
            .clamp(min_minutes, max_minutes),
            lookback_days: read(ANALYTICS_LOOKBACK_DAYS_ENV, Self::DEFAULT_LOOKBACK_DAYS)
                .clamp(min_days, max_days),
        }
    }

    /// Create with explicit windows (for testing).
    #[must_use]
    pub const fn with_windows(
        occupancy_decay_minutes: u32,
        recent_window_minutes: u32,
        lookback_days: u32,
    ) -> Self {
        Self {
            occupancy_decay_minutes,
            recent_window_minutes,
            lookback_days,
        }
    }

    /// Window over which the occupancy score decays towards zero.
    #[must_use]
    pub fn occupancy_decay(&self) -> Duration {
        Duration::minutes(i64::from(self.occupancy_decay_minutes))
    }

    /// Trailing window in which check-ins count as recent activity.
    #[must_use]
    pub fn recent_window(&self) -> Duration {
        Duration::minutes(i64::from(self.recent_window_minutes))
    }

    /// Lookback window for peak-time analysis.
    #[must_use]
    pub fn lookback(&self) -> Duration {
        Duration::days(i64::from(self.lookback_days))
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            occupancy_decay_minutes: Self::DEFAULT_DECAY_MINUTES,
            recent_window_minutes: Self::DEFAULT_RECENT_MINUTES,
            lookback_days: Self::DEFAULT_LOOKBACK_DAYS,
        }
    }
}
