//! Core domain logic for PulsePath.
//! This crate owns every persistence rule and derived value the app shows.

pub mod calendar;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::{
    bucket_day, day_key, month_grid, mood_history, rolling_week, CalendarActions, CalendarCell,
    MonthCursor, MonthCursorError, MoodHistoryRow,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::habit::{seed_habits, Habit};
pub use model::mood::{MoodEntry, MoodKind};
pub use model::settings::{HydrationReminder, MoodReminder, Settings};
pub use repo::keys::{DEFAULT_NAMESPACE, LEGACY_SETTINGS_NAMESPACE};
pub use repo::pref_repo::{
    PrefKind, PrefValue, PreferenceRepository, RepoError, RepoResult, SqlitePreferenceRepository,
};
pub use service::dashboard_service::{dashboard_summary, greeting_for_hour, DashboardSummary};
pub use service::local_store::{LocalStore, StoreError, StoreResult};
pub use service::mood_service::MoodService;
pub use service::progress::{
    current_mood_streak, habit_progress_percent, summary_emoji, water_progress_percent,
};

/// Where a store lives: database file plus preference namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: std::path::PathBuf,
    pub namespace: String,
}

impl StoreConfig {
    /// Config for `db_path` using [`DEFAULT_NAMESPACE`].
    pub fn new(db_path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
