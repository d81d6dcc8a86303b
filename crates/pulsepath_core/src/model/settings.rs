//! Consolidated user settings.
//!
//! One record owns the notification and dark-mode flags together with both
//! reminder configurations, so no second copy of a flag can drift.

/// Default for `notifications_enabled`.
pub const DEFAULT_NOTIFICATIONS_ENABLED: bool = true;
/// Default for `dark_mode_enabled`.
pub const DEFAULT_DARK_MODE_ENABLED: bool = false;
/// Default hydration reminder interval, in hours.
pub const DEFAULT_REMINDER_INTERVAL_HOURS: i32 = 2;
/// Local hour used for the default mood reminder time.
pub const DEFAULT_MOOD_REMINDER_HOUR: u32 = 9;

/// Hydration reminder configuration. Arming the alarm is the host's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydrationReminder {
    pub enabled: bool,
    pub interval_hours: i32,
}

/// Daily mood reminder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodReminder {
    pub enabled: bool,
    /// Epoch milliseconds; only the local time-of-day is meaningful.
    pub time_ms: i64,
}

/// Every user-facing toggle in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub notifications_enabled: bool,
    pub dark_mode_enabled: bool,
    pub hydration_reminder: HydrationReminder,
    pub mood_reminder: MoodReminder,
}
