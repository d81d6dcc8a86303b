//! Namespace and key names of the persisted state layout.

/// Namespace holding all app state.
pub const DEFAULT_NAMESPACE: &str = "pulsepath_data";
/// Namespace an older settings screen wrote its own flag copies to.
pub const LEGACY_SETTINGS_NAMESPACE: &str = "app_settings";

pub const HABITS: &str = "habits";
pub const MOOD_ENTRIES: &str = "mood_entries";
pub const LAST_MOOD: &str = "last_mood";
pub const WATER_INTAKE: &str = "water_intake";
pub const WATER_TARGET: &str = "water_target";
pub const HABIT_PROGRESS: &str = "habit_progress";
pub const REMINDER_ENABLED: &str = "reminder_enabled";
pub const REMINDER_INTERVAL: &str = "reminder_interval";
pub const NOTIFICATIONS_ENABLED: &str = "notifications_enabled";
pub const DARK_MODE_ENABLED: &str = "dark_mode_enabled";
pub const USER_NAME: &str = "user_name";
pub const STREAK_DAYS: &str = "streak_days";
pub const MOOD_REMINDER_ENABLED: &str = "mood_reminder_enabled";
pub const MOOD_REMINDER_TIME: &str = "mood_reminder_time";

/// Flags that were duplicated in [`LEGACY_SETTINGS_NAMESPACE`].
pub const LEGACY_SETTINGS_KEYS: &[&str] = &[NOTIFICATIONS_ENABLED, DARK_MODE_ENABLED];
