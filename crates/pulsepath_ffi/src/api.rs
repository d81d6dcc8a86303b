//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose screen-level operations (dashboard, mood, settings) to Dart via FRB.
//! - Translate core errors into plain response envelopes.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Every call runs against the store resolved once per process.
//! - Calendar and "today" values use the device time zone.

use chrono::{Local, NaiveDate};
use log::warn;
use pulsepath_core::db::open_db;
use pulsepath_core::{
    core_version as core_version_inner, dashboard_summary, init_logging as init_logging_inner,
    ping as ping_inner, CalendarCell, Habit, HydrationReminder, LocalStore, MonthCursor,
    MoodHistoryRow, MoodKind, MoodReminder, MoodService, Settings, SqlitePreferenceRepository,
    StoreConfig, LEGACY_SETTINGS_NAMESPACE,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const STORE_DB_FILE_NAME: &str = "pulsepath.sqlite3";
const STORE_DB_PATH_ENV: &str = "PULSEPATH_DB_PATH";
static STORE_CONFIG: OnceLock<StoreConfig> = OnceLock::new();
static LEGACY_SETTINGS_MERGED: OnceLock<()> = OnceLock::new();

type FfiStore<'conn> = LocalStore<SqlitePreferenceRepository<'conn>, Local>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Repeating the call with the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic result envelope for write operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created mood entry, when one was created.
    pub entry_id: Option<String>,
    /// Human-readable result for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            entry_id: None,
            message: message.into(),
        }
    }

    fn created(message: impl Into<String>, entry_id: String) -> Self {
        Self {
            ok: true,
            entry_id: Some(entry_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            message: message.into(),
        }
    }
}

/// One calendar cell as rendered by Flutter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCellItem {
    /// `yyyy-MM-dd`.
    pub date: String,
    pub label: String,
    pub day_number: u32,
    /// Empty when no mood was logged that day.
    pub emoji: String,
    pub is_today: bool,
}

/// Month grid plus its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonthResponse {
    /// `March 2024`; empty on failure.
    pub title: String,
    pub cells: Vec<CalendarCellItem>,
    pub message: String,
}

/// Dashboard screen data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub ok: bool,
    pub message: String,
    pub greeting: String,
    pub user_name: String,
    pub streak_days: i32,
    pub habit_progress: i32,
    pub water_intake: i32,
    pub water_target: i32,
    pub water_progress: i32,
    pub last_mood: String,
    pub last_mood_emoji: String,
    pub week: Vec<CalendarCellItem>,
}

/// Habit row exchanged with the habits screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub target: i32,
    pub progress: i32,
}

/// Mood history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodHistoryItem {
    pub entry_id: String,
    pub emoji: String,
    pub mood: String,
    pub note: String,
    pub logged_at: String,
}

/// Settings screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub notifications_enabled: bool,
    pub dark_mode_enabled: bool,
    pub hydration_reminder_enabled: bool,
    pub hydration_reminder_interval_hours: i32,
    pub mood_reminder_enabled: bool,
    pub mood_reminder_time_ms: i64,
}

/// Loads everything the dashboard shows.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_load() -> DashboardView {
    match with_store(|store| dashboard_summary(store).map_err(|err| err.to_string())) {
        Ok(summary) => DashboardView {
            ok: true,
            message: String::new(),
            greeting: summary.greeting.to_string(),
            user_name: summary.user_name,
            streak_days: summary.streak_days,
            habit_progress: summary.habit_progress,
            water_intake: summary.water_intake,
            water_target: summary.water_target,
            water_progress: summary.water_progress,
            last_mood: summary.last_mood,
            last_mood_emoji: summary.last_mood_emoji.to_string(),
            week: summary.week.iter().map(to_cell_item).collect(),
        },
        Err(err) => DashboardView {
            ok: false,
            message: format!("dashboard_load failed: {err}"),
            greeting: String::new(),
            user_name: String::new(),
            streak_days: 0,
            habit_progress: 0,
            water_intake: 0,
            water_target: 0,
            water_progress: 0,
            last_mood: String::new(),
            last_mood_emoji: String::new(),
            week: Vec::new(),
        },
    }
}

/// Adds one glass of water. The message carries the new count.
#[flutter_rust_bridge::frb(sync)]
pub fn water_increment() -> ActionResponse {
    match with_store(|store| store.increment_water_intake().map_err(|err| err.to_string())) {
        Ok(count) => ActionResponse::success(count.to_string()),
        Err(err) => ActionResponse::failure(format!("water_increment failed: {err}")),
    }
}

/// Saved habits, or the first-run seed list.
#[flutter_rust_bridge::frb(sync)]
pub fn habits_load() -> Vec<HabitItem> {
    with_store(|store| store.load_habits().map_err(|err| err.to_string()))
        .map(|habits| habits.into_iter().map(to_habit_item).collect())
        .unwrap_or_else(|err| {
            warn!("event=ffi_call module=ffi status=error call=habits_load error={err}");
            Vec::new()
        })
}

/// Replaces the habit list; the dashboard progress cache follows.
#[flutter_rust_bridge::frb(sync)]
pub fn habits_save(habits: Vec<HabitItem>) -> ActionResponse {
    let habits: Vec<Habit> = habits.into_iter().map(from_habit_item).collect();
    match with_store(|store| store.save_habits(&habits).map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Habits saved."),
        Err(err) => ActionResponse::failure(format!("habits_save failed: {err}")),
    }
}

/// Logs a preset mood (`Happy|Neutral|Sad|Angry|Excited`) now.
#[flutter_rust_bridge::frb(sync)]
pub fn mood_log(mood: String, note: String) -> ActionResponse {
    let Some(kind) = MoodKind::parse(&mood) else {
        return ActionResponse::failure(format!("mood_log failed: unknown mood `{}`", mood.trim()));
    };
    match with_store(|store| {
        MoodService::new(store)
            .log_mood(kind, note.trim())
            .map_err(|err| err.to_string())
    }) {
        Ok(entry) => ActionResponse::created("Mood logged.", entry.id),
        Err(err) => ActionResponse::failure(format!("mood_log failed: {err}")),
    }
}

/// Logs a preset mood on a calendar day picked by the user.
#[flutter_rust_bridge::frb(sync)]
pub fn mood_log_for_date(mood: String, year: i32, month: u32, day: u32) -> ActionResponse {
    let Some(kind) = MoodKind::parse(&mood) else {
        return ActionResponse::failure(format!(
            "mood_log_for_date failed: unknown mood `{}`",
            mood.trim()
        ));
    };
    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        return ActionResponse::failure(format!(
            "mood_log_for_date failed: invalid date {year}-{month}-{day}"
        ));
    };
    match with_store(|store| {
        MoodService::new(store)
            .log_mood_for_date(kind, date)
            .map_err(|err| err.to_string())
    }) {
        Ok(entry) => ActionResponse::created("Mood logged.", entry.id),
        Err(err) => ActionResponse::failure(format!("mood_log_for_date failed: {err}")),
    }
}

/// Deletes one mood entry by id.
#[flutter_rust_bridge::frb(sync)]
pub fn mood_delete(entry_id: String) -> ActionResponse {
    match with_store(|store| {
        MoodService::new(store)
            .delete_entry(entry_id.trim())
            .map_err(|err| err.to_string())
    }) {
        Ok(true) => ActionResponse::success("Mood deleted."),
        Ok(false) => ActionResponse::failure("mood_delete failed: entry not found"),
        Err(err) => ActionResponse::failure(format!("mood_delete failed: {err}")),
    }
}

/// Mood history, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn mood_history() -> Vec<MoodHistoryItem> {
    with_store(|store| {
        MoodService::new(store)
            .history()
            .map_err(|err| err.to_string())
    })
    .map(|rows| rows.into_iter().map(to_history_item).collect())
    .unwrap_or_else(|err| {
        warn!("event=ffi_call module=ffi status=error call=mood_history error={err}");
        Vec::new()
    })
}

/// Rolling 7-day strip ending today.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_week() -> Vec<CalendarCellItem> {
    with_store(|store| {
        MoodService::new(store)
            .week_strip()
            .map_err(|err| err.to_string())
    })
    .map(|cells| cells.iter().map(to_cell_item).collect())
    .unwrap_or_else(|err| {
        warn!("event=ffi_call module=ffi status=error call=calendar_week error={err}");
        Vec::new()
    })
}

/// Full month grid; navigation is done by the caller changing `year/month`.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month(year: i32, month: u32) -> CalendarMonthResponse {
    let cursor = match MonthCursor::new(year, month) {
        Ok(cursor) => cursor,
        Err(err) => {
            return CalendarMonthResponse {
                title: String::new(),
                cells: Vec::new(),
                message: format!("calendar_month failed: {err}"),
            };
        }
    };
    match with_store(|store| {
        MoodService::new(store)
            .month(cursor)
            .map_err(|err| err.to_string())
    }) {
        Ok(cells) => CalendarMonthResponse {
            title: cursor.title(),
            cells: cells.iter().map(to_cell_item).collect(),
            message: String::new(),
        },
        Err(err) => CalendarMonthResponse {
            title: String::new(),
            cells: Vec::new(),
            message: format!("calendar_month failed: {err}"),
        },
    }
}

/// Current settings, with defaults for anything unset.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_load() -> Option<SettingsView> {
    with_store(|store| store.settings().map_err(|err| err.to_string()))
        .map(to_settings_view)
        .map_err(|err| {
            warn!("event=ffi_call module=ffi status=error call=settings_load error={err}");
        })
        .ok()
}

/// Saves every settings toggle at once.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_save(settings: SettingsView) -> ActionResponse {
    let settings = from_settings_view(&settings);
    match with_store(|store| store.save_settings(&settings).map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Settings saved."),
        Err(err) => ActionResponse::failure(format!("settings_save failed: {err}")),
    }
}

/// Renames the user; blank names are rejected and nothing is written.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_set_name(name: String) -> ActionResponse {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return ActionResponse::failure("profile_set_name failed: name must not be blank");
    }
    match with_store(|store| store.set_user_name(trimmed).map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Profile updated."),
        Err(err) => ActionResponse::failure(format!("profile_set_name failed: {err}")),
    }
}

/// Sets the caller-managed streak counter.
#[flutter_rust_bridge::frb(sync)]
pub fn streak_set_days(days: i32) -> ActionResponse {
    match with_store(|store| store.set_streak_days(days).map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Streak updated."),
        Err(err) => ActionResponse::failure(format!("streak_set_days failed: {err}")),
    }
}

/// Wipes all stored app state. Irreversible.
#[flutter_rust_bridge::frb(sync)]
pub fn store_clear_all() -> ActionResponse {
    match with_store(|store| store.clear_all().map_err(|err| err.to_string())) {
        Ok(removed) => ActionResponse::success(format!("Cleared {removed} value(s).")),
        Err(err) => ActionResponse::failure(format!("store_clear_all failed: {err}")),
    }
}

fn store_config() -> &'static StoreConfig {
    STORE_CONFIG.get_or_init(|| {
        let path = std::env::var(STORE_DB_PATH_ENV)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(STORE_DB_FILE_NAME));
        StoreConfig::new(path)
    })
}

fn with_store<T>(f: impl FnOnce(&FfiStore<'_>) -> Result<T, String>) -> Result<T, String> {
    let config = store_config();
    let conn = open_db(&config.db_path).map_err(|err| format!("store open failed: {err}"))?;
    let repo = SqlitePreferenceRepository::try_new(&conn, &config.namespace)
        .map_err(|err| format!("store init failed: {err}"))?;
    let store = LocalStore::new(repo);

    if LEGACY_SETTINGS_MERGED.get().is_none() {
        let legacy = SqlitePreferenceRepository::try_new(&conn, LEGACY_SETTINGS_NAMESPACE)
            .map_err(|err| format!("store init failed: {err}"))?;
        store
            .consolidate_legacy_settings(&legacy)
            .map_err(|err| format!("settings consolidation failed: {err}"))?;
        let _ = LEGACY_SETTINGS_MERGED.set(());
    }

    f(&store)
}

fn to_cell_item(cell: &CalendarCell) -> CalendarCellItem {
    CalendarCellItem {
        date: pulsepath_core::day_key(cell.date),
        label: cell.label.clone(),
        day_number: cell.day_number,
        emoji: cell.emoji.clone().unwrap_or_default(),
        is_today: cell.is_today,
    }
}

fn to_habit_item(habit: Habit) -> HabitItem {
    HabitItem {
        id: habit.id,
        name: habit.name,
        category: habit.category,
        target: habit.target,
        progress: habit.progress,
    }
}

fn from_habit_item(item: HabitItem) -> Habit {
    Habit {
        id: item.id,
        name: item.name,
        category: item.category,
        target: item.target,
        progress: item.progress,
    }
}

fn to_history_item(row: MoodHistoryRow) -> MoodHistoryItem {
    MoodHistoryItem {
        entry_id: row.entry_id,
        emoji: row.emoji,
        mood: row.mood,
        note: row.note,
        logged_at: row.logged_at,
    }
}

fn to_settings_view(settings: Settings) -> SettingsView {
    SettingsView {
        notifications_enabled: settings.notifications_enabled,
        dark_mode_enabled: settings.dark_mode_enabled,
        hydration_reminder_enabled: settings.hydration_reminder.enabled,
        hydration_reminder_interval_hours: settings.hydration_reminder.interval_hours,
        mood_reminder_enabled: settings.mood_reminder.enabled,
        mood_reminder_time_ms: settings.mood_reminder.time_ms,
    }
}

fn from_settings_view(view: &SettingsView) -> Settings {
    Settings {
        notifications_enabled: view.notifications_enabled,
        dark_mode_enabled: view.dark_mode_enabled,
        hydration_reminder: HydrationReminder {
            enabled: view.hydration_reminder_enabled,
            interval_hours: view.hydration_reminder_interval_hours,
        },
        mood_reminder: MoodReminder {
            enabled: view.mood_reminder_enabled,
            time_ms: view.mood_reminder_time_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{
        calendar_month, calendar_week, core_version, dashboard_load, habits_load, init_logging,
        mood_delete, mood_history, mood_log, mood_log_for_date, ping, profile_set_name,
        settings_load, settings_save, water_increment,
    };
    use chrono::{Datelike, Local};
    use std::sync::{Mutex, MutexGuard};

    // Store tests share one database file and do read-modify-write cycles.
    static STORE_LOCK: Mutex<()> = Mutex::new(());

    fn store_lock() -> MutexGuard<'static, ()> {
        STORE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn mood_log_appears_in_history_until_deleted() {
        let _guard = store_lock();
        let created = mood_log("happy".to_string(), "ffi test".to_string());
        assert!(created.ok, "{}", created.message);
        let entry_id = created.entry_id.expect("mood_log should return entry_id");

        assert!(mood_history().iter().any(|row| row.entry_id == entry_id));

        let deleted = mood_delete(entry_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(mood_history().iter().all(|row| row.entry_id != entry_id));

        let again = mood_delete(entry_id);
        assert!(!again.ok);
    }

    #[test]
    fn mood_log_rejects_unknown_mood() {
        let response = mood_log("bored".to_string(), String::new());
        assert!(!response.ok);
        assert!(response.message.contains("unknown mood"));
    }

    #[test]
    fn mood_log_for_today_marks_the_week_strip() {
        let _guard = store_lock();
        let today = Local::now().date_naive();
        let response = mood_log_for_date(
            "Excited".to_string(),
            today.year(),
            today.month(),
            today.day(),
        );
        assert!(response.ok, "{}", response.message);

        let week = calendar_week();
        assert_eq!(week.len(), 7);
        let last = week.last().expect("week has cells");
        assert!(last.is_today);
        assert!(!last.emoji.is_empty());
    }

    #[test]
    fn mood_log_for_date_rejects_impossible_dates() {
        let response = mood_log_for_date("Sad".to_string(), 2023, 2, 29);
        assert!(!response.ok);
        assert!(response.message.contains("invalid date"));
    }

    #[test]
    fn calendar_month_validates_and_titles_the_grid() {
        let _guard = store_lock();
        let response = calendar_month(2024, 2);
        assert_eq!(response.title, "February 2024");
        assert_eq!(response.cells.len(), 29);
        assert_eq!(response.cells[0].date, "2024-02-01");

        let invalid = calendar_month(2024, 13);
        assert!(invalid.cells.is_empty());
        assert!(invalid.message.contains("out of range"));
    }

    #[test]
    fn water_increment_reports_a_positive_count() {
        let _guard = store_lock();
        let response = water_increment();
        assert!(response.ok, "{}", response.message);
        let count: i32 = response.message.parse().expect("count message");
        assert!(count >= 1);
    }

    #[test]
    fn profile_set_name_rejects_blank_names() {
        let response = profile_set_name("   ".to_string());
        assert!(!response.ok);
    }

    #[test]
    fn dashboard_and_habits_load_from_the_store() {
        let _guard = store_lock();
        let dashboard = dashboard_load();
        assert!(dashboard.ok, "{}", dashboard.message);
        assert_eq!(dashboard.week.len(), 7);
        assert!(!habits_load().is_empty() || dashboard.habit_progress == 0);
    }

    #[test]
    fn settings_save_then_load_roundtrips() {
        let _guard = store_lock();
        let mut settings = settings_load().expect("settings should load");
        settings.dark_mode_enabled = !settings.dark_mode_enabled;
        settings.hydration_reminder_interval_hours = 3;

        let saved = settings_save(settings.clone());
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(settings_load(), Some(settings));
    }
}
