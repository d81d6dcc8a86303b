//! Dashboard view model.

use crate::calendar::{bucket_day, rolling_week, CalendarCell};
use crate::repo::pref_repo::PreferenceRepository;
use crate::service::local_store::{LocalStore, StoreResult};
use crate::service::progress::{summary_emoji, water_progress_percent};
use chrono::{TimeZone, Timelike, Utc};

/// Everything the dashboard renders, read in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub greeting: &'static str,
    pub user_name: String,
    pub streak_days: i32,
    pub habit_progress: i32,
    pub water_intake: i32,
    pub water_target: i32,
    pub water_progress: i32,
    pub last_mood: String,
    pub last_mood_emoji: &'static str,
    pub week: Vec<CalendarCell>,
}

/// Greeting for a local hour of day.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Reads the dashboard state from `store` at the store clock's instant.
pub fn dashboard_summary<R: PreferenceRepository, Tz: TimeZone>(
    store: &LocalStore<R, Tz>,
) -> StoreResult<DashboardSummary> {
    let now_ms = store.now_ms();
    let local_now = Utc
        .timestamp_millis_opt(now_ms)
        .single()
        .map(|now| now.with_timezone(store.zone()));
    let hour = local_now.as_ref().map_or(12, |now| now.hour());
    let today = bucket_day(now_ms, store.zone()).unwrap_or_default();

    let water_intake = store.water_intake()?;
    let water_target = store.water_target()?;
    let last_mood = store.last_mood()?;
    let entries = store.load_mood_entries()?;

    Ok(DashboardSummary {
        greeting: greeting_for_hour(hour),
        user_name: store.user_name()?,
        streak_days: store.streak_days()?,
        habit_progress: store.habit_progress()?,
        water_intake,
        water_target,
        water_progress: water_progress_percent(water_intake, water_target),
        last_mood_emoji: summary_emoji(&last_mood),
        last_mood,
        week: rolling_week(&entries, today, store.zone()),
    })
}
