//! Mood logging use-cases on top of the Local Store.
//!
//! # Responsibility
//! - Create entries from preset moods, for now or for a picked calendar day.
//! - Build calendar and history view models from stored entries.

use crate::calendar::{
    bucket_day, local_datetime_ms, month_grid, mood_history, rolling_week, CalendarCell,
    MonthCursor, MoodHistoryRow,
};
use crate::model::mood::{MoodEntry, MoodKind};
use crate::repo::pref_repo::PreferenceRepository;
use crate::service::local_store::{LocalStore, StoreResult};
use chrono::{NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use log::info;

/// Note attached to moods logged from a calendar cell.
pub const CALENDAR_LOG_NOTE: &str = "Logged from calendar";

/// Mood use-cases bound to one store.
pub struct MoodService<'s, R: PreferenceRepository, Tz: TimeZone> {
    store: &'s LocalStore<R, Tz>,
}

impl<'s, R: PreferenceRepository, Tz: TimeZone> MoodService<'s, R, Tz>
where
    Tz::Offset: std::fmt::Display,
{
    pub fn new(store: &'s LocalStore<R, Tz>) -> Self {
        Self { store }
    }

    /// Logs `kind` at the current instant.
    pub fn log_mood(&self, kind: MoodKind, note: &str) -> StoreResult<MoodEntry> {
        let entry = MoodEntry::new(kind.emoji(), kind.label(), note, self.store.now_ms());
        self.store.add_mood_entry(entry.clone())?;
        info!(
            "event=mood_log module=mood status=ok source=now mood={}",
            kind.label()
        );
        Ok(entry)
    }

    /// Logs `kind` on `date`, at the current local time-of-day.
    pub fn log_mood_for_date(&self, kind: MoodKind, date: NaiveDate) -> StoreResult<MoodEntry> {
        let timestamp = local_datetime_ms(self.store.zone(), date, self.local_time_of_day());
        let entry = MoodEntry::new(kind.emoji(), kind.label(), CALENDAR_LOG_NOTE, timestamp);
        self.store.add_mood_entry(entry.clone())?;
        info!(
            "event=mood_log module=mood status=ok source=calendar mood={}",
            kind.label()
        );
        Ok(entry)
    }

    pub fn delete_entry(&self, entry_id: &str) -> StoreResult<bool> {
        let removed = self.store.delete_mood_entry(entry_id)?;
        info!("event=mood_delete module=mood status=ok removed={removed}");
        Ok(removed)
    }

    /// Local calendar day of the store clock.
    pub fn today(&self) -> NaiveDate {
        bucket_day(self.store.now_ms(), self.store.zone()).unwrap_or_default()
    }

    pub fn week_strip(&self) -> StoreResult<Vec<CalendarCell>> {
        let entries = self.store.load_mood_entries()?;
        Ok(rolling_week(&entries, self.today(), self.store.zone()))
    }

    pub fn month(&self, cursor: MonthCursor) -> StoreResult<Vec<CalendarCell>> {
        let entries = self.store.load_mood_entries()?;
        Ok(month_grid(&entries, cursor, self.today(), self.store.zone()))
    }

    pub fn history(&self) -> StoreResult<Vec<MoodHistoryRow>> {
        let entries = self.store.load_mood_entries()?;
        Ok(mood_history(&entries, self.store.zone()))
    }

    fn local_time_of_day(&self) -> NaiveTime {
        Utc.timestamp_millis_opt(self.store.now_ms())
            .single()
            .map(|now| now.with_timezone(self.store.zone()).time())
            .and_then(|time| time.with_nanosecond(0))
            .unwrap_or_default()
    }
}
