//! Calendar view models for mood history.
//!
//! # Responsibility
//! - Turn a date range plus mood entries into per-day display cells.
//! - Route cell and row interactions through [`CalendarActions`] so the
//!   generators stay independent of any UI host.
//!
//! # Invariants
//! - Cells are ascending by date and cover the range exactly once.
//! - An entry belongs to the local calendar day of its timestamp in the zone
//!   supplied at render time; the first matching entry in list order wins.

mod day;
mod history;
mod month;
mod rolling;

pub use day::{bucket_day, day_key, local_datetime_ms};
pub use history::{mood_history, MoodHistoryRow};
pub use month::{month_grid, MonthCursor, MonthCursorError};
pub use rolling::{rolling_week, ROLLING_WINDOW_DAYS};

use crate::model::mood::MoodEntry;
use chrono::{NaiveDate, TimeZone};
use std::collections::HashMap;

/// Interactions a host handles for calendar cells and history rows.
pub trait CalendarActions {
    /// A day cell was activated, usually to open a mood prompt for it.
    fn on_date_selected(&mut self, date: NaiveDate);
    /// A history row asked for its entry to be removed.
    fn on_delete_requested(&mut self, entry_id: &str);
}

/// One day's display unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// `Mon` in the rolling strip, the day number in the month grid.
    pub label: String,
    pub day_number: u32,
    /// Glyph of the first entry logged on this day.
    pub emoji: Option<String>,
    pub is_today: bool,
}

impl CalendarCell {
    /// Whether the cell renders in its "mood logged" state.
    pub fn has_mood(&self) -> bool {
        self.emoji.is_some()
    }

    /// Hands this cell's date to the host.
    pub fn activate(&self, actions: &mut dyn CalendarActions) {
        actions.on_date_selected(self.date);
    }
}

/// First entry per local day, in list order.
fn first_emoji_by_day<Tz: TimeZone>(
    entries: &[MoodEntry],
    zone: &Tz,
) -> HashMap<NaiveDate, String> {
    let mut by_day = HashMap::new();
    for entry in entries {
        if let Some(day) = bucket_day(entry.timestamp, zone) {
            by_day.entry(day).or_insert_with(|| entry.emoji.clone());
        }
    }
    by_day
}
