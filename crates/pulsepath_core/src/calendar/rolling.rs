//! Rolling seven-day mood strip shown on the dashboard and mood screens.
//!
//! # Invariants
//! - Exactly seven ascending cells; the last one is `today`.

use super::{first_emoji_by_day, CalendarCell};
use crate::model::mood::MoodEntry;
use chrono::{Datelike, Days, NaiveDate, TimeZone};

/// Number of cells in the rolling strip.
pub const ROLLING_WINDOW_DAYS: u64 = 7;

/// Rolling strip of `today` and the six days before it, oldest first.
pub fn rolling_week<Tz: TimeZone>(
    entries: &[MoodEntry],
    today: NaiveDate,
    zone: &Tz,
) -> Vec<CalendarCell> {
    let by_day = first_emoji_by_day(entries, zone);

    (0..ROLLING_WINDOW_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| CalendarCell {
            date,
            label: date.format("%a").to_string(),
            day_number: date.day(),
            emoji: by_day.get(&date).cloned(),
            is_today: date == today,
        })
        .collect()
}
