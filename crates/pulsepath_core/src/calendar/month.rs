//! Month navigation and the full-month grid.
//!
//! # Invariants
//! - A cursor always points at the first day of a valid month.
//! - Navigation past chrono's date range stays on the boundary month.

use super::{first_emoji_by_day, CalendarCell};
use crate::model::mood::MoodEntry;
use chrono::{Datelike, Months, NaiveDate, TimeZone};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Invalid month selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthCursorError {
    /// Month outside `1..=12` or year outside chrono's range.
    OutOfRange { year: i32, month: u32 },
    /// Text is not `YYYY-MM`.
    Malformed(String),
}

impl Display for MonthCursorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { year, month } => write!(f, "month out of range: {year}-{month}"),
            Self::Malformed(value) => write!(f, "expected YYYY-MM, got `{value}`"),
        }
    }
}

impl Error for MonthCursorError {}

/// A navigable calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first_day: NaiveDate,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthCursorError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(MonthCursorError::OutOfRange { year, month })
    }

    /// Month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Following month; stays put at the end of chrono's range.
    pub fn next(&self) -> Self {
        self.first_day
            .checked_add_months(Months::new(1))
            .map_or(*self, |first_day| Self { first_day })
    }

    /// Preceding month; stays put at the start of chrono's range.
    pub fn previous(&self) -> Self {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map_or(*self, |first_day| Self { first_day })
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        if next == *self {
            // Last representable month: count forward instead.
            return self
                .first_day
                .iter_days()
                .take_while(|d| d.month() == self.month())
                .count() as u32;
        }
        next.first_day
            .signed_duration_since(self.first_day)
            .num_days() as u32
    }

    /// Header text such as `March 2024`.
    pub fn title(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

impl Display for MonthCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthCursor {
    type Err = MonthCursorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| MonthCursorError::Malformed(trimmed.to_string()))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| MonthCursorError::Malformed(trimmed.to_string()))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| MonthCursorError::Malformed(trimmed.to_string()))?;
        Self::new(year, month)
    }
}

/// One cell per day of `cursor`'s month, day 1 first.
pub fn month_grid<Tz: TimeZone>(
    entries: &[MoodEntry],
    cursor: MonthCursor,
    today: NaiveDate,
    zone: &Tz,
) -> Vec<CalendarCell> {
    let by_day = first_emoji_by_day(entries, zone);

    cursor
        .first_day()
        .iter_days()
        .take(cursor.days_in_month() as usize)
        .map(|date| CalendarCell {
            date,
            label: date.day().to_string(),
            day_number: date.day(),
            emoji: by_day.get(&date).cloned(),
            is_today: date == today,
        })
        .collect()
}
