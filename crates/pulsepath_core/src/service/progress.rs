//! Aggregate rules derived from stored lists.
//!
//! # Invariants
//! - A zero (or negative) denominator yields 0%, never a division.
//! - Percentages are floored and saturate at the `i32` bounds.

use crate::calendar::bucket_day;
use crate::model::habit::Habit;
use crate::model::mood::{MoodEntry, MoodKind};
use chrono::{Days, NaiveDate, TimeZone};
use std::collections::BTreeSet;

/// Glyph shown when the cached summary names no known mood.
pub const FALLBACK_MOOD_EMOJI: &str = "😊";

/// Overall habit completion: `floor(100 * Σprogress / Σtarget)`, or 0.
pub fn habit_progress_percent(habits: &[Habit]) -> i32 {
    let (progress, target) = habits.iter().fold((0_i64, 0_i64), |(p, t), habit| {
        (p + i64::from(habit.progress), t + i64::from(habit.target))
    });
    floor_percent(progress, target)
}

/// Water bar fill: `floor(100 * intake / target)`, or 0.
pub fn water_progress_percent(intake: i32, target: i32) -> i32 {
    floor_percent(i64::from(intake), i64::from(target))
}

fn floor_percent(numerator: i64, denominator: i64) -> i32 {
    if denominator <= 0 {
        return 0;
    }
    let percent = (numerator * 100).div_euclid(denominator);
    percent.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// First known mood glyph contained in a cached `last_mood` line.
pub fn summary_emoji(summary: &str) -> &'static str {
    MoodKind::ALL
        .into_iter()
        .map(MoodKind::emoji)
        .find(|emoji| summary.contains(emoji))
        .unwrap_or(FALLBACK_MOOD_EMOJI)
}

/// Consecutive local days with at least one mood entry.
///
/// The run ends at `today`, or at yesterday when nothing is logged today yet.
pub fn current_mood_streak<Tz: TimeZone>(
    entries: &[MoodEntry],
    today: NaiveDate,
    zone: &Tz,
) -> u32 {
    let days: BTreeSet<NaiveDate> = entries
        .iter()
        .filter_map(|entry| bucket_day(entry.timestamp, zone))
        .collect();

    let start = if days.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    let mut cursor = Some(start);
    while let Some(day) = cursor.filter(|day| days.contains(day)) {
        streak += 1;
        cursor = day.checked_sub_days(Days::new(1));
    }
    streak
}
