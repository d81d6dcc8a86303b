//! Mood history list rows.
//!
//! # Responsibility
//! - Format stored entries for the history screen in the caller's zone.
//! - Route delete requests through [`CalendarActions`].

use super::CalendarActions;
use crate::model::mood::MoodEntry;
use chrono::{TimeZone, Utc};

/// One row of the mood history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodHistoryRow {
    pub entry_id: String,
    pub emoji: String,
    pub mood: String,
    pub note: String,
    /// Local time, e.g. `Mar 07, 2024 23:59`; empty when out of range.
    pub logged_at: String,
}

impl MoodHistoryRow {
    /// Asks the host to delete this row's entry.
    pub fn request_delete(&self, actions: &mut dyn CalendarActions) {
        actions.on_delete_requested(&self.entry_id);
    }
}

/// History rows in stored (newest-first) order.
pub fn mood_history<Tz: TimeZone>(entries: &[MoodEntry], zone: &Tz) -> Vec<MoodHistoryRow>
where
    Tz::Offset: std::fmt::Display,
{
    entries
        .iter()
        .map(|entry| MoodHistoryRow {
            entry_id: entry.id.clone(),
            emoji: entry.emoji.clone(),
            mood: entry.mood.clone(),
            note: entry.note.clone(),
            logged_at: Utc
                .timestamp_millis_opt(entry.timestamp)
                .single()
                .map(|instant| {
                    instant
                        .with_timezone(zone)
                        .format("%b %d, %Y %H:%M")
                        .to_string()
                })
                .unwrap_or_default(),
        })
        .collect()
}
