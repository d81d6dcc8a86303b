//! Mood entry record and the preset moods offered by the app.
//!
//! # Invariants
//! - A stored mood list is newest-first; new entries are prepended.
//! - `timestamp` is Unix epoch milliseconds, independent of time zone.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    /// Short glyph, usually a single emoji.
    pub emoji: String,
    /// Human label, e.g. `Happy`.
    pub mood: String,
    pub note: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

impl MoodEntry {
    /// Creates an entry with a fresh v4 id.
    pub fn new(
        emoji: impl Into<String>,
        mood: impl Into<String>,
        note: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            emoji: emoji.into(),
            mood: mood.into(),
            note: note.into(),
            timestamp,
        }
    }

    /// Dashboard line cached as `last_mood`, e.g. `😊 Happy`.
    pub fn summary(&self) -> String {
        format!("{} {}", self.emoji, self.mood)
    }
}

/// Moods selectable from the mood screen and calendar prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodKind {
    Happy,
    Neutral,
    Sad,
    Angry,
    Excited,
}

impl MoodKind {
    pub const ALL: [MoodKind; 5] = [
        MoodKind::Happy,
        MoodKind::Neutral,
        MoodKind::Sad,
        MoodKind::Angry,
        MoodKind::Excited,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Neutral => "😐",
            Self::Sad => "😢",
            Self::Angry => "😠",
            Self::Excited => "😄",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Neutral => "Neutral",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Excited => "Excited",
        }
    }

    /// Parses a label case-insensitively (`happy`, `Happy`).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(normalized))
    }
}
