//! Habit record and first-run seed list.
//!
//! # Invariants
//! - `progress` is never clamped against `target`; either may be zero or negative.
//! - The seed list is transient: it is only persisted when a caller saves it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One tracked habit with a numeric goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Goal count for the current period.
    pub target: i32,
    /// Count achieved so far.
    pub progress: i32,
}

impl Habit {
    /// Creates a habit with a fresh v4 id.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        target: i32,
        progress: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category: category.into(),
            target,
            progress,
        }
    }
}

/// Habits shown on first run, before anything has been saved.
///
/// Every call generates new ids.
pub fn seed_habits() -> Vec<Habit> {
    vec![
        Habit::new("Drink water", "Hydration", 8, 4),
        Habit::new("Meditate", "Mental Health", 1, 0),
        Habit::new("Exercise", "Fitness", 1, 1),
        Habit::new("Read", "Personal Growth", 30, 15),
    ]
}
