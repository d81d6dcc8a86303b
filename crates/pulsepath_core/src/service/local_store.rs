//! Local Store: all app state behind one preference namespace.
//!
//! # Responsibility
//! - Persist habit and mood lists as JSON text blobs.
//! - Keep the `habit_progress` and `last_mood` caches in step with list writes.
//! - Serve every scalar setting with its documented default.
//!
//! # Invariants
//! - Missing keys read as defaults; undecodable list blobs read as empty lists.
//! - List saves replace the whole list (last writer wins, no merge).
//! - Saving an empty mood list leaves `last_mood` untouched.
//! - `streak_days` is only ever written by callers.

use crate::calendar::local_datetime_ms;
use crate::clock::{Clock, SystemClock};
use crate::model::habit::{seed_habits, Habit};
use crate::model::mood::MoodEntry;
use crate::model::settings::{
    HydrationReminder, MoodReminder, Settings, DEFAULT_DARK_MODE_ENABLED,
    DEFAULT_MOOD_REMINDER_HOUR, DEFAULT_NOTIFICATIONS_ENABLED, DEFAULT_REMINDER_INTERVAL_HOURS,
};
use crate::repo::keys;
use crate::repo::pref_repo::{PrefValue, PreferenceRepository, RepoError, RepoResult};
use chrono::{Local, NaiveTime, TimeZone, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

pub type StoreError = RepoError;
pub type StoreResult<T> = RepoResult<T>;

pub const DEFAULT_WATER_INTAKE: i32 = 0;
pub const DEFAULT_WATER_TARGET: i32 = 8;
pub const DEFAULT_HABIT_PROGRESS: i32 = 0;
pub const DEFAULT_LAST_MOOD: &str = "Feeling good today!";
pub const DEFAULT_USER_NAME: &str = "User";
pub const DEFAULT_STREAK_DAYS: i32 = 7;

/// Key-value backed state store for one app instance.
///
/// `Tz` is the zone used for local-time defaults (the mood reminder time);
/// production code uses the device zone.
pub struct LocalStore<R: PreferenceRepository, Tz: TimeZone = Local> {
    repo: R,
    clock: Box<dyn Clock>,
    zone: Tz,
}

impl<R: PreferenceRepository> LocalStore<R> {
    /// Store on the system clock and the device time zone.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Box::new(SystemClock), Local)
    }
}

impl<R: PreferenceRepository, Tz: TimeZone> LocalStore<R, Tz> {
    pub fn with_clock(repo: R, clock: Box<dyn Clock>, zone: Tz) -> Self {
        Self { repo, clock, zone }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn zone(&self) -> &Tz {
        &self.zone
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    // Habits

    /// Saved habits, or the first-run seed when nothing was saved yet.
    ///
    /// The seed is not written back.
    pub fn load_habits(&self) -> StoreResult<Vec<Habit>> {
        match self.repo.get_text(keys::HABITS)? {
            Some(json) => Ok(decode_list(keys::HABITS, &json)),
            None => Ok(seed_habits()),
        }
    }

    /// Replaces the habit list and refreshes `habit_progress` in one write.
    pub fn save_habits(&self, habits: &[Habit]) -> StoreResult<()> {
        let json = encode_list(habits)?;
        let progress = super::progress::habit_progress_percent(habits);
        self.repo.put_all(vec![
            (keys::HABITS, PrefValue::Text(json)),
            (keys::HABIT_PROGRESS, PrefValue::Int(progress)),
        ])?;
        debug!(
            "event=habits_save module=store status=ok count={} habit_progress={}",
            habits.len(),
            progress
        );
        Ok(())
    }

    pub fn habit_progress(&self) -> StoreResult<i32> {
        Ok(self
            .repo
            .get_int(keys::HABIT_PROGRESS)?
            .unwrap_or(DEFAULT_HABIT_PROGRESS))
    }

    pub fn set_habit_progress(&self, percent: i32) -> StoreResult<()> {
        self.repo.put(keys::HABIT_PROGRESS, PrefValue::Int(percent))
    }

    // Mood entries

    /// Saved mood entries, newest first; empty when none.
    pub fn load_mood_entries(&self) -> StoreResult<Vec<MoodEntry>> {
        match self.repo.get_text(keys::MOOD_ENTRIES)? {
            Some(json) => Ok(decode_list(keys::MOOD_ENTRIES, &json)),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the mood list.
    ///
    /// A non-empty list also caches element 0 as `last_mood`.
    pub fn save_mood_entries(&self, entries: &[MoodEntry]) -> StoreResult<()> {
        let mut writes = vec![(keys::MOOD_ENTRIES, PrefValue::Text(encode_list(entries)?))];
        if let Some(latest) = entries.first() {
            writes.push((keys::LAST_MOOD, PrefValue::Text(latest.summary())));
        }
        self.repo.put_all(writes)?;
        debug!(
            "event=moods_save module=store status=ok count={}",
            entries.len()
        );
        Ok(())
    }

    /// Prepends `entry` and saves the list.
    pub fn add_mood_entry(&self, entry: MoodEntry) -> StoreResult<()> {
        let mut entries = self.load_mood_entries()?;
        entries.insert(0, entry);
        self.save_mood_entries(&entries)
    }

    /// Removes every entry with `id`; returns whether anything was removed.
    pub fn delete_mood_entry(&self, id: &str) -> StoreResult<bool> {
        let mut entries = self.load_mood_entries()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save_mood_entries(&entries)?;
        Ok(true)
    }

    /// Cached `"{emoji} {mood}"` of the latest entry.
    pub fn last_mood(&self) -> StoreResult<String> {
        Ok(self
            .repo
            .get_text(keys::LAST_MOOD)?
            .unwrap_or_else(|| DEFAULT_LAST_MOOD.to_string()))
    }

    // Water

    pub fn water_intake(&self) -> StoreResult<i32> {
        Ok(self
            .repo
            .get_int(keys::WATER_INTAKE)?
            .unwrap_or(DEFAULT_WATER_INTAKE))
    }

    pub fn set_water_intake(&self, glasses: i32) -> StoreResult<()> {
        self.repo.put(keys::WATER_INTAKE, PrefValue::Int(glasses))
    }

    /// Adds one glass and returns the new count.
    pub fn increment_water_intake(&self) -> StoreResult<i32> {
        let next = self.water_intake()?.saturating_add(1);
        self.set_water_intake(next)?;
        Ok(next)
    }

    pub fn water_target(&self) -> StoreResult<i32> {
        Ok(self
            .repo
            .get_int(keys::WATER_TARGET)?
            .unwrap_or(DEFAULT_WATER_TARGET))
    }

    pub fn set_water_target(&self, glasses: i32) -> StoreResult<()> {
        self.repo.put(keys::WATER_TARGET, PrefValue::Int(glasses))
    }

    // Reminders

    pub fn reminder_enabled(&self) -> StoreResult<bool> {
        Ok(self.repo.get_bool(keys::REMINDER_ENABLED)?.unwrap_or(false))
    }

    pub fn set_reminder_enabled(&self, enabled: bool) -> StoreResult<()> {
        self.repo.put(keys::REMINDER_ENABLED, PrefValue::Bool(enabled))
    }

    /// Hydration reminder interval in hours.
    pub fn reminder_interval(&self) -> StoreResult<i32> {
        Ok(self
            .repo
            .get_int(keys::REMINDER_INTERVAL)?
            .unwrap_or(DEFAULT_REMINDER_INTERVAL_HOURS))
    }

    pub fn set_reminder_interval(&self, hours: i32) -> StoreResult<()> {
        self.repo.put(keys::REMINDER_INTERVAL, PrefValue::Int(hours))
    }

    pub fn mood_reminder_enabled(&self) -> StoreResult<bool> {
        Ok(self
            .repo
            .get_bool(keys::MOOD_REMINDER_ENABLED)?
            .unwrap_or(false))
    }

    pub fn set_mood_reminder_enabled(&self, enabled: bool) -> StoreResult<()> {
        self.repo
            .put(keys::MOOD_REMINDER_ENABLED, PrefValue::Bool(enabled))
    }

    /// Saved reminder time, or 09:00 local on the current day.
    pub fn mood_reminder_time(&self) -> StoreResult<i64> {
        match self.repo.get_long(keys::MOOD_REMINDER_TIME)? {
            Some(time_ms) => Ok(time_ms),
            None => Ok(self.default_mood_reminder_time()),
        }
    }

    pub fn set_mood_reminder_time(&self, time_ms: i64) -> StoreResult<()> {
        self.repo
            .put(keys::MOOD_REMINDER_TIME, PrefValue::Long(time_ms))
    }

    fn default_mood_reminder_time(&self) -> i64 {
        let now_ms = self.now_ms();
        let Some(now) = Utc.timestamp_millis_opt(now_ms).single() else {
            return now_ms;
        };
        let today = now.with_timezone(&self.zone).date_naive();
        let nine = NaiveTime::from_hms_opt(DEFAULT_MOOD_REMINDER_HOUR, 0, 0).unwrap_or_default();
        local_datetime_ms(&self.zone, today, nine)
    }

    // Preferences

    pub fn notifications_enabled(&self) -> StoreResult<bool> {
        Ok(self
            .repo
            .get_bool(keys::NOTIFICATIONS_ENABLED)?
            .unwrap_or(DEFAULT_NOTIFICATIONS_ENABLED))
    }

    pub fn set_notifications_enabled(&self, enabled: bool) -> StoreResult<()> {
        self.repo
            .put(keys::NOTIFICATIONS_ENABLED, PrefValue::Bool(enabled))
    }

    pub fn dark_mode_enabled(&self) -> StoreResult<bool> {
        Ok(self
            .repo
            .get_bool(keys::DARK_MODE_ENABLED)?
            .unwrap_or(DEFAULT_DARK_MODE_ENABLED))
    }

    pub fn set_dark_mode_enabled(&self, enabled: bool) -> StoreResult<()> {
        self.repo
            .put(keys::DARK_MODE_ENABLED, PrefValue::Bool(enabled))
    }

    pub fn user_name(&self) -> StoreResult<String> {
        Ok(self
            .repo
            .get_text(keys::USER_NAME)?
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()))
    }

    pub fn set_user_name(&self, name: &str) -> StoreResult<()> {
        self.repo
            .put(keys::USER_NAME, PrefValue::Text(name.to_string()))
    }

    /// Caller-managed streak counter; nothing here derives or bumps it.
    pub fn streak_days(&self) -> StoreResult<i32> {
        Ok(self
            .repo
            .get_int(keys::STREAK_DAYS)?
            .unwrap_or(DEFAULT_STREAK_DAYS))
    }

    pub fn set_streak_days(&self, days: i32) -> StoreResult<()> {
        self.repo.put(keys::STREAK_DAYS, PrefValue::Int(days))
    }

    /// All toggles as one record.
    pub fn settings(&self) -> StoreResult<Settings> {
        Ok(Settings {
            notifications_enabled: self.notifications_enabled()?,
            dark_mode_enabled: self.dark_mode_enabled()?,
            hydration_reminder: HydrationReminder {
                enabled: self.reminder_enabled()?,
                interval_hours: self.reminder_interval()?,
            },
            mood_reminder: MoodReminder {
                enabled: self.mood_reminder_enabled()?,
                time_ms: self.mood_reminder_time()?,
            },
        })
    }

    /// Writes every field of `settings` in one transaction.
    pub fn save_settings(&self, settings: &Settings) -> StoreResult<()> {
        self.repo.put_all(vec![
            (
                keys::NOTIFICATIONS_ENABLED,
                PrefValue::Bool(settings.notifications_enabled),
            ),
            (
                keys::DARK_MODE_ENABLED,
                PrefValue::Bool(settings.dark_mode_enabled),
            ),
            (
                keys::REMINDER_ENABLED,
                PrefValue::Bool(settings.hydration_reminder.enabled),
            ),
            (
                keys::REMINDER_INTERVAL,
                PrefValue::Int(settings.hydration_reminder.interval_hours),
            ),
            (
                keys::MOOD_REMINDER_ENABLED,
                PrefValue::Bool(settings.mood_reminder.enabled),
            ),
            (
                keys::MOOD_REMINDER_TIME,
                PrefValue::Long(settings.mood_reminder.time_ms),
            ),
        ])
    }

    /// Folds flag copies from the legacy settings namespace into this store.
    ///
    /// A legacy value is adopted only when it is a bool and this store has
    /// no value for the key. Legacy keys are removed afterwards either way. Returns the number
    /// of adopted values.
    pub fn consolidate_legacy_settings(
        &self,
        legacy: &impl PreferenceRepository,
    ) -> StoreResult<usize> {
        let mut adopted = 0;
        for key in keys::LEGACY_SETTINGS_KEYS {
            let Some(value) = legacy.get(key)? else {
                continue;
            };
            match value {
                PrefValue::Bool(_) => {
                    if self.repo.get(key)?.is_none() {
                        self.repo.put(key, value)?;
                        adopted += 1;
                    }
                }
                other => warn!(
                    "event=settings_consolidate module=store status=recovered key={} kind={}",
                    key,
                    other.kind().as_str()
                ),
            }
            legacy.remove(key)?;
        }

        if adopted > 0 {
            info!(
                "event=settings_consolidate module=store status=ok legacy_namespace={} adopted={}",
                legacy.namespace(),
                adopted
            );
        }
        Ok(adopted)
    }

    /// Deletes every key in this store's namespace. Irreversible.
    pub fn clear_all(&self) -> StoreResult<usize> {
        let removed = self.repo.clear()?;
        info!(
            "event=store_clear module=store status=ok namespace={} removed={}",
            self.repo.namespace(),
            removed
        );
        Ok(removed)
    }
}

fn encode_list<T: serde::Serialize>(items: &[T]) -> StoreResult<String> {
    serde_json::to_string(items)
        .map_err(|err| StoreError::InvalidData(format!("list encode failed: {err}")))
}

/// Undecodable blobs read as empty so one corrupt key cannot block the app.
fn decode_list<T: DeserializeOwned>(key: &str, json: &str) -> Vec<T> {
    match serde_json::from_str::<Option<Vec<T>>>(json) {
        Ok(items) => items.unwrap_or_default(),
        Err(err) => {
            warn!(
                "event=list_decode module=store status=recovered key={} line={} column={}",
                key,
                err.line(),
                err.column()
            );
            Vec::new()
        }
    }
}
