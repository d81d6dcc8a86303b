use chrono::{FixedOffset, NaiveDate, TimeZone};
use pulsepath_core::db::open_db_in_memory;
use pulsepath_core::{
    dashboard_summary, day_key, rolling_week, CalendarActions, FixedClock, LocalStore, MonthCursor,
    MoodEntry, MoodKind, MoodService, SqlitePreferenceRepository, DEFAULT_NAMESPACE,
};
use rusqlite::Connection;

fn zone() -> FixedOffset {
    FixedOffset::east_opt(-4 * 3600).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    zone()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap()
        .timestamp_millis()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store_at(
    conn: &Connection,
    now_ms: i64,
) -> LocalStore<SqlitePreferenceRepository<'_>, FixedOffset> {
    let repo = SqlitePreferenceRepository::try_new(conn, DEFAULT_NAMESPACE).unwrap();
    LocalStore::with_clock(repo, Box::new(FixedClock(now_ms)), zone())
}

#[derive(Default)]
struct RecordingActions {
    selected: Vec<NaiveDate>,
    delete_requests: Vec<String>,
}

impl CalendarActions for RecordingActions {
    fn on_date_selected(&mut self, date: NaiveDate) {
        self.selected.push(date);
    }

    fn on_delete_requested(&mut self, entry_id: &str) {
        self.delete_requests.push(entry_id.to_string());
    }
}

#[test]
fn rolling_week_ending_march_tenth() {
    let cells = rolling_week(&[], date(2024, 3, 10), &zone());

    assert_eq!(cells.len(), 7);
    assert_eq!(day_key(cells[0].date), "2024-03-04");
    assert_eq!(day_key(cells[6].date), "2024-03-10");
    assert!(cells.windows(2).all(|pair| pair[0].date < pair[1].date));
    assert!(cells[6].is_today);
    assert_eq!(cells.iter().filter(|c| c.is_today).count(), 1);
}

#[test]
fn entry_just_before_midnight_matches_its_own_day_only() {
    let entry = MoodEntry::new("😊", "Happy", "", at(2024, 3, 7, 23, 59));
    let cells = rolling_week(&[entry], date(2024, 3, 10), &zone());

    let seventh = cells.iter().find(|c| c.date == date(2024, 3, 7)).unwrap();
    let eighth = cells.iter().find(|c| c.date == date(2024, 3, 8)).unwrap();
    assert_eq!(seventh.emoji.as_deref(), Some("😊"));
    assert!(!eighth.has_mood());
}

#[test]
fn activating_a_cell_reports_its_date() {
    let cells = rolling_week(&[], date(2024, 3, 10), &zone());
    let mut actions = RecordingActions::default();

    cells[2].activate(&mut actions);
    cells[6].activate(&mut actions);

    assert_eq!(actions.selected, vec![date(2024, 3, 6), date(2024, 3, 10)]);
}

#[test]
fn log_mood_stamps_the_clock_instant() {
    let conn = open_db_in_memory().unwrap();
    let now = at(2024, 3, 10, 8, 15);
    let store = store_at(&conn, now);
    let service = MoodService::new(&store);

    let entry = service.log_mood(MoodKind::Excited, "morning run").unwrap();

    assert_eq!(entry.timestamp, now);
    assert_eq!(entry.emoji, "😄");
    assert_eq!(entry.mood, "Excited");
    assert_eq!(store.load_mood_entries().unwrap()[0], entry);
    assert_eq!(store.last_mood().unwrap(), "😄 Excited");
}

#[test]
fn log_mood_for_date_lands_on_the_selected_day() {
    let conn = open_db_in_memory().unwrap();
    let store = store_at(&conn, at(2024, 3, 10, 22, 45));
    let service = MoodService::new(&store);

    let entry = service
        .log_mood_for_date(MoodKind::Sad, date(2024, 3, 5))
        .unwrap();

    assert_eq!(entry.timestamp, at(2024, 3, 5, 22, 45));
    assert_eq!(entry.note, "Logged from calendar");
    let week = service.week_strip().unwrap();
    let fifth = week.iter().find(|c| c.date == date(2024, 3, 5)).unwrap();
    assert_eq!(fifth.emoji.as_deref(), Some("😢"));
}

#[test]
fn month_view_navigates_and_marks_entries() {
    let conn = open_db_in_memory().unwrap();
    let store = store_at(&conn, at(2024, 3, 10, 12, 0));
    let service = MoodService::new(&store);
    service
        .log_mood_for_date(MoodKind::Neutral, date(2024, 2, 29))
        .unwrap();

    let march = MonthCursor::containing(service.today());
    let february = march.previous();

    let march_cells = service.month(march).unwrap();
    assert_eq!(march_cells.len(), 31);
    assert!(march_cells.iter().all(|c| !c.has_mood()));
    assert!(march_cells[9].is_today);

    let february_cells = service.month(february).unwrap();
    assert_eq!(february_cells.len(), 29);
    assert_eq!(february_cells[28].emoji.as_deref(), Some("😐"));
    assert!(february_cells.iter().all(|c| !c.is_today));
    assert_eq!(february.next(), march);
}

#[test]
fn history_rows_route_delete_requests_through_actions() {
    let conn = open_db_in_memory().unwrap();
    let store = store_at(&conn, at(2024, 3, 10, 9, 5));
    let service = MoodService::new(&store);
    let kept = service.log_mood(MoodKind::Happy, "").unwrap();
    let doomed = service.log_mood(MoodKind::Angry, "traffic").unwrap();

    let rows = service.history().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].entry_id, doomed.id);
    assert_eq!(rows[0].logged_at, "Mar 10, 2024 09:05");

    let mut actions = RecordingActions::default();
    rows[0].request_delete(&mut actions);
    for id in &actions.delete_requests {
        assert!(service.delete_entry(id).unwrap());
    }

    let remaining = store.load_mood_entries().unwrap();
    assert_eq!(remaining, vec![kept]);
    assert_eq!(store.last_mood().unwrap(), "😊 Happy");
}

#[test]
fn dashboard_summary_reads_store_state() {
    let conn = open_db_in_memory().unwrap();
    let store = store_at(&conn, at(2024, 3, 10, 19, 0));
    store.set_user_name("Ada").unwrap();
    store.set_water_intake(3).unwrap();
    store.save_habits(&pulsepath_core::seed_habits()).unwrap();
    MoodService::new(&store).log_mood(MoodKind::Sad, "").unwrap();

    let summary = dashboard_summary(&store).unwrap();

    assert_eq!(summary.greeting, "Good evening");
    assert_eq!(summary.user_name, "Ada");
    assert_eq!(summary.streak_days, 7);
    assert_eq!(summary.habit_progress, 50);
    assert_eq!(summary.water_intake, 3);
    assert_eq!(summary.water_target, 8);
    assert_eq!(summary.water_progress, 37);
    assert_eq!(summary.last_mood, "😢 Sad");
    assert_eq!(summary.last_mood_emoji, "😢");
    assert_eq!(summary.week.len(), 7);
    assert!(summary.week[6].is_today && summary.week[6].has_mood());
}

#[test]
fn dashboard_summary_on_fresh_store_uses_defaults() {
    let conn = open_db_in_memory().unwrap();
    let store = store_at(&conn, at(2024, 3, 10, 7, 0));

    let summary = dashboard_summary(&store).unwrap();

    assert_eq!(summary.greeting, "Good morning");
    assert_eq!(summary.user_name, "User");
    assert_eq!(summary.habit_progress, 0);
    assert_eq!(summary.water_progress, 0);
    assert_eq!(summary.last_mood, "Feeling good today!");
    assert_eq!(summary.last_mood_emoji, "😊");
    assert!(summary.week.iter().all(|c| !c.has_mood()));
}
