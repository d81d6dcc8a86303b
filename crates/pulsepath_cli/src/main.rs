//! CLI inspector for a PulsePath store.
//!
//! # Responsibility
//! - Open a store file outside the mobile app and print what the screens would show.
//! - Provide a few write commands for local sanity checks.

use clap::{Parser, Subcommand};
use pulsepath_core::db::open_db;
use pulsepath_core::{
    dashboard_summary, day_key, CalendarCell, LocalStore, MonthCursor, MoodKind, MoodService,
    SqlitePreferenceRepository, StoreConfig, LEGACY_SETTINGS_NAMESPACE,
};
use std::error::Error;
use std::path::PathBuf;

const DB_PATH_ENV: &str = "PULSEPATH_DB_PATH";
const DB_FILE_NAME: &str = "pulsepath.sqlite3";

#[derive(Parser)]
#[command(name = "pulsepath-cli", version, about = "PulsePath store inspector")]
struct Cli {
    /// Store database file (defaults to $PULSEPATH_DB_PATH, then the temp dir)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Preference namespace to read and write
    #[arg(long, global = true)]
    namespace: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Core linkage check
    Ping,
    /// Dashboard summary
    Summary,
    /// Saved habits (or the first-run seed)
    Habits,
    /// Rolling 7-day mood strip
    Week,
    /// Month grid, e.g. `month 2024-03` (defaults to the current month)
    Month { month: Option<MonthCursor> },
    /// Mood history, newest first
    Moods,
    /// Log a mood now: happy|neutral|sad|angry|excited
    LogMood {
        mood: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Add one glass of water
    Water,
    /// Current settings
    Settings,
    /// Fold legacy settings flags into the main namespace
    Consolidate,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Commands::Ping = cli.command {
        println!("pulsepath_core ping={}", pulsepath_core::ping());
        println!("pulsepath_core version={}", pulsepath_core::core_version());
        return Ok(());
    }

    let config = resolve_config(cli.db, cli.namespace);
    let conn = open_db(&config.db_path)?;
    let repo = SqlitePreferenceRepository::try_new(&conn, &config.namespace)?;
    let store = LocalStore::new(repo);
    let moods = MoodService::new(&store);

    match cli.command {
        Commands::Ping => {}
        Commands::Summary => {
            let summary = dashboard_summary(&store)?;
            println!("{}, {}", summary.greeting, summary.user_name);
            println!("streak_days={}", summary.streak_days);
            println!("habit_progress={}%", summary.habit_progress);
            println!(
                "water={}/{} ({}%)",
                summary.water_intake, summary.water_target, summary.water_progress
            );
            println!("last_mood={} [{}]", summary.last_mood, summary.last_mood_emoji);
            print_cells(&summary.week);
        }
        Commands::Habits => {
            for habit in store.load_habits()? {
                println!(
                    "{}  {} ({}) {}/{}",
                    habit.id, habit.name, habit.category, habit.progress, habit.target
                );
            }
        }
        Commands::Week => print_cells(&moods.week_strip()?),
        Commands::Month { month } => {
            let cursor = month.unwrap_or_else(|| MonthCursor::containing(moods.today()));
            println!("{}", cursor.title());
            print_cells(&moods.month(cursor)?);
        }
        Commands::Moods => {
            for row in moods.history()? {
                println!(
                    "{}  {} {}  {}  {}",
                    row.logged_at, row.emoji, row.mood, row.note, row.entry_id
                );
            }
        }
        Commands::LogMood { mood, note } => {
            let kind = MoodKind::parse(&mood).ok_or_else(|| format!("unknown mood `{mood}`"))?;
            let entry = moods.log_mood(kind, &note)?;
            println!("logged {} id={}", entry.summary(), entry.id);
        }
        Commands::Water => println!("water_intake={}", store.increment_water_intake()?),
        Commands::Settings => {
            let settings = store.settings()?;
            println!("notifications_enabled={}", settings.notifications_enabled);
            println!("dark_mode_enabled={}", settings.dark_mode_enabled);
            println!(
                "hydration_reminder enabled={} interval_hours={}",
                settings.hydration_reminder.enabled, settings.hydration_reminder.interval_hours
            );
            println!(
                "mood_reminder enabled={} time_ms={}",
                settings.mood_reminder.enabled, settings.mood_reminder.time_ms
            );
        }
        Commands::Consolidate => {
            let legacy = SqlitePreferenceRepository::try_new(&conn, LEGACY_SETTINGS_NAMESPACE)?;
            let adopted = store.consolidate_legacy_settings(&legacy)?;
            println!("adopted={adopted}");
        }
    }
    Ok(())
}

fn resolve_config(db: Option<PathBuf>, namespace: Option<String>) -> StoreConfig {
    let db_path = db
        .or_else(|| {
            std::env::var(DB_PATH_ENV)
                .ok()
                .filter(|raw| !raw.trim().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME));
    let mut config = StoreConfig::new(db_path);
    if let Some(namespace) = namespace {
        config.namespace = namespace;
    }
    config
}

fn print_cells(cells: &[CalendarCell]) {
    for cell in cells {
        let marker = if cell.is_today { "*" } else { " " };
        println!(
            "{marker} {} {:>3} {:>2} {}",
            day_key(cell.date),
            cell.label,
            cell.day_number,
            cell.emoji.as_deref().unwrap_or("·")
        );
    }
}
