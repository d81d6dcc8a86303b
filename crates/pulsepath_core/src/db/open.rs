//! Connection bootstrap for file-backed and in-memory stores.
//!
//! # Invariants
//! - Returned connections have every known migration applied.
//! - Every open attempt emits exactly one terminal `db_open` event.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the store file at `path` and migrates it.
///
/// Missing parent directories are created first, so a fresh app data
/// directory can be passed straight through.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_logged("file", || {
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut conn = Connection::open(path)?;
        bootstrap_connection(&mut conn)?;
        Ok(conn)
    })
}

/// Opens a throwaway in-memory store with the full schema applied.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_logged("memory", || {
        let mut conn = Connection::open_in_memory()?;
        bootstrap_connection(&mut conn)?;
        Ok(conn)
    })
}

fn open_logged(
    mode: &'static str,
    open: impl FnOnce() -> DbResult<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    match open() {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
