//! Scoped storage session.
//!
//! # Responsibility
//! - Open a file or in-memory SQLite session and prove it answers queries.
//! - Guarantee release on every exit path via `Drop`.
//!
//! # Invariants
//! - A returned handle has passed a liveness round-trip and is bootstrapped.
//! - `close()` is idempotent.

use super::{schema_version, DbError, DbResult, SCHEMA_VERSION};
use crate::config::StoreConfig;
use log::{error, info, warn};
use rusqlite::Connection;
use std::time::{Duration, Instant};

const MEMORY_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The one live session to the relational store.
pub struct StorageHandle {
    conn: Option<Connection>,
    mode: &'static str,
}

impl StorageHandle {
    /// Opens the database at `config.db_path`, checks liveness and bootstraps
    /// the schema.
    ///
    /// # Errors
    /// - `DbError::Connection` when the file cannot be opened or the liveness
    ///   query fails.
    /// - `DbError::Sqlite` / `DbError::UnsupportedSchemaVersion` when the
    ///   schema bootstrap fails.
    pub fn connect(config: &StoreConfig) -> DbResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start mode=file");
        let opened = Connection::open(&config.db_path).map_err(DbError::Connection);
        Self::finish_open(opened, config.busy_timeout, "file", started_at)
    }

    /// Opens a private in-memory database; used by tests and demos.
    pub fn connect_in_memory() -> DbResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start mode=memory");
        let opened = Connection::open_in_memory().map_err(DbError::Connection);
        Self::finish_open(opened, MEMORY_BUSY_TIMEOUT, "memory", started_at)
    }

    fn finish_open(
        opened: DbResult<Connection>,
        busy_timeout: Duration,
        mode: &'static str,
        started_at: Instant,
    ) -> DbResult<Self> {
        let result = opened.and_then(|mut conn| {
            bootstrap_connection(&mut conn, busy_timeout)?;
            Ok(conn)
        });

        match result {
            Ok(conn) => {
                info!(
                    "event=db_open module=db status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    conn: Some(conn),
                    mode,
                })
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode={} duration_ms={} error_code={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    error_code(&err),
                    err
                );
                Err(err)
            }
        }
    }

    /// Borrows the live connection.
    ///
    /// # Errors
    /// - `DbError::Closed` after `close()` has run.
    pub fn connection(&self) -> DbResult<&Connection> {
        self.conn.as_ref().ok_or(DbError::Closed)
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Releases the session. Calling it again is a no-op.
    pub fn close(&mut self) -> DbResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        let started_at = Instant::now();
        match conn.close() {
            Ok(()) => {
                info!(
                    "event=db_close module=db status=ok mode={} duration_ms={}",
                    self.mode,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err((_conn, err)) => {
                warn!(
                    "event=db_close module=db status=error mode={} error={}",
                    self.mode, err
                );
                Err(DbError::Sqlite(err))
            }
        }
    }
}

impl Drop for StorageHandle {
    fn drop(&mut self) {
        // Errors are already logged by close(); nothing else to do in drop.
        let _ = self.close();
    }
}

fn bootstrap_connection(conn: &mut Connection, busy_timeout: Duration) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(DbError::Connection)?;
    conn.busy_timeout(busy_timeout)
        .map_err(DbError::Connection)?;
    ping(conn)?;
    bootstrap_schema(conn)?;
    Ok(())
}

/// Creates the employee table on a fresh database and stamps its version.
///
/// Already-bootstrapped databases are left untouched; a newer version is
/// rejected rather than guessed at.
fn bootstrap_schema(conn: &mut Connection) -> DbResult<()> {
    let current = schema_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: SCHEMA_VERSION,
        });
    }
    if current == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(include_str!("schema.sql"))?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    Ok(())
}

fn ping(conn: &Connection) -> DbResult<()> {
    let answer: i64 = conn
        .query_row("SELECT 1;", [], |row| row.get(0))
        .map_err(DbError::Connection)?;
    debug_assert_eq!(answer, 1);
    Ok(())
}

fn error_code(err: &DbError) -> &'static str {
    match err {
        DbError::Connection(_) => "db_open_failed",
        DbError::Sqlite(_) | DbError::UnsupportedSchemaVersion { .. } => "db_bootstrap_failed",
        DbError::Closed => "db_closed",
    }
}
