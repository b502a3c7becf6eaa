//! SQLite storage handle and schema bootstrap.
//!
//! # Responsibility
//! - Open, liveness-check and release the single storage session.
//! - Bootstrap the employee table before any repository touches it.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A handle is released exactly once, on `close()` or on drop.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod handle;

pub use handle::StorageHandle;

/// `PRAGMA user_version` of a bootstrapped employee database.
pub const SCHEMA_VERSION: u32 = 1;

pub type DbResult<T> = Result<T, DbError>;

/// Reads `PRAGMA user_version` from the connection.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[derive(Debug)]
pub enum DbError {
    /// Store could not be opened or failed the liveness round-trip.
    Connection(rusqlite::Error),
    /// Statement-level failure on an open connection.
    Sqlite(rusqlite::Error),
    /// The handle was already closed.
    Closed,
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "database connection failed: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Closed => write!(f, "database handle is closed"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::Closed => None,
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
