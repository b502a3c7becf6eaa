//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/create/get/update/delete over the employee table.
//! - Verify the connection carries the expected schema before use.
//!
//! # Invariants
//! - Every operation targets `EMPLOYEE_TABLE`; no statement names another table.
//! - List returns rows in storage order; no ordering is imposed.
//! - A scan failure discards the whole list result.

use crate::db::{schema_version, DbError, SCHEMA_VERSION};
use crate::model::employee::{Employee, EmployeeDraft, EmployeeId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

macro_rules! employee_table {
    () => {
        "etsi_employees"
    };
}

/// Table holding employee rows.
pub const EMPLOYEE_TABLE: &str = employee_table!();

const EMPLOYEE_COLUMNS: [&str; 4] = ["id", "name", "email", "profession"];

const LIST_SQL: &str = concat!(
    "SELECT id, name, email, profession FROM ",
    employee_table!(),
    ";"
);
const GET_SQL: &str = concat!(
    "SELECT id, name, email, profession FROM ",
    employee_table!(),
    " WHERE id = ?1;"
);
const INSERT_SQL: &str = concat!(
    "INSERT INTO ",
    employee_table!(),
    " (name, email, profession) VALUES (?1, ?2, ?3);"
);
const UPDATE_SQL: &str = concat!(
    "UPDATE ",
    employee_table!(),
    " SET name = ?1, email = ?2, profession = ?3 WHERE id = ?4;"
);
const DELETE_SQL: &str = concat!("DELETE FROM ", employee_table!(), " WHERE id = ?1;");

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from employee repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Statement or connectivity failure.
    Query(DbError),
    /// No row matched the requested id.
    NotFound(EmployeeId),
    /// Connection schema is not at the bootstrapped version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "employee repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "employee repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "employee repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
            Self::NotFound(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Query(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(DbError::Sqlite(value))
    }
}

/// Data access contract for employee records.
pub trait EmployeeRepository {
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    fn create_employee(&self, draft: &EmployeeDraft) -> RepoResult<EmployeeId>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Employee>;
    /// Overwrites all mutable fields; returns rows affected (0 or 1).
    fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<usize>;
    /// Returns rows affected (0 or 1).
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<usize>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Wraps a bootstrapped connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` does not match.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the employee
    ///   table is absent or incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_employee_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(LIST_SQL)?;
        let rows = stmt.query_map([], parse_employee_row)?;
        let employees = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    fn create_employee(&self, draft: &EmployeeDraft) -> RepoResult<EmployeeId> {
        self.conn.execute(
            INSERT_SQL,
            params![
                draft.name.as_str(),
                draft.email.as_str(),
                draft.profession.as_str()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Employee> {
        self.conn
            .query_row(GET_SQL, [id], parse_employee_row)
            .optional()?
            .ok_or(RepoError::NotFound(id))
    }

    fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<usize> {
        let changed = self.conn.execute(
            UPDATE_SQL,
            params![
                draft.name.as_str(),
                draft.email.as_str(),
                draft.profession.as_str(),
                id
            ],
        )?;
        Ok(changed)
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<usize> {
        let changed = self.conn.execute(DELETE_SQL, [id])?;
        Ok(changed)
    }
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        profession: row.get("profession")?,
    })
}

fn ensure_employee_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = SCHEMA_VERSION;
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, EMPLOYEE_TABLE)? {
        return Err(RepoError::MissingRequiredTable(EMPLOYEE_TABLE));
    }

    for column in EMPLOYEE_COLUMNS {
        if !table_has_column(conn, EMPLOYEE_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: EMPLOYEE_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
