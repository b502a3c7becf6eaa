//! Core domain logic for Staffbook.
//! This crate owns employee persistence; console concerns live in the CLI.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{LogConfig, StoreConfig};
pub use db::{DbError, DbResult, StorageHandle};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeDraft, EmployeeId};
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository, EMPLOYEE_TABLE,
};
pub use service::employee_service::EmployeeService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
