//! Repository layer for employee persistence.
//!
//! # Responsibility
//! - One parameterized statement per operation against one table.
//! - Keep SQL details out of the service and console layers.
//!
//! # Invariants
//! - Zero rows affected by update/delete is a count, not an error.
//! - A missing row on lookup is `RepoError::NotFound`.

pub mod employee_repo;
