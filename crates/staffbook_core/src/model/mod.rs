//! Domain model for employee records.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes afterwards.
//! - Field formats (e.g. email syntax) are not validated here.

pub mod employee;
