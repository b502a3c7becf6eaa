//! Use-case services over the repository layer.

pub mod employee_service;
