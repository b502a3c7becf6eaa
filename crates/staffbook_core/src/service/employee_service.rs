//! Employee use-case service.
//!
//! # Responsibility
//! - Expose the five record operations to console or other callers.
//! - Record one metadata-only log event per operation.
//!
//! # Invariants
//! - The service never bypasses the repository contract.
//! - Failures are returned unchanged; nothing is retried.

use crate::model::employee::{Employee, EmployeeDraft, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoError, RepoResult};
use log::{info, warn};

/// Use-case wrapper for employee CRUD.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all employees in storage order.
    pub fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let result = self.repo.list_employees();
        match &result {
            Ok(employees) => info!(
                "event=employee_list module=service status=ok count={}",
                employees.len()
            ),
            Err(err) => log_failure("employee_list", err),
        }
        result
    }

    /// Inserts a new employee; returns the storage-assigned id.
    pub fn create_employee(&self, draft: &EmployeeDraft) -> RepoResult<EmployeeId> {
        let result = self.repo.create_employee(draft);
        match &result {
            Ok(id) => info!("event=employee_create module=service status=ok id={id}"),
            Err(err) => log_failure("employee_create", err),
        }
        result
    }

    /// Looks up one employee by id.
    ///
    /// Returns `RepoError::NotFound` when no row matches.
    pub fn get_employee(&self, id: EmployeeId) -> RepoResult<Employee> {
        let result = self.repo.get_employee(id);
        match &result {
            Ok(_) => info!("event=employee_get module=service status=ok id={id}"),
            Err(RepoError::NotFound(_)) => {
                info!("event=employee_get module=service status=not_found id={id}")
            }
            Err(err) => log_failure("employee_get", err),
        }
        result
    }

    /// Overwrites name, email and profession; returns rows affected.
    pub fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<usize> {
        let result = self.repo.update_employee(id, draft);
        match &result {
            Ok(affected) => info!(
                "event=employee_update module=service status=ok id={id} affected={affected}"
            ),
            Err(err) => log_failure("employee_update", err),
        }
        result
    }

    /// Deletes by id; returns rows affected.
    pub fn delete_employee(&self, id: EmployeeId) -> RepoResult<usize> {
        let result = self.repo.delete_employee(id);
        match &result {
            Ok(affected) => info!(
                "event=employee_delete module=service status=ok id={id} affected={affected}"
            ),
            Err(err) => log_failure("employee_delete", err),
        }
        result
    }
}

fn log_failure(event: &str, err: &RepoError) {
    warn!("event={event} module=service status=error error={err}");
}
