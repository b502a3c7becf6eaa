//! Employee record model.
//!
//! # Responsibility
//! - Define the row shape of the employee table.
//! - Separate storage-assigned identity from the three mutable fields.

use serde::{Deserialize, Serialize};

/// Storage-assigned employee identifier.
pub type EmployeeId = i64;

/// One persisted employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Primary key, assigned on insert.
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub profession: String,
}

/// The mutable part of an employee record.
///
/// Used as input for create and as the full overwrite payload for update;
/// there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub profession: String,
}

impl EmployeeDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        profession: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            profession: profession.into(),
        }
    }

    /// Attaches a storage-assigned id, producing a full record.
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            profession: self.profession,
        }
    }
}

impl Employee {
    /// Splits off the mutable fields, dropping the id.
    pub fn into_draft(self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name,
            email: self.email,
            profession: self.profession,
        }
    }

    /// Single-line rendering used by list output.
    pub fn display_line(&self) -> String {
        format!(
            "ID: {}, Name: {}, Email: {}, Profession: {}",
            self.id, self.name, self.email, self.profession
        )
    }
}
