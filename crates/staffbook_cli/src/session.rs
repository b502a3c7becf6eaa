//! Interactive menu loop.
//!
//! # Responsibility
//! - Read a choice, prompt for the fields that operation needs, call the
//!   service, print the outcome.
//! - Keep all console I/O here; the service layer never touches it.
//!
//! # Invariants
//! - Only the exit choice or end of input terminates the loop.
//! - Every failure is printed before the loop resumes.
//! - Malformed console input (including non-UTF-8 bytes) never ends the loop.

use crate::menu::{parse_choice, ChoiceError, MenuChoice, MENU_TEXT};
use log::debug;
use staffbook_core::{EmployeeDraft, EmployeeId, EmployeeRepository, EmployeeService, RepoError};
use std::io::{self, BufRead, Write};

const INVALID_INPUT: &str = "Invalid input. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    AwaitingChoice,
    Terminated,
}

/// Result of reading one line or prompting for one field.
enum Field<T> {
    Value(T),
    Rejected,
    EndOfInput,
}

/// One console session bound to a service and a pair of streams.
pub struct Session<R: EmployeeRepository, I: BufRead, O: Write> {
    service: EmployeeService<R>,
    input: I,
    output: O,
    state: LoopState,
}

impl<R: EmployeeRepository, I: BufRead, O: Write> Session<R, I, O> {
    pub fn new(service: EmployeeService<R>, input: I, output: O) -> Self {
        Self {
            service,
            input,
            output,
            state: LoopState::AwaitingChoice,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Runs until the exit choice or end of input.
    ///
    /// # Errors
    /// - Only console I/O failures; storage failures and malformed input are
    ///   printed and the loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        while self.state == LoopState::AwaitingChoice {
            self.step()?;
        }
        Ok(())
    }

    /// Processes exactly one menu cycle.
    pub fn step(&mut self) -> io::Result<()> {
        writeln!(self.output, "{MENU_TEXT}")?;
        self.output.flush()?;

        let line = match self.read_line()? {
            Field::Value(line) => line,
            Field::Rejected => return writeln!(self.output, "{INVALID_INPUT}"),
            Field::EndOfInput => return self.terminate(),
        };

        let choice = match parse_choice(&line) {
            Ok(choice) => choice,
            Err(err) => {
                let message = match &err {
                    ChoiceError::NotANumber(_) => INVALID_INPUT,
                    ChoiceError::OutOfRange(_) => "Invalid option. Please try again.",
                };
                debug!("event=menu_choice module=cli status=rejected detail={err}");
                return writeln!(self.output, "{message}");
            }
        };

        match choice {
            MenuChoice::ListAll => self.list_all(),
            MenuChoice::Create => self.create(),
            MenuChoice::ReadById => self.read_by_id(),
            MenuChoice::Update => self.update(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::Exit => self.terminate(),
        }
    }

    fn list_all(&mut self) -> io::Result<()> {
        match self.service.list_employees() {
            Ok(employees) => {
                writeln!(self.output, "List of all employees:")?;
                for employee in &employees {
                    writeln!(self.output, "{}", employee.display_line())?;
                }
                Ok(())
            }
            Err(err) => writeln!(self.output, "Error fetching employees: {err}"),
        }
    }

    fn create(&mut self) -> io::Result<()> {
        let draft =
            match self.prompt_draft("Enter name: ", "Enter email: ", "Enter profession: ")? {
                Field::Value(draft) => draft,
                Field::Rejected => return Ok(()),
                Field::EndOfInput => return self.terminate(),
            };

        match self.service.create_employee(&draft) {
            Ok(id) => writeln!(self.output, "Employee created with ID: {id}"),
            Err(err) => writeln!(self.output, "Error creating employee: {err}"),
        }
    }

    fn read_by_id(&mut self) -> io::Result<()> {
        let id = match self.prompt_id("Enter id to search: ")? {
            Field::Value(id) => id,
            Field::Rejected => return Ok(()),
            Field::EndOfInput => return self.terminate(),
        };

        match self.service.get_employee(id) {
            Ok(employee) => writeln!(
                self.output,
                "Employee found: Name: {}, Email: {}, Profession: {}",
                employee.name, employee.email, employee.profession
            ),
            Err(RepoError::NotFound(_)) => {
                writeln!(self.output, "No employee found with the given ID.")
            }
            Err(err) => writeln!(self.output, "Error fetching employee: {err}"),
        }
    }

    fn update(&mut self) -> io::Result<()> {
        let id = match self.prompt_id("Enter employee ID to update: ")? {
            Field::Value(id) => id,
            Field::Rejected => return Ok(()),
            Field::EndOfInput => return self.terminate(),
        };
        let draft = match self.prompt_draft(
            "Enter new name: ",
            "Enter new email: ",
            "Enter new profession: ",
        )? {
            Field::Value(draft) => draft,
            Field::Rejected => return Ok(()),
            Field::EndOfInput => return self.terminate(),
        };

        match self.service.update_employee(id, &draft) {
            Ok(0) => writeln!(self.output, "No employee found with the given ID."),
            Ok(_) => writeln!(self.output, "Employee with ID {id} updated successfully."),
            Err(err) => writeln!(self.output, "Error updating employee: {err}"),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let id = match self.prompt_id("Enter employee ID to delete: ")? {
            Field::Value(id) => id,
            Field::Rejected => return Ok(()),
            Field::EndOfInput => return self.terminate(),
        };

        match self.service.delete_employee(id) {
            Ok(0) => writeln!(self.output, "No employee found with the given ID."),
            Ok(_) => writeln!(self.output, "Employee with ID {id} deleted successfully."),
            Err(err) => writeln!(self.output, "Error deleting employee: {err}"),
        }
    }

    fn terminate(&mut self) -> io::Result<()> {
        writeln!(self.output, "Exiting...")?;
        self.output.flush()?;
        self.state = LoopState::Terminated;
        Ok(())
    }

    fn prompt_draft(
        &mut self,
        name_label: &str,
        email_label: &str,
        profession_label: &str,
    ) -> io::Result<Field<EmployeeDraft>> {
        let mut values = Vec::with_capacity(3);
        for label in [name_label, email_label, profession_label] {
            match self.prompt(label)? {
                Field::Value(value) => values.push(value),
                Field::Rejected => return Ok(Field::Rejected),
                Field::EndOfInput => return Ok(Field::EndOfInput),
            }
        }
        let [name, email, profession]: [String; 3] = match values.try_into() {
            Ok(fields) => fields,
            Err(_) => return Ok(Field::Rejected),
        };
        Ok(Field::Value(EmployeeDraft::new(name, email, profession)))
    }

    fn prompt_id(&mut self, label: &str) -> io::Result<Field<EmployeeId>> {
        let raw = match self.prompt(label)? {
            Field::Value(raw) => raw,
            Field::Rejected => return Ok(Field::Rejected),
            Field::EndOfInput => return Ok(Field::EndOfInput),
        };
        match raw.parse::<EmployeeId>() {
            Ok(id) => Ok(Field::Value(id)),
            Err(_) => {
                writeln!(
                    self.output,
                    "Invalid ID `{raw}`. Please enter a whole number."
                )?;
                Ok(Field::Rejected)
            }
        }
    }

    fn prompt(&mut self, label: &str) -> io::Result<Field<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        match self.read_line()? {
            Field::Value(line) => Ok(Field::Value(line.trim().to_string())),
            Field::Rejected => {
                writeln!(self.output, "{INVALID_INPUT}")?;
                Ok(Field::Rejected)
            }
            Field::EndOfInput => Ok(Field::EndOfInput),
        }
    }

    /// Reads one raw line; a line that is not UTF-8 is rejected, not fatal.
    fn read_line(&mut self) -> io::Result<Field<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(Field::EndOfInput);
        }
        match String::from_utf8(bytes) {
            Ok(line) => Ok(Field::Value(line)),
            Err(_) => {
                debug!("event=console_read module=cli status=rejected reason=invalid_utf8");
                Ok(Field::Rejected)
            }
        }
    }
}
