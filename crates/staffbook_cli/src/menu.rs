//! Menu options and choice parsing.

use std::fmt::{Display, Formatter};

pub const MENU_TEXT: &str = "Choose an option:
1. Print All Employees
2. Create Employee
3. Get Employee by ID
4. Update Employee
5. Delete Employee
6. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListAll,
    Create,
    ReadById,
    Update,
    Delete,
    Exit,
}

/// Why a choice line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceError {
    /// The line is not an integer.
    NotANumber(String),
    /// An integer outside 1..=6.
    OutOfRange(i64),
}

impl Display for ChoiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber(raw) => write!(f, "`{raw}` is not a number"),
            Self::OutOfRange(value) => write!(f, "option {value} is not in 1-6"),
        }
    }
}

impl TryFrom<i64> for MenuChoice {
    type Error = ChoiceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::ListAll),
            2 => Ok(Self::Create),
            3 => Ok(Self::ReadById),
            4 => Ok(Self::Update),
            5 => Ok(Self::Delete),
            6 => Ok(Self::Exit),
            other => Err(ChoiceError::OutOfRange(other)),
        }
    }
}

/// Parses one input line into a menu choice.
pub fn parse_choice(line: &str) -> Result<MenuChoice, ChoiceError> {
    let trimmed = line.trim();
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| ChoiceError::NotANumber(trimmed.to_string()))?;
    MenuChoice::try_from(value)
}
