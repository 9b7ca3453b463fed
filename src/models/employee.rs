//! Employee model and related types.
//!
//! This module defines the Employee struct and Role enum for representing
//! staff whose attendance, leave and salary the engine evaluates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Leave balance granted to a new employee when none is supplied.
pub const DEFAULT_LEAVE_BALANCE: u32 = 12;

/// The role an account holds in the organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Human resources staff.
    Hr,
    /// Line managers.
    Manager,
    /// Regular employees.
    Employee,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "HR",
            Role::Manager => "MANAGER",
            Role::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_leave_balance() -> u32 {
    DEFAULT_LEAVE_BALANCE
}

/// Represents an employee account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Login name, used for report ordering.
    pub username: String,
    /// The role held by the account.
    pub role: Role,
    /// Superusers pass every role check.
    #[serde(default)]
    pub is_superuser: bool,
    /// Department label; empty or missing means no department.
    #[serde(default)]
    pub department: Option<String>,
    /// Remaining days of leave.
    #[serde(default = "default_leave_balance")]
    pub leave_balance: u32,
}

impl Employee {
    /// Returns the department label, treating an empty label as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ems_engine::models::{Employee, Role};
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     username: "alice".to_string(),
    ///     role: Role::Employee,
    ///     is_superuser: false,
    ///     department: Some(String::new()),
    ///     leave_balance: 12,
    /// };
    /// assert_eq!(employee.department(), None);
    /// ```
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref().filter(|d| !d.is_empty())
    }

    /// Returns true if the account holds the HR role.
    pub fn is_hr(&self) -> bool {
        self.role == Role::Hr
    }

    /// Returns true if the account holds the Manager role.
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }

    /// Returns true if the account holds the Employee role.
    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }
}
