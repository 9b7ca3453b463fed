//! Role checks applied before the engine is invoked.
//!
//! Requiring HR also admits managers; superusers pass every check.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Role, SalaryRecord};

/// Identity of whoever is asking for an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The caller's employee ID.
    pub id: String,
    /// The caller's role.
    pub role: Role,
    /// Superusers pass every role check.
    #[serde(default)]
    pub is_superuser: bool,
}

impl From<&Employee> for Caller {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            role: employee.role,
            is_superuser: employee.is_superuser,
        }
    }
}

/// Roles that may decide leave and record attendance.
pub const MANAGER_OR_HR: &[Role] = &[Role::Manager, Role::Hr];

/// Roles that may run HR-only operations.
pub const HR_ONLY: &[Role] = &[Role::Hr];

/// Checks that `caller` holds one of `required`.
///
/// # Examples
///
/// ```
/// use ems_engine::access::{Caller, HR_ONLY, authorize};
/// use ems_engine::models::Role;
///
/// let manager = Caller { id: "mgr_001".to_string(), role: Role::Manager, is_superuser: false };
/// assert!(authorize(&manager, HR_ONLY).is_ok());
///
/// let employee = Caller { id: "emp_001".to_string(), role: Role::Employee, is_superuser: false };
/// assert!(authorize(&employee, HR_ONLY).is_err());
/// ```
pub fn authorize(caller: &Caller, required: &[Role]) -> EngineResult<()> {
    if caller.is_superuser || effective_roles(required).contains(&caller.role) {
        return Ok(());
    }
    Err(EngineError::AccessDenied {
        role: caller.role,
        required: effective_roles(required)
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn effective_roles(required: &[Role]) -> Vec<Role> {
    let mut roles = required.to_vec();
    if roles.contains(&Role::Hr) && !roles.contains(&Role::Manager) {
        roles.push(Role::Manager);
    }
    roles
}

/// Checks that `caller` is `subject_id` or otherwise holds one of
/// `required`.
pub fn authorize_self_or(caller: &Caller, subject_id: &str, required: &[Role]) -> EngineResult<()> {
    if caller.id == subject_id {
        return Ok(());
    }
    authorize(caller, required)
}

/// Checks that `caller` may see the payslip for `record`.
///
/// HR and managers see every payslip; anyone else only their own.
pub fn authorize_payslip(caller: &Caller, record: &SalaryRecord) -> EngineResult<()> {
    authorize_self_or(caller, &record.employee_id, MANAGER_OR_HR)
}
