//! Leave decisions.
//!
//! Applies a manager's approve/reject decision to a leave request and charges
//! approved days against the employee's balance.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Employee, LeaveRequest, LeaveStatus, ReviewAction};

/// The result of deciding a leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDecisionResult {
    /// The request with its new status and decider.
    pub request: LeaveRequest,
    /// The employee with their updated balance.
    pub employee: Employee,
    /// Days actually taken off the balance.
    pub days_deducted: u32,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Approves or rejects a leave request.
///
/// Approval charges the request's total days against the balance, which
/// never drops below zero, every time an approval is applied. Rejection
/// leaves the balance untouched.
///
/// Returns [`EngineError::EmployeeMismatch`] when `employee` is not the
/// requester, or [`EngineError::InvalidLeaveRequest`] for an inverted range.
pub fn decide_leave(
    request: &LeaveRequest,
    employee: &Employee,
    action: ReviewAction,
    decided_by: &str,
    step_number: u32,
) -> EngineResult<LeaveDecisionResult> {
    if request.employee_id != employee.id {
        return Err(EngineError::EmployeeMismatch {
            record_id: request.id.clone(),
            expected: request.employee_id.clone(),
            actual: employee.id.clone(),
        });
    }
    request.validate()?;

    let previous_status = request.status;
    let mut updated_request = request.clone();
    let mut updated_employee = employee.clone();
    updated_request.decided_by = Some(decided_by.to_string());

    let total_days = u32::try_from(request.total_days()).unwrap_or(u32::MAX);
    let days_deducted = match action {
        ReviewAction::Approve => {
            updated_request.status = LeaveStatus::Approved;
            let new_balance = employee.leave_balance.saturating_sub(total_days);
            updated_employee.leave_balance = new_balance;
            employee.leave_balance - new_balance
        }
        ReviewAction::Reject => {
            updated_request.status = LeaveStatus::Rejected;
            0
        }
    };

    let reasoning = match action {
        ReviewAction::Approve => format!(
            "Approved {} day(s): balance {} -> {}",
            total_days, employee.leave_balance, updated_employee.leave_balance
        ),
        ReviewAction::Reject => "Rejected; balance unchanged".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_decision".to_string(),
        rule_name: "Leave Decision".to_string(),
        input: serde_json::json!({
            "request_id": request.id,
            "employee_id": employee.id,
            "action": action,
            "previous_status": previous_status,
            "total_days": total_days,
            "leave_balance": employee.leave_balance
        }),
        output: serde_json::json!({
            "status": updated_request.status,
            "decided_by": decided_by,
            "days_deducted": days_deducted,
            "leave_balance": updated_employee.leave_balance
        }),
        reasoning,
    };

    Ok(LeaveDecisionResult {
        request: updated_request,
        employee: updated_employee,
        days_deducted,
        audit_step,
    })
}
