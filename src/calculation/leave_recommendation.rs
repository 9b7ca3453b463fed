//! Leave recommendation.
//!
//! A pending leave request is suggested for approval when the employee has
//! enough balance to cover it and their department would still have someone
//! in while they are away.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LeaveRules;
use crate::models::{AuditStep, Employee, LeaveRecommendation, LeaveRequest};

/// Outcome of the team availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAvailability {
    /// Whether enough teammates remain at work.
    pub available: bool,
    /// Colleagues sharing the employee's department.
    pub teammate_count: usize,
    /// Distinct colleagues with approved leave overlapping the range.
    pub overlapping_count: usize,
}

/// Checks whether the employee's department stays staffed over
/// `[start_date, end_date]`.
///
/// An employee without a department, or alone in it, is always available.
/// Otherwise colleagues with approved leave overlapping the range are counted
/// once each, and the team is available while at least
/// `rules.min_available_teammates` colleagues remain.
///
/// Departments match on exact label equality and only approved leave
/// counts; pending leave of colleagues is not considered.
pub fn team_available(
    employee: &Employee,
    start_date: NaiveDate,
    end_date: NaiveDate,
    employees: &[Employee],
    leaves: &[LeaveRequest],
    rules: &LeaveRules,
) -> TeamAvailability {
    let Some(department) = employee.department() else {
        return TeamAvailability {
            available: true,
            teammate_count: 0,
            overlapping_count: 0,
        };
    };

    let teammates: HashSet<&str> = employees
        .iter()
        .filter(|other| other.id != employee.id && other.department() == Some(department))
        .map(|other| other.id.as_str())
        .collect();

    if teammates.is_empty() {
        return TeamAvailability {
            available: true,
            teammate_count: 0,
            overlapping_count: 0,
        };
    }

    let overlapping: HashSet<&str> = leaves
        .iter()
        .filter(|leave| leave.is_approved() && leave.overlaps(start_date, end_date))
        .map(|leave| leave.employee_id.as_str())
        .filter(|id| teammates.contains(id))
        .collect();

    let remaining = teammates.len().saturating_sub(overlapping.len());

    TeamAvailability {
        available: remaining >= rules.min_available_teammates as usize,
        teammate_count: teammates.len(),
        overlapping_count: overlapping.len(),
    }
}

/// The result of evaluating a leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecommendationResult {
    /// The advisory label.
    pub recommendation: LeaveRecommendation,
    /// Whether the leave balance covers the request.
    pub balance_sufficient: bool,
    /// The team availability check.
    pub team: TeamAvailability,
    /// The audit step recording this evaluation.
    pub audit_step: AuditStep,
}

/// Recommends approving or reviewing a leave request.
///
/// Returns [`LeaveRecommendation::SuggestApprove`] only when the employee's
/// balance is at least the request's total days and [`team_available`]
/// holds; otherwise [`LeaveRecommendation::SuggestReview`].
///
/// # Arguments
///
/// * `request` - The leave request being evaluated
/// * `employee` - The requesting employee (balance and department)
/// * `employees` - Directory of employees, used to find teammates
/// * `leaves` - Existing leave requests, used to find overlapping absences
/// * `rules` - Leave thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use ems_engine::calculation::leave_recommendation;
/// use ems_engine::config::LeaveRules;
/// use ems_engine::models::{Employee, LeaveRecommendation, LeaveRequest, LeaveStatus, Role};
/// use chrono::NaiveDate;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     username: "alice".to_string(),
///     role: Role::Employee,
///     is_superuser: false,
///     department: None,
///     leave_balance: 10,
/// };
/// let request = LeaveRequest {
///     id: "leave_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
///     reason: "holiday".to_string(),
///     status: LeaveStatus::Pending,
///     decided_by: None,
///     recommended_action: None,
/// };
///
/// let result = leave_recommendation(&request, &employee, &[], &[], &LeaveRules::default(), 1);
/// assert_eq!(result.recommendation, LeaveRecommendation::SuggestApprove);
/// ```
pub fn leave_recommendation(
    request: &LeaveRequest,
    employee: &Employee,
    employees: &[Employee],
    leaves: &[LeaveRequest],
    rules: &LeaveRules,
    step_number: u32,
) -> LeaveRecommendationResult {
    let total_days = request.total_days();
    let balance_sufficient = i64::from(employee.leave_balance) >= total_days;
    let team = team_available(
        employee,
        request.start_date,
        request.end_date,
        employees,
        leaves,
        rules,
    );

    let recommendation = if balance_sufficient && team.available {
        LeaveRecommendation::SuggestApprove
    } else {
        LeaveRecommendation::SuggestReview
    };

    let reasoning = if !balance_sufficient {
        format!(
            "Balance of {} days does not cover {} requested days",
            employee.leave_balance, total_days
        )
    } else if !team.available {
        format!(
            "{} of {} teammates already on approved leave in this period",
            team.overlapping_count, team.teammate_count
        )
    } else {
        format!(
            "Balance of {} days covers {} requested days and the team stays staffed",
            employee.leave_balance, total_days
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_recommendation".to_string(),
        rule_name: "Leave Recommendation".to_string(),
        input: serde_json::json!({
            "request_id": request.id,
            "employee_id": employee.id,
            "start_date": request.start_date.to_string(),
            "end_date": request.end_date.to_string(),
            "total_days": total_days,
            "leave_balance": employee.leave_balance,
            "department": employee.department()
        }),
        output: serde_json::json!({
            "recommendation": recommendation.label(),
            "balance_sufficient": balance_sufficient,
            "team_available": team.available,
            "teammate_count": team.teammate_count,
            "overlapping_count": team.overlapping_count
        }),
        reasoning,
    };

    LeaveRecommendationResult {
        recommendation,
        balance_sufficient,
        team,
        audit_step,
    }
}
