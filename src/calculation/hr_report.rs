//! HR summary report.

use serde::{Deserialize, Serialize};

use crate::config::AttendanceRules;
use crate::models::{AttendanceEntry, Employee, LeaveRequest, LeaveStatus, SalaryRecord};

use super::attendance_flag::{AttendanceFlag, attendance_flag};

/// One employee's line in the HR report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrReportRow {
    /// The employee's ID.
    pub employee_id: String,
    /// The employee's login name.
    pub username: String,
    /// Attendance label over the employee's whole history.
    pub attendance_flag: AttendanceFlag,
    /// Remaining leave days.
    pub leave_balance: u32,
}

/// Organisation-wide overview for HR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrReport {
    /// One row per account with the Employee role, ordered by username.
    pub rows: Vec<HrReportRow>,
    /// Leave requests still awaiting a decision.
    pub pending_leaves: usize,
    /// Salary records carrying the anomaly flag.
    pub salary_anomalies: usize,
}

/// Builds the HR report from the loaded records.
pub fn hr_report(
    employees: &[Employee],
    attendance: &[AttendanceEntry],
    leaves: &[LeaveRequest],
    salaries: &[SalaryRecord],
    rules: &AttendanceRules,
) -> HrReport {
    let mut staff: Vec<&Employee> = employees.iter().filter(|e| e.is_employee()).collect();
    staff.sort_by(|a, b| a.username.cmp(&b.username));

    let rows = staff
        .into_iter()
        .map(|employee| HrReportRow {
            employee_id: employee.id.clone(),
            username: employee.username.clone(),
            attendance_flag: attendance_flag(&employee.id, attendance, None, rules, 1).flag,
            leave_balance: employee.leave_balance,
        })
        .collect();

    HrReport {
        rows,
        pending_leaves: leaves
            .iter()
            .filter(|l| l.status == LeaveStatus::Pending)
            .count(),
        salary_anomalies: salaries.iter().filter(|s| s.anomaly_flag).count(),
    }
}
