//! Request types for the EMS engine API.
//!
//! The API holds no records of its own: every request carries the caller's
//! identity and the records the rule needs, already loaded by the storage
//! layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::access::Caller;
use crate::calculation::AttendanceSubmission;
use crate::models::{
    AttendanceEntry, Employee, LeaveRequest, ReviewAction, SalaryRecord,
};

/// Request body for `POST /attendance/flag`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceFlagRequest {
    /// Who is asking.
    pub caller: Caller,
    /// The employee to classify.
    pub employee_id: String,
    /// Any date in the month to restrict to; omit for all history.
    #[serde(default)]
    pub month: Option<NaiveDate>,
    /// The employee's attendance entries.
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
}

/// Request body for `POST /attendance/record`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAttendanceRequest {
    /// Who is recording.
    pub caller: Caller,
    /// The day being recorded.
    pub submission: AttendanceSubmission,
    /// Entries already stored for the employee, to detect the same day.
    #[serde(default)]
    pub existing: Vec<AttendanceEntry>,
}

/// Request body for `POST /attendance/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAttendanceRequest {
    /// Who is reviewing.
    pub caller: Caller,
    /// The entry under review.
    pub entry: AttendanceEntry,
    /// The decision.
    pub action: ReviewAction,
}

/// Request body for `POST /leave/recommendation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRecommendationRequest {
    /// Who is asking.
    pub caller: Caller,
    /// The leave request to evaluate.
    pub request: LeaveRequest,
    /// The requesting employee.
    pub employee: Employee,
    /// Employee directory, used to find teammates.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Existing leave requests, used to find overlapping absences.
    #[serde(default)]
    pub leaves: Vec<LeaveRequest>,
}

/// Request body for `POST /leave/decision`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDecisionRequest {
    /// Who is deciding.
    pub caller: Caller,
    /// The leave request being decided.
    pub request: LeaveRequest,
    /// The requesting employee.
    pub employee: Employee,
    /// The decision.
    pub action: ReviewAction,
}

/// Request body for `POST /salary/derive`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryDeriveRequest {
    /// Who is asking.
    pub caller: Caller,
    /// The salary record to derive.
    pub record: SalaryRecord,
    /// The employee's attendance entries.
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
    /// The employee's other salary records.
    #[serde(default)]
    pub history: Vec<SalaryRecord>,
}

/// Request body for `POST /payslip/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipSummaryRequest {
    /// Who is asking.
    pub caller: Caller,
    /// The derived salary record.
    pub record: SalaryRecord,
}

/// Request body for `POST /reports/hr`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrReportRequest {
    /// Who is asking.
    pub caller: Caller,
    /// All employee accounts.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// All attendance entries.
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
    /// All leave requests.
    #[serde(default)]
    pub leaves: Vec<LeaveRequest>,
    /// All salary records.
    #[serde(default)]
    pub salaries: Vec<SalaryRecord>,
}
