//! Rule logic for the EMS engine.
//!
//! This module contains the rule functions: attendance classification,
//! leave recommendation with the team availability check, leave decisions,
//! attendance recording and review, salary derivation with anomaly
//! detection, payslip summaries and the HR report. Every function is pure;
//! persistence of its output is left to the caller.

mod attendance_flag;
mod attendance_review;
mod hr_report;
mod leave_decision;
mod leave_recommendation;
mod month;
mod payslip_summary;
mod salary_derivation;

pub use attendance_flag::{
    AttendanceCounts, AttendanceFlag, AttendanceFlagResult, attendance_flag, classify_attendance,
    count_approved,
};
pub use attendance_review::{
    AttendanceSubmission, AttendanceUpdate, record_attendance, review_attendance,
};
pub use hr_report::{HrReport, HrReportRow, hr_report};
pub use leave_decision::{LeaveDecisionResult, decide_leave};
pub use leave_recommendation::{
    LeaveRecommendationResult, TeamAvailability, leave_recommendation, team_available,
};
pub use month::{in_month, month_end, month_start, next_month_start};
pub use payslip_summary::{
    HEADLINE_FULL_PAYOUT, HEADLINE_MINOR, HEADLINE_SIGNIFICANT, PayslipSummary,
    PayslipSummaryResult, payslip_summary,
};
pub use salary_derivation::{
    SalaryDerivationResult, daily_rate, derive_salary, detect_anomaly, previous_salary_record,
    round_money,
};
