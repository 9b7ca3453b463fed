//! Core data models for the EMS rule engine.
//!
//! These are the plain records the storage layer loads and hands to the
//! engine, plus the audit type every rule reports through.

mod attendance;
mod audit;
mod employee;
mod leave;
mod salary;

pub use attendance::{AttendanceEntry, AttendanceStatus, ReviewAction, ReviewStatus};
pub use audit::AuditStep;
pub use employee::{DEFAULT_LEAVE_BALANCE, Employee, Role};
pub use leave::{LeaveRecommendation, LeaveRequest, LeaveStatus};
pub use salary::{DerivedSalary, MAX_MONEY, MONEY_SCALE, SalaryRecord};
