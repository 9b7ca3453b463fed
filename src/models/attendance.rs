//! Attendance entry model.
//!
//! One entry records how an employee showed up on one calendar day, along
//! with where the entry sits in the review workflow.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// How the employee showed up on the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// On time.
    Present,
    /// Did not attend.
    Absent,
    /// Attended late.
    Late,
}

/// Review state shared by attendance entries and leave requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Accepted by a reviewer.
    Approved,
    /// Declined by a reviewer.
    Rejected,
}

/// A reviewer's decision on a pending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Accept the item.
    Approve,
    /// Decline the item.
    Reject,
}

impl ReviewAction {
    /// The review status this action moves an item to.
    pub fn review_status(&self) -> ReviewStatus {
        match self {
            ReviewAction::Approve => ReviewStatus::Approved,
            ReviewAction::Reject => ReviewStatus::Rejected,
        }
    }
}

/// A single attendance entry for one employee on one date.
///
/// At most one entry exists per (employee, date); the storage layer
/// enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The employee this entry belongs to.
    pub employee_id: String,
    /// The calendar date of the entry.
    pub date: NaiveDate,
    /// Attendance outcome for the day.
    pub status: AttendanceStatus,
    /// Review state; only approved entries feed the rules.
    #[serde(default)]
    pub review_status: ReviewStatus,
    /// Who submitted the entry.
    #[serde(default)]
    pub submitted_by: Option<String>,
    /// Who last reviewed the entry.
    #[serde(default)]
    pub reviewed_by: Option<String>,
    /// When the entry was last reviewed.
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl AttendanceEntry {
    /// Returns true if the entry has been approved.
    pub fn is_approved(&self) -> bool {
        self.review_status == ReviewStatus::Approved
    }

    /// Returns true if the entry is an approved entry for `employee_id`.
    pub fn counts_for(&self, employee_id: &str) -> bool {
        self.employee_id == employee_id && self.is_approved()
    }
}
