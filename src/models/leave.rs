//! Leave request model.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Decision state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Awaiting a manager decision.
    #[default]
    Pending,
    /// Granted.
    Approved,
    /// Declined.
    Rejected,
}

/// The advisory label attached to a pending leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveRecommendation {
    /// Balance covers the request and the team stays staffed.
    #[serde(rename = "Suggest Approve")]
    SuggestApprove,
    /// A manager should look at the request.
    #[serde(rename = "Suggest Review")]
    SuggestReview,
}

impl LeaveRecommendation {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            LeaveRecommendation::SuggestApprove => "Suggest Approve",
            LeaveRecommendation::SuggestReview => "Suggest Review",
        }
    }
}

impl fmt::Display for LeaveRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A request for leave over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The employee asking for leave.
    pub employee_id: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason given by the employee.
    #[serde(default)]
    pub reason: String,
    /// Current decision state.
    #[serde(default)]
    pub status: LeaveStatus,
    /// The manager who approved or rejected the request.
    #[serde(default)]
    pub decided_by: Option<String>,
    /// Recommendation stored alongside the request when it was filed.
    #[serde(default)]
    pub recommended_action: Option<LeaveRecommendation>,
}

impl LeaveRequest {
    /// Number of calendar days covered, counting both ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use ems_engine::models::{LeaveRequest, LeaveStatus};
    /// use chrono::NaiveDate;
    ///
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
    /// assert_eq!(request.total_days(), 5);
    /// ```
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Returns true if this request's range shares at least one day with
    /// `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    /// Returns true if the request has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Rejects a request whose end date precedes its start date.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidLeaveRequest {
                request_id: self.id.clone(),
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }
        Ok(())
    }
}
