//! Attendance recording and review.
//!
//! Entries recorded by HR or a manager are approved on entry. Recording a day
//! that already has an entry overwrites it instead of adding a second one, so
//! the one-entry-per-day invariant holds for whatever the caller persists.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AttendanceEntry, AttendanceStatus, AuditStep, ReviewAction, ReviewStatus};

/// A day's attendance as entered by HR or a manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSubmission {
    /// The employee the entry is for.
    pub employee_id: String,
    /// The calendar date.
    pub date: NaiveDate,
    /// The attendance outcome.
    pub status: AttendanceStatus,
}

/// The result of recording or reviewing an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    /// The entry as it should now be persisted.
    pub entry: AttendanceEntry,
    /// True when no entry existed for the day and one was created.
    pub created: bool,
    /// The audit step recording this update.
    pub audit_step: AuditStep,
}

/// Records a day's attendance, approving it on behalf of `recorded_by`.
///
/// `existing` holds entries already stored; if one matches the submission's
/// employee and date it is updated in place (keeping its id), otherwise a new
/// entry with a fresh id is produced.
pub fn record_attendance(
    existing: &[AttendanceEntry],
    submission: &AttendanceSubmission,
    recorded_by: &str,
    at: DateTime<Utc>,
    step_number: u32,
) -> AttendanceUpdate {
    let current = existing
        .iter()
        .find(|e| e.employee_id == submission.employee_id && e.date == submission.date);

    let created = current.is_none();
    let mut entry = match current {
        Some(found) => found.clone(),
        None => AttendanceEntry {
            id: Uuid::new_v4().to_string(),
            employee_id: submission.employee_id.clone(),
            date: submission.date,
            status: submission.status,
            review_status: ReviewStatus::Pending,
            submitted_by: None,
            reviewed_by: None,
            reviewed_at: None,
        },
    };
    let previous_status = current.map(|found| found.status);

    entry.status = submission.status;
    entry.review_status = ReviewStatus::Approved;
    entry.submitted_by = Some(recorded_by.to_string());
    entry.reviewed_by = Some(recorded_by.to_string());
    entry.reviewed_at = Some(at);

    let reasoning = match previous_status {
        Some(prev) => format!(
            "Existing entry for {} updated from {:?} to {:?} and approved",
            submission.date, prev, submission.status
        ),
        None => format!(
            "New entry for {} recorded as {:?} and approved",
            submission.date, submission.status
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_record".to_string(),
        rule_name: "Attendance Recording".to_string(),
        input: serde_json::json!({
            "employee_id": submission.employee_id,
            "date": submission.date.to_string(),
            "status": submission.status,
            "recorded_by": recorded_by
        }),
        output: serde_json::json!({
            "entry_id": entry.id,
            "created": created,
            "review_status": entry.review_status
        }),
        reasoning,
    };

    AttendanceUpdate {
        entry,
        created,
        audit_step,
    }
}

/// Applies a reviewer's decision to an attendance entry.
pub fn review_attendance(
    entry: &AttendanceEntry,
    action: ReviewAction,
    reviewed_by: &str,
    at: DateTime<Utc>,
    step_number: u32,
) -> AttendanceUpdate {
    let mut updated = entry.clone();
    updated.review_status = action.review_status();
    updated.reviewed_by = Some(reviewed_by.to_string());
    updated.reviewed_at = Some(at);

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_review".to_string(),
        rule_name: "Attendance Review".to_string(),
        input: serde_json::json!({
            "entry_id": entry.id,
            "previous_review_status": entry.review_status,
            "action": action
        }),
        output: serde_json::json!({
            "review_status": updated.review_status,
            "reviewed_by": reviewed_by
        }),
        reasoning: format!(
            "Entry for {} on {} moved from {:?} to {:?}",
            entry.employee_id, entry.date, entry.review_status, updated.review_status
        ),
    };

    AttendanceUpdate {
        entry: updated,
        created: false,
        audit_step,
    }
}
