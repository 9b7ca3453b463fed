//! Attendance classification.
//!
//! This module labels an employee's attendance from their approved late and
//! absent days, either across their whole history or within one month.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AttendanceRules;
use crate::models::{AttendanceEntry, AttendanceStatus, AuditStep};

use super::month::{month_start, next_month_start};

/// The attendance label assigned to an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceFlag {
    /// Too many late days.
    #[serde(rename = "Frequently Late")]
    FrequentlyLate,
    /// Repeated absences combined with repeated lateness.
    #[serde(rename = "Irregular Attendance")]
    IrregularAttendance,
    /// Nothing worth flagging.
    #[serde(rename = "Stable Attendance")]
    StableAttendance,
}

impl AttendanceFlag {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceFlag::FrequentlyLate => "Frequently Late",
            AttendanceFlag::IrregularAttendance => "Irregular Attendance",
            AttendanceFlag::StableAttendance => "Stable Attendance",
        }
    }
}

impl fmt::Display for AttendanceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tallies of approved attendance entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCounts {
    /// Approved present days.
    pub present: u32,
    /// Approved late days.
    pub late: u32,
    /// Approved absent days.
    pub absent: u32,
}

/// Counts an employee's approved entries, optionally limited to the
/// half-open range `[from, until)`.
///
/// Entries for other employees and entries that are pending or rejected are
/// ignored.
pub fn count_approved(
    employee_id: &str,
    entries: &[AttendanceEntry],
    range: Option<(NaiveDate, NaiveDate)>,
) -> AttendanceCounts {
    entries
        .iter()
        .filter(|entry| entry.counts_for(employee_id))
        .filter(|entry| match range {
            Some((from, until)) => entry.date >= from && entry.date < until,
            None => true,
        })
        .fold(AttendanceCounts::default(), |mut counts, entry| {
            match entry.status {
                AttendanceStatus::Present => counts.present += 1,
                AttendanceStatus::Late => counts.late += 1,
                AttendanceStatus::Absent => counts.absent += 1,
            }
            counts
        })
}

/// Applies the classification thresholds to a set of counts.
///
/// The first matching rule wins: frequent lateness, then irregular
/// attendance, otherwise stable.
pub fn classify_attendance(counts: &AttendanceCounts, rules: &AttendanceRules) -> AttendanceFlag {
    if counts.late > rules.frequently_late_above {
        AttendanceFlag::FrequentlyLate
    } else if counts.absent >= rules.irregular_min_absent && counts.late >= rules.irregular_min_late
    {
        AttendanceFlag::IrregularAttendance
    } else {
        AttendanceFlag::StableAttendance
    }
}

/// The result of classifying an employee's attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceFlagResult {
    /// The assigned label.
    pub flag: AttendanceFlag,
    /// The approved counts the label was derived from.
    pub counts: AttendanceCounts,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Classifies an employee's attendance.
///
/// # Arguments
///
/// * `employee_id` - The employee to classify
/// * `entries` - Attendance entries loaded by the caller; may include other
///   employees' entries, which are skipped
/// * `month` - Any date in the month to restrict to, or `None` for all history
/// * `rules` - Classification thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use ems_engine::calculation::{attendance_flag, AttendanceFlag};
/// use ems_engine::config::AttendanceRules;
/// use ems_engine::models::{AttendanceEntry, AttendanceStatus, ReviewStatus};
/// use chrono::NaiveDate;
///
/// let entries: Vec<AttendanceEntry> = (1..=5)
///     .map(|day| AttendanceEntry {
///         id: format!("att_{day}"),
///         employee_id: "emp_001".to_string(),
///         date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
///         status: AttendanceStatus::Late,
///         review_status: ReviewStatus::Approved,
///         submitted_by: None,
///         reviewed_by: None,
///         reviewed_at: None,
///     })
///     .collect();
///
/// let result = attendance_flag("emp_001", &entries, None, &AttendanceRules::default(), 1);
/// assert_eq!(result.flag, AttendanceFlag::FrequentlyLate);
/// ```
pub fn attendance_flag(
    employee_id: &str,
    entries: &[AttendanceEntry],
    month: Option<NaiveDate>,
    rules: &AttendanceRules,
    step_number: u32,
) -> AttendanceFlagResult {
    let range = month.map(|m| (month_start(m), next_month_start(m)));
    let counts = count_approved(employee_id, entries, range);
    let flag = classify_attendance(&counts, rules);

    let reasoning = match flag {
        AttendanceFlag::FrequentlyLate => format!(
            "{} late days exceeds the limit of {}",
            counts.late, rules.frequently_late_above
        ),
        AttendanceFlag::IrregularAttendance => format!(
            "{} absent days (min {}) and {} late days (min {})",
            counts.absent, rules.irregular_min_absent, counts.late, rules.irregular_min_late
        ),
        AttendanceFlag::StableAttendance => format!(
            "{} late and {} absent days are within limits",
            counts.late, counts.absent
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_flag".to_string(),
        rule_name: "Attendance Flag".to_string(),
        input: serde_json::json!({
            "employee_id": employee_id,
            "month": range.map(|(from, _)| from.to_string()),
            "late_count": counts.late,
            "absent_count": counts.absent
        }),
        output: serde_json::json!({
            "flag": flag.label()
        }),
        reasoning,
    };

    AttendanceFlagResult {
        flag,
        counts,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewStatus;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(
        employee_id: &str,
        day: NaiveDate,
        status: AttendanceStatus,
        review_status: ReviewStatus,
    ) -> AttendanceEntry {
        AttendanceEntry {
            id: format!("att_{}_{}", employee_id, day),
            employee_id: employee_id.to_string(),
            date: day,
            status,
            review_status,
            submitted_by: None,
            reviewed_by: None,
            reviewed_at: None,
        }
    }

    /// Builds approved entries on consecutive March days.
    fn approved_history(late: u32, absent: u32) -> Vec<AttendanceEntry> {
        let statuses = std::iter::repeat_n(AttendanceStatus::Late, late as usize)
            .chain(std::iter::repeat_n(AttendanceStatus::Absent, absent as usize));
        statuses
            .enumerate()
            .map(|(i, status)| {
                entry(
                    "emp_001",
                    date(2025, 3, 1 + i as u32),
                    status,
                    ReviewStatus::Approved,
                )
            })
            .collect()
    }

    fn flag_for(entries: &[AttendanceEntry], month: Option<NaiveDate>) -> AttendanceFlagResult {
        attendance_flag("emp_001", entries, month, &AttendanceRules::default(), 1)
    }

    #[test]
    fn test_five_late_days_is_frequently_late() {
        let result = flag_for(&approved_history(5, 0), None);
        assert_eq!(result.flag, AttendanceFlag::FrequentlyLate);
        assert_eq!(result.counts.late, 5);
    }

    #[test]
    fn test_four_late_days_is_not_frequently_late() {
        let result = flag_for(&approved_history(4, 0), None);
        assert_eq!(result.flag, AttendanceFlag::StableAttendance);
    }

    #[test]
    fn test_three_late_three_absent_is_irregular() {
        let result = flag_for(&approved_history(3, 3), None);
        assert_eq!(result.flag, AttendanceFlag::IrregularAttendance);
    }

    #[test]
    fn test_frequently_late_wins_over_irregular() {
        let result = flag_for(&approved_history(5, 3), None);
        assert_eq!(result.flag, AttendanceFlag::FrequentlyLate);
    }

    #[test]
    fn test_one_late_one_absent_is_stable() {
        let result = flag_for(&approved_history(1, 1), None);
        assert_eq!(result.flag, AttendanceFlag::StableAttendance);
    }

    #[test]
    fn test_many_absences_alone_are_stable() {
        let result = flag_for(&approved_history(2, 10), None);
        assert_eq!(result.flag, AttendanceFlag::StableAttendance);
    }

    #[test]
    fn test_pending_and_rejected_entries_are_ignored() {
        let mut entries = approved_history(1, 0);
        for day in 10..=16 {
            entries.push(entry(
                "emp_001",
                date(2025, 3, day),
                AttendanceStatus::Late,
                if day % 2 == 0 {
                    ReviewStatus::Pending
                } else {
                    ReviewStatus::Rejected
                },
            ));
        }

        let result = flag_for(&entries, None);
        assert_eq!(result.counts.late, 1);
        assert_eq!(result.flag, AttendanceFlag::StableAttendance);
    }

    #[test]
    fn test_other_employees_entries_are_ignored() {
        let entries: Vec<AttendanceEntry> = (1..=6)
            .map(|d| {
                entry(
                    "emp_002",
                    date(2025, 3, d),
                    AttendanceStatus::Late,
                    ReviewStatus::Approved,
                )
            })
            .collect();

        let result = flag_for(&entries, None);
        assert_eq!(result.counts, AttendanceCounts::default());
    }

    #[test]
    fn test_month_filter_excludes_neighbouring_months() {
        let mut entries = approved_history(3, 0);
        entries.push(entry(
            "emp_001",
            date(2025, 2, 28),
            AttendanceStatus::Late,
            ReviewStatus::Approved,
        ));
        entries.push(entry(
            "emp_001",
            date(2025, 4, 1),
            AttendanceStatus::Late,
            ReviewStatus::Approved,
        ));
        entries.push(entry(
            "emp_001",
            date(2025, 3, 31),
            AttendanceStatus::Late,
            ReviewStatus::Approved,
        ));

        let scoped = flag_for(&entries, Some(date(2025, 3, 15)));
        assert_eq!(scoped.counts.late, 4);
        assert_eq!(scoped.flag, AttendanceFlag::StableAttendance);

        let unscoped = flag_for(&entries, None);
        assert_eq!(unscoped.counts.late, 6);
        assert_eq!(unscoped.flag, AttendanceFlag::FrequentlyLate);
    }

    #[test]
    fn test_december_month_filter_rolls_into_next_year() {
        let entries = vec![
            entry(
                "emp_001",
                date(2025, 12, 31),
                AttendanceStatus::Absent,
                ReviewStatus::Approved,
            ),
            entry(
                "emp_001",
                date(2026, 1, 1),
                AttendanceStatus::Absent,
                ReviewStatus::Approved,
            ),
        ];

        let result = flag_for(&entries, Some(date(2025, 12, 1)));
        assert_eq!(result.counts.absent, 1);
    }

    #[test]
    fn test_custom_thresholds_change_classification() {
        let rules = AttendanceRules {
            frequently_late_above: 1,
            irregular_min_absent: 3,
            irregular_min_late: 3,
        };
        let result = attendance_flag("emp_001", &approved_history(2, 0), None, &rules, 1);
        assert_eq!(result.flag, AttendanceFlag::FrequentlyLate);
    }

    #[test]
    fn test_audit_step_records_counts_and_flag() {
        let result = flag_for(&approved_history(3, 3), Some(date(2025, 3, 9)));

        assert_eq!(result.audit_step.rule_id, "attendance_flag");
        assert_eq!(result.audit_step.input["late_count"], 3);
        assert_eq!(result.audit_step.input["absent_count"], 3);
        assert_eq!(result.audit_step.input["month"], "2025-03-01");
        assert_eq!(
            result.audit_step.output["flag"].as_str().unwrap(),
            "Irregular Attendance"
        );
    }

    #[test]
    fn test_flag_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&AttendanceFlag::StableAttendance).unwrap(),
            "\"Stable Attendance\""
        );
    }

    fn arb_status() -> impl Strategy<Value = AttendanceStatus> {
        prop_oneof![
            Just(AttendanceStatus::Present),
            Just(AttendanceStatus::Late),
            Just(AttendanceStatus::Absent),
        ]
    }

    proptest! {
        #[test]
        fn prop_unapproved_entries_never_change_the_flag(
            approved in proptest::collection::vec(arb_status(), 0..12),
            unapproved in proptest::collection::vec((arb_status(), any::<bool>()), 0..12),
        ) {
            let base: Vec<AttendanceEntry> = approved
                .iter()
                .enumerate()
                .map(|(i, s)| entry("emp_001", date(2025, 1, 1 + i as u32), *s, ReviewStatus::Approved))
                .collect();

            let mut noisy = base.clone();
            for (i, (s, pending)) in unapproved.iter().enumerate() {
                let review = if *pending { ReviewStatus::Pending } else { ReviewStatus::Rejected };
                noisy.push(entry("emp_001", date(2025, 2, 1 + i as u32), *s, review));
            }

            let clean = flag_for(&base, None);
            let with_noise = flag_for(&noisy, None);
            prop_assert_eq!(clean.flag, with_noise.flag);
            prop_assert_eq!(clean.counts, with_noise.counts);
        }
    }
}
