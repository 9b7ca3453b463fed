//! Salary derivation.
//!
//! This module computes the attendance-driven figures of a salary record:
//! late and absent day counts, final pay after deductions, and the
//! month-over-month anomaly flag. It never writes anything; callers apply the
//! returned [`DerivedSalary`] with [`SalaryRecord::apply_derived`] and persist
//! the record themselves.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PayrollRules;
use crate::models::{AttendanceEntry, AuditStep, DerivedSalary, MONEY_SCALE, SalaryRecord};

use super::attendance_flag::count_approved;
use super::month::{month_end, month_start, next_month_start};

/// Rounds a money amount to two decimal places, ties to even.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Pay for one day, or zero when there is no base salary.
pub fn daily_rate(base_salary: Decimal, rules: &PayrollRules) -> Decimal {
    if base_salary > Decimal::ZERO {
        base_salary / rules.daily_rate_divisor
    } else {
        Decimal::ZERO
    }
}

/// Returns the most recent record for the same employee from an earlier month.
pub fn previous_salary_record<'a>(
    record: &SalaryRecord,
    history: &'a [SalaryRecord],
) -> Option<&'a SalaryRecord> {
    let month = record.month_start();
    history
        .iter()
        .filter(|other| other.employee_id == record.employee_id && other.month_start() < month)
        .max_by_key(|other| other.month_start())
}

/// Decides whether `final_salary` moved too far from the previous month.
///
/// Returns the relative change alongside the flag. Without a previous month,
/// or when the previous final pay was zero, there is no ratio and no anomaly.
pub fn detect_anomaly(
    final_salary: Decimal,
    previous_final: Option<Decimal>,
    rules: &PayrollRules,
) -> (bool, Option<Decimal>) {
    match previous_final {
        Some(previous) if previous > Decimal::ZERO => {
            let ratio = (final_salary - previous).abs() / previous;
            (ratio > rules.anomaly_threshold, Some(ratio))
        }
        _ => (false, None),
    }
}

/// The result of deriving a salary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryDerivationResult {
    /// The figures to write back onto the record.
    pub derived: DerivedSalary,
    /// Pay for a single day.
    pub daily_rate: Decimal,
    /// Total attendance deduction before flooring at zero pay.
    pub deduction: Decimal,
    /// Final pay of the previous month, if any.
    pub previous_final_salary: Option<Decimal>,
    /// Relative change against the previous month, if computable.
    pub change_ratio: Option<Decimal>,
    /// Audit steps for the deduction and anomaly rules.
    pub audit_steps: Vec<AuditStep>,
}

/// Derives late/absent counts, final pay and the anomaly flag for a record.
///
/// Only approved attendance within the record's calendar month counts. Each
/// absent day costs a full day's pay and each late day costs
/// `late_day_fraction` of a day, where a day is base pay divided by the
/// fixed `daily_rate_divisor`. Final pay never drops below zero and is
/// rounded to cents; the anomaly check sees the figure before rounding.
///
/// # Arguments
///
/// * `record` - The salary record; its month may be any day of the month
/// * `attendance` - Attendance entries loaded by the caller
/// * `history` - Other salary records, used to find the previous month
/// * `rules` - Payroll constants
/// * `step_number` - The first step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use ems_engine::calculation::derive_salary;
/// use ems_engine::config::PayrollRules;
/// use ems_engine::models::SalaryRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = SalaryRecord {
///     id: "sal_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     month: NaiveDate::from_ymd_opt(2025, 3, 18).unwrap(),
///     base_salary: Decimal::from_str("2200.00").unwrap(),
///     final_salary: Decimal::ZERO,
///     late_days: 0,
///     absent_days: 0,
///     anomaly_flag: false,
/// };
///
/// let result = derive_salary(&record, &[], &[], &PayrollRules::default(), 1);
/// assert_eq!(result.derived.final_salary, Decimal::from_str("2200.00").unwrap());
/// assert_eq!(result.derived.month, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
/// ```
pub fn derive_salary(
    record: &SalaryRecord,
    attendance: &[AttendanceEntry],
    history: &[SalaryRecord],
    rules: &PayrollRules,
    step_number: u32,
) -> SalaryDerivationResult {
    let month = month_start(record.month);
    let counts = count_approved(
        &record.employee_id,
        attendance,
        Some((month, next_month_start(month))),
    );

    let base = record.base_salary;
    let rate = daily_rate(base, rules);
    let deduction = rate * Decimal::from(counts.absent)
        + rate * rules.late_day_fraction * Decimal::from(counts.late);
    let unrounded_final = (base - deduction).max(Decimal::ZERO);
    let final_salary = round_money(unrounded_final);

    let deduction_step = AuditStep {
        step_number,
        rule_id: "salary_deduction".to_string(),
        rule_name: "Attendance Salary Deduction".to_string(),
        input: serde_json::json!({
            "record_id": record.id,
            "employee_id": record.employee_id,
            "month_start": month.to_string(),
            "month_end": month_end(month).to_string(),
            "base_salary": base.to_string(),
            "late_days": counts.late,
            "absent_days": counts.absent
        }),
        output: serde_json::json!({
            "daily_rate": round_money(rate).to_string(),
            "deduction": round_money(deduction).to_string(),
            "final_salary": final_salary.to_string()
        }),
        reasoning: format!(
            "${} / {} = ${} per day; {} absent x 1 + {} late x {} = ${} deducted; final ${}",
            base,
            rules.daily_rate_divisor.normalize(),
            round_money(rate),
            counts.absent,
            counts.late,
            rules.late_day_fraction.normalize(),
            round_money(deduction),
            final_salary
        ),
    };

    let previous = previous_salary_record(record, history);
    let previous_final_salary = previous.map(|p| p.final_salary);
    // Compared before rounding; only the stored figure is cut to cents.
    let (anomaly_flag, change_ratio) =
        detect_anomaly(unrounded_final, previous_final_salary, rules);

    let anomaly_reasoning = match (previous, change_ratio) {
        (Some(prev), Some(ratio)) => format!(
            "Final ${} vs ${} in {}: change of {}% {} threshold of {}%",
            final_salary,
            prev.final_salary,
            prev.month_start(),
            (ratio * Decimal::ONE_HUNDRED).round_dp(1),
            if anomaly_flag { "exceeds" } else { "within" },
            (rules.anomaly_threshold * Decimal::ONE_HUNDRED).normalize()
        ),
        (Some(prev), None) => format!(
            "Previous final salary in {} is zero; no comparison made",
            prev.month_start()
        ),
        _ => "No earlier salary record; no comparison made".to_string(),
    };

    let anomaly_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "salary_anomaly".to_string(),
        rule_name: "Salary Anomaly Detection".to_string(),
        input: serde_json::json!({
            "final_salary": final_salary.to_string(),
            "previous_final_salary": previous_final_salary.map(|p| p.to_string()),
            "threshold": rules.anomaly_threshold.to_string()
        }),
        output: serde_json::json!({
            "anomaly_flag": anomaly_flag,
            "change_ratio": change_ratio.map(|r| r.round_dp(4).to_string())
        }),
        reasoning: anomaly_reasoning,
    };

    SalaryDerivationResult {
        derived: DerivedSalary {
            month,
            late_days: counts.late,
            absent_days: counts.absent,
            final_salary,
            anomaly_flag,
        },
        daily_rate: rate,
        deduction,
        previous_final_salary,
        change_ratio,
        audit_steps: vec![deduction_step, anomaly_step],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, ReviewStatus};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, month: NaiveDate, base: &str, final_salary: &str) -> SalaryRecord {
        SalaryRecord {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            month,
            base_salary: dec(base),
            final_salary: dec(final_salary),
            late_days: 0,
            absent_days: 0,
            anomaly_flag: false,
        }
    }

    fn entry(day: NaiveDate, status: AttendanceStatus, review: ReviewStatus) -> AttendanceEntry {
        AttendanceEntry {
            id: format!("att_{}", day),
            employee_id: "emp_001".to_string(),
            date: day,
            status,
            review_status: review,
            submitted_by: None,
            reviewed_by: None,
            reviewed_at: None,
        }
    }

    fn rules() -> PayrollRules {
        PayrollRules::default()
    }

    #[test]
    fn test_no_attendance_pays_full_base() {
        let rec = record("sal_001", date(2025, 3, 1), "2200.00", "0");
        let result = derive_salary(&rec, &[], &[], &rules(), 1);
        assert_eq!(result.derived.final_salary, dec("2200.00"));
        assert_eq!(result.derived.late_days, 0);
        assert_eq!(result.derived.absent_days, 0);
        assert!(!result.derived.anomaly_flag);
    }

    #[test]
    fn test_absent_and_late_days_are_deducted() {
        // 2200 / 22 = 100 per day; 2 absent = 200, 3 late = 150
        let rec = record("sal_001", date(2025, 3, 1), "2200.00", "0");
        let attendance = vec![
            entry(date(2025, 3, 3), AttendanceStatus::Absent, ReviewStatus::Approved),
            entry(date(2025, 3, 4), AttendanceStatus::Absent, ReviewStatus::Approved),
            entry(date(2025, 3, 5), AttendanceStatus::Late, ReviewStatus::Approved),
            entry(date(2025, 3, 6), AttendanceStatus::Late, ReviewStatus::Approved),
            entry(date(2025, 3, 7), AttendanceStatus::Late, ReviewStatus::Approved),
            entry(date(2025, 3, 10), AttendanceStatus::Present, ReviewStatus::Approved),
        ];

        let result = derive_salary(&rec, &attendance, &[], &rules(), 1);
        assert_eq!(result.daily_rate, dec("100"));
        assert_eq!(result.deduction, dec("350"));
        assert_eq!(result.derived.final_salary, dec("1850.00"));
        assert_eq!(result.derived.absent_days, 2);
        assert_eq!(result.derived.late_days, 3);
    }

    #[test]
    fn test_final_salary_is_rounded_to_cents() {
        // 1000 / 22 = 45.4545...; one absence leaves 954.545454...
        let rec = record("sal_001", date(2025, 3, 1), "1000.00", "0");
        let attendance = vec![entry(
            date(2025, 3, 3),
            AttendanceStatus::Absent,
            ReviewStatus::Approved,
        )];

        let result = derive_salary(&rec, &attendance, &[], &rules(), 1);
        assert_eq!(result.derived.final_salary, dec("954.55"));
        assert_eq!(result.derived.final_salary.scale(), 2);
    }

    #[test]
    fn test_unapproved_and_out_of_month_attendance_is_ignored() {
        let rec = record("sal_001", date(2025, 3, 1), "2200.00", "0");
        let attendance = vec![
            entry(date(2025, 3, 3), AttendanceStatus::Absent, ReviewStatus::Pending),
            entry(date(2025, 3, 4), AttendanceStatus::Absent, ReviewStatus::Rejected),
            entry(date(2025, 2, 28), AttendanceStatus::Absent, ReviewStatus::Approved),
            entry(date(2025, 4, 1), AttendanceStatus::Late, ReviewStatus::Approved),
            entry(date(2025, 3, 31), AttendanceStatus::Late, ReviewStatus::Approved),
        ];

        let result = derive_salary(&rec, &attendance, &[], &rules(), 1);
        assert_eq!(result.derived.absent_days, 0);
        assert_eq!(result.derived.late_days, 1);
        assert_eq!(result.derived.final_salary, dec("2150.00"));
    }

    #[test]
    fn test_month_is_normalized_to_first_day() {
        let rec = record("sal_001", date(2025, 3, 19), "2200.00", "0");
        let result = derive_salary(&rec, &[], &[], &rules(), 1);
        assert_eq!(result.derived.month, date(2025, 3, 1));
    }

    #[test]
    fn test_final_salary_never_goes_negative() {
        let rec = record("sal_001", date(2025, 3, 1), "220.00", "0");
        let attendance: Vec<AttendanceEntry> = (1..=25)
            .map(|d| entry(date(2025, 3, d), AttendanceStatus::Absent, ReviewStatus::Approved))
            .collect();

        let result = derive_salary(&rec, &attendance, &[], &rules(), 1);
        assert_eq!(result.derived.final_salary, Decimal::ZERO);
        assert!(result.deduction > dec("220"));
    }

    #[test]
    fn test_zero_base_salary_has_zero_daily_rate() {
        let rec = record("sal_001", date(2025, 3, 1), "0.00", "0");
        let attendance = vec![entry(
            date(2025, 3, 3),
            AttendanceStatus::Absent,
            ReviewStatus::Approved,
        )];

        let result = derive_salary(&rec, &attendance, &[], &rules(), 1);
        assert_eq!(result.daily_rate, Decimal::ZERO);
        assert_eq!(result.derived.final_salary, Decimal::ZERO);
    }

    #[test]
    fn test_drop_of_forty_percent_is_anomalous() {
        let previous = record("sal_feb", date(2025, 2, 1), "1000.00", "1000.00");
        let (flag, ratio) = detect_anomaly(dec("600.00"), Some(previous.final_salary), &rules());
        assert!(flag);
        assert_eq!(ratio, Some(dec("0.4")));
    }

    #[test]
    fn test_drop_of_twenty_five_percent_is_not_anomalous() {
        let (flag, ratio) = detect_anomaly(dec("750.00"), Some(dec("1000.00")), &rules());
        assert!(!flag);
        assert_eq!(ratio, Some(dec("0.25")));
    }

    #[test]
    fn test_exactly_thirty_percent_is_not_anomalous() {
        let (flag, _) = detect_anomaly(dec("1300.00"), Some(dec("1000.00")), &rules());
        assert!(!flag);
    }

    #[test]
    fn test_anomaly_uses_final_salary_before_rounding() {
        // 733.33 - 733.33 / 22 = 699.9968..., stored as 700.00
        let history = vec![record("sal_feb", date(2025, 2, 1), "1000.00", "1000.00")];
        let rec = record("sal_mar", date(2025, 3, 1), "733.33", "0");
        let attendance = vec![entry(
            date(2025, 3, 4),
            AttendanceStatus::Absent,
            ReviewStatus::Approved,
        )];

        let result = derive_salary(&rec, &attendance, &history, &rules(), 1);
        assert_eq!(result.derived.final_salary, dec("700.00"));
        assert!(result.derived.anomaly_flag);
        assert!(result.change_ratio.unwrap() > dec("0.30"));
    }

    #[test]
    fn test_zero_previous_final_is_not_anomalous() {
        let (flag, ratio) = detect_anomaly(dec("1000.00"), Some(Decimal::ZERO), &rules());
        assert!(!flag);
        assert_eq!(ratio, None);
    }

    #[test]
    fn test_anomaly_compares_with_most_recent_earlier_month() {
        let history = vec![
            record("sal_jan", date(2025, 1, 1), "1000.00", "400.00"),
            record("sal_feb", date(2025, 2, 1), "1000.00", "1000.00"),
            record("sal_apr", date(2025, 4, 1), "1000.00", "100.00"),
        ];
        let rec = record("sal_mar", date(2025, 3, 1), "600.00", "0");

        let result = derive_salary(&rec, &[], &history, &rules(), 1);
        assert_eq!(result.previous_final_salary, Some(dec("1000.00")));
        assert!(result.derived.anomaly_flag);
    }

    #[test]
    fn test_other_employees_history_is_ignored() {
        let mut other = record("sal_other", date(2025, 2, 1), "5000.00", "5000.00");
        other.employee_id = "emp_002".to_string();
        let rec = record("sal_mar", date(2025, 3, 1), "1000.00", "0");

        let result = derive_salary(&rec, &[], &[other], &rules(), 1);
        assert_eq!(result.previous_final_salary, None);
        assert!(!result.derived.anomaly_flag);
    }

    #[test]
    fn test_rederiving_with_same_inputs_is_identical() {
        let history = vec![record("sal_feb", date(2025, 2, 1), "1000.00", "1000.00")];
        let attendance = vec![entry(
            date(2025, 3, 3),
            AttendanceStatus::Late,
            ReviewStatus::Approved,
        )];
        let mut rec = record("sal_mar", date(2025, 3, 14), "1000.00", "0");

        let first = derive_salary(&rec, &attendance, &history, &rules(), 1);
        rec.apply_derived(&first.derived);
        let second = derive_salary(&rec, &attendance, &history, &rules(), 1);

        assert_eq!(first.derived, second.derived);
    }

    #[test]
    fn test_audit_steps_are_sequenced() {
        let rec = record("sal_001", date(2025, 3, 1), "2200.00", "0");
        let result = derive_salary(&rec, &[], &[], &rules(), 4);
        assert_eq!(result.audit_steps.len(), 2);
        assert_eq!(result.audit_steps[0].step_number, 4);
        assert_eq!(result.audit_steps[0].rule_id, "salary_deduction");
        assert_eq!(result.audit_steps[1].step_number, 5);
        assert_eq!(result.audit_steps[1].rule_id, "salary_anomaly");
        assert!(
            result.audit_steps[1]
                .reasoning
                .contains("No earlier salary record")
        );
    }
}
