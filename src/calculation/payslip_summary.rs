//! Payslip summary.
//!
//! Turns a derived salary record into the plain-language headline, insights
//! and warnings shown next to a payslip.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PayrollRules;
use crate::models::{AuditStep, SalaryRecord};

use super::salary_derivation::round_money;

/// Headline when nothing was deducted.
pub const HEADLINE_FULL_PAYOUT: &str = "Full payout expected for this month.";
/// Headline when deductions reach the significant rate.
pub const HEADLINE_SIGNIFICANT: &str = "Significant deductions detected this month.";
/// Headline for smaller deductions.
pub const HEADLINE_MINOR: &str = "Minor deductions applied to this month.";

/// A readable summary of a salary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipSummary {
    /// One-line verdict on the month.
    pub headline: String,
    /// Observations about attendance, in display order.
    pub insights: Vec<String>,
    /// Items needing attention, in display order.
    pub warnings: Vec<String>,
    /// Base pay minus final pay, floored at zero.
    pub deduction: Decimal,
    /// Deduction as a percentage of base pay.
    pub deduction_rate: Decimal,
}

/// The result of summarizing a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipSummaryResult {
    /// The summary for display.
    pub summary: PayslipSummary,
    /// The audit step recording this summary.
    pub audit_step: AuditStep,
}

/// Summarizes a salary record whose final pay has already been derived.
///
/// # Examples
///
/// ```
/// use ems_engine::calculation::payslip_summary;
/// use ems_engine::config::PayrollRules;
/// use ems_engine::models::SalaryRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = SalaryRecord {
///     id: "sal_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     month: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     base_salary: Decimal::from_str("1000.00").unwrap(),
///     final_salary: Decimal::from_str("750.00").unwrap(),
///     late_days: 0,
///     absent_days: 0,
///     anomaly_flag: false,
/// };
///
/// let result = payslip_summary(&record, &PayrollRules::default(), 1);
/// assert_eq!(result.summary.headline, "Significant deductions detected this month.");
/// assert_eq!(
///     result.summary.warnings,
///     vec!["Deduction total: 250.00 (25.0% of base pay).".to_string()]
/// );
/// ```
pub fn payslip_summary(
    record: &SalaryRecord,
    rules: &PayrollRules,
    step_number: u32,
) -> PayslipSummaryResult {
    let base = record.base_salary;
    let deduction = (base - record.final_salary).max(Decimal::ZERO);
    let deduction_rate = if base > Decimal::ZERO {
        deduction / base * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let mut insights = Vec::new();
    let mut warnings = Vec::new();

    let headline = if deduction.is_zero() {
        insights.push("No attendance deductions were applied.".to_string());
        HEADLINE_FULL_PAYOUT
    } else if deduction_rate >= rules.significant_deduction_rate {
        HEADLINE_SIGNIFICANT
    } else {
        HEADLINE_MINOR
    };

    if record.absent_days > 0 {
        insights.push(format!("{} day(s) marked absent.", record.absent_days));
    }
    if record.late_days > 0 {
        insights.push(format!("{} day(s) marked late.", record.late_days));
    }
    if insights.is_empty() {
        insights.push("Attendance signals are stable for this period.".to_string());
    }

    if record.anomaly_flag {
        warnings.push(format!(
            "Salary changed by more than {}% compared to last month.",
            (rules.anomaly_threshold * Decimal::ONE_HUNDRED).normalize()
        ));
    }
    if deduction > Decimal::ZERO {
        warnings.push(format!(
            "Deduction total: {:.2} ({:.1}% of base pay).",
            round_money(deduction),
            deduction_rate.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
        ));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "payslip_summary".to_string(),
        rule_name: "Payslip Summary".to_string(),
        input: serde_json::json!({
            "record_id": record.id,
            "base_salary": base.to_string(),
            "final_salary": record.final_salary.to_string(),
            "late_days": record.late_days,
            "absent_days": record.absent_days,
            "anomaly_flag": record.anomaly_flag
        }),
        output: serde_json::json!({
            "headline": headline,
            "deduction": round_money(deduction).to_string(),
            "deduction_rate": deduction_rate.round_dp(1).to_string(),
            "warning_count": warnings.len()
        }),
        reasoning: format!(
            "${} - ${} = ${} deducted ({}% of base)",
            base,
            record.final_salary,
            round_money(deduction),
            deduction_rate.round_dp(1)
        ),
    };

    PayslipSummaryResult {
        summary: PayslipSummary {
            headline: headline.to_string(),
            insights,
            warnings,
            deduction,
            deduction_rate,
        },
        audit_step,
    }
}
