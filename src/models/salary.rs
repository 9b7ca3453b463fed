//! Salary record model.
//!
//! A salary record holds one employee's base pay for one month together with
//! the figures derived from that month's attendance. Derivation itself lives
//! in [`crate::calculation::derive_salary`]; this module only carries the data
//! and the write-back step.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::month_start;
use crate::error::{EngineError, EngineResult};

/// Money amounts are stored with two decimal places.
pub const MONEY_SCALE: u32 = 2;

/// Largest storable money amount: ten digits at two decimal places
/// (99,999,999.99).
pub const MAX_MONEY: Decimal = Decimal::from_parts(0x540B_E3FF, 2, 0, false, MONEY_SCALE);

/// One employee's pay for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee being paid.
    pub employee_id: String,
    /// The pay month; normalized to the first day on derivation.
    pub month: NaiveDate,
    /// Contracted monthly pay before deductions.
    pub base_salary: Decimal,
    /// Pay after attendance deductions.
    #[serde(default)]
    pub final_salary: Decimal,
    /// Approved late days in the month.
    #[serde(default)]
    pub late_days: u32,
    /// Approved absent days in the month.
    #[serde(default)]
    pub absent_days: u32,
    /// Set when final pay moved sharply against the previous month.
    #[serde(default)]
    pub anomaly_flag: bool,
}

/// The figures computed for a salary record from attendance and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedSalary {
    /// First day of the pay month.
    pub month: NaiveDate,
    /// Approved late days in the month.
    pub late_days: u32,
    /// Approved absent days in the month.
    pub absent_days: u32,
    /// Pay after deductions, at two decimal places.
    pub final_salary: Decimal,
    /// Month-over-month swing flag.
    pub anomaly_flag: bool,
}

impl SalaryRecord {
    /// Checks the record is one the payroll rules can work with.
    ///
    /// Base and final salary must each lie in `0..=MAX_MONEY` and carry at
    /// most two decimal places.
    pub fn validate(&self) -> EngineResult<()> {
        self.check_amount("base salary", self.base_salary)?;
        self.check_amount("final salary", self.final_salary)
    }

    fn check_amount(&self, field: &str, amount: Decimal) -> EngineResult<()> {
        let problem = if amount < Decimal::ZERO {
            format!("{} {} is negative", field, amount)
        } else if amount > MAX_MONEY {
            format!("{} {} exceeds {}", field, amount, MAX_MONEY)
        } else if amount != amount.round_dp(MONEY_SCALE) {
            format!(
                "{} {} has more than {} decimal places",
                field, amount, MONEY_SCALE
            )
        } else {
            return Ok(());
        };
        Err(EngineError::InvalidSalaryRecord {
            record_id: self.id.clone(),
            message: problem,
        })
    }

    /// The pay month normalized to its first day.
    pub fn month_start(&self) -> NaiveDate {
        month_start(self.month)
    }

    /// Writes derived figures onto the record, ready for the caller to
    /// persist.
    pub fn apply_derived(&mut self, derived: &DerivedSalary) {
        self.month = derived.month;
        self.late_days = derived.late_days;
        self.absent_days = derived.absent_days;
        self.final_salary = derived.final_salary;
        self.anomaly_flag = derived.anomaly_flag;
    }
}
