//! Configuration types for the rule engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Defaults reproduce the
//! thresholds the rules were first written against.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Metadata about the loaded policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolicyMetadata {
    /// Short policy code (e.g., "ems-default").
    pub code: String,
    /// The human-readable name of the policy.
    pub name: String,
    /// The version or effective date of the policy.
    pub version: String,
}

impl Default for PolicyMetadata {
    fn default() -> Self {
        Self {
            code: "ems-default".to_string(),
            name: "Built-in attendance and payroll policy".to_string(),
            version: "builtin".to_string(),
        }
    }
}

/// Thresholds for classifying attendance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AttendanceRules {
    /// More late days than this marks an employee as frequently late.
    pub frequently_late_above: u32,
    /// Minimum absent days for irregular attendance.
    pub irregular_min_absent: u32,
    /// Minimum late days for irregular attendance.
    pub irregular_min_late: u32,
}

impl Default for AttendanceRules {
    fn default() -> Self {
        Self {
            frequently_late_above: 4,
            irregular_min_absent: 3,
            irregular_min_late: 3,
        }
    }
}

/// Thresholds for leave recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LeaveRules {
    /// Teammates that must stay un-overlapped for the team to count as
    /// available.
    pub min_available_teammates: u32,
}

impl Default for LeaveRules {
    fn default() -> Self {
        Self {
            min_available_teammates: 1,
        }
    }
}

/// Payroll constants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayrollRules {
    /// Fixed number of working days a month's base pay is divided by.
    ///
    /// This is a flat divisor, not the real count of working days in the
    /// month.
    pub daily_rate_divisor: Decimal,
    /// Share of a day's pay deducted for each late day.
    pub late_day_fraction: Decimal,
    /// Relative change in final pay above which a record is flagged.
    pub anomaly_threshold: Decimal,
    /// Deduction percentage at or above which deductions are significant.
    pub significant_deduction_rate: Decimal,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            daily_rate_divisor: Decimal::new(22, 0),
            late_day_fraction: Decimal::new(5, 1),
            anomaly_threshold: Decimal::new(30, 2),
            significant_deduction_rate: Decimal::new(20, 0),
        }
    }
}

/// The rule configuration loaded from rules.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Attendance classification thresholds.
    pub attendance: AttendanceRules,
    /// Leave recommendation thresholds.
    pub leave: LeaveRules,
    /// Payroll constants.
    pub payroll: PayrollRules,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_rules_match_builtin_constants() {
        let rules = RuleConfig::default();
        assert_eq!(rules.attendance.frequently_late_above, 4);
        assert_eq!(rules.attendance.irregular_min_absent, 3);
        assert_eq!(rules.attendance.irregular_min_late, 3);
        assert_eq!(rules.leave.min_available_teammates, 1);
        assert_eq!(rules.payroll.daily_rate_divisor, dec("22"));
        assert_eq!(rules.payroll.late_day_fraction, dec("0.5"));
        assert_eq!(rules.payroll.anomaly_threshold, dec("0.30"));
        assert_eq!(rules.payroll.significant_deduction_rate, dec("20"));
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = r#"
attendance:
  frequently_late_above: 6
payroll:
  daily_rate_divisor: "21"
"#;
        let rules: RuleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules.attendance.frequently_late_above, 6);
        assert_eq!(rules.attendance.irregular_min_late, 3);
        assert_eq!(rules.payroll.daily_rate_divisor, dec("21"));
        assert_eq!(rules.payroll.anomaly_threshold, dec("0.30"));
        assert_eq!(rules.leave, LeaveRules::default());
    }
}
