//! Audit records for rule applications.
//!
//! Every rule in [`crate::calculation`] reports what it looked at and what it
//! decided as an [`AuditStep`], so a reviewer can see why an employee was
//! flagged or a payslip was summarized the way it was.

use serde::{Deserialize, Serialize};

/// A single step in the audit trail recording a rule decision.
///
/// # Example
///
/// ```
/// use ems_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "attendance_flag".to_string(),
///     rule_name: "Attendance Flag".to_string(),
///     input: serde_json::json!({"late_count": 5, "absent_count": 0}),
///     output: serde_json::json!({"flag": "Frequently Late"}),
///     reasoning: "5 late days exceeds 4".to_string(),
/// };
/// assert_eq!(step.rule_id, "attendance_flag");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
