//! Error types for the EMS rule engine.
//!
//! The rule functions themselves are total; these errors come from the
//! surfaces around them: configuration loading, boundary validation of
//! incoming records, and role checks.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Role;

/// The main error type for the EMS rule engine.
///
/// # Example
///
/// ```
/// use ems_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rules.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the rules cannot work with.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A leave request had an inconsistent date range.
    #[error("Invalid leave request '{request_id}': end date {end_date} is before start date {start_date}")]
    InvalidLeaveRequest {
        /// The ID of the leave request.
        request_id: String,
        /// The requested start date.
        start_date: NaiveDate,
        /// The requested end date.
        end_date: NaiveDate,
    },

    /// A salary record was invalid.
    #[error("Invalid salary record '{record_id}': {message}")]
    InvalidSalaryRecord {
        /// The ID of the salary record.
        record_id: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A record was paired with the wrong employee.
    #[error("Record '{record_id}' belongs to employee '{expected}', not '{actual}'")]
    EmployeeMismatch {
        /// The ID of the record.
        record_id: String,
        /// The employee the record belongs to.
        expected: String,
        /// The employee that was supplied.
        actual: String,
    },

    /// The caller's role does not permit the operation.
    #[error("Access denied for role {role}: requires one of [{required}]")]
    AccessDenied {
        /// The caller's role.
        role: Role,
        /// The roles that would have been accepted.
        required: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
