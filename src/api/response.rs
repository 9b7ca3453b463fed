//! Response types for the EMS engine API.
//!
//! This module defines the success envelope, the error response structures
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::SalaryDerivationResult;
use crate::error::EngineError;
use crate::models::{LeaveRequest, SalaryRecord};

use super::state::AppState;

/// Envelope wrapped around every successful result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineResponse<T> {
    /// Correlation ID, also present in the server logs.
    pub request_id: Uuid,
    /// When the result was produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// The policy code whose thresholds were applied.
    pub policy: String,
    /// Time spent in the rule, in microseconds.
    pub duration_us: u64,
    /// The rule output.
    pub result: T,
}

impl<T> EngineResponse<T> {
    /// Wraps a rule output for the given request.
    pub fn new(state: &AppState, request_id: Uuid, duration_us: u64, result: T) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            policy: state.config().policy().code.clone(),
            duration_us,
            result,
        }
    }
}

/// Result of `POST /leave/recommendation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRecommendationResponse {
    /// The request with `recommended_action` filled in, ready to persist.
    pub request: LeaveRequest,
    /// The evaluation behind the recommendation.
    pub evaluation: crate::calculation::LeaveRecommendationResult,
}

/// Result of `POST /salary/derive`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryDeriveResponse {
    /// The record with derived figures applied, ready to persist.
    pub record: SalaryRecord,
    /// The derivation details.
    pub derivation: SalaryDerivationResult,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                let body_text = err.body_text();
                if body_text.contains("missing field") {
                    ApiError::new("VALIDATION_ERROR", body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::InvalidLeaveRequest { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_LEAVE_REQUEST",
                    message,
                    "The leave request dates are inconsistent",
                ),
            },
            EngineError::InvalidSalaryRecord { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SALARY_RECORD",
                    message,
                    "The salary record contains invalid information",
                ),
            },
            EngineError::EmployeeMismatch { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "EMPLOYEE_MISMATCH",
                    message,
                    "The supplied employee does not own the record",
                ),
            },
            EngineError::AccessDenied { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("ACCESS_DENIED", message),
            },
        }
    }
}
