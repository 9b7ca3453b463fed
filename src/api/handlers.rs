//! HTTP request handlers for the EMS engine API.
//!
//! Each handler parses its body, checks the caller's role, runs one rule and
//! wraps the output in an [`EngineResponse`]. Nothing is persisted here.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::{HR_ONLY, MANAGER_OR_HR, authorize, authorize_payslip, authorize_self_or};
use crate::calculation::{
    AttendanceFlagResult, AttendanceUpdate, HrReport, LeaveDecisionResult, PayslipSummaryResult,
    attendance_flag, decide_leave, derive_salary, hr_report, leave_recommendation,
    payslip_summary, record_attendance, review_attendance,
};
use crate::error::EngineError;

use super::request::{
    AttendanceFlagRequest, HrReportRequest, LeaveDecisionRequest, LeaveRecommendationRequest,
    PayslipSummaryRequest, RecordAttendanceRequest, ReviewAttendanceRequest, SalaryDeriveRequest,
};
use super::response::{
    ApiErrorResponse, EngineResponse, LeaveRecommendationResponse, SalaryDeriveResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<Json<EngineResponse<T>>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/attendance/flag", post(attendance_flag_handler))
        .route("/attendance/record", post(record_attendance_handler))
        .route("/attendance/review", post(review_attendance_handler))
        .route("/leave/recommendation", post(leave_recommendation_handler))
        .route("/leave/decision", post(leave_decision_handler))
        .route("/salary/derive", post(salary_derive_handler))
        .route("/payslip/summary", post(payslip_summary_handler))
        .route("/reports/hr", post(hr_report_handler))
        .with_state(state)
}

/// Logs a failed request and converts the failure into an error response.
fn reject(
    correlation_id: Uuid,
    route: &'static str,
    error: impl Into<ApiErrorResponse>,
) -> ApiErrorResponse {
    let response = error.into();
    warn!(
        correlation_id = %correlation_id,
        route,
        status = response.status.as_u16(),
        code = %response.error.code,
        error = %response.error.message,
        "Request rejected"
    );
    response
}

fn elapsed_us(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "engine_version": env!("CARGO_PKG_VERSION"),
        "policy": state.config().policy().code,
        "policy_version": state.config().policy().version
    }))
}

/// Handler for POST /attendance/flag.
///
/// HR and managers may classify anyone; employees only themselves.
async fn attendance_flag_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceFlagRequest>, JsonRejection>,
) -> ApiResult<AttendanceFlagResult> {
    const ROUTE: &str = "/attendance/flag";
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|e| reject(correlation_id, ROUTE, e))?;

    info!(
        correlation_id = %correlation_id,
        caller = %request.caller.id,
        employee_id = %request.employee_id,
        entries = request.attendance.len(),
        "Processing attendance flag request"
    );
    authorize_self_or(&request.caller, &request.employee_id, HR_ONLY)
        .map_err(|e| reject(correlation_id, ROUTE, e))?;

    let start = Instant::now();
    let result = attendance_flag(
        &request.employee_id,
        &request.attendance,
        request.month,
        &state.rules().attendance,
        1,
    );
    let duration_us = elapsed_us(start);

    info!(
        correlation_id = %correlation_id,
        flag = %result.flag,
        late = result.counts.late,
        absent = result.counts.absent,
        duration_us,
        "Attendance flag computed"
    );
    Ok(Json(EngineResponse::new(
        &state,
        correlation_id,
        duration_us,
        result,
    )))
}

/// Handler for POST /attendance/record.
async fn record_attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordAttendanceRequest>, JsonRejection>,
) -> ApiResult<AttendanceUpdate> {
    const ROUTE: &str = "/attendance/record";
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|e| reject(correlation_id, ROUTE, e))?;

    info!(
        correlation_id = %correlation_id,
        caller = %request.caller.id,
        employee_id = %request.submission.employee_id,
        date = %request.submission.date,
        "Processing attendance record request"
    );
    authorize(&request.caller, MANAGER_OR_HR).map_err(|e| reject(correlation_id, ROUTE, e))?;

    let start = Instant::now();
    let result = record_attendance(
        &request.existing,
        &request.submission,
        &request.caller.id,
        Utc::now(),
        1,
    );
    let duration_us = elapsed_us(start);

    info!(
        correlation_id = %correlation_id,
        entry_id = %result.entry.id,
        created = result.created,
        duration_us,
        "Attendance recorded"
    );
    Ok(Json(EngineResponse::new(
        &state,
        correlation_id,
        duration_us,
        result,
    )))
}

/// Handler for POST /attendance/review.
async fn review_attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReviewAttendanceRequest>, JsonRejection>,
) -> ApiResult<AttendanceUpdate> {
    const ROUTE: &str = "/attendance/review";
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|e| reject(correlation_id, ROUTE, e))?;

    info!(
        correlation_id = %correlation_id,
        caller = %request.caller.id,
        entry_id = %request.entry.id,
        "Processing attendance review request"
    );
    authorize(&request.caller, HR_ONLY).map_err(|e| reject(correlation_id, ROUTE, e))?;

    let start = Instant::now();
    let result = review_attendance(
        &request.entry,
        request.action,
        &request.caller.id,
        Utc::now(),
        1,
    );
    let duration_us = elapsed_us(start);

    info!(
        correlation_id = %correlation_id,
        review_status = ?result.entry.review_status,
        duration_us,
        "Attendance reviewed"
    );
    Ok(Json(EngineResponse::new(
        &state,
        correlation_id,
        duration_us,
        result,
    )))
}

/// Handler for POST /leave/recommendation.
///
/// Employees may evaluate their own requests; HR and managers anyone's.
async fn leave_recommendation_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRecommendationRequest>, JsonRejection>,
) -> ApiResult<LeaveRecommendationResponse> {
    const ROUTE: &str = "/leave/recommendation";
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|e| reject(correlation_id, ROUTE, e))?;

    info!(
        correlation_id = %correlation_id,
        caller = %request.caller.id,
        request_id = %request.request.id,
        "Processing leave recommendation request"
    );
    authorize_self_or(&request.caller, &request.request.employee_id, MANAGER_OR_HR)
        .map_err(|e| reject(correlation_id, ROUTE, e))?;
    request
        .request
        .validate()
        .map_err(|e| reject(correlation_id, ROUTE, e))?;
    if request.request.employee_id != request.employee.id {
        return Err(reject(
            correlation_id,
            ROUTE,
            EngineError::EmployeeMismatch {
                record_id: request.request.id.clone(),
                expected: request.request.employee_id.clone(),
                actual: request.employee.id.clone(),
            },
        ));
    }
    let start = Instant::now();
    let evaluation = leave_recommendation(
        &request.request,
        &request.employee,
        &request.employees,
        &request.leaves,
        &state.rules().leave,
        1,
    );
    let mut updated = request.request;
    updated.recommended_action = Some(evaluation.recommendation);
    let duration_us = elapsed_us(start);

    info!(
        correlation_id = %correlation_id,
        recommendation = %evaluation.recommendation,
        team_available = evaluation.team.available,
        duration_us,
        "Leave recommendation computed"
    );
    Ok(Json(EngineResponse::new(
        &state,
        correlation_id,
        duration_us,
        LeaveRecommendationResponse {
            request: updated,
            evaluation,
        },
    )))
}

/// Handler for POST /leave/decision.
async fn leave_decision_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveDecisionRequest>, JsonRejection>,
) -> ApiResult<LeaveDecisionResult> {
    const ROUTE: &str = "/leave/decision";
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|e| reject(correlation_id, ROUTE, e))?;

    info!(
        correlation_id = %correlation_id,
        caller = %request.caller.id,
        request_id = %request.request.id,
        action = ?request.action,
        "Processing leave decision request"
    );
    authorize(&request.caller, MANAGER_OR_HR).map_err(|e| reject(correlation_id, ROUTE, e))?;

    let start = Instant::now();
    let result = decide_leave(
        &request.request,
        &request.employee,
        request.action,
        &request.caller.id,
        1,
    )
    .map_err(|e| reject(correlation_id, ROUTE, e))?;
    let duration_us = elapsed_us(start);

    info!(
        correlation_id = %correlation_id,
        days_deducted = result.days_deducted,
        leave_balance = result.employee.leave_balance,
        duration_us,
        "Leave decided"
    );
    Ok(Json(EngineResponse::new(
        &state,
        correlation_id,
        duration_us,
        result,
    )))
}

/// Handler for POST /salary/derive.
async fn salary_derive_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryDeriveRequest>, JsonRejection>,
) -> ApiResult<SalaryDeriveResponse> {
    const ROUTE: &str = "/salary/derive";
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|e| reject(correlation_id, ROUTE, e))?;

    info!(
        correlation_id = %correlation_id,
        caller = %request.caller.id,
        record_id = %request.record.id,
        employee_id = %request.record.employee_id,
        "Processing salary derivation request"
    );
    authorize(&request.caller, HR_ONLY).map_err(|e| reject(correlation_id, ROUTE, e))?;
    request
        .record
        .validate()
        .map_err(|e| reject(correlation_id, ROUTE, e))?;
    for previous in &request.history {
        previous
            .validate()
            .map_err(|e| reject(correlation_id, ROUTE, e))?;
    }

    let start = Instant::now();
    let derivation = derive_salary(
        &request.record,
        &request.attendance,
        &request.history,
        &state.rules().payroll,
        1,
    );
    let mut record = request.record;
    record.apply_derived(&derivation.derived);
    let duration_us = elapsed_us(start);

    if record.anomaly_flag {
        warn!(
            correlation_id = %correlation_id,
            record_id = %record.id,
            final_salary = %record.final_salary,
            "Salary anomaly detected"
        );
    }
    info!(
        correlation_id = %correlation_id,
        final_salary = %record.final_salary,
        late_days = record.late_days,
        absent_days = record.absent_days,
        duration_us,
        "Salary derived"
    );
    Ok(Json(EngineResponse::new(
        &state,
        correlation_id,
        duration_us,
        SalaryDeriveResponse { record, derivation },
    )))
}

/// Handler for POST /payslip/summary.
async fn payslip_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipSummaryRequest>, JsonRejection>,
) -> ApiResult<PayslipSummaryResult> {
    const ROUTE: &str = "/payslip/summary";
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|e| reject(correlation_id, ROUTE, e))?;

    info!(
        correlation_id = %correlation_id,
        caller = %request.caller.id,
        record_id = %request.record.id,
        "Processing payslip summary request"
    );
    authorize_payslip(&request.caller, &request.record)
        .map_err(|e| reject(correlation_id, ROUTE, e))?;
    request
        .record
        .validate()
        .map_err(|e| reject(correlation_id, ROUTE, e))?;

    let start = Instant::now();
    let result = payslip_summary(&request.record, &state.rules().payroll, 1);
    let duration_us = elapsed_us(start);

    info!(
        correlation_id = %correlation_id,
        deduction = %result.summary.deduction,
        warnings = result.summary.warnings.len(),
        duration_us,
        "Payslip summarized"
    );
    Ok(Json(EngineResponse::new(
        &state,
        correlation_id,
        duration_us,
        result,
    )))
}

/// Handler for POST /reports/hr.
async fn hr_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<HrReportRequest>, JsonRejection>,
) -> ApiResult<HrReport> {
    const ROUTE: &str = "/reports/hr";
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|e| reject(correlation_id, ROUTE, e))?;

    info!(
        correlation_id = %correlation_id,
        caller = %request.caller.id,
        employees = request.employees.len(),
        "Processing HR report request"
    );
    authorize(&request.caller, HR_ONLY).map_err(|e| reject(correlation_id, ROUTE, e))?;

    let start = Instant::now();
    let result = hr_report(
        &request.employees,
        &request.attendance,
        &request.leaves,
        &request.salaries,
        &state.rules().attendance,
    );
    let duration_us = elapsed_us(start);

    info!(
        correlation_id = %correlation_id,
        rows = result.rows.len(),
        pending_leaves = result.pending_leaves,
        salary_anomalies = result.salary_anomalies,
        duration_us,
        "HR report built"
    );
    Ok(Json(EngineResponse::new(
        &state,
        correlation_id,
        duration_us,
        result,
    )))
}
