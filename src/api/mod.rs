//! HTTP API module for the EMS rule engine.
//!
//! A stateless JSON boundary: callers post the records a rule needs along
//! with their identity, and receive the rule's output to display or persist.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceFlagRequest, HrReportRequest, LeaveDecisionRequest, LeaveRecommendationRequest,
    PayslipSummaryRequest, RecordAttendanceRequest, ReviewAttendanceRequest, SalaryDeriveRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, EngineResponse, LeaveRecommendationResponse, SalaryDeriveResponse,
};
pub use state::AppState;
