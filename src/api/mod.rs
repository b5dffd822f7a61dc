//! HTTP API module for the payroll engine.
//!
//! This module exposes payroll, attendance statistics, and salary history
//! statistics as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AttendanceStatsRequest, PayrollRequest, SalaryStatsRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
