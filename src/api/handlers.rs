//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_attendance_stats, compute_monthly_payroll, compute_salary_stats, latest_months,
    net_salary_stats,
};
use crate::models::{DEFAULT_EXPECTED_DAILY_HOURS, YearMonth};

use super::request::{AttendanceStatsRequest, PayrollRequest, SalaryStatsRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .route("/attendance-stats", post(attendance_stats_handler))
        .route("/salary-stats", post(salary_stats_handler))
        .with_state(state)
}

/// Turns a body extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn ok_json<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn parse_month(correlation_id: Uuid, raw: &str) -> Result<YearMonth, Response> {
    raw.parse::<YearMonth>().map_err(|err| {
        warn!(correlation_id = %correlation_id, month = %raw, "Rejected month");
        ApiErrorResponse::from(err).into_response()
    })
}

/// Handler for POST /payroll.
///
/// Uses the salary from the request when given, otherwise the technician's
/// configured salary.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let month = match parse_month(correlation_id, &request.month) {
        Ok(month) => month,
        Err(response) => return response,
    };

    let config = state.config();
    let salary = request
        .salary
        .as_ref()
        .or_else(|| config.salary_for(&request.technician_id));

    let start_time = Instant::now();
    match compute_monthly_payroll(
        &request.technician_id,
        salary,
        month,
        &request.records,
        config.rules(),
    ) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                technician_id = %result.technician_id,
                month = %result.month,
                records = request.records.len(),
                net_salary = %result.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll calculated"
            );
            ok_json(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                technician_id = %request.technician_id,
                invalid_input = err.is_invalid_input(),
                error = %err,
                "Payroll calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /attendance-stats.
async fn attendance_stats_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceStatsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance stats request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let month = match parse_month(correlation_id, &request.month) {
        Ok(month) => month,
        Err(response) => return response,
    };

    let config = state.config();
    let expected_daily_hours = request
        .expected_daily_hours
        .or_else(|| {
            request
                .technician_id
                .as_deref()
                .and_then(|id| config.salary_for(id))
                .map(|salary| salary.expected_daily_hours)
        })
        .unwrap_or(DEFAULT_EXPECTED_DAILY_HOURS);

    match compute_attendance_stats(
        &request.records,
        expected_daily_hours,
        month,
        config.rules(),
    ) {
        Ok(stats) => {
            info!(
                correlation_id = %correlation_id,
                month = %month,
                present_days = stats.present_days,
                absent_days = stats.absent_days,
                "Attendance stats calculated"
            );
            ok_json(stats)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                invalid_input = err.is_invalid_input(),
                error = %err,
                "Attendance stats failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /salary-stats.
async fn salary_stats_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryStatsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary stats request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if !request.results.is_empty() && !request.net_salaries.is_empty() {
        warn!(correlation_id = %correlation_id, "Both results and net_salaries supplied");
        return ApiErrorResponse::bad_request(ApiError::validation_error(
            "Supply either results or net_salaries, not both",
        ))
        .into_response();
    }

    let limit = request
        .limit
        .unwrap_or(state.config().rules().history_window_months);
    let stats = if request.results.is_empty() {
        let window = request.net_salaries.len().min(limit);
        net_salary_stats(&request.net_salaries[..window])
    } else {
        compute_salary_stats(&latest_months(&request.results, limit))
    };

    match stats {
        Ok(stats) => {
            info!(
                correlation_id = %correlation_id,
                months = stats.months,
                average = %stats.average,
                "Salary stats calculated"
            );
            ok_json(stats)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Salary stats failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
