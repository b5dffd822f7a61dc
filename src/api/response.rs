//! Response types for the payroll engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::NotConfigured { technician_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "SALARY_NOT_CONFIGURED",
                    message,
                    format!(
                        "Configure a salary for '{}' or pass one in the request",
                        technician_id
                    ),
                ),
            },
            EngineError::InvalidMonth { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_MONTH", message))
            }
            EngineError::InvalidSalaryConfig { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_SALARY_CONFIG", message))
            }
            EngineError::InvalidAttendance { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_ATTENDANCE", message))
            }
            EngineError::DuplicateAttendance { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("DUPLICATE_ATTENDANCE", message))
            }
            EngineError::AmountOutOfRange { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("AMOUNT_OUT_OF_RANGE", message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_not_configured_is_404() {
        let api_error: ApiErrorResponse = EngineError::NotConfigured {
            technician_id: "tech_404".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "SALARY_NOT_CONFIGURED");
        assert!(api_error.error.details.unwrap().contains("tech_404"));
    }

    #[test]
    fn test_invalid_input_is_400() {
        let errors = [
            EngineError::InvalidMonth {
                value: "2024-13".to_string(),
            },
            EngineError::DuplicateAttendance {
                date: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            },
            EngineError::AmountOutOfRange {
                context: "salary history total".to_string(),
            },
        ];
        for error in errors {
            let api_error: ApiErrorResponse = error.into();
            assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_config_error_is_500() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "rules.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
