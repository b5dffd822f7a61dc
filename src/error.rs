//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that stops a payroll or attendance calculation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Invalid input is rejected before any computation starts, so a returned
/// error always means no figures were produced.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::NotConfigured {
///     technician_id: "tech_007".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Salary structure not configured for technician 'tech_007'"
/// );
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

    /// No salary configuration exists for the technician.
    #[error("Salary structure not configured for technician '{technician_id}'")]
    NotConfigured {
        /// The technician without a salary configuration.
        technician_id: String,
    },

    /// A month string was not in `YYYY-MM` form or named a month outside 1..=12.
    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected month string.
        value: String,
    },

    /// A salary configuration field was out of range.
    #[error("Invalid salary configuration field '{field}': {message}")]
    InvalidSalaryConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An attendance record was internally inconsistent.
    #[error("Invalid attendance record for {date}: {message}")]
    InvalidAttendance {
        /// The date of the rejected record.
        date: NaiveDate,
        /// A description of the inconsistency.
        message: String,
    },

    /// Two attendance records were supplied for the same date.
    #[error("Duplicate attendance record for {date}")]
    DuplicateAttendance {
        /// The date that appeared more than once.
        date: NaiveDate,
    },

    /// A sum over caller-supplied amounts left the representable range.
    #[error("Amount out of range while computing {context}")]
    AmountOutOfRange {
        /// What was being computed.
        context: String,
    },
}

impl EngineError {
    /// Returns true for errors caused by caller-supplied input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidMonth { .. }
                | EngineError::InvalidSalaryConfig { .. }
                | EngineError::InvalidAttendance { .. }
                | EngineError::DuplicateAttendance { .. }
                | EngineError::AmountOutOfRange { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rules.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rules.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_month_displays_value() {
        let error = EngineError::InvalidMonth {
            value: "2024-13".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid month '2024-13': expected YYYY-MM");
    }

    #[test]
    fn test_invalid_attendance_displays_date_and_message() {
        let error = EngineError::InvalidAttendance {
            date: NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
            message: "check-out without check-in".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid attendance record for 2024-02-06: check-out without check-in"
        );
    }

    #[test]
    fn test_duplicate_attendance_displays_date() {
        let error = EngineError::DuplicateAttendance {
            date: NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
        };
        assert_eq!(error.to_string(), "Duplicate attendance record for 2024-02-06");
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(
            EngineError::InvalidMonth {
                value: "x".to_string()
            }
            .is_invalid_input()
        );
        assert!(
            !EngineError::NotConfigured {
                technician_id: "t".to_string()
            }
            .is_invalid_input()
        );
        assert!(
            !EngineError::ConfigNotFound {
                path: "p".to_string()
            }
            .is_invalid_input()
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_configured() -> EngineResult<()> {
            Err(EngineError::NotConfigured {
                technician_id: "tech_001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_configured()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
