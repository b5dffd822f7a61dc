//! Salary configuration model.
//!
//! This module defines [`SalaryConfiguration`], the per-technician salary
//! structure maintained by an administrator and read by the payroll
//! calculator.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::attendance::MAX_WORKING_HOURS;

/// Default expected working hours per day.
pub const DEFAULT_EXPECTED_DAILY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Upper bound on the monthly salary and the overtime rate.
pub const MAX_SALARY_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

fn default_expected_daily_hours() -> Decimal {
    DEFAULT_EXPECTED_DAILY_HOURS
}

/// A technician's salary structure.
///
/// # Example
///
/// ```
/// use payroll_engine::models::SalaryConfiguration;
/// use rust_decimal::Decimal;
///
/// let salary = SalaryConfiguration::new(Decimal::new(30000, 0), Decimal::new(50, 0));
/// assert_eq!(salary.expected_daily_hours, Decimal::new(8, 0));
/// assert!(salary.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryConfiguration {
    /// The monthly salary.
    #[serde(alias = "monthlySalary")]
    pub monthly_salary: Decimal,
    /// Overtime pay per hour.
    #[serde(default, alias = "overtimeRate")]
    pub overtime_rate: Decimal,
    /// Expected working hours per day.
    #[serde(default = "default_expected_daily_hours", alias = "expectedDailyHours")]
    pub expected_daily_hours: Decimal,
    /// When the configuration was last changed by an administrator.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SalaryConfiguration {
    /// Creates a configuration with the default expected daily hours.
    pub fn new(monthly_salary: Decimal, overtime_rate: Decimal) -> Self {
        Self {
            monthly_salary,
            overtime_rate,
            expected_daily_hours: DEFAULT_EXPECTED_DAILY_HOURS,
            updated_at: None,
        }
    }

    /// Checks the configuration's numeric invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSalaryConfig`] if the monthly salary or
    /// overtime rate is negative or above [`MAX_SALARY_AMOUNT`], or the
    /// expected daily hours are not in `(0, 24]`.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("monthly_salary", self.monthly_salary)?;
        check_amount("overtime_rate", self.overtime_rate)?;
        if self.expected_daily_hours <= Decimal::ZERO
            || self.expected_daily_hours > MAX_WORKING_HOURS
        {
            return Err(EngineError::InvalidSalaryConfig {
                field: "expected_daily_hours".to_string(),
                message: format!(
                    "must be above 0 and at most {}, got {}",
                    MAX_WORKING_HOURS, self.expected_daily_hours
                ),
            });
        }
        Ok(())
    }

    /// The stored reference per-day rate: monthly salary over a fixed day
    /// count, rounded to cents.
    ///
    /// This figure is for display only. Payroll always divides by the real
    /// length of the month being paid.
    ///
    /// ```
    /// use payroll_engine::models::SalaryConfiguration;
    /// use rust_decimal::Decimal;
    ///
    /// let salary = SalaryConfiguration::new(Decimal::new(25000, 0), Decimal::ZERO);
    /// assert_eq!(salary.reference_per_day_salary(30), Decimal::new(83333, 2));
    /// ```
    pub fn reference_per_day_salary(&self, reference_days: u32) -> Decimal {
        if reference_days == 0 {
            return Decimal::ZERO;
        }
        (self.monthly_salary / Decimal::from(reference_days))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

fn check_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidSalaryConfig {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    if value > MAX_SALARY_AMOUNT {
        return Err(EngineError::InvalidSalaryConfig {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", MAX_SALARY_AMOUNT, value),
        });
    }
    Ok(())
}
