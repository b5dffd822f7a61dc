//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::SalaryConfiguration;

/// Check-ins after this time of day count as late.
pub const DEFAULT_LATE_THRESHOLD: NaiveTime = match NaiveTime::from_hms_opt(9, 0, 0) {
    Some(time) => time,
    None => panic!("09:00:00 is a valid time"),
};

/// Day count behind the stored reference per-day rate.
pub const DEFAULT_REFERENCE_MONTH_DAYS: u32 = 30;

/// Number of months shown in salary history.
pub const DEFAULT_HISTORY_WINDOW_MONTHS: usize = 12;

/// Rules shared by every technician's payroll.
///
/// Every field is optional in `rules.yaml`; omitted fields keep the
/// defaults below.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rules: PayrollRules = serde_yaml::from_str("late_threshold: \"09:30:00\"").unwrap();
/// assert_eq!(rules.late_threshold.to_string(), "09:30:00");
/// assert_eq!(rules.late_deduction_fraction, Decimal::new(10, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollRules {
    /// Check-ins strictly after this time are late.
    pub late_threshold: NaiveTime,
    /// Share of a day's pay deducted per late day.
    pub late_deduction_fraction: Decimal,
    /// Share of the expected daily hours below which a present day is a half day.
    pub half_day_fraction: Decimal,
    /// Share of a day's pay deducted per half day.
    pub half_day_deduction_fraction: Decimal,
    /// Day count behind the stored reference per-day rate.
    pub reference_month_days: u32,
    /// Number of months kept in salary history.
    pub history_window_months: usize,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            late_threshold: DEFAULT_LATE_THRESHOLD,
            late_deduction_fraction: Decimal::new(10, 2),
            half_day_fraction: Decimal::new(5, 1),
            half_day_deduction_fraction: Decimal::new(5, 1),
            reference_month_days: DEFAULT_REFERENCE_MONTH_DAYS,
            history_window_months: DEFAULT_HISTORY_WINDOW_MONTHS,
        }
    }
}

impl PayrollRules {
    /// Returns a description of the first out-of-range field, if any.
    pub(crate) fn check(&self) -> Option<String> {
        let fractions = [
            ("late_deduction_fraction", self.late_deduction_fraction),
            ("half_day_fraction", self.half_day_fraction),
            ("half_day_deduction_fraction", self.half_day_deduction_fraction),
        ];
        for (name, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Some(format!("{} must be between 0 and 1, got {}", name, value));
            }
        }
        if self.reference_month_days == 0 {
            return Some("reference_month_days must be positive".to_string());
        }
        None
    }
}

/// Salaries configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalariesConfig {
    /// Map of technician id to salary configuration.
    #[serde(default)]
    pub technicians: BTreeMap<String, SalaryConfiguration>,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct PayrollConfig {
    /// Shared payroll rules.
    rules: PayrollRules,
    /// Salary configurations by technician id.
    salaries: BTreeMap<String, SalaryConfiguration>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(rules: PayrollRules, salaries: BTreeMap<String, SalaryConfiguration>) -> Self {
        Self { rules, salaries }
    }

    /// Returns the shared payroll rules.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Returns all salary configurations.
    pub fn salaries(&self) -> &BTreeMap<String, SalaryConfiguration> {
        &self.salaries
    }

    /// Returns the salary configuration for a technician, if one exists.
    pub fn salary_for(&self, technician_id: &str) -> Option<&SalaryConfiguration> {
        self.salaries.get(technician_id)
    }
}
