//! Payroll result models.
//!
//! This module contains [`PayrollResult`] and the structures it embeds:
//! the resolved salary structure, the month's attendance statistics with
//! the per-Thursday breakdown, and the audit trace of every rule applied.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::YearMonth;

/// How a holiday Thursday was settled.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ThursdayStatus;
///
/// let json = serde_json::to_string(&ThursdayStatus::WorkedOnHoliday).unwrap();
/// assert_eq!(json, "\"worked_on_holiday\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThursdayStatus {
    /// The technician worked the Thursday; paid as an extra day.
    WorkedOnHoliday,
    /// Present on both the Tuesday before and the Friday after; paid.
    Paid,
    /// Missed the Tuesday or the Friday; one day's pay is deducted.
    Deducted,
}

/// The evaluation of one Thursday in the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThursdayOutcome {
    /// The Thursday.
    pub date: NaiveDate,
    /// The Tuesday two days earlier.
    pub tuesday: NaiveDate,
    /// The Friday one day later.
    pub friday: NaiveDate,
    /// Completed check-in and check-out on the Tuesday.
    pub tuesday_present: bool,
    /// Completed check-in and check-out on the Friday.
    pub friday_present: bool,
    /// Completed check-in and check-out on the Thursday itself.
    pub thursday_worked: bool,
    /// The settled outcome.
    pub status: ThursdayStatus,
}

/// Attendance statistics for one technician over one month.
///
/// Thursdays are never part of the ordinary counters; they are tallied
/// only through the Thursday fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStats {
    /// Non-Thursday days with a completed check-in and check-out.
    pub present_days: u32,
    /// Non-Thursday days with no activity, including days without a record.
    pub absent_days: u32,
    /// Days counted for base pay.
    pub worked_days: u32,
    /// Short days plus incomplete check-ins.
    pub half_days: u32,
    /// Sum of working hours over present days.
    pub total_working_hours: Decimal,
    /// Mean working hours per present day, rounded to two decimals.
    pub average_hours: Decimal,
    /// Present days with a check-in after the late threshold.
    pub late_days: u32,
    /// Days checked in without a check-out.
    pub incomplete_checkins: u32,
    /// Calendar days in the month.
    pub days_in_month: u32,
    /// Days expected to be worked; every calendar day under a monthly salary.
    pub working_days: u32,
    /// Thursdays in the month.
    pub total_thursdays: u32,
    /// Thursdays paid as holidays.
    pub thursdays_paid: u32,
    /// Thursdays deducted.
    pub thursdays_deducted: u32,
    /// Thursdays worked.
    pub thursdays_worked: u32,
    /// Per-Thursday breakdown in date order.
    pub thursday_details: Vec<ThursdayOutcome>,
}

/// The salary structure resolved for the month being paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// The configured monthly salary.
    pub monthly_salary: Decimal,
    /// The stored reference per-day rate (display only).
    pub per_day_salary: Decimal,
    /// Overtime pay per hour.
    pub overtime_rate: Decimal,
    /// Expected working hours per day.
    pub expected_daily_hours: Decimal,
    /// Monthly salary divided by the real length of the month, rounded.
    pub actual_per_day_salary: Decimal,
    /// Calendar days in the month.
    pub days_in_month: u32,
}

/// Lifecycle marker of a payroll result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStatus {
    /// Computed and not yet persisted or paid.
    Calculated,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A technician's payroll for one month.
///
/// Monetary fields are rounded to two decimals; the sums behind them are
/// taken at full precision, so `net_salary` can differ from the sum of the
/// rounded parts by a few cents. The sum-of-parts checks in the property tests
/// therefore allow two cents on `total_deductions` and three on `net_salary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The technician being paid.
    pub technician_id: String,
    /// The month being paid.
    pub month: YearMonth,
    /// The resolved salary structure.
    pub salary_structure: SalaryStructure,
    /// Attendance statistics for the month.
    pub attendance: AttendanceStats,
    /// Worked days times the per-day rate.
    pub base_salary: Decimal,
    /// Pay for holiday Thursdays.
    pub thursday_paid_salary: Decimal,
    /// Pay for Thursdays worked.
    pub thursday_extra_pay: Decimal,
    /// Overtime hours times the overtime rate.
    pub overtime_pay: Decimal,
    /// Half a day's pay per half day.
    pub half_day_deduction: Decimal,
    /// A day's pay per absent day.
    pub absent_deduction: Decimal,
    /// A fraction of a day's pay per late day.
    pub late_deduction: Decimal,
    /// A day's pay per deducted Thursday.
    pub thursday_deductions: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Earnings minus deductions.
    pub net_salary: Decimal,
    /// When the result was computed.
    pub calculated_at: DateTime<Utc>,
    /// Lifecycle marker.
    pub status: CalculationStatus,
    /// Every rule applied, in order.
    pub audit_trace: Vec<AuditStep>,
}

impl PayrollResult {
    /// Compares two results ignoring `calculated_at`.
    pub fn same_figures(&self, other: &PayrollResult) -> bool {
        let mut other = other.clone();
        other.calculated_at = self.calculated_at;
        *self == other
    }
}

/// Aggregate of net salaries across several months.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStats {
    /// Mean net salary.
    pub average: Decimal,
    /// Lowest net salary.
    pub minimum: Decimal,
    /// Highest net salary.
    pub maximum: Decimal,
    /// Sum of net salaries.
    pub total: Decimal,
    /// Number of months aggregated.
    pub months: u32,
}
