//! Calculation logic for the payroll engine.
//!
//! This module contains the calendar helpers, the Thursday holiday rule,
//! monthly attendance aggregation, the payroll calculator, and salary
//! history statistics. Every function here is a pure transform of its
//! inputs.

mod attendance_stats;
mod calendar;
mod payroll;
mod salary_history;
mod thursday_rule;

pub use attendance_stats::{
    DayClassification, DayOutcome, aggregate_attendance, attendance_audit_step, classify_day,
    classify_month, compute_attendance_stats,
};
pub use calendar::{
    HOLIDAY_WEEKDAY, dates_in_month, days_in_month, is_holiday_weekday, paired_tuesday_friday,
    thursdays_in_month,
};
pub use payroll::{PayBreakdown, calculate_payroll, compute_monthly_payroll, round_money};
pub use salary_history::{compute_salary_stats, latest_months, net_salary_stats};
pub use thursday_rule::{evaluate_thursday, evaluate_thursdays, thursday_audit_step};
