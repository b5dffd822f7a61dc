//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod payroll_result;
mod salary;
mod year_month;

pub use attendance::{
    AttendanceDay, AttendanceLog, AttendanceRecord, AttendanceStatus, MAX_WORKING_HOURS,
};
pub use payroll_result::{
    AttendanceStats, AuditStep, CalculationStatus, PayrollResult, SalaryStats, SalaryStructure,
    ThursdayOutcome, ThursdayStatus,
};
pub use salary::{DEFAULT_EXPECTED_DAILY_HOURS, MAX_SALARY_AMOUNT, SalaryConfiguration};
pub use year_month::YearMonth;
