//! Monthly payroll calculation.
//!
//! The per-day rate is the monthly salary divided by the real length of
//! the month being paid. All arithmetic runs at full precision and only
//! the reported fields are rounded to cents.

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceLog, AttendanceRecord, AttendanceStats, AuditStep, CalculationStatus,
    PayrollResult, SalaryConfiguration, SalaryStructure, YearMonth,
};

use super::attendance_stats::{aggregate_attendance, attendance_audit_step};
use super::thursday_rule::thursday_audit_step;

/// Rounds a monetary amount to cents, halves away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// assert_eq!(round_money(Decimal::from_str("-10.005").unwrap()), Decimal::from_str("-10.01").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The monetary breakdown of a month at full precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayBreakdown {
    /// Monthly salary divided by the days in the month.
    pub actual_per_day_salary: Decimal,
    /// Worked days times the per-day rate.
    pub base_salary: Decimal,
    /// Paid Thursdays times the per-day rate.
    pub thursday_paid_salary: Decimal,
    /// Worked Thursdays times the per-day rate.
    pub thursday_extra_pay: Decimal,
    /// Hours beyond the expected total.
    pub overtime_hours: Decimal,
    /// Overtime hours times the overtime rate.
    pub overtime_pay: Decimal,
    /// Half-day deduction.
    pub half_day_deduction: Decimal,
    /// Absent-day deduction.
    pub absent_deduction: Decimal,
    /// Late-arrival deduction.
    pub late_deduction: Decimal,
    /// Deducted-Thursday deduction.
    pub thursday_deductions: Decimal,
    /// Sum of the four deductions.
    pub total_deductions: Decimal,
    /// Earnings minus deductions.
    pub net_salary: Decimal,
}

impl PayBreakdown {
    /// Applies the salary to a month's attendance.
    pub fn compute(
        salary: &SalaryConfiguration,
        stats: &AttendanceStats,
        rules: &PayrollRules,
    ) -> Self {
        let per_day = if stats.days_in_month == 0 {
            Decimal::ZERO
        } else {
            salary.monthly_salary / Decimal::from(stats.days_in_month)
        };

        let base_salary = Decimal::from(stats.worked_days) * per_day;
        let thursday_paid_salary = Decimal::from(stats.thursdays_paid) * per_day;
        let thursday_extra_pay = Decimal::from(stats.thursdays_worked) * per_day;
        let thursday_deductions = Decimal::from(stats.thursdays_deducted) * per_day;

        let expected_hours = Decimal::from(stats.worked_days) * salary.expected_daily_hours;
        let overtime_hours = (stats.total_working_hours - expected_hours).max(Decimal::ZERO);
        let overtime_pay = overtime_hours * salary.overtime_rate;

        let half_day_deduction =
            Decimal::from(stats.half_days) * (per_day * rules.half_day_deduction_fraction);
        let absent_deduction = Decimal::from(stats.absent_days) * per_day;
        let late_deduction =
            Decimal::from(stats.late_days) * (per_day * rules.late_deduction_fraction);

        let total_deductions =
            half_day_deduction + absent_deduction + late_deduction + thursday_deductions;
        let net_salary = base_salary + thursday_paid_salary + thursday_extra_pay + overtime_pay
            - total_deductions;

        Self {
            actual_per_day_salary: per_day,
            base_salary,
            thursday_paid_salary,
            thursday_extra_pay,
            overtime_hours,
            overtime_pay,
            half_day_deduction,
            absent_deduction,
            late_deduction,
            thursday_deductions,
            total_deductions,
            net_salary,
        }
    }
}

/// Computes a technician's payroll for one month.
///
/// `salary` is the technician's stored configuration; `None` means the
/// technician was never configured and no figures are produced. Records
/// outside `month` are only consulted by the Thursday rule.
///
/// # Errors
///
/// - [`EngineError::NotConfigured`] if `salary` is `None`
/// - [`EngineError::InvalidSalaryConfig`] if the salary breaks its invariants
/// - [`EngineError::DuplicateAttendance`] if two records share a date
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_monthly_payroll;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::error::EngineError;
///
/// let err = compute_monthly_payroll(
///     "tech_404",
///     None,
///     "2024-02".parse().unwrap(),
///     &[],
///     &PayrollRules::default(),
/// )
/// .unwrap_err();
/// assert!(matches!(err, EngineError::NotConfigured { .. }));
/// ```
pub fn compute_monthly_payroll(
    technician_id: &str,
    salary: Option<&SalaryConfiguration>,
    month: YearMonth,
    records: &[AttendanceRecord],
    rules: &PayrollRules,
) -> EngineResult<PayrollResult> {
    let salary = salary.ok_or_else(|| EngineError::NotConfigured {
        technician_id: technician_id.to_string(),
    })?;
    salary.validate()?;
    let log = AttendanceLog::new(records.iter().cloned())?;
    Ok(calculate_payroll(technician_id, salary, month, &log, rules))
}

/// Computes the payroll from a validated salary and attendance log.
pub fn calculate_payroll(
    technician_id: &str,
    salary: &SalaryConfiguration,
    month: YearMonth,
    log: &AttendanceLog,
    rules: &PayrollRules,
) -> PayrollResult {
    let stats = aggregate_attendance(log, salary.expected_daily_hours, month, rules);
    let pay = PayBreakdown::compute(salary, &stats, rules);

    let mut audit_trace = Vec::new();
    let mut step_number = 1u32;
    audit_trace.push(attendance_audit_step(
        &stats,
        salary.expected_daily_hours,
        rules,
        step_number,
    ));
    for outcome in &stats.thursday_details {
        step_number += 1;
        audit_trace.push(thursday_audit_step(outcome, step_number));
    }
    for step in pay_audit_steps(salary, &stats, &pay, rules) {
        step_number += 1;
        audit_trace.push(AuditStep {
            step_number,
            ..step
        });
    }

    debug!(
        technician_id,
        %month,
        net_salary = %round_money(pay.net_salary),
        total_deductions = %round_money(pay.total_deductions),
        steps = audit_trace.len(),
        "Computed monthly payroll"
    );

    PayrollResult {
        technician_id: technician_id.to_string(),
        month,
        salary_structure: SalaryStructure {
            monthly_salary: salary.monthly_salary,
            per_day_salary: salary.reference_per_day_salary(rules.reference_month_days),
            overtime_rate: salary.overtime_rate,
            expected_daily_hours: salary.expected_daily_hours,
            actual_per_day_salary: round_money(pay.actual_per_day_salary),
            days_in_month: stats.days_in_month,
        },
        attendance: stats,
        base_salary: round_money(pay.base_salary),
        thursday_paid_salary: round_money(pay.thursday_paid_salary),
        thursday_extra_pay: round_money(pay.thursday_extra_pay),
        overtime_pay: round_money(pay.overtime_pay),
        half_day_deduction: round_money(pay.half_day_deduction),
        absent_deduction: round_money(pay.absent_deduction),
        late_deduction: round_money(pay.late_deduction),
        thursday_deductions: round_money(pay.thursday_deductions),
        total_deductions: round_money(pay.total_deductions),
        net_salary: round_money(pay.net_salary),
        calculated_at: Utc::now(),
        status: CalculationStatus::Calculated,
        audit_trace,
    }
}

fn money(value: Decimal) -> String {
    round_money(value).normalize().to_string()
}

/// Audit steps for the money side of the calculation. Step numbers are
/// assigned by the caller.
fn pay_audit_steps(
    salary: &SalaryConfiguration,
    stats: &AttendanceStats,
    pay: &PayBreakdown,
    rules: &PayrollRules,
) -> Vec<AuditStep> {
    let per_day = money(pay.actual_per_day_salary);
    vec![
        AuditStep {
            step_number: 0,
            rule_id: "per_day_rate".to_string(),
            rule_name: "Per-Day Rate".to_string(),
            input: serde_json::json!({
                "monthly_salary": salary.monthly_salary.normalize().to_string(),
                "days_in_month": stats.days_in_month
            }),
            output: serde_json::json!({
                "actual_per_day_salary": per_day
            }),
            reasoning: format!(
                "${} / {} days = ${} per day",
                salary.monthly_salary.normalize(),
                stats.days_in_month,
                per_day
            ),
        },
        AuditStep {
            step_number: 0,
            rule_id: "base_salary".to_string(),
            rule_name: "Base Salary".to_string(),
            input: serde_json::json!({
                "worked_days": stats.worked_days,
                "actual_per_day_salary": per_day
            }),
            output: serde_json::json!({
                "base_salary": money(pay.base_salary)
            }),
            reasoning: format!(
                "{} worked days × ${} = ${}",
                stats.worked_days,
                per_day,
                money(pay.base_salary)
            ),
        },
        AuditStep {
            step_number: 0,
            rule_id: "thursday_pay".to_string(),
            rule_name: "Thursday Pay".to_string(),
            input: serde_json::json!({
                "thursdays_paid": stats.thursdays_paid,
                "thursdays_worked": stats.thursdays_worked,
                "actual_per_day_salary": per_day
            }),
            output: serde_json::json!({
                "thursday_paid_salary": money(pay.thursday_paid_salary),
                "thursday_extra_pay": money(pay.thursday_extra_pay)
            }),
            reasoning: format!(
                "{} paid holiday(s) = ${}; {} worked holiday(s) = ${}",
                stats.thursdays_paid,
                money(pay.thursday_paid_salary),
                stats.thursdays_worked,
                money(pay.thursday_extra_pay)
            ),
        },
        AuditStep {
            step_number: 0,
            rule_id: "overtime".to_string(),
            rule_name: "Overtime".to_string(),
            input: serde_json::json!({
                "total_working_hours": stats.total_working_hours.normalize().to_string(),
                "worked_days": stats.worked_days,
                "expected_daily_hours": salary.expected_daily_hours.normalize().to_string(),
                "overtime_rate": salary.overtime_rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "overtime_hours": pay.overtime_hours.normalize().to_string(),
                "overtime_pay": money(pay.overtime_pay)
            }),
            reasoning: format!(
                "{} overtime hours × ${} = ${}",
                pay.overtime_hours.normalize(),
                salary.overtime_rate.normalize(),
                money(pay.overtime_pay)
            ),
        },
        AuditStep {
            step_number: 0,
            rule_id: "deductions".to_string(),
            rule_name: "Deductions".to_string(),
            input: serde_json::json!({
                "half_days": stats.half_days,
                "absent_days": stats.absent_days,
                "late_days": stats.late_days,
                "thursdays_deducted": stats.thursdays_deducted,
                "half_day_deduction_fraction": rules.half_day_deduction_fraction.normalize().to_string(),
                "late_deduction_fraction": rules.late_deduction_fraction.normalize().to_string()
            }),
            output: serde_json::json!({
                "half_day_deduction": money(pay.half_day_deduction),
                "absent_deduction": money(pay.absent_deduction),
                "late_deduction": money(pay.late_deduction),
                "thursday_deductions": money(pay.thursday_deductions),
                "total_deductions": money(pay.total_deductions)
            }),
            reasoning: format!(
                "Half days ${} + absences ${} + late ${} + Thursdays ${} = ${}",
                money(pay.half_day_deduction),
                money(pay.absent_deduction),
                money(pay.late_deduction),
                money(pay.thursday_deductions),
                money(pay.total_deductions)
            ),
        },
        AuditStep {
            step_number: 0,
            rule_id: "net_salary".to_string(),
            rule_name: "Net Salary".to_string(),
            input: serde_json::json!({
                "base_salary": money(pay.base_salary),
                "thursday_paid_salary": money(pay.thursday_paid_salary),
                "thursday_extra_pay": money(pay.thursday_extra_pay),
                "overtime_pay": money(pay.overtime_pay),
                "total_deductions": money(pay.total_deductions)
            }),
            output: serde_json::json!({
                "net_salary": money(pay.net_salary)
            }),
            reasoning: format!(
                "${} + ${} + ${} + ${} - ${} = ${}",
                money(pay.base_salary),
                money(pay.thursday_paid_salary),
                money(pay.thursday_extra_pay),
                money(pay.overtime_pay),
                money(pay.total_deductions),
                money(pay.net_salary)
            ),
        },
    ]
}
