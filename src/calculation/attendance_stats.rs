//! Monthly attendance aggregation.
//!
//! Every calendar day of the month is classified exactly once. Thursdays
//! are set aside for the holiday rule; every other day is present,
//! incomplete, or absent, and a day with no record is absent.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceDay, AttendanceLog, AttendanceRecord, AttendanceStats, AuditStep, MAX_WORKING_HOURS,
    ThursdayStatus, YearMonth,
};

use super::calendar::is_holiday_weekday;
use super::thursday_rule::evaluate_thursdays;

/// How an ordinary (non-Thursday) day was spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DayOutcome {
    /// Checked in and out. A day can be both late and short.
    Present {
        /// Checked in after the late threshold.
        late: bool,
        /// Worked less than the half-day share of the expected hours.
        half_day: bool,
    },
    /// Checked in, never checked out.
    Incomplete,
    /// No activity, or no record at all.
    Absent,
}

/// The classification of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    /// The calendar day.
    pub date: NaiveDate,
    /// True for the weekly holiday; such days carry no outcome.
    pub is_thursday: bool,
    /// The outcome for ordinary days.
    pub outcome: Option<DayOutcome>,
}

/// Classifies one ordinary day's record.
pub fn classify_day(
    record: Option<&AttendanceRecord>,
    expected_daily_hours: Decimal,
    rules: &PayrollRules,
) -> DayOutcome {
    match record.map(|r| &r.day) {
        Some(AttendanceDay::Completed {
            check_in,
            working_hours,
            ..
        }) => DayOutcome::Present {
            late: *check_in > rules.late_threshold,
            half_day: *working_hours < expected_daily_hours * rules.half_day_fraction,
        },
        Some(AttendanceDay::CheckedIn { .. }) => DayOutcome::Incomplete,
        Some(AttendanceDay::Absent) | None => DayOutcome::Absent,
    }
}

/// Classifies every day of `month`, in date order.
pub fn classify_month(
    log: &AttendanceLog,
    expected_daily_hours: Decimal,
    month: YearMonth,
    rules: &PayrollRules,
) -> Vec<DayClassification> {
    month
        .dates()
        .map(|date| {
            let is_thursday = is_holiday_weekday(date);
            let outcome = (!is_thursday)
                .then(|| classify_day(log.get(date), expected_daily_hours, rules));
            DayClassification {
                date,
                is_thursday,
                outcome,
            }
        })
        .collect()
}

/// Aggregates a validated attendance log into monthly statistics.
///
/// Ordinary days come from the records inside `month`; the Thursday rule
/// may also read the neighbouring days the log holds.
pub fn aggregate_attendance(
    log: &AttendanceLog,
    expected_daily_hours: Decimal,
    month: YearMonth,
    rules: &PayrollRules,
) -> AttendanceStats {
    let days_in_month = month.days_in_month();
    let mut stats = AttendanceStats {
        days_in_month,
        working_days: days_in_month,
        ..AttendanceStats::default()
    };

    for day in classify_month(log, expected_daily_hours, month, rules) {
        let Some(outcome) = day.outcome else {
            continue;
        };
        match outcome {
            DayOutcome::Present { late, half_day } => {
                stats.present_days += 1;
                stats.worked_days += 1;
                if let Some(AttendanceDay::Completed { working_hours, .. }) =
                    log.get(day.date).map(|r| &r.day)
                {
                    stats.total_working_hours += *working_hours;
                }
                if late {
                    stats.late_days += 1;
                }
                if half_day {
                    stats.half_days += 1;
                }
            }
            DayOutcome::Incomplete => {
                stats.incomplete_checkins += 1;
                stats.half_days += 1;
            }
            DayOutcome::Absent => stats.absent_days += 1,
        }
    }

    if stats.present_days > 0 {
        stats.average_hours = (stats.total_working_hours / Decimal::from(stats.present_days))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    }

    let outcomes = evaluate_thursdays(month, log);
    stats.total_thursdays = outcomes.len() as u32;
    for outcome in &outcomes {
        match outcome.status {
            ThursdayStatus::WorkedOnHoliday => stats.thursdays_worked += 1,
            ThursdayStatus::Paid => stats.thursdays_paid += 1,
            ThursdayStatus::Deducted => stats.thursdays_deducted += 1,
        }
    }
    stats.thursday_details = outcomes;

    debug!(
        %month,
        records = log.in_month(month).count(),
        present_days = stats.present_days,
        absent_days = stats.absent_days,
        half_days = stats.half_days,
        late_days = stats.late_days,
        thursdays_paid = stats.thursdays_paid,
        thursdays_deducted = stats.thursdays_deducted,
        thursdays_worked = stats.thursdays_worked,
        "Aggregated monthly attendance"
    );

    stats
}

/// Computes attendance statistics for one technician and month.
///
/// Records may be in any order and may include days outside `month`; those
/// are only consulted by the Thursday rule.
///
/// # Errors
///
/// - [`EngineError::InvalidSalaryConfig`] if `expected_daily_hours` is not in `(0, 24]`
/// - [`EngineError::InvalidAttendance`] if a completed day reports hours outside `0..=24`
/// - [`EngineError::DuplicateAttendance`] if two records share a date
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_attendance_stats;
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let stats = compute_attendance_stats(
///     &[],
///     Decimal::new(8, 0),
///     "2024-02".parse().unwrap(),
///     &PayrollRules::default(),
/// )
/// .unwrap();
/// assert_eq!(stats.days_in_month, 29);
/// assert_eq!(stats.absent_days, 24);
/// assert_eq!(stats.thursdays_deducted, 5);
/// ```
pub fn compute_attendance_stats(
    records: &[AttendanceRecord],
    expected_daily_hours: Decimal,
    month: YearMonth,
    rules: &PayrollRules,
) -> EngineResult<AttendanceStats> {
    if expected_daily_hours <= Decimal::ZERO || expected_daily_hours > MAX_WORKING_HOURS {
        return Err(EngineError::InvalidSalaryConfig {
            field: "expected_daily_hours".to_string(),
            message: format!(
                "must be above 0 and at most {}, got {}",
                MAX_WORKING_HOURS, expected_daily_hours
            ),
        });
    }
    let log = AttendanceLog::new(records.iter().cloned())?;
    Ok(aggregate_attendance(&log, expected_daily_hours, month, rules))
}

/// Builds the audit step summarising the month's attendance.
pub fn attendance_audit_step(
    stats: &AttendanceStats,
    expected_daily_hours: Decimal,
    rules: &PayrollRules,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "attendance_classification".to_string(),
        rule_name: "Attendance Classification".to_string(),
        input: serde_json::json!({
            "days_in_month": stats.days_in_month,
            "expected_daily_hours": expected_daily_hours.normalize().to_string(),
            "late_threshold": rules.late_threshold.to_string(),
            "half_day_fraction": rules.half_day_fraction.normalize().to_string()
        }),
        output: serde_json::json!({
            "present_days": stats.present_days,
            "absent_days": stats.absent_days,
            "worked_days": stats.worked_days,
            "half_days": stats.half_days,
            "late_days": stats.late_days,
            "incomplete_checkins": stats.incomplete_checkins,
            "total_working_hours": stats.total_working_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} of {} days are Thursdays; of the rest {} present, {} incomplete, {} absent",
            stats.total_thursdays,
            stats.days_in_month,
            stats.present_days,
            stats.incomplete_checkins,
            stats.absent_days
        ),
    }
}
