//! Property tests for payroll and attendance invariants.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{compute_attendance_stats, compute_monthly_payroll, round_money};
use payroll_engine::config::PayrollRules;
use payroll_engine::models::{AttendanceRecord, SalaryConfiguration, ThursdayStatus, YearMonth};

/// What happened on one generated day.
#[derive(Debug, Clone)]
enum DayPlan {
    NoRecord,
    Absent,
    CheckedIn(u32),
    Worked { start_minute: u32, minutes: u32 },
}

fn day_plan() -> impl Strategy<Value = DayPlan> {
    prop_oneof![
        Just(DayPlan::NoRecord),
        Just(DayPlan::Absent),
        (420u32..660).prop_map(DayPlan::CheckedIn),
        (420u32..660, 0u32..720).prop_map(|(start_minute, minutes)| DayPlan::Worked {
            start_minute,
            minutes
        }),
    ]
}

fn month() -> impl Strategy<Value = YearMonth> {
    (2000i32..2035, 1u32..=12).prop_map(|(y, m)| YearMonth::new(y, m).unwrap())
}

fn minute_of_day(minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap()
}

/// Records from two days before the month to one day after it.
fn build_records(month: YearMonth, plans: &[DayPlan]) -> Vec<AttendanceRecord> {
    let start = month.first_day() - Duration::days(2);
    let end = month.last_day() + Duration::days(1);
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .zip(plans.iter().cycle())
        .filter_map(|(date, plan)| record(date, plan))
        .collect()
}

fn record(date: NaiveDate, plan: &DayPlan) -> Option<AttendanceRecord> {
    match plan {
        DayPlan::NoRecord => None,
        DayPlan::Absent => Some(AttendanceRecord::absent(date)),
        DayPlan::CheckedIn(minute) => {
            Some(AttendanceRecord::checked_in(date, minute_of_day(*minute)))
        }
        DayPlan::Worked {
            start_minute,
            minutes,
        } => {
            let end = (start_minute + minutes).min(23 * 60 + 59);
            AttendanceRecord::completed(date, minute_of_day(*start_minute), minute_of_day(end))
                .ok()
        }
    }
}

fn salary() -> impl Strategy<Value = SalaryConfiguration> {
    (0i64..10_000_000, 0i64..20_000, 1i64..24).prop_map(|(monthly_cents, ot_cents, hours)| {
        let mut salary =
            SalaryConfiguration::new(Decimal::new(monthly_cents, 2), Decimal::new(ot_cents, 2));
        salary.expected_daily_hours = Decimal::from(hours);
        salary
    })
}

proptest! {
    #[test]
    fn net_salary_is_sum_of_parts(
        month in month(),
        plans in prop::collection::vec(day_plan(), 1..40),
        salary in salary(),
    ) {
        let records = build_records(month, &plans);
        let r = compute_monthly_payroll("tech_prop", Some(&salary), month, &records, &PayrollRules::default())
            .unwrap();

        let deductions = r.half_day_deduction + r.absent_deduction + r.late_deduction + r.thursday_deductions;
        prop_assert!((r.total_deductions - round_money(deductions)).abs() <= Decimal::new(2, 2));

        let net = r.base_salary + r.thursday_paid_salary + r.thursday_extra_pay + r.overtime_pay
            - r.total_deductions;
        prop_assert!((r.net_salary - round_money(net)).abs() <= Decimal::new(3, 2));

        for value in [r.base_salary, r.overtime_pay, r.total_deductions, r.net_salary] {
            prop_assert!(value.scale() <= 2);
        }
    }

    #[test]
    fn every_thursday_lands_in_one_category(
        month in month(),
        plans in prop::collection::vec(day_plan(), 1..40),
    ) {
        let records = build_records(month, &plans);
        let stats = compute_attendance_stats(&records, Decimal::from(8), month, &PayrollRules::default())
            .unwrap();

        prop_assert_eq!(
            stats.thursdays_paid + stats.thursdays_deducted + stats.thursdays_worked,
            stats.total_thursdays
        );
        prop_assert_eq!(stats.thursday_details.len() as u32, stats.total_thursdays);

        let thursdays: Vec<NaiveDate> = month.dates().filter(|d| d.weekday() == Weekday::Thu).collect();
        let detailed: Vec<NaiveDate> = stats.thursday_details.iter().map(|o| o.date).collect();
        prop_assert_eq!(detailed, thursdays);

        for outcome in &stats.thursday_details {
            let expected = if outcome.thursday_worked {
                ThursdayStatus::WorkedOnHoliday
            } else if outcome.tuesday_present && outcome.friday_present {
                ThursdayStatus::Paid
            } else {
                ThursdayStatus::Deducted
            };
            prop_assert_eq!(outcome.status, expected);
        }
    }

    #[test]
    fn every_ordinary_day_counted_once(
        month in month(),
        plans in prop::collection::vec(day_plan(), 1..40),
    ) {
        let records = build_records(month, &plans);
        let stats = compute_attendance_stats(&records, Decimal::from(8), month, &PayrollRules::default())
            .unwrap();

        prop_assert_eq!(
            stats.present_days + stats.absent_days + stats.incomplete_checkins + stats.total_thursdays,
            stats.days_in_month
        );
        prop_assert_eq!(stats.worked_days, stats.present_days);
        prop_assert!(stats.late_days <= stats.present_days);
        prop_assert!(stats.half_days <= stats.present_days + stats.incomplete_checkins);
    }

    #[test]
    fn repeated_payroll_is_identical(
        month in month(),
        plans in prop::collection::vec(day_plan(), 1..40),
        salary in salary(),
    ) {
        let records = build_records(month, &plans);
        let rules = PayrollRules::default();
        let first = compute_monthly_payroll("tech_prop", Some(&salary), month, &records, &rules).unwrap();
        let second = compute_monthly_payroll("tech_prop", Some(&salary), month, &records, &rules).unwrap();
        prop_assert!(first.same_figures(&second));
    }

    #[test]
    fn empty_month_deducts_every_thursday(month in month(), salary in salary()) {
        let r = compute_monthly_payroll("tech_prop", Some(&salary), month, &[], &PayrollRules::default())
            .unwrap();
        prop_assert_eq!(r.attendance.present_days, 0);
        prop_assert_eq!(r.attendance.absent_days, r.attendance.days_in_month - r.attendance.total_thursdays);
        prop_assert_eq!(r.attendance.thursdays_deducted, r.attendance.total_thursdays);
        prop_assert_eq!(r.net_salary, -r.total_deductions);
    }
}
