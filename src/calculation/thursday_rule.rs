//! Thursday holiday rule.
//!
//! Thursday is the weekly holiday. A Thursday the technician works is paid
//! as an extra day. Otherwise it is paid only when the technician completed
//! both the Tuesday before and the Friday after; missing either forfeits it
//! and a day's pay is deducted.
//!
//! Each Thursday is settled independently of the others.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{AttendanceLog, AuditStep, ThursdayOutcome, ThursdayStatus, YearMonth};

use super::calendar::{paired_tuesday_friday, thursdays_in_month};

/// Settles a single Thursday against the technician's attendance.
///
/// The Tuesday and Friday are looked up in the whole log, so records from
/// the neighbouring months count when the caller supplied them. A date
/// with no record is not present.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::evaluate_thursday;
/// use payroll_engine::models::{AttendanceLog, AttendanceRecord, ThursdayStatus};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 2, d).unwrap();
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let five = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
///
/// let log = AttendanceLog::new(vec![
///     AttendanceRecord::completed(day(6), nine, five).unwrap(),
///     AttendanceRecord::completed(day(9), nine, five).unwrap(),
/// ])
/// .unwrap();
///
/// let outcome = evaluate_thursday(day(8), &log);
/// assert_eq!(outcome.status, ThursdayStatus::Paid);
/// ```
pub fn evaluate_thursday(thursday: NaiveDate, log: &AttendanceLog) -> ThursdayOutcome {
    let (tuesday, friday) = paired_tuesday_friday(thursday);
    let tuesday_present = log.is_present(tuesday);
    let friday_present = log.is_present(friday);
    let thursday_worked = log.is_present(thursday);

    // Priority order: working the holiday overrides the Tuesday/Friday check.
    let status = if thursday_worked {
        ThursdayStatus::WorkedOnHoliday
    } else if tuesday_present && friday_present {
        ThursdayStatus::Paid
    } else {
        ThursdayStatus::Deducted
    };

    debug!(
        %thursday,
        tuesday_present,
        friday_present,
        thursday_worked,
        ?status,
        "Settled holiday Thursday"
    );

    ThursdayOutcome {
        date: thursday,
        tuesday,
        friday,
        tuesday_present,
        friday_present,
        thursday_worked,
        status,
    }
}

/// Settles every Thursday of `month`, in date order.
pub fn evaluate_thursdays(month: YearMonth, log: &AttendanceLog) -> Vec<ThursdayOutcome> {
    thursdays_in_month(month)
        .into_iter()
        .map(|thursday| evaluate_thursday(thursday, log))
        .collect()
}

/// Builds the audit step documenting one Thursday decision.
pub fn thursday_audit_step(outcome: &ThursdayOutcome, step_number: u32) -> AuditStep {
    let reasoning = match outcome.status {
        ThursdayStatus::WorkedOnHoliday => format!(
            "Worked on holiday Thursday {}; paid as an extra day",
            outcome.date
        ),
        ThursdayStatus::Paid => format!(
            "Present on Tuesday {} and Friday {}; Thursday {} is a paid holiday",
            outcome.tuesday, outcome.friday, outcome.date
        ),
        ThursdayStatus::Deducted => {
            let missed: Vec<String> = [
                (!outcome.tuesday_present).then(|| format!("Tuesday {}", outcome.tuesday)),
                (!outcome.friday_present).then(|| format!("Friday {}", outcome.friday)),
            ]
            .into_iter()
            .flatten()
            .collect();
            format!(
                "Not present on {}; Thursday {} is deducted",
                missed.join(" and "),
                outcome.date
            )
        }
    };

    AuditStep {
        step_number,
        rule_id: "thursday_holiday_rule".to_string(),
        rule_name: "Thursday Holiday Rule".to_string(),
        input: serde_json::json!({
            "thursday": outcome.date.to_string(),
            "tuesday": outcome.tuesday.to_string(),
            "friday": outcome.friday.to_string(),
            "tuesday_present": outcome.tuesday_present,
            "friday_present": outcome.friday_present,
            "thursday_worked": outcome.thursday_worked
        }),
        output: serde_json::json!({
            "status": outcome.status
        }),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceRecord;
    use chrono::NaiveTime;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
    }

    fn present(d: &str) -> AttendanceRecord {
        AttendanceRecord::completed(date(d), time("09:00:00"), time("17:00:00")).unwrap()
    }

    fn log(records: Vec<AttendanceRecord>) -> AttendanceLog {
        AttendanceLog::new(records).unwrap()
    }

    #[test]
    fn test_tr_001_both_neighbours_present_is_paid() {
        let log = log(vec![present("2024-02-06"), present("2024-02-09")]);
        let outcome = evaluate_thursday(date("2024-02-08"), &log);
        assert_eq!(outcome.status, ThursdayStatus::Paid);
        assert!(outcome.tuesday_present);
        assert!(outcome.friday_present);
        assert!(!outcome.thursday_worked);
    }

    #[test]
    fn test_tr_002_missing_tuesday_is_deducted() {
        let log = log(vec![present("2024-02-09")]);
        let outcome = evaluate_thursday(date("2024-02-08"), &log);
        assert_eq!(outcome.status, ThursdayStatus::Deducted);
        assert!(!outcome.tuesday_present);
        assert!(outcome.friday_present);
    }

    #[test]
    fn test_tr_003_incomplete_friday_is_not_present() {
        let log = log(vec![
            present("2024-02-06"),
            AttendanceRecord::checked_in(date("2024-02-09"), time("09:00:00")),
        ]);
        let outcome = evaluate_thursday(date("2024-02-08"), &log);
        assert_eq!(outcome.status, ThursdayStatus::Deducted);
        assert!(!outcome.friday_present);
    }

    #[test]
    fn test_tr_004_worked_thursday_overrides_absent_neighbours() {
        let log = log(vec![present("2024-02-08")]);
        let outcome = evaluate_thursday(date("2024-02-08"), &log);
        assert_eq!(outcome.status, ThursdayStatus::WorkedOnHoliday);
        assert!(outcome.thursday_worked);
        assert!(!outcome.tuesday_present);
        assert!(!outcome.friday_present);
    }

    #[test]
    fn test_tr_005_checked_in_thursday_is_not_worked() {
        let log = log(vec![
            present("2024-02-06"),
            AttendanceRecord::checked_in(date("2024-02-08"), time("09:00:00")),
            present("2024-02-09"),
        ]);
        let outcome = evaluate_thursday(date("2024-02-08"), &log);
        assert_eq!(outcome.status, ThursdayStatus::Paid);
        assert!(!outcome.thursday_worked);
    }

    #[test]
    fn test_tr_006_neighbour_in_previous_month_is_used_when_supplied() {
        let with_january = log(vec![present("2024-01-30"), present("2024-02-02")]);
        assert_eq!(
            evaluate_thursday(date("2024-02-01"), &with_january).status,
            ThursdayStatus::Paid
        );

        let february_only = log(vec![present("2024-02-02")]);
        assert_eq!(
            evaluate_thursday(date("2024-02-01"), &february_only).status,
            ThursdayStatus::Deducted
        );
    }

    #[test]
    fn test_tr_007_empty_log_deducts_every_thursday() {
        let outcomes = evaluate_thursdays("2024-02".parse().unwrap(), &AttendanceLog::default());
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(|o| o.status == ThursdayStatus::Deducted));
    }

    #[test]
    fn test_tr_008_outcomes_in_date_order() {
        let outcomes = evaluate_thursdays("2024-03".parse().unwrap(), &AttendanceLog::default());
        let dates: Vec<NaiveDate> = outcomes.iter().map(|o| o.date).collect();
        assert_eq!(
            dates,
            vec![
                date("2024-03-07"),
                date("2024-03-14"),
                date("2024-03-21"),
                date("2024-03-28"),
            ]
        );
    }

    #[test]
    fn test_audit_step_names_missed_days() {
        let log = log(vec![]);
        let outcome = evaluate_thursday(date("2024-02-08"), &log);
        let step = thursday_audit_step(&outcome, 4);
        assert_eq!(step.step_number, 4);
        assert_eq!(step.rule_id, "thursday_holiday_rule");
        assert_eq!(step.output["status"], "deducted");
        assert_eq!(
            step.reasoning,
            "Not present on Tuesday 2024-02-06 and Friday 2024-02-09; Thursday 2024-02-08 is deducted"
        );
    }

    #[test]
    fn test_audit_step_for_paid_thursday() {
        let log = log(vec![present("2024-02-06"), present("2024-02-09")]);
        let step = thursday_audit_step(&evaluate_thursday(date("2024-02-08"), &log), 1);
        assert_eq!(step.input["tuesday_present"], true);
        assert_eq!(step.output["status"], "paid");
        assert!(step.reasoning.contains("paid holiday"));
    }
}
