//! Calendar utilities for monthly payroll.
//!
//! This module enumerates the days and holiday Thursdays of a month and
//! pairs each Thursday with the Tuesday and Friday that decide its pay.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::YearMonth;

/// The weekly holiday.
pub const HOLIDAY_WEEKDAY: Weekday = Weekday::Thu;

/// Returns the number of calendar days in `month`, accounting for leap years.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::days_in_month;
/// use payroll_engine::models::YearMonth;
///
/// assert_eq!(days_in_month("2024-02".parse::<YearMonth>().unwrap()), 29);
/// assert_eq!(days_in_month("2023-02".parse::<YearMonth>().unwrap()), 28);
/// assert_eq!(days_in_month("2024-12".parse::<YearMonth>().unwrap()), 31);
/// ```
pub fn days_in_month(month: YearMonth) -> u32 {
    if month.month() == 12 {
        return 31;
    }

    match (
        NaiveDate::from_ymd_opt(month.year(), month.month(), 1),
        NaiveDate::from_ymd_opt(month.year(), month.month() + 1, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

/// Returns every calendar date of `month` in ascending order.
pub fn dates_in_month(month: YearMonth) -> Vec<NaiveDate> {
    month.dates().collect()
}

/// Returns true if `date` is the weekly holiday.
pub fn is_holiday_weekday(date: NaiveDate) -> bool {
    date.weekday() == HOLIDAY_WEEKDAY
}

/// Returns every Thursday of `month` in ascending order.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::thursdays_in_month;
/// use chrono::NaiveDate;
///
/// let thursdays = thursdays_in_month("2024-02".parse().unwrap());
/// assert_eq!(thursdays.len(), 5);
/// assert_eq!(thursdays[0], NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(thursdays[4], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn thursdays_in_month(month: YearMonth) -> Vec<NaiveDate> {
    dates_in_month(month)
        .into_iter()
        .filter(|d| is_holiday_weekday(*d))
        .collect()
}

/// Returns the Tuesday two days before and the Friday one day after a Thursday.
///
/// Either date may fall in the neighbouring month.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::paired_tuesday_friday;
/// use chrono::NaiveDate;
///
/// let thursday = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
/// let (tuesday, friday) = paired_tuesday_friday(thursday);
/// assert_eq!(tuesday, NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
/// assert_eq!(friday, NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
/// ```
pub fn paired_tuesday_friday(thursday: NaiveDate) -> (NaiveDate, NaiveDate) {
    (thursday - Duration::days(2), thursday + Duration::days(1))
}
