//! Calendar month model.
//!
//! This module defines [`YearMonth`], the validated `YYYY-MM` value that
//! scopes every payroll and attendance calculation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A calendar month, e.g. `2024-02`.
///
/// Ordering is chronological, so sorting a list of months puts the
/// earliest first.
///
/// # Example
///
/// ```
/// use payroll_engine::models::YearMonth;
///
/// let month: YearMonth = "2024-02".parse().unwrap();
/// assert_eq!(month.year(), 2024);
/// assert_eq!(month.month(), 2);
/// assert_eq!(month.to_string(), "2024-02");
/// assert!("2024-13".parse::<YearMonth>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month from its numeric parts.
    ///
    /// Returns [`EngineError::InvalidMonth`] when `month` is outside 1..=12
    /// or the year is outside the supported calendar range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidMonth {
                value: format!("{:04}-{:02}", year, month),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 for January.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Validated on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_days(chrono::Days::new(u64::from(self.days_in_month()) - 1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// The number of calendar days in the month, accounting for leap years.
    pub fn days_in_month(&self) -> u32 {
        crate::calculation::days_in_month(*self)
    }

    /// Returns true if `date` falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// Every date of the month in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.first_day()
            .iter_days()
            .take(self.days_in_month() as usize)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth {
            value: s.to_string(),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_valid_month() {
        let month = ym("2024-02");
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 2);
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        for bad in ["2024", "2024-2", "24-02", "2024-00", "2024-13", "2024/02", "abcd-ef", ""] {
            let err = bad.parse::<YearMonth>().unwrap_err();
            assert!(
                matches!(err, EngineError::InvalidMonth { .. }),
                "expected InvalidMonth for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_display_pads_month() {
        assert_eq!(YearMonth::new(2025, 3).unwrap().to_string(), "2025-03");
    }

    #[test]
    fn test_first_and_last_day() {
        let month = ym("2024-02");
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_contains() {
        let month = ym("2024-02");
        assert!(month.contains(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 1, 30).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_dates_cover_whole_month() {
        let dates: Vec<NaiveDate> = ym("2023-04").dates().collect();
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
        assert_eq!(dates[29], NaiveDate::from_ymd_opt(2023, 4, 30).unwrap());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut months = vec![ym("2024-03"), ym("2023-12"), ym("2024-01")];
        months.sort();
        assert_eq!(months, vec![ym("2023-12"), ym("2024-01"), ym("2024-03")]);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&ym("2024-02")).unwrap();
        assert_eq!(json, "\"2024-02\"");

        let month: YearMonth = serde_json::from_str("\"2023-11\"").unwrap();
        assert_eq!(month, ym("2023-11"));

        assert!(serde_json::from_str::<YearMonth>("\"2023-1\"").is_err());
    }
}
