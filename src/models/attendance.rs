//! Attendance record model.
//!
//! An attendance record is produced once per technician per day by the
//! check-in/check-out flow. On the wire it is a loose bag of optional fields;
//! on deserialization it is normalised into an [`AttendanceDay`] so that the
//! present / checked-in / absent split is decided exactly once.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::YearMonth;

/// Longest working day a record may report.
pub const MAX_WORKING_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Status string carried by an attendance record.
///
/// Stored records may carry other statuses (an admin-marked `holiday`, a
/// `pending` edit); those are classified by their times alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    /// Checked in and checked out.
    Completed,
    /// Checked in, not yet checked out.
    CheckedIn,
    /// Record created but no check-in yet.
    Incomplete,
    /// Explicitly marked absent.
    Absent,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Completed => write!(f, "completed"),
            AttendanceStatus::CheckedIn => write!(f, "checked-in"),
            AttendanceStatus::Incomplete => write!(f, "incomplete"),
            AttendanceStatus::Absent => write!(f, "absent"),
        }
    }
}

impl AttendanceStatus {
    fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "completed" => Some(AttendanceStatus::Completed),
            "checked-in" => Some(AttendanceStatus::CheckedIn),
            "incomplete" => Some(AttendanceStatus::Incomplete),
            "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }
}

/// What happened on a single attendance day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceDay {
    /// Checked in and out.
    Completed {
        /// Check-in time of day.
        check_in: NaiveTime,
        /// Check-out time of day.
        check_out: NaiveTime,
        /// Hours between check-in and check-out.
        working_hours: Decimal,
    },
    /// Checked in but never checked out.
    CheckedIn {
        /// Check-in time of day, when one was recorded.
        check_in: Option<NaiveTime>,
    },
    /// No check-in and no check-out.
    Absent,
}

/// One technician's attendance for one calendar day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AttendanceDay, AttendanceRecord};
/// use rust_decimal::Decimal;
///
/// let json = r#"{
///     "date": "2024-02-06",
///     "status": "completed",
///     "checkInTime": "8:55:00 am",
///     "checkOutTime": "6:10:00 pm"
/// }"#;
/// let record: AttendanceRecord = serde_json::from_str(json).unwrap();
/// assert!(record.is_completed());
/// assert!(matches!(
///     record.day,
///     AttendanceDay::Completed { working_hours, .. } if working_hours == Decimal::new(925, 2)
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAttendanceRecord", into = "RawAttendanceRecord")]
pub struct AttendanceRecord {
    /// The calendar day.
    pub date: NaiveDate,
    /// The classified attendance for the day.
    pub day: AttendanceDay,
    /// Face match score reported by the verification step, if any.
    pub face_match_score: Option<f64>,
    /// Whether the liveness check passed, if one was run.
    pub liveness_verified: Option<bool>,
}

impl AttendanceRecord {
    /// A completed day; working hours are derived from the two times.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidAttendance`] if `check_out` is before
    /// `check_in`.
    pub fn completed(
        date: NaiveDate,
        check_in: NaiveTime,
        check_out: NaiveTime,
    ) -> EngineResult<Self> {
        let working_hours = derive_working_hours(date, check_in, check_out)?;
        Ok(Self::from_day(
            date,
            AttendanceDay::Completed {
                check_in,
                check_out,
                working_hours,
            },
        ))
    }

    /// A day with a check-in and no check-out.
    pub fn checked_in(date: NaiveDate, check_in: NaiveTime) -> Self {
        Self::from_day(
            date,
            AttendanceDay::CheckedIn {
                check_in: Some(check_in),
            },
        )
    }

    /// A day with no activity.
    pub fn absent(date: NaiveDate) -> Self {
        Self::from_day(date, AttendanceDay::Absent)
    }

    fn from_day(date: NaiveDate, day: AttendanceDay) -> Self {
        Self {
            date,
            day,
            face_match_score: None,
            liveness_verified: None,
        }
    }

    /// True if the technician checked in and out on this day.
    pub fn is_completed(&self) -> bool {
        matches!(self.day, AttendanceDay::Completed { .. })
    }

    /// The status string this record would be stored with.
    pub fn status(&self) -> AttendanceStatus {
        match self.day {
            AttendanceDay::Completed { .. } => AttendanceStatus::Completed,
            AttendanceDay::CheckedIn { .. } => AttendanceStatus::CheckedIn,
            AttendanceDay::Absent => AttendanceStatus::Absent,
        }
    }
}

/// Hours between two times of day, rounded to two decimals.
fn derive_working_hours(
    date: NaiveDate,
    check_in: NaiveTime,
    check_out: NaiveTime,
) -> EngineResult<Decimal> {
    let seconds = (check_out - check_in).num_seconds();
    if seconds < 0 {
        return Err(EngineError::InvalidAttendance {
            date,
            message: format!("check-out {} is before check-in {}", check_out, check_in),
        });
    }
    Ok((Decimal::from(seconds) / Decimal::from(3600))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

const TIME_FORMATS: [&str; 5] = [
    "%H:%M:%S",
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
];

/// Parses a time of day in 24-hour or `h:mm:ss am` form.
fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    // Locale formatting may put a (narrow) no-break space before am/pm.
    let normalized: String = value
        .trim()
        .chars()
        .map(|c| if c == '\u{202f}' || c == '\u{a0}' { ' ' } else { c })
        .collect();

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
}

/// The stored shape of an attendance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawAttendanceRecord {
    date: NaiveDate,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "checkInTime", skip_serializing_if = "Option::is_none")]
    check_in_time: Option<String>,
    #[serde(default, alias = "checkOutTime", skip_serializing_if = "Option::is_none")]
    check_out_time: Option<String>,
    #[serde(default, alias = "workingHours", skip_serializing_if = "Option::is_none")]
    working_hours: Option<Decimal>,
    #[serde(default, alias = "faceMatchScore", skip_serializing_if = "Option::is_none")]
    face_match_score: Option<f64>,
    #[serde(default, alias = "livenessVerified", skip_serializing_if = "Option::is_none")]
    liveness_verified: Option<bool>,
}

fn parse_field(date: NaiveDate, field: &str, value: Option<&str>) -> EngineResult<Option<NaiveTime>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse_time_of_day(v)
            .map(Some)
            .ok_or_else(|| EngineError::InvalidAttendance {
                date,
                message: format!("unrecognised {} '{}'", field, v),
            }),
    }
}

impl TryFrom<RawAttendanceRecord> for AttendanceRecord {
    type Error = EngineError;

    fn try_from(raw: RawAttendanceRecord) -> Result<Self, Self::Error> {
        let date = raw.date;
        let check_in = parse_field(date, "check_in_time", raw.check_in_time.as_deref())?;
        let check_out = parse_field(date, "check_out_time", raw.check_out_time.as_deref())?;

        let status = raw.status.as_deref().and_then(AttendanceStatus::from_stored);
        let day = match (status, check_in, check_out) {
            (Some(AttendanceStatus::Completed), Some(check_in), Some(check_out)) => {
                let working_hours = match raw.working_hours {
                    Some(hours) if hours < Decimal::ZERO => {
                        return Err(EngineError::InvalidAttendance {
                            date,
                            message: format!("negative working hours {}", hours),
                        });
                    }
                    Some(hours) if hours > MAX_WORKING_HOURS => {
                        return Err(EngineError::InvalidAttendance {
                            date,
                            message: format!("working hours {} exceed {}", hours, MAX_WORKING_HOURS),
                        });
                    }
                    Some(hours) => hours,
                    None => derive_working_hours(date, check_in, check_out)?,
                };
                AttendanceDay::Completed {
                    check_in,
                    check_out,
                    working_hours,
                }
            }
            (Some(AttendanceStatus::CheckedIn), check_in, _) | (_, check_in @ Some(_), None) => {
                AttendanceDay::CheckedIn { check_in }
            }
            (_, None, None) => AttendanceDay::Absent,
            (_, None, Some(_)) => {
                return Err(EngineError::InvalidAttendance {
                    date,
                    message: "check-out without check-in".to_string(),
                });
            }
            (_, Some(_), Some(_)) => {
                return Err(EngineError::InvalidAttendance {
                    date,
                    message: format!(
                        "status '{}' does not match a completed check-in and check-out",
                        raw.status.as_deref().unwrap_or("missing")
                    ),
                });
            }
        };

        Ok(AttendanceRecord {
            date,
            day,
            face_match_score: raw.face_match_score,
            liveness_verified: raw.liveness_verified,
        })
    }
}

impl From<AttendanceRecord> for RawAttendanceRecord {
    fn from(record: AttendanceRecord) -> Self {
        let status = record.status();
        let format = |t: NaiveTime| t.format("%H:%M:%S").to_string();
        let (check_in_time, check_out_time, working_hours) = match record.day {
            AttendanceDay::Completed {
                check_in,
                check_out,
                working_hours,
            } => (
                Some(format(check_in)),
                Some(format(check_out)),
                Some(working_hours),
            ),
            AttendanceDay::CheckedIn { check_in } => (check_in.map(format), None, None),
            AttendanceDay::Absent => (None, None, None),
        };

        RawAttendanceRecord {
            date: record.date,
            status: Some(status.to_string()),
            check_in_time,
            check_out_time,
            working_hours,
            face_match_score: record.face_match_score,
            liveness_verified: record.liveness_verified,
        }
    }
}

/// A technician's attendance records keyed by date.
///
/// At most one record may exist per date; construction rejects duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceLog {
    records: BTreeMap<NaiveDate, AttendanceRecord>,
}

impl AttendanceLog {
    /// Builds a log from records in any order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateAttendance`] if two records share a date,
    /// or [`EngineError::InvalidAttendance`] if a completed day reports hours
    /// outside `0..=24`.
    pub fn new<I>(records: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = AttendanceRecord>,
    {
        let mut map = BTreeMap::new();
        for record in records {
            let date = record.date;
            if let AttendanceDay::Completed { working_hours, .. } = record.day {
                if working_hours < Decimal::ZERO || working_hours > MAX_WORKING_HOURS {
                    return Err(EngineError::InvalidAttendance {
                        date,
                        message: format!(
                            "working hours {} outside 0 to {}",
                            working_hours, MAX_WORKING_HOURS
                        ),
                    });
                }
            }
            if map.insert(date, record).is_some() {
                return Err(EngineError::DuplicateAttendance { date });
            }
        }
        Ok(Self { records: map })
    }

    /// The record for `date`, if one exists.
    pub fn get(&self, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.records.get(&date)
    }

    /// True only if `date` has a completed check-in and check-out.
    ///
    /// Dates without a record count as not present.
    pub fn is_present(&self, date: NaiveDate) -> bool {
        self.get(date).is_some_and(AttendanceRecord::is_completed)
    }

    /// Records falling inside `month`, in date order.
    pub fn in_month(&self, month: YearMonth) -> impl Iterator<Item = &AttendanceRecord> {
        self.records
            .range(month.first_day()..=month.last_day())
            .map(|(_, record)| record)
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
