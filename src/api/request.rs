//! Request types for the payroll engine API.
//!
//! Month strings are kept raw here and parsed in the handlers, so a
//! malformed month is reported as `INVALID_MONTH` rather than a JSON error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, PayrollResult, SalaryConfiguration};

/// Request body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The technician being paid.
    #[serde(alias = "technicianId")]
    pub technician_id: String,
    /// The month to pay, as `YYYY-MM`.
    pub month: String,
    /// Salary to use instead of the configured one.
    #[serde(default)]
    pub salary: Option<SalaryConfiguration>,
    /// The technician's attendance records. May include the days just
    /// outside the month that pair with its edge Thursdays.
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
}

/// Request body for the `/attendance-stats` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceStatsRequest {
    /// The month to summarise, as `YYYY-MM`.
    pub month: String,
    /// When set and `expected_daily_hours` is not, the technician's
    /// configured expected hours are used.
    #[serde(default, alias = "technicianId")]
    pub technician_id: Option<String>,
    /// Expected working hours per day.
    #[serde(default, alias = "expectedDailyHours")]
    pub expected_daily_hours: Option<Decimal>,
    /// The technician's attendance records.
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
}

/// Request body for the `/salary-stats` endpoint.
///
/// Exactly one of `results` and `net_salaries` should be non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryStatsRequest {
    /// Previously computed payrolls, in any order.
    #[serde(default)]
    pub results: Vec<PayrollResult>,
    /// Bare net salaries, most recent first.
    #[serde(default, alias = "netSalaries")]
    pub net_salaries: Vec<Decimal>,
    /// How many of the most recent months to aggregate.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceDay;

    #[test]
    fn test_payroll_request_deserialization() {
        let json = r#"{
            "technicianId": "tech_001",
            "month": "2024-02",
            "records": [
                {"date": "2024-02-05", "status": "completed", "checkInTime": "09:00:00", "checkOutTime": "17:00:00"},
                {"date": "2024-02-06", "status": "checked-in", "checkInTime": "09:10:00"}
            ]
        }"#;
        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.technician_id, "tech_001");
        assert_eq!(request.month, "2024-02");
        assert!(request.salary.is_none());
        assert_eq!(request.records.len(), 2);
        assert!(matches!(request.records[1].day, AttendanceDay::CheckedIn { .. }));
    }

    #[test]
    fn test_payroll_request_with_salary_override() {
        let json = r#"{
            "technician_id": "tech_009",
            "month": "2024-03",
            "salary": {"monthly_salary": "25000", "overtime_rate": "40"}
        }"#;
        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        let salary = request.salary.unwrap();
        assert_eq!(salary.monthly_salary, Decimal::new(25000, 0));
        assert_eq!(salary.expected_daily_hours, Decimal::new(8, 0));
        assert!(request.records.is_empty());
    }

    #[test]
    fn test_salary_stats_request_defaults() {
        let request: SalaryStatsRequest =
            serde_json::from_str(r#"{"netSalaries": ["100", "200.5"]}"#).unwrap();
        assert!(request.results.is_empty());
        assert_eq!(request.net_salaries.len(), 2);
        assert!(request.limit.is_none());
    }
}
