//! Salary history aggregation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollResult, SalaryStats};

use super::payroll::round_money;

/// Aggregates the net salaries of previously computed payrolls.
///
/// Order does not matter. An empty slice yields all zeros.
///
/// # Errors
///
/// Returns [`EngineError::AmountOutOfRange`] if the total overflows.
pub fn compute_salary_stats(results: &[PayrollResult]) -> EngineResult<SalaryStats> {
    let net: Vec<Decimal> = results.iter().map(|r| r.net_salary).collect();
    net_salary_stats(&net)
}

/// Aggregates a list of net salaries.
///
/// # Errors
///
/// Returns [`EngineError::AmountOutOfRange`] if the total overflows.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::net_salary_stats;
/// use rust_decimal::Decimal;
///
/// let stats =
///     net_salary_stats(&[Decimal::new(100, 0), Decimal::new(200, 0), Decimal::new(400, 0)])
///         .unwrap();
/// assert_eq!(stats.total, Decimal::new(700, 0));
/// assert_eq!(stats.average, Decimal::new(23333, 2));
/// assert_eq!(stats.minimum, Decimal::new(100, 0));
/// assert_eq!(stats.maximum, Decimal::new(400, 0));
/// ```
pub fn net_salary_stats(net_salaries: &[Decimal]) -> EngineResult<SalaryStats> {
    let (Some(min), Some(max)) = (
        net_salaries.iter().min().copied(),
        net_salaries.iter().max().copied(),
    ) else {
        return Ok(SalaryStats::default());
    };

    let total = net_salaries
        .iter()
        .try_fold(Decimal::ZERO, |acc, net| acc.checked_add(*net))
        .ok_or_else(|| EngineError::AmountOutOfRange {
            context: "salary history total".to_string(),
        })?;
    let months = net_salaries.len() as u32;

    Ok(SalaryStats {
        average: round_money(total / Decimal::from(months)),
        minimum: round_money(min),
        maximum: round_money(max),
        total: round_money(total),
        months,
    })
}

/// Returns the `n` most recent results, newest first.
///
/// Results for the same month keep their relative order.
pub fn latest_months(results: &[PayrollResult], n: usize) -> Vec<PayrollResult> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| b.month.cmp(&a.month));
    sorted.truncate(n);
    sorted
}
