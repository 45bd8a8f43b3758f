//! Year-by-year projection and historical free-cash-flow tables.

use crate::dcf::{discount_cash_flows, projected_cash_flows};
use chrono::Datelike;
use ronda_traits::{FcfSeries, Scenario};
use serde::{Deserialize, Serialize};

/// One year of the explicit projection window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Calendar year.
    pub year: i32,
    /// Undiscounted projected free cash flow.
    pub projected_fcf: f64,
    /// Projected free cash flow discounted to today.
    pub discounted_fcf: f64,
}

/// One reported year of free cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalFcfRow {
    /// Fiscal year of the period end.
    pub year: i32,
    /// Reported or derived free cash flow.
    pub free_cash_flow: f64,
}

/// Projects `last_fcf` over the scenario's window.
///
/// Rows cover `base_year + 1 ..= base_year + projection_years` and use the
/// same per-year formulas as the DCF model, without the terminal value.
///
/// ```
/// use ronda_dcf::build_projection_table;
/// use ronda_traits::Scenario;
///
/// let rows = build_projection_table(100.0, &Scenario::new(0.08, 0.03, 0.10, 3), 2024);
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[0].year, 2025);
/// assert!((rows[0].projected_fcf - 110.0).abs() < 1e-9);
/// ```
pub fn build_projection_table(
    last_fcf: f64,
    scenario: &Scenario,
    base_year: i32,
) -> Vec<ProjectionRow> {
    let projected = projected_cash_flows(last_fcf, scenario.growth_rate, scenario.projection_years);
    let discounted = discount_cash_flows(&projected, scenario.discount_rate);

    projected
        .iter()
        .zip(discounted.iter())
        .zip(1..)
        .map(|((&projected_fcf, &discounted_fcf), offset)| ProjectionRow {
            year: base_year + offset,
            projected_fcf,
            discounted_fcf,
        })
        .collect()
}

/// One row per observation of the series, keyed by year.
pub fn build_historical_table(series: &FcfSeries) -> Vec<HistoricalFcfRow> {
    series
        .iter()
        .map(|p| HistoricalFcfRow {
            year: p.date.year(),
            free_cash_flow: p.value,
        })
        .collect()
}
