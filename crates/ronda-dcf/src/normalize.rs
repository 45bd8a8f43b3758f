//! Free-cash-flow extraction and normalization.
//!
//! Turns a raw cash-flow statement into a [`FcfSeries`]:
//! 1. Use the reported free-cash-flow line if present
//! 2. Otherwise derive it as operating cash flow less capital expenditure
//! 3. Coerce to numbers and drop missing values
//! 4. Sort by period date
//! 5. Keep strictly positive values
//!
//! At least two positive observations must survive.

use ronda_traits::{
    CashFlowStatement, FcfPoint, FcfSeries, LineItem, Result, RondaError,
};
use tracing::debug;

/// Extracts a clean free-cash-flow series from a cash-flow statement.
///
/// Capital expenditure is subtracted by magnitude, so statements that report
/// it as a negative outflow and those that report a positive amount give the
/// same result.
///
/// # Errors
///
/// - [`RondaError::MissingData`] if neither free cash flow nor both of its
///   operands can be found, or the statement has no date column
/// - [`RondaError::InvalidData`] if two usable observations share a date
/// - [`RondaError::InsufficientData`] if fewer than two positive values remain
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use ronda_dcf::extract_free_cash_flow;
/// use ronda_traits::CashFlowStatement;
///
/// let d = |y| NaiveDate::from_ymd_opt(y, 12, 31).unwrap();
/// let statement = CashFlowStatement::from_line_items(
///     &[d(2021), d(2022), d(2023)],
///     &[("Free Cash Flow", &[Some(100.0), Some(120.0), Some(150.0)])],
/// )?;
///
/// let series = extract_free_cash_flow(&statement)?;
/// assert_eq!(series.last_value(), 150.0);
/// # Ok::<(), ronda_traits::RondaError>(())
/// ```
pub fn extract_free_cash_flow(statement: &CashFlowStatement) -> Result<FcfSeries> {
    let raw = raw_free_cash_flow(statement)?;
    let dates = statement.dates()?;

    let mut points: Vec<FcfPoint> = dates
        .into_iter()
        .zip(raw)
        .filter_map(|(date, value)| Some(FcfPoint::new(date?, value?)))
        .collect();
    let numeric = points.len();

    points.sort_by_key(|p| p.date);

    if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(RondaError::InvalidData(format!(
            "statement reports free cash flow twice for period {}",
            pair[0].date
        )));
    }

    points.retain(|p| p.value > 0.0);

    debug!(
        periods = statement.len(),
        numeric,
        positive = points.len(),
        "normalized free cash flow"
    );

    if points.len() < FcfSeries::MIN_POINTS {
        return Err(RondaError::InsufficientData(format!(
            "need at least {} positive free cash flow observations, found {}",
            FcfSeries::MIN_POINTS,
            points.len()
        )));
    }

    FcfSeries::new(points)
}

/// Per-period free cash flow in statement row order, before any filtering.
fn raw_free_cash_flow(statement: &CashFlowStatement) -> Result<Vec<Option<f64>>> {
    if let Some((label, column)) = statement.resolve(LineItem::FreeCashFlow) {
        debug!(label, "using reported free cash flow");
        return CashFlowStatement::numeric_values(column);
    }

    let (ops_label, ops) = require(statement, LineItem::OperatingCashFlow)?;
    let (capex_label, capex) = require(statement, LineItem::CapitalExpenditure)?;
    debug!(
        operating = ops_label,
        capex = capex_label,
        "deriving free cash flow"
    );

    let ops = CashFlowStatement::numeric_values(ops)?;
    let capex = CashFlowStatement::numeric_values(capex)?;

    Ok(ops
        .into_iter()
        .zip(capex)
        .map(|(ops, capex)| Some(ops? - capex?.abs()))
        .collect())
}

fn require(
    statement: &CashFlowStatement,
    item: LineItem,
) -> Result<(&'static str, &polars::prelude::Column)> {
    statement.resolve(item).ok_or_else(|| {
        RondaError::MissingData(format!(
            "cannot derive free cash flow: no {item} line (tried {})",
            item.aliases().join(", ")
        ))
    })
}
