//! Cash-flow statement container and line-item alias resolution.
//!
//! Providers label the same statement line differently ("Operating Cash Flow"
//! versus "Total Cash From Operating Activities"). Each concept the valuation
//! needs is a [`LineItem`] with an ordered list of candidate labels, and
//! [`CashFlowStatement::resolve`] returns the first label present.

use crate::{Date, Result, RondaError};
use derive_more::Display;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Name of the period-end date column.
pub const DATE_COLUMN: &str = "date";

/// Days between 0001-01-01 (CE) and the Unix epoch, the origin of Polars dates.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// A statement concept the valuation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum LineItem {
    /// Reported free cash flow.
    #[display("free cash flow")]
    FreeCashFlow,
    /// Cash generated by operating activities.
    #[display("operating cash flow")]
    OperatingCashFlow,
    /// Capital expenditure (purchases of property, plant and equipment).
    #[display("capital expenditure")]
    CapitalExpenditure,
}

impl LineItem {
    /// Candidate column labels, in priority order.
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::FreeCashFlow => &["Free Cash Flow"],
            Self::OperatingCashFlow => &[
                "Operating Cash Flow",
                "Total Cash From Operating Activities",
            ],
            Self::CapitalExpenditure => &[
                "Capital Expenditure",
                "Investments In Property Plant And Equipment",
            ],
        }
    }
}

/// A cash-flow statement.
///
/// `CashFlowStatement` wraps a Polars DataFrame with one row per reporting
/// period.
///
/// # Expected Schema
///
/// - `date`: period-end date (`Date` dtype)
/// - one column per line item, named with the provider's label, e.g.
///   `"Free Cash Flow"` or `"Capital Expenditure"`. Any dtype castable to
///   `Float64` is accepted; values that fail the cast read as missing.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use polars::prelude::*;
/// use ronda_traits::{CashFlowStatement, LineItem};
///
/// let d = |y| NaiveDate::from_ymd_opt(y, 12, 31).unwrap();
/// let df = df! {
///     "date" => [d(2022), d(2023)],
///     "Free Cash Flow" => [100.0, 120.0],
/// }
/// .unwrap();
///
/// let statement = CashFlowStatement::new(df);
/// assert!(statement.resolve(LineItem::FreeCashFlow).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct CashFlowStatement {
    data: DataFrame,
}

impl CashFlowStatement {
    /// Creates a statement from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Builds a statement from period dates and labelled value columns.
    ///
    /// # Errors
    ///
    /// Returns an error if a column length differs from the number of dates.
    pub fn from_line_items(dates: &[Date], items: &[(&str, &[Option<f64>])]) -> Result<Self> {
        let mut columns = Vec::with_capacity(items.len() + 1);
        columns.push(Column::new(DATE_COLUMN.into(), dates));

        for (label, values) in items {
            if values.len() != dates.len() {
                return Err(RondaError::InvalidData(format!(
                    "line item '{label}' has {} values for {} periods",
                    values.len(),
                    dates.len()
                )));
            }
            columns.push(Column::new((*label).into(), *values));
        }

        Ok(Self::new(DataFrame::new(columns)?))
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Number of reporting periods.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the statement holds no periods.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Finds the first present alias of `item`.
    ///
    /// Returns the matched label with its column, or `None` if no alias exists.
    pub fn resolve(&self, item: LineItem) -> Option<(&'static str, &Column)> {
        item.aliases()
            .iter()
            .find_map(|label| self.data.column(label).ok().map(|col| (*label, col)))
    }

    /// Period-end dates; a null date reads as `None`.
    ///
    /// # Errors
    ///
    /// - [`RondaError::MissingData`] if there is no `date` column
    /// - [`RondaError::InvalidData`] if the column does not have `Date` dtype
    pub fn dates(&self) -> Result<Vec<Option<Date>>> {
        let column = self.data.column(DATE_COLUMN).map_err(|_| {
            RondaError::MissingData(format!("statement has no '{DATE_COLUMN}' column"))
        })?;

        let dates = column.as_materialized_series().date().map_err(|_| {
            RondaError::InvalidData(format!(
                "column '{DATE_COLUMN}' must have Date dtype, found {}",
                column.dtype()
            ))
        })?;

        Ok(dates
            .into_iter()
            .map(|d: Option<i32>| {
                d.and_then(|d| Date::from_num_days_from_ce_opt(d + UNIX_EPOCH_DAYS_FROM_CE))
            })
            .collect())
    }

    /// Numeric values of a column, coerced to `f64`.
    ///
    /// Nulls, values that fail the cast and non-finite numbers read as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the column cannot be cast to `Float64` at all.
    pub fn numeric_values(column: &Column) -> Result<Vec<Option<f64>>> {
        let cast = column.as_materialized_series().cast(&DataType::Float64)?;
        Ok(cast
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect())
    }
}

impl From<DataFrame> for CashFlowStatement {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for CashFlowStatement {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32) -> Date {
        Date::from_ymd_opt(year, 12, 31).unwrap()
    }

    #[test]
    fn test_aliases_priority() {
        assert_eq!(LineItem::FreeCashFlow.aliases(), &["Free Cash Flow"]);
        assert_eq!(
            LineItem::OperatingCashFlow.aliases()[0],
            "Operating Cash Flow"
        );
        assert_eq!(
            LineItem::CapitalExpenditure.aliases()[1],
            "Investments In Property Plant And Equipment"
        );
        assert_eq!(LineItem::CapitalExpenditure.to_string(), "capital expenditure");
    }

    #[test]
    fn test_resolve_prefers_first_alias() {
        let df = df! {
            "date" => [d(2022), d(2023)],
            "Total Cash From Operating Activities" => [1.0, 2.0],
            "Operating Cash Flow" => [10.0, 20.0],
        }
        .unwrap();
        let statement = CashFlowStatement::new(df);

        let (label, _) = statement.resolve(LineItem::OperatingCashFlow).unwrap();
        assert_eq!(label, "Operating Cash Flow");
        assert!(statement.resolve(LineItem::FreeCashFlow).is_none());
    }

    #[test]
    fn test_resolve_falls_back() {
        let df = df! {
            "date" => [d(2023)],
            "Investments In Property Plant And Equipment" => [-5.0],
        }
        .unwrap();
        let statement = CashFlowStatement::from(df);

        let (label, col) = statement.resolve(LineItem::CapitalExpenditure).unwrap();
        assert_eq!(label, "Investments In Property Plant And Equipment");
        assert_eq!(
            CashFlowStatement::numeric_values(col).unwrap(),
            vec![Some(-5.0)]
        );
    }

    #[test]
    fn test_dates() {
        let statement = CashFlowStatement::from_line_items(
            &[d(2021), d(2022)],
            &[("Free Cash Flow", &[Some(1.0), None])],
        )
        .unwrap();
        assert_eq!(statement.len(), 2);
        assert!(statement.has_column("Free Cash Flow"));
        assert_eq!(statement.dates().unwrap(), vec![Some(d(2021)), Some(d(2022))]);
    }

    #[test]
    fn test_missing_date_column() {
        let df = df! { "Free Cash Flow" => [1.0, 2.0] }.unwrap();
        let statement = CashFlowStatement::new(df);
        assert!(matches!(statement.dates(), Err(RondaError::MissingData(_))));
    }

    #[test]
    fn test_date_column_wrong_dtype() {
        let df = df! { "date" => ["2023-12-31"], "Free Cash Flow" => [1.0] }.unwrap();
        let statement = CashFlowStatement::new(df);
        assert!(matches!(statement.dates(), Err(RondaError::InvalidData(_))));
    }

    #[test]
    fn test_numeric_values_coerces_strings() {
        let df = df! {
            "date" => [d(2021), d(2022), d(2023)],
            "Free Cash Flow" => ["100", "n/a", "150.5"],
        }
        .unwrap();
        let statement = CashFlowStatement::new(df);
        let (_, col) = statement.resolve(LineItem::FreeCashFlow).unwrap();

        let values = CashFlowStatement::numeric_values(col).unwrap();
        assert_eq!(values, vec![Some(100.0), None, Some(150.5)]);
    }

    #[test]
    fn test_numeric_values_drops_nan() {
        let col = Column::new("x".into(), [Some(1.0), Some(f64::NAN), None]);
        let values = CashFlowStatement::numeric_values(&col).unwrap();
        assert_eq!(values, vec![Some(1.0), None, None]);
    }

    #[test]
    fn test_from_line_items_length_mismatch() {
        let result =
            CashFlowStatement::from_line_items(&[d(2022), d(2023)], &[("Free Cash Flow", &[Some(1.0)])]);
        assert!(matches!(result, Err(RondaError::InvalidData(_))));
    }
}
