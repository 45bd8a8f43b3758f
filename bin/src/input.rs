//! Company file loading for the Ronda CLI.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame};
use ronda_analysis::CompanyInputs;
use ronda_traits::{CashFlowStatement, DATE_COLUMN, RondaError};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{collections::BTreeSet, fs, path::Path};
use tracing::{debug, warn};

/// On-disk company description.
#[derive(Debug, Deserialize)]
pub(crate) struct CompanyFile {
    pub(crate) symbol: String,
    #[serde(default)]
    pub(crate) shares_outstanding: Option<f64>,
    #[serde(default)]
    pub(crate) current_price: Option<f64>,
    #[serde(default)]
    pub(crate) revenue_growth: Option<f64>,
    pub(crate) cash_flow: Vec<Map<String, Value>>,
}

impl CompanyFile {
    /// Parse a company file from JSON text.
    pub(crate) fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid company file")
    }

    /// Convert into analysis inputs.
    ///
    /// A missing or null share count or price is a [`RondaError::DivisionDomain`].
    pub(crate) fn into_inputs(self) -> Result<CompanyInputs> {
        let shares_outstanding = require_divisor("shares_outstanding", self.shares_outstanding)?;
        let current_price = require_divisor("current_price", self.current_price)?;
        let statement = statement_from_rows(&self.cash_flow)?;
        Ok(CompanyInputs {
            symbol: self.symbol,
            statement,
            shares_outstanding,
            current_price,
            revenue_growth: self.revenue_growth,
        })
    }
}

fn require_divisor(field: &str, value: Option<f64>) -> Result<f64> {
    value.ok_or_else(|| RondaError::DivisionDomain(format!("{field} is missing")).into())
}

/// Load a company file from disk.
pub(crate) fn load_company(path: &Path) -> Result<CompanyInputs> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let inputs = CompanyFile::from_json(&text)?.into_inputs()?;
    debug!(
        symbol = %inputs.symbol,
        periods = inputs.statement.len(),
        "loaded company file"
    );
    Ok(inputs)
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{date_str}', expected YYYY-MM-DD"))
}

/// Build a statement from JSON rows keyed by line-item label.
///
/// A label whose values are all numbers becomes a `Float64` column. A label
/// with any string value becomes a string column and is coerced later by the
/// normalizer. Other JSON values read as null.
fn statement_from_rows(rows: &[Map<String, Value>]) -> Result<CashFlowStatement> {
    let dates = rows
        .iter()
        .enumerate()
        .map(|(i, row)| match row.get(DATE_COLUMN) {
            Some(Value::String(s)) => parse_date(s),
            _ => bail!("cash_flow row {i} has no '{DATE_COLUMN}' string"),
        })
        .collect::<Result<Vec<_>>>()?;

    let labels: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .filter(|key| *key != DATE_COLUMN)
        .collect();

    let mut columns = Vec::with_capacity(labels.len() + 1);
    columns.push(Column::new(DATE_COLUMN.into(), dates));

    for label in labels {
        let cells: Vec<Option<&Value>> = rows.iter().map(|row| row.get(label)).collect();
        let has_text = cells.iter().flatten().any(|v| v.is_string());

        let column = if has_text {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| match cell {
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(Value::Number(n)) => Some(n.to_string()),
                    _ => None,
                })
                .collect();
            Column::new(label.into(), values)
        } else {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Some(Value::Number(n)) => n.as_f64(),
                    Some(Value::Null) | None => None,
                    Some(other) => {
                        warn!(label, value = %other, "ignoring non-numeric line item value");
                        None
                    }
                })
                .collect();
            Column::new(label.into(), values)
        };
        columns.push(column);
    }

    let data = DataFrame::new(columns).context("Failed to build cash-flow statement")?;
    Ok(CashFlowStatement::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Datelike;
    use ronda_traits::LineItem;

    const FILE: &str = r#"{
        "symbol": "ACME",
        "shares_outstanding": 10,
        "current_price": 400.0,
        "revenue_growth": 0.12,
        "cash_flow": [
            { "date": "2021-12-31", "Free Cash Flow": 100.0, "Capital Expenditure": -20 },
            { "date": "2022-12-31", "Free Cash Flow": "120", "Capital Expenditure": null },
            { "date": "2023-12-31", "Free Cash Flow": 150.0 }
        ]
    }"#;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("15/01/2024").is_err());
    }

    #[test]
    fn test_load_company_file() {
        let inputs = CompanyFile::from_json(FILE).unwrap().into_inputs().unwrap();

        assert_eq!(inputs.symbol, "ACME");
        assert_relative_eq!(inputs.shares_outstanding, 10.0);
        assert_eq!(inputs.revenue_growth, Some(0.12));
        assert_eq!(inputs.statement.len(), 3);
        assert!(inputs.statement.has_column(DATE_COLUMN));
        assert!(inputs.statement.has_column("Capital Expenditure"));
    }

    #[test]
    fn test_string_values_are_coerced() {
        let inputs = CompanyFile::from_json(FILE).unwrap().into_inputs().unwrap();
        let (label, column) = inputs.statement.resolve(LineItem::FreeCashFlow).unwrap();
        assert_eq!(label, "Free Cash Flow");

        let values = CashFlowStatement::numeric_values(column).unwrap();
        assert_eq!(values, vec![Some(100.0), Some(120.0), Some(150.0)]);
    }

    #[test]
    fn test_missing_cells_are_null() {
        let inputs = CompanyFile::from_json(FILE).unwrap().into_inputs().unwrap();
        let (_, column) = inputs.statement.resolve(LineItem::CapitalExpenditure).unwrap();
        let values = CashFlowStatement::numeric_values(column).unwrap();
        assert_eq!(values, vec![Some(-20.0), None, None]);
    }

    #[test]
    fn test_revenue_growth_optional() {
        let text = r#"{
            "symbol": "X", "shares_outstanding": 1, "current_price": 1,
            "cash_flow": []
        }"#;
        let file = CompanyFile::from_json(text).unwrap();
        assert!(file.revenue_growth.is_none());
    }

    fn division_domain(text: &str) -> bool {
        let err = CompanyFile::from_json(text).unwrap().into_inputs().unwrap_err();
        matches!(
            err.downcast_ref::<RondaError>(),
            Some(RondaError::DivisionDomain(_))
        )
    }

    #[test]
    fn test_missing_shares_is_division_domain() {
        assert!(division_domain(
            r#"{"symbol": "X", "current_price": 1, "cash_flow": []}"#
        ));
        assert!(division_domain(
            r#"{"symbol": "X", "shares_outstanding": null, "current_price": 1, "cash_flow": []}"#
        ));
    }

    #[test]
    fn test_missing_price_is_division_domain() {
        assert!(division_domain(
            r#"{"symbol": "X", "shares_outstanding": 1, "cash_flow": []}"#
        ));
    }

    #[test]
    fn test_row_without_date_rejected() {
        let text = r#"{
            "symbol": "X", "shares_outstanding": 1, "current_price": 1,
            "cash_flow": [ { "Free Cash Flow": 1.0 } ]
        }"#;
        let result = CompanyFile::from_json(text).unwrap().into_inputs();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_company_missing_file() {
        let result = load_company(Path::new("/nonexistent/company.json"));
        assert!(result.is_err());
    }
}
