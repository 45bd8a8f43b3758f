//! Sensitivity grids over discount rate, terminal growth and growth rate.
//!
//! For every growth rate in the sweep, a table of value per share is built
//! with discount rates as rows and terminal growth rates as columns. Cells
//! where `terminal_growth >= discount_rate` have no finite valuation and are
//! marked invalid instead of aborting the grid.

use crate::{TwoStageDcf, labels::percent_labels};
use ndarray::Array2;
use ronda_traits::{Result, RondaError, Scenario, ValuationModel, stats};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Symmetric three-point sweep `[center - delta, center, center + delta]`.
///
/// A non-positive or non-finite `delta` collapses the sweep to `[center]`.
pub fn sweep(center: f64, delta: f64) -> Vec<f64> {
    if delta.is_finite() && delta > 0.0 {
        vec![center - delta, center, center + delta]
    } else {
        vec![center]
    }
}

/// The three swept dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweeps {
    /// Discount rates (table rows).
    pub discount_rates: Vec<f64>,
    /// Terminal growth rates (table columns).
    pub terminal_growths: Vec<f64>,
    /// Growth rates (one table each).
    pub growth_rates: Vec<f64>,
}

impl Sweeps {
    /// Three-point sweeps centred on a scenario's rates.
    pub fn around(
        center: &Scenario,
        delta_discount: f64,
        delta_terminal: f64,
        delta_growth: f64,
    ) -> Self {
        Self {
            discount_rates: sweep(center.discount_rate, delta_discount),
            terminal_growths: sweep(center.terminal_growth, delta_terminal),
            growth_rates: sweep(center.growth_rate, delta_growth),
        }
    }

    /// Total number of cells across all tables.
    pub fn cell_count(&self) -> usize {
        self.discount_rates.len() * self.terminal_growths.len() * self.growth_rates.len()
    }
}

/// Configuration for grid rounding and labelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityConfig {
    /// Decimal places value per share is rounded to (default: 2)
    pub value_decimals: u32,

    /// Minimum decimals of discount-rate labels (default: 0, e.g. `"8%"`)
    pub discount_label_decimals: usize,

    /// Minimum decimals of terminal-growth labels (default: 1, e.g. `"3.0%"`)
    pub terminal_label_decimals: usize,

    /// Minimum decimals of growth-rate labels (default: 1, e.g. `"10.0%"`)
    pub growth_label_decimals: usize,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            value_decimals: 2,
            discount_label_decimals: 0,
            terminal_label_decimals: 1,
            growth_label_decimals: 1,
        }
    }
}

/// A grid cell looked up by label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridCell {
    /// Rounded value per share.
    Value(f64),
    /// Terminal growth at or above the discount rate.
    Invalid,
}

/// Value per share across discount rates and terminal growth rates, for one
/// growth rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityTable {
    /// Growth rate this table was computed with.
    pub growth_rate: f64,
    /// Label of the growth rate, e.g. `"10.0%"`.
    pub growth_label: String,
    /// Row values.
    pub discount_rates: Vec<f64>,
    /// Row labels.
    pub discount_labels: Vec<String>,
    /// Column values.
    pub terminal_growths: Vec<f64>,
    /// Column labels.
    pub terminal_labels: Vec<String>,
    /// `values[[row, col]]`; `None` marks an invalid scenario.
    pub values: Array2<Option<f64>>,
}

impl SensitivityTable {
    /// Looks up a cell by its row and column labels.
    ///
    /// Returns `None` when either label is not part of the table.
    pub fn cell(&self, discount_label: &str, terminal_label: &str) -> Option<GridCell> {
        let row = self.discount_labels.iter().position(|l| l == discount_label)?;
        let col = self.terminal_labels.iter().position(|l| l == terminal_label)?;
        Some(match self.values[[row, col]] {
            Some(v) => GridCell::Value(v),
            None => GridCell::Invalid,
        })
    }

    /// Number of cells marked invalid.
    pub fn invalid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Smallest and largest valid value, if any cell is valid.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// A family of [`SensitivityTable`]s, one per swept growth rate, in sweep order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityGrid {
    /// Market price the grid's values can be compared against.
    pub current_price: f64,
    /// Tables in growth-sweep order.
    pub tables: Vec<SensitivityTable>,
}

impl SensitivityGrid {
    /// Looks up a table by growth-rate label.
    pub fn get(&self, growth_label: &str) -> Option<&SensitivityTable> {
        self.tables.iter().find(|t| t.growth_label == growth_label)
    }

    /// Growth-rate labels in sweep order.
    pub fn growth_labels(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.growth_label.as_str()).collect()
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the grid holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterates over the tables.
    pub fn iter(&self) -> std::slice::Iter<'_, SensitivityTable> {
        self.tables.iter()
    }
}

/// Builds sensitivity grids with a given valuation model.
///
/// # Example
///
/// ```
/// use ronda_dcf::{SensitivityConfig, SensitivityGridBuilder, Sweeps, TwoStageDcf};
///
/// let model = TwoStageDcf::default();
/// let builder = SensitivityGridBuilder::new(&model, SensitivityConfig::default());
/// let sweeps = Sweeps {
///     discount_rates: vec![0.05, 0.08],
///     terminal_growths: vec![0.03, 0.08],
///     growth_rates: vec![0.10],
/// };
///
/// let grid = builder.build(150.0, 10.0, &sweeps, 5, 400.0).unwrap();
/// assert_eq!(grid.len(), 1);
/// assert_eq!(grid.tables[0].invalid_count(), 2);
/// ```
pub struct SensitivityGridBuilder<'a> {
    model: &'a dyn ValuationModel,
    config: SensitivityConfig,
}

impl fmt::Debug for SensitivityGridBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensitivityGridBuilder")
            .field("model", &self.model.name())
            .field("config", &self.config)
            .finish()
    }
}

impl<'a> SensitivityGridBuilder<'a> {
    /// Create a builder around `model`.
    #[must_use]
    pub const fn new(model: &'a dyn ValuationModel, config: SensitivityConfig) -> Self {
        Self { model, config }
    }

    /// Sweeps every (growth, discount, terminal) combination.
    ///
    /// `current_price` does not affect any cell; it is carried on the grid
    /// for consumers that compare cells to the market.
    ///
    /// # Errors
    ///
    /// - [`RondaError::DivisionDomain`] if `shares_outstanding` is not positive
    /// - [`RondaError::InvalidScenario`] for a projection horizon of zero or a
    ///   non-finite swept value
    /// - any error the model raises for a cell with `discount_rate > terminal_growth`
    pub fn build(
        &self,
        last_fcf: f64,
        shares_outstanding: f64,
        sweeps: &Sweeps,
        projection_years: u32,
        current_price: f64,
    ) -> Result<SensitivityGrid> {
        if !stats::is_positive_finite(shares_outstanding) {
            return Err(RondaError::DivisionDomain(format!(
                "shares outstanding must be positive, got {shares_outstanding}"
            )));
        }

        if projection_years == 0 || projection_years > Scenario::MAX_PROJECTION_YEARS {
            return Err(RondaError::InvalidScenario(format!(
                "projection horizon must be between 1 and {} years, got {projection_years}",
                Scenario::MAX_PROJECTION_YEARS
            )));
        }
        let swept = [
            ("discount rate", &sweeps.discount_rates),
            ("terminal growth", &sweeps.terminal_growths),
            ("growth rate", &sweeps.growth_rates),
        ];
        for (name, values) in swept {
            if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                return Err(RondaError::InvalidScenario(format!(
                    "swept {name} must be finite, got {bad}"
                )));
            }
        }

        let discount_labels =
            percent_labels(&sweeps.discount_rates, self.config.discount_label_decimals);
        let terminal_labels =
            percent_labels(&sweeps.terminal_growths, self.config.terminal_label_decimals);
        let growth_labels = percent_labels(&sweeps.growth_rates, self.config.growth_label_decimals);

        let shape = (sweeps.discount_rates.len(), sweeps.terminal_growths.len());
        let mut tables = Vec::with_capacity(sweeps.growth_rates.len());
        let mut failure = None;

        for (&growth_rate, growth_label) in sweeps.growth_rates.iter().zip(growth_labels) {
            let values = Array2::from_shape_fn(shape, |(row, col)| {
                let scenario = Scenario::new(
                    sweeps.discount_rates[row],
                    sweeps.terminal_growths[col],
                    growth_rate,
                    projection_years,
                );
                if !scenario.has_finite_terminal() {
                    return None;
                }
                match self
                    .model
                    .value_per_share(last_fcf, &scenario, shares_outstanding)
                {
                    Ok(v) => Some(stats::round_to(v, self.config.value_decimals)),
                    Err(e) => {
                        if failure.is_none() {
                            failure = Some(e);
                        }
                        None
                    }
                }
            });

            if let Some(e) = failure.take() {
                return Err(e);
            }

            let table = SensitivityTable {
                growth_rate,
                growth_label,
                discount_rates: sweeps.discount_rates.clone(),
                discount_labels: discount_labels.clone(),
                terminal_growths: sweeps.terminal_growths.clone(),
                terminal_labels: terminal_labels.clone(),
                values,
            };
            debug!(
                growth = %table.growth_label,
                invalid = table.invalid_count(),
                model = self.model.name(),
                "built sensitivity table"
            );
            tables.push(table);
        }

        Ok(SensitivityGrid {
            current_price,
            tables,
        })
    }
}

/// Builds a sensitivity grid with the two-stage DCF model and default settings.
///
/// # Errors
///
/// See [`SensitivityGridBuilder::build`].
pub fn build_sensitivity_grid(
    last_fcf: f64,
    shares_outstanding: f64,
    sweeps: &Sweeps,
    projection_years: u32,
    current_price: f64,
) -> Result<SensitivityGrid> {
    let model = TwoStageDcf::default();
    SensitivityGridBuilder::new(&model, SensitivityConfig::default()).build(
        last_fcf,
        shares_outstanding,
        sweeps,
        projection_years,
        current_price,
    )
}
