//! Headline valuation: enterprise value, value per share and margin of safety.

use derive_more::Display;
use ronda_traits::{Result, RondaError, Scenario, ValuationModel, stats};
use serde::{Deserialize, Serialize};

/// Whether intrinsic value sits above or below the market price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ValuationVerdict {
    /// Value per share above the current price.
    Undervalued,
    /// Value per share at or below the current price.
    Overvalued,
}

/// Valuation of one scenario.
///
/// Recomputed for every scenario, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Scenario the valuation was computed under.
    pub scenario: Scenario,
    /// Base free cash flow the projection started from.
    pub base_fcf: f64,
    /// Discounted projected cash flows plus discounted terminal value.
    pub enterprise_value: f64,
    /// Share count used for the per-share figure.
    pub shares_outstanding: f64,
    /// Market price the margin of safety is measured against.
    pub current_price: f64,
    /// Enterprise value divided by shares outstanding.
    pub value_per_share: f64,
    /// `(value_per_share - current_price) / current_price * 100`.
    pub margin_of_safety: f64,
}

impl ValuationResult {
    /// Undervalued when value per share exceeds the market price.
    pub fn verdict(&self) -> ValuationVerdict {
        if self.value_per_share > self.current_price {
            ValuationVerdict::Undervalued
        } else {
            ValuationVerdict::Overvalued
        }
    }
}

/// Percentage deviation of `value_per_share` from `current_price`.
///
/// # Errors
///
/// Returns [`RondaError::DivisionDomain`] if the price is not a positive
/// finite number.
pub fn margin_of_safety(value_per_share: f64, current_price: f64) -> Result<f64> {
    if !stats::is_positive_finite(current_price) {
        return Err(RondaError::DivisionDomain(format!(
            "current price must be positive, got {current_price}"
        )));
    }
    Ok((value_per_share - current_price) / current_price * 100.0)
}

/// Values one scenario end to end.
///
/// # Errors
///
/// - [`RondaError::InvalidScenario`] if the scenario has no finite valuation
/// - [`RondaError::DivisionDomain`] for a non-positive share count or price
/// - any other error raised by `model`
///
/// # Example
///
/// ```
/// use ronda_dcf::{TwoStageDcf, value_scenario};
/// use ronda_traits::Scenario;
///
/// let scenario = Scenario::new(0.08, 0.03, 0.10, 5);
/// let result = value_scenario(&TwoStageDcf::default(), 150.0, scenario, 10.0, 400.0).unwrap();
/// assert!(result.value_per_share > 400.0);
/// ```
pub fn value_scenario(
    model: &dyn ValuationModel,
    base_fcf: f64,
    scenario: Scenario,
    shares_outstanding: f64,
    current_price: f64,
) -> Result<ValuationResult> {
    let enterprise_value = model.enterprise_value(base_fcf, &scenario)?;
    if !stats::is_positive_finite(shares_outstanding) {
        return Err(RondaError::DivisionDomain(format!(
            "shares outstanding must be positive, got {shares_outstanding}"
        )));
    }
    let value_per_share = enterprise_value / shares_outstanding;
    let margin_of_safety = margin_of_safety(value_per_share, current_price)?;

    Ok(ValuationResult {
        scenario,
        base_fcf,
        enterprise_value,
        shares_outstanding,
        current_price,
        value_per_share,
        margin_of_safety,
    })
}
