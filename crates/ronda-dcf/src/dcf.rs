//! Two-stage discounted-cash-flow model.
//!
//! Stage one projects the base free cash flow over an explicit window:
//!
//! ```text
//! projected[y]  = fcf * (1 + g)^y
//! discounted[y] = projected[y] / (1 + r)^y        for y in 1..=n
//! ```
//!
//! Stage two is a Gordon-growth perpetuity anchored at the end of the window:
//!
//! ```text
//! terminal_value = fcf * (1 + g)^n * (1 + tg) / (r - tg)
//! enterprise     = sum(discounted) + terminal_value / (1 + r)^n
//! ```

use ndarray::Array1;
use ronda_traits::{Result, RondaError, Scenario, ValuationModel, stats};

/// Year count as a `powi` exponent, saturating at `i32::MAX`.
fn exponent(years: u32) -> i32 {
    i32::try_from(years).unwrap_or(i32::MAX)
}

/// Undiscounted projected cash flows for years `1..=n`.
pub fn projected_cash_flows(last_fcf: f64, growth_rate: f64, years: u32) -> Array1<f64> {
    (1..=exponent(years))
        .map(|y| last_fcf * (1.0 + growth_rate).powi(y))
        .collect()
}

/// Discounts a projection made by [`projected_cash_flows`] back to today.
pub fn discount_cash_flows(projected: &Array1<f64>, discount_rate: f64) -> Array1<f64> {
    projected
        .iter()
        .zip(1..)
        .map(|(cf, y)| cf / (1.0 + discount_rate).powi(y))
        .collect()
}

/// Raw two-stage DCF enterprise value.
///
/// The formula is evaluated as-is: a scenario with
/// `discount_rate <= terminal_growth` is not clamped and yields a negative or
/// infinite number. Use [`TwoStageDcf`] to reject such scenarios.
///
/// # Example
///
/// ```
/// use ronda_dcf::dcf_value;
/// use ronda_traits::Scenario;
///
/// // One year, no growth: 100/1.1 + 100 * 1.02 / 0.08 / 1.1
/// let ev = dcf_value(100.0, &Scenario::new(0.10, 0.02, 0.0, 1));
/// assert!((ev - 1250.0).abs() < 1e-9);
/// ```
pub fn dcf_value(last_fcf: f64, scenario: &Scenario) -> f64 {
    let Scenario {
        discount_rate,
        terminal_growth,
        growth_rate,
        projection_years,
    } = *scenario;

    let projected = projected_cash_flows(last_fcf, growth_rate, projection_years);
    let discounted = discount_cash_flows(&projected, discount_rate);

    let n = exponent(projection_years);
    let terminal_fcf = last_fcf * (1.0 + growth_rate).powi(n);
    let terminal_value = terminal_fcf * (1.0 + terminal_growth) / (discount_rate - terminal_growth);
    let terminal_discounted = terminal_value / (1.0 + discount_rate).powi(n);

    discounted.sum() + terminal_discounted
}

/// Two-stage DCF as a [`ValuationModel`].
///
/// Unlike [`dcf_value`], this validates the scenario and fails with
/// [`RondaError::InvalidScenario`] when the perpetuity is undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoStageDcf;

impl TwoStageDcf {
    /// Create a new model.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ValuationModel for TwoStageDcf {
    fn name(&self) -> &str {
        "two_stage_dcf"
    }

    fn enterprise_value(&self, base_fcf: f64, scenario: &Scenario) -> Result<f64> {
        scenario.validate()?;

        if !stats::is_positive_finite(base_fcf) {
            return Err(RondaError::InvalidData(format!(
                "base free cash flow must be a positive number, got {base_fcf}"
            )));
        }

        Ok(dcf_value(base_fcf, scenario))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const REFERENCE_EV: f64 = 4179.615_746_385_771;

    #[test]
    fn test_reference_value() {
        let ev = dcf_value(150.0, &Scenario::new(0.08, 0.03, 0.10, 5));
        assert_relative_eq!(ev, REFERENCE_EV, epsilon = 1e-6);
    }

    #[test]
    fn test_reference_value_components() {
        let projected = projected_cash_flows(150.0, 0.10, 5);
        let discounted = discount_cash_flows(&projected, 0.08);
        assert_eq!(projected.len(), 5);
        assert_relative_eq!(projected[0], 165.0, epsilon = 1e-9);
        assert_relative_eq!(discounted.sum(), 792.709_868_402_345_9, epsilon = 1e-6);
    }

    #[test]
    fn test_model_matches_raw_formula() {
        let scenario = Scenario::new(0.08, 0.03, 0.10, 5);
        let model = TwoStageDcf::default();
        assert_eq!(
            model.enterprise_value(150.0, &scenario).unwrap(),
            dcf_value(150.0, &scenario)
        );
        assert_eq!(model.name(), "two_stage_dcf");
    }

    #[test]
    fn test_idempotent() {
        let scenario = Scenario::new(0.09, 0.025, -0.03, 7);
        let a = dcf_value(1234.5, &scenario);
        let b = dcf_value(1234.5, &scenario);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_decreasing_in_discount_rate() {
        let mut previous = f64::INFINITY;
        for dr in [0.04, 0.05, 0.06, 0.08, 0.10, 0.15, 0.20] {
            let ev = dcf_value(150.0, &Scenario::new(dr, 0.03, 0.10, 5));
            assert!(ev < previous, "value should fall as the discount rate rises");
            previous = ev;
        }
    }

    #[test]
    fn test_increasing_in_growth_rate() {
        let mut previous = f64::NEG_INFINITY;
        for g in [-0.20, -0.05, 0.0, 0.05, 0.10, 0.30] {
            let ev = dcf_value(150.0, &Scenario::new(0.08, 0.03, g, 5));
            assert!(ev > previous, "value should rise with growth");
            previous = ev;
        }
    }

    #[test]
    fn test_invalid_scenario_rejected_by_model() {
        let model = TwoStageDcf::default();
        let result = model.enterprise_value(150.0, &Scenario::new(0.05, 0.08, 0.10, 5));
        assert!(matches!(result, Err(RondaError::InvalidScenario(_))));
    }

    #[test]
    fn test_raw_formula_does_not_clamp() {
        let ev = dcf_value(150.0, &Scenario::new(0.05, 0.08, 0.10, 5));
        assert!(ev < 0.0);
        let ev = dcf_value(150.0, &Scenario::new(0.05, 0.05, 0.10, 5));
        assert!(ev.is_infinite());
    }

    #[test]
    fn test_oversized_horizon_rejected() {
        let scenario = Scenario::new(0.08, 0.03, 0.10, u32::MAX);
        let result = TwoStageDcf::new().enterprise_value(150.0, &scenario);
        assert!(matches!(result, Err(RondaError::InvalidScenario(_))));
    }

    #[test]
    fn test_exponent_saturates() {
        assert_eq!(exponent(5), 5);
        assert_eq!(exponent(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_base_validation() {
        let scenario = Scenario::new(0.08, 0.03, 0.10, 5);
        let model = TwoStageDcf::default();
        assert!(matches!(
            model.enterprise_value(-10.0, &scenario),
            Err(RondaError::InvalidData(_))
        ));

        assert!(matches!(
            model.enterprise_value(f64::NAN, &scenario),
            Err(RondaError::InvalidData(_))
        ));
    }
}
