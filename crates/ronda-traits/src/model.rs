//! Valuation model trait.
//!
//! A [`ValuationModel`] turns a base free cash flow and a [`Scenario`] into an
//! enterprise value. The sensitivity grid and the headline estimate both go
//! through this trait, so alternative models can be swept the same way.

use crate::{Result, RondaError, Scenario, stats};

/// An enterprise-value model.
///
/// Implementations must be pure: identical inputs give bit-identical output.
/// They must be thread-safe (`Send + Sync`) so sweeps can share one model.
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{Result, Scenario, ValuationModel};
///
/// /// Values the business as a flat perpetuity of its last cash flow.
/// struct Perpetuity;
///
/// impl ValuationModel for Perpetuity {
///     fn name(&self) -> &str {
///         "perpetuity"
///     }
///
///     fn enterprise_value(&self, base_fcf: f64, scenario: &Scenario) -> Result<f64> {
///         scenario.validate()?;
///         Ok(base_fcf / scenario.discount_rate)
///     }
/// }
/// ```
pub trait ValuationModel: Send + Sync {
    /// Name of the model, used in logs and reports.
    fn name(&self) -> &str;

    /// Enterprise value of a business whose latest free cash flow is `base_fcf`.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidScenario`] when the scenario has no finite
    /// valuation, and [`RondaError::InvalidData`] for an unusable base.
    fn enterprise_value(&self, base_fcf: f64, scenario: &Scenario) -> Result<f64>;

    /// Enterprise value divided by the share count.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::DivisionDomain`] if `shares_outstanding` is not a
    /// positive finite number, plus any error of [`Self::enterprise_value`].
    fn value_per_share(
        &self,
        base_fcf: f64,
        scenario: &Scenario,
        shares_outstanding: f64,
    ) -> Result<f64> {
        if !stats::is_positive_finite(shares_outstanding) {
            return Err(RondaError::DivisionDomain(format!(
                "shares outstanding must be positive, got {shares_outstanding}"
            )));
        }
        Ok(self.enterprise_value(base_fcf, scenario)? / shares_outstanding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Perpetuity;

    impl ValuationModel for Perpetuity {
        fn name(&self) -> &str {
            "perpetuity"
        }

        fn enterprise_value(&self, base_fcf: f64, scenario: &Scenario) -> Result<f64> {
            scenario.validate()?;
            Ok(base_fcf / scenario.discount_rate)
        }
    }

    #[test]
    fn test_value_per_share_default() {
        let scenario = Scenario::new(0.10, 0.02, 0.0, 5);
        let vps = Perpetuity.value_per_share(100.0, &scenario, 50.0).unwrap();
        assert_relative_eq!(vps, 20.0);
        assert_eq!(Perpetuity.name(), "perpetuity");
    }

    #[test]
    fn test_value_per_share_bad_shares() {
        let scenario = Scenario::new(0.10, 0.02, 0.0, 5);
        for shares in [0.0, -10.0, f64::NAN] {
            let result = Perpetuity.value_per_share(100.0, &scenario, shares);
            assert!(matches!(result, Err(RondaError::DivisionDomain(_))));
        }
    }

    #[test]
    fn test_value_per_share_propagates_model_error() {
        let scenario = Scenario::new(0.05, 0.08, 0.0, 5);
        let result = Perpetuity.value_per_share(100.0, &scenario, 10.0);
        assert!(matches!(result, Err(RondaError::InvalidScenario(_))));
    }
}
