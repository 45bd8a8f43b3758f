//! Growth-source selection.
//!
//! The growth rate a headline valuation uses can come from three places. In
//! priority order:
//! 1. A manual override supplied by the user
//! 2. Revenue growth reported by the data provider
//! 3. The capped historical FCF CAGR
//!
//! A reported growth of exactly zero counts as "not reported", as do
//! non-finite values from any source.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Where a growth rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum GrowthSource {
    /// Supplied by the user.
    #[display("Manual Override")]
    ManualOverride,
    /// Revenue growth reported by the data provider.
    #[display("Revenue Growth")]
    RevenueGrowth,
    /// Capped compound growth of the historical FCF series.
    #[display("Historical CAGR")]
    HistoricalCagr,
}

/// The growth rate chosen for the headline valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthChoice {
    /// Annual growth rate as a fraction.
    pub rate: f64,
    /// Where the rate came from.
    pub source: GrowthSource,
}

/// Picks the growth rate by priority: override, reported, historical.
///
/// ```
/// use ronda_analysis::{GrowthSource, select_growth};
///
/// let choice = select_growth(None, Some(0.12), 0.06);
/// assert_eq!(choice.source, GrowthSource::RevenueGrowth);
/// assert_eq!(choice.source.to_string(), "Revenue Growth");
/// ```
pub fn select_growth(
    override_rate: Option<f64>,
    reported_growth: Option<f64>,
    historical_cagr: f64,
) -> GrowthChoice {
    if let Some(rate) = override_rate {
        if rate.is_finite() {
            return GrowthChoice {
                rate,
                source: GrowthSource::ManualOverride,
            };
        }
        warn!(rate, "ignoring non-finite growth override");
    }

    if let Some(rate) = reported_growth.filter(|r| r.is_finite() && *r != 0.0) {
        return GrowthChoice {
            rate,
            source: GrowthSource::RevenueGrowth,
        };
    }

    GrowthChoice {
        rate: historical_cagr,
        source: GrowthSource::HistoricalCagr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let choice = select_growth(Some(0.15), Some(0.12), 0.06);
        assert_eq!(
            choice,
            GrowthChoice {
                rate: 0.15,
                source: GrowthSource::ManualOverride
            }
        );
    }

    #[test]
    fn test_negative_override_allowed() {
        let choice = select_growth(Some(-0.02), None, 0.06);
        assert_eq!(choice.source, GrowthSource::ManualOverride);
        assert_eq!(choice.rate, -0.02);
    }

    #[test]
    fn test_reported_growth_second() {
        let choice = select_growth(None, Some(-0.03), 0.06);
        assert_eq!(choice.source, GrowthSource::RevenueGrowth);
        assert_eq!(choice.rate, -0.03);
    }

    #[test]
    fn test_historical_fallback() {
        let choice = select_growth(None, None, 0.06);
        assert_eq!(choice.source, GrowthSource::HistoricalCagr);
        assert_eq!(choice.rate, 0.06);
    }

    #[test]
    fn test_zero_or_non_finite_reported_ignored() {
        for reported in [Some(0.0), Some(f64::NAN), Some(f64::INFINITY)] {
            let choice = select_growth(None, reported, 0.06);
            assert_eq!(choice.source, GrowthSource::HistoricalCagr);
        }
    }

    #[test]
    fn test_non_finite_override_ignored() {
        let choice = select_growth(Some(f64::NAN), Some(0.12), 0.06);
        assert_eq!(choice.source, GrowthSource::RevenueGrowth);
    }

    #[test]
    fn test_display() {
        assert_eq!(GrowthSource::ManualOverride.to_string(), "Manual Override");
        assert_eq!(GrowthSource::HistoricalCagr.to_string(), "Historical CAGR");
    }
}
