//! Common types used throughout the Ronda valuation engine.
//!
//! This module defines the free-cash-flow series produced by normalization and
//! the scenario tuple every valuation is computed under.

use crate::{Result, RondaError, stats};
use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A single free-cash-flow observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FcfPoint {
    /// Period-end date of the reporting period.
    pub date: Date,
    /// Free cash flow for the period.
    pub value: f64,
}

impl FcfPoint {
    /// Creates a new observation.
    pub const fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

/// A clean free-cash-flow series.
///
/// Construction through [`FcfSeries::new`] guarantees that the series holds
/// at least two points, that dates are strictly increasing and that every
/// value is finite and strictly positive. The series is immutable afterwards.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use ronda_traits::{FcfPoint, FcfSeries};
///
/// let d = |y| NaiveDate::from_ymd_opt(y, 12, 31).unwrap();
/// let series = FcfSeries::new(vec![
///     FcfPoint::new(d(2022), 100.0),
///     FcfPoint::new(d(2023), 120.0),
/// ])
/// .unwrap();
///
/// assert_eq!(series.periods(), 1);
/// assert_eq!(series.last_value(), 120.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FcfSeries {
    points: Vec<FcfPoint>,
}

impl FcfSeries {
    /// Minimum number of observations needed for a compound growth rate.
    pub const MIN_POINTS: usize = 2;

    /// Validates and wraps a list of observations.
    ///
    /// # Errors
    ///
    /// - [`RondaError::InsufficientData`] if fewer than [`Self::MIN_POINTS`] points are given
    /// - [`RondaError::InvalidData`] if dates are not strictly increasing or a
    ///   value is not a strictly positive finite number
    pub fn new(points: Vec<FcfPoint>) -> Result<Self> {
        if points.len() < Self::MIN_POINTS {
            return Err(RondaError::InsufficientData(format!(
                "need at least {} positive free cash flow observations, got {}",
                Self::MIN_POINTS,
                points.len()
            )));
        }

        if let Some(bad) = points.iter().find(|p| !stats::is_positive_finite(p.value)) {
            return Err(RondaError::InvalidData(format!(
                "free cash flow for {} is not a positive number: {}",
                bad.date, bad.value
            )));
        }

        if let Some(pair) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(RondaError::InvalidData(format!(
                "free cash flow dates must be strictly increasing: {} then {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { points })
    }

    /// Earliest observation.
    pub fn first(&self) -> &FcfPoint {
        &self.points[0]
    }

    /// Most recent observation.
    pub fn last(&self) -> &FcfPoint {
        &self.points[self.points.len() - 1]
    }

    /// Most recent free cash flow, the base of every projection.
    pub fn last_value(&self) -> f64 {
        self.last().value
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a valid series holds at least two points.
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of compounding periods between first and last observation.
    pub const fn periods(&self) -> usize {
        self.points.len() - 1
    }

    /// The observations in chronological order.
    pub fn points(&self) -> &[FcfPoint] {
        &self.points
    }

    /// The cash-flow amounts in chronological order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// The period-end dates in chronological order.
    pub fn dates(&self) -> Vec<Date> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Iterates over the observations.
    pub fn iter(&self) -> std::slice::Iter<'_, FcfPoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a FcfSeries {
    type Item = &'a FcfPoint;
    type IntoIter = std::slice::Iter<'a, FcfPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// The assumptions a single valuation is computed under.
///
/// Rates are fractions (`0.08` is 8%). The growth rate may be negative. A
/// finite terminal value requires `discount_rate > terminal_growth`; that is
/// checked by [`Scenario::validate`], not on construction, so that sweeps can
/// describe (and mark) undefined combinations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Discount rate applied to every projected cash flow (e.g. WACC).
    pub discount_rate: f64,
    /// Perpetual growth rate after the explicit projection window.
    pub terminal_growth: f64,
    /// Annual growth rate over the explicit projection window.
    pub growth_rate: f64,
    /// Length of the explicit projection window in years.
    pub projection_years: u32,
}

impl Scenario {
    /// Longest projection horizon a valuation accepts.
    pub const MAX_PROJECTION_YEARS: u32 = i32::MAX as u32;

    /// Creates a new scenario.
    pub const fn new(
        discount_rate: f64,
        terminal_growth: f64,
        growth_rate: f64,
        projection_years: u32,
    ) -> Self {
        Self {
            discount_rate,
            terminal_growth,
            growth_rate,
            projection_years,
        }
    }

    /// Returns a copy with a different growth rate.
    #[must_use]
    pub const fn with_growth(self, growth_rate: f64) -> Self {
        Self {
            growth_rate,
            ..self
        }
    }

    /// Returns a copy with a different discount rate and terminal growth.
    #[must_use]
    pub const fn with_rates(self, discount_rate: f64, terminal_growth: f64) -> Self {
        Self {
            discount_rate,
            terminal_growth,
            ..self
        }
    }

    /// Whether the Gordon-growth perpetuity is finite and positive.
    pub fn has_finite_terminal(&self) -> bool {
        self.discount_rate > self.terminal_growth
    }

    /// Checks that the scenario has a well-defined valuation.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidScenario`] if any rate is non-finite, the
    /// projection horizon is zero or above [`Self::MAX_PROJECTION_YEARS`], or
    /// `terminal_growth >= discount_rate`.
    pub fn validate(&self) -> Result<()> {
        let rates = [self.discount_rate, self.terminal_growth, self.growth_rate];
        if rates.iter().any(|r| !r.is_finite()) {
            return Err(RondaError::InvalidScenario(format!(
                "rates must be finite: {self:?}"
            )));
        }
        if self.projection_years == 0 || self.projection_years > Self::MAX_PROJECTION_YEARS {
            return Err(RondaError::InvalidScenario(format!(
                "projection horizon must be between 1 and {} years, got {}",
                Self::MAX_PROJECTION_YEARS,
                self.projection_years
            )));
        }
        if !self.has_finite_terminal() {
            return Err(RondaError::InvalidScenario(format!(
                "terminal growth {:.2}% >= discount rate {:.2}%",
                self.terminal_growth * 100.0,
                self.discount_rate * 100.0
            )));
        }
        // Projection discounts by (1 + r)^y.
        if self.discount_rate <= -1.0 {
            return Err(RondaError::InvalidScenario(format!(
                "discount rate {:.2}% must exceed -100%",
                self.discount_rate * 100.0
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32) -> Date {
        Date::from_ymd_opt(year, 12, 31).unwrap()
    }

    fn series(values: &[(i32, f64)]) -> Result<FcfSeries> {
        FcfSeries::new(values.iter().map(|&(y, v)| FcfPoint::new(d(y), v)).collect())
    }

    #[test]
    fn test_series_accessors() {
        let s = series(&[(2021, 100.0), (2022, 120.0), (2023, 150.0)]).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.periods(), 2);
        assert!(!s.is_empty());
        assert_eq!(s.first().value, 100.0);
        assert_eq!(s.last_value(), 150.0);
        assert_eq!(s.values(), vec![100.0, 120.0, 150.0]);
        assert_eq!(s.dates(), vec![d(2021), d(2022), d(2023)]);
        assert_eq!(s.iter().count(), 3);
        assert_eq!((&s).into_iter().count(), 3);
    }

    #[test]
    fn test_series_too_short() {
        let result = series(&[(2023, 150.0)]);
        assert!(matches!(result, Err(RondaError::InsufficientData(_))));
    }

    #[test]
    fn test_series_rejects_non_positive() {
        assert!(matches!(
            series(&[(2022, 100.0), (2023, 0.0)]),
            Err(RondaError::InvalidData(_))
        ));
        assert!(matches!(
            series(&[(2022, f64::NAN), (2023, 10.0)]),
            Err(RondaError::InvalidData(_))
        ));
    }

    #[test]
    fn test_series_rejects_unordered_dates() {
        assert!(matches!(
            series(&[(2023, 100.0), (2022, 120.0)]),
            Err(RondaError::InvalidData(_))
        ));
        assert!(matches!(
            series(&[(2023, 100.0), (2023, 120.0)]),
            Err(RondaError::InvalidData(_))
        ));
    }

    #[test]
    fn test_scenario_validate() {
        assert!(Scenario::new(0.08, 0.03, 0.10, 5).validate().is_ok());
        assert!(Scenario::new(0.08, 0.03, -0.20, 5).validate().is_ok());

        let invalid = [
            Scenario::new(0.05, 0.08, 0.10, 5),
            Scenario::new(0.05, 0.05, 0.10, 5),
            Scenario::new(0.08, 0.03, 0.10, 0),
            Scenario::new(f64::NAN, 0.03, 0.10, 5),
            Scenario::new(0.08, 0.03, f64::INFINITY, 5),
            Scenario::new(0.08, 0.03, 0.10, Scenario::MAX_PROJECTION_YEARS + 1),
            Scenario::new(0.08, 0.03, 0.10, u32::MAX),
        ];
        for scenario in invalid {
            assert!(
                matches!(scenario.validate(), Err(RondaError::InvalidScenario(_))),
                "{scenario:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_scenario_builders() {
        let base = Scenario::new(0.08, 0.03, 0.10, 5);
        let shifted = base.with_growth(0.05).with_rates(0.10, 0.02);
        assert_eq!(shifted, Scenario::new(0.10, 0.02, 0.05, 5));
        assert!(shifted.has_finite_terminal());
    }
}
