#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! ronda is an umbrella crate that re-exports all ronda sub-crates for convenience.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ronda::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let statement = CashFlowStatement::from_line_items(&dates, &[("Free Cash Flow", &fcf)])?;
//! let inputs = CompanyInputs {
//!     symbol: "ACME".to_string(),
//!     statement,
//!     shares_outstanding: 10.0,
//!     current_price: 400.0,
//!     revenue_growth: None,
//! };
//!
//! let report = Analysis::new(AnalysisConfig::default()).run(&inputs, 2025)?;
//! println!("{:.2} per share, {}", report.valuation.value_per_share, report.verdict());
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types and the [`ValuationModel`] trait
//! - [`dcf`] - Normalization, growth, DCF valuation, sensitivity and projection
//! - [`analysis`] - Growth-source policy and end-to-end runs
//!
//! ## Valuation
//!
//! For a base free cash flow `F`, growth `g`, discount rate `r`, terminal
//! growth `t` and `n` projection years:
//!
//! ```text
//! EV = sum_{y=1..n} F(1+g)^y / (1+r)^y  +  F(1+g)^n (1+t) / (r-t) / (1+r)^n
//! ```
//!
//! The terminal term is only finite for `r > t`. Headline valuations reject
//! other scenarios; sensitivity grids mark those cells invalid.

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core type definitions for ronda.
///
/// - [`FcfSeries`](ronda_traits::FcfSeries) - Validated free-cash-flow history
/// - [`Scenario`](ronda_traits::Scenario) - One set of valuation assumptions
/// - [`CashFlowStatement`](ronda_traits::CashFlowStatement) - Raw statement input
/// - [`ValuationModel`] - Enterprise-value model trait
pub mod traits {
    pub use ronda_traits::*;
}

// Re-export core trait and error types at top level
pub use ronda_traits::{Result, RondaError, ValuationModel};

// Re-export common types
pub use ronda_traits::{CashFlowStatement, Date, FcfPoint, FcfSeries, LineItem, Scenario};

// ============================================================================
// Valuation Core
// ============================================================================

/// Valuation core.
///
/// ## Pipeline
///
/// - **Normalization**: [`extract_free_cash_flow`](ronda_dcf::extract_free_cash_flow)
///   reads the reported free-cash-flow line or derives it from operating cash
///   flow and capital expenditure
/// - **Growth**: [`compute_historical_growth`](ronda_dcf::compute_historical_growth)
///   caps the series CAGR
/// - **Valuation**: [`TwoStageDcf`](ronda_dcf::TwoStageDcf) and
///   [`value_scenario`](ronda_dcf::value_scenario)
/// - **Sensitivity**: [`SensitivityGridBuilder`](ronda_dcf::SensitivityGridBuilder)
/// - **Projection**: [`build_projection_table`](ronda_dcf::build_projection_table)
///
/// # Example
///
/// ```
/// use ronda::dcf::dcf_value;
/// use ronda::Scenario;
///
/// let ev = dcf_value(150.0, &Scenario::new(0.08, 0.03, 0.10, 5));
/// assert!((ev - 4179.615746385771).abs() < 1e-6);
/// ```
pub mod dcf {
    pub use ronda_dcf::*;
}

// ============================================================================
// Analysis
// ============================================================================

/// Growth-source policy and end-to-end analysis.
///
/// Growth is chosen in priority order: manual override, reported revenue
/// growth, capped historical CAGR.
pub mod analysis {
    pub use ronda_analysis::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use ronda::prelude::*;
/// ```
pub mod prelude {
    pub use crate::traits::*;
    pub use ronda_analysis::{Analysis, AnalysisConfig, AnalysisReport, CompanyInputs};
    pub use ronda_dcf::{SensitivityGrid, Sweeps, TwoStageDcf, ValuationResult, ValuationVerdict};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_model(_model: &dyn ValuationModel) {}
        _accept_model(&dcf::TwoStageDcf::default());
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let _error: RondaError = RondaError::InvalidData("test".to_string());
    }

    #[test]
    fn test_prelude_pipeline() {
        use crate::prelude::*;

        let dates: Vec<Date> = (2021..=2023)
            .map(|y| Date::from_ymd_opt(y, 12, 31).unwrap())
            .collect();
        let statement = CashFlowStatement::from_line_items(
            &dates,
            &[
                ("Operating Cash Flow", &[Some(130.0), Some(150.0), Some(185.0)]),
                ("Capital Expenditure", &[Some(-30.0), Some(-30.0), Some(-35.0)]),
            ],
        )
        .unwrap();
        let inputs = CompanyInputs {
            symbol: "ACME".to_string(),
            statement,
            shares_outstanding: 10.0,
            current_price: 400.0,
            revenue_growth: None,
        };

        let report = Analysis::new(AnalysisConfig::default()).run(&inputs, 2023).unwrap();
        assert_eq!(report.series.values(), vec![100.0, 120.0, 150.0]);
        assert_relative_eq!(report.valuation.base_fcf, 150.0);
        assert_eq!(report.projections[0].year, 2024);
    }
}
