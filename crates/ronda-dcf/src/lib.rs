//! Discounted-cash-flow valuation core for ronda.
//!
//! This crate turns raw cash-flow statements into valuations:
//! - Normalization: a clean, chronological, strictly positive FCF series
//! - Growth: capped historical compound growth
//! - Valuation: two-stage DCF (explicit projection plus Gordon terminal value)
//! - Sensitivity: value per share across discount, terminal and growth sweeps
//! - Projection: the year-by-year table behind a single scenario
//!
//! Every function is a pure, synchronous transform of its arguments.
//!
//! # Example
//!
//! ```ignore
//! use ronda_dcf::{extract_free_cash_flow, compute_historical_growth, dcf_value};
//! use ronda_traits::Scenario;
//!
//! let series = extract_free_cash_flow(&statement)?;
//! let growth = compute_historical_growth(&series, 0.06)?;
//! let ev = dcf_value(series.last_value(), &Scenario::new(0.08, 0.03, growth, 5));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod dcf;
pub mod growth;
pub mod labels;
pub mod normalize;
pub mod projection;
pub mod sensitivity;
pub mod valuation;

// Re-export key types
pub use dcf::{TwoStageDcf, dcf_value};
pub use growth::compute_historical_growth;
pub use normalize::extract_free_cash_flow;
pub use projection::{
    HistoricalFcfRow, ProjectionRow, build_historical_table, build_projection_table,
};
pub use sensitivity::{
    GridCell, SensitivityConfig, SensitivityGrid, SensitivityGridBuilder, SensitivityTable,
    Sweeps, build_sensitivity_grid, sweep,
};
pub use valuation::{ValuationResult, ValuationVerdict, margin_of_safety, value_scenario};
