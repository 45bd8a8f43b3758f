//! Growth-source policy and end-to-end analysis runs for ronda.
//!
//! The valuation core in `ronda-dcf` never decides where a growth rate comes
//! from. This crate owns that policy and stitches the core's steps into a
//! single run whose output can be rendered or serialized as a whole.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ronda_analysis::{Analysis, AnalysisConfig, CompanyInputs};
//! use ronda_traits::CashFlowStatement;
//!
//! # fn load() -> CashFlowStatement { unimplemented!() }
//! let inputs = CompanyInputs {
//!     symbol: "ACME".to_string(),
//!     statement: load(),
//!     shares_outstanding: 1_000_000.0,
//!     current_price: 42.0,
//!     revenue_growth: Some(0.07),
//! };
//!
//! let report = Analysis::new(AnalysisConfig::default()).run(&inputs, 2025).unwrap();
//! println!("{} ({})", report.verdict(), report.growth.source);
//! ```

mod analysis;
mod policy;

// Re-export main types
pub use analysis::{Analysis, AnalysisConfig, AnalysisReport, CompanyInputs};
pub use policy::{GrowthChoice, GrowthSource, select_growth};
