#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type and trait definitions for the Ronda valuation engine.
//!
//! This crate provides the foundational abstractions shared by the FCF
//! normalizer, the discounted-cash-flow model and the sensitivity tooling.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod model;
pub mod statement;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{Result, RondaError};
pub use model::ValuationModel;
pub use statement::{CashFlowStatement, DATE_COLUMN, LineItem};
pub use types::{Date, FcfPoint, FcfSeries, Scenario};
