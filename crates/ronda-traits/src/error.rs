//! Error types for the Ronda valuation engine.
//!
//! Every failure in the valuation core is surfaced to the caller through
//! [`RondaError`]; nothing is recovered internally and nothing is retried.

use thiserror::Error;

/// The main error type for Ronda operations.
#[derive(Debug, Error)]
pub enum RondaError {
    /// Required statement rows (or every alias for them) are absent.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Fewer usable observations than the operation needs.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The scenario has no finite valuation, e.g. terminal growth at or
    /// above the discount rate.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// A per-share or percentage figure was requested with a zero, negative
    /// or missing denominator.
    #[error("Division domain error: {0}")]
    DivisionDomain(String),

    /// An arithmetic operation has no well-defined result for its inputs.
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RondaError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RondaError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Ronda operations.
///
/// This is a convenience type that uses [`RondaError`] as the error type.
pub type Result<T> = std::result::Result<T, RondaError>;
