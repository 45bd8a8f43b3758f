//! End-to-end analysis of one company.
//!
//! An [`Analysis`] runs the whole pipeline and returns every intermediate in
//! one immutable [`AnalysisReport`]:
//!
//! ```text
//! statement -> FCF series -> capped historical growth -> growth choice
//!           -> headline valuation, projection table, sensitivity grid
//! ```

use crate::policy::{GrowthChoice, select_growth};
use ronda_dcf::{
    HistoricalFcfRow, ProjectionRow, SensitivityConfig, SensitivityGrid, SensitivityGridBuilder,
    Sweeps, TwoStageDcf, ValuationResult, ValuationVerdict, build_historical_table,
    build_projection_table, compute_historical_growth, extract_free_cash_flow, value_scenario,
};
use ronda_traits::{CashFlowStatement, FcfSeries, Result, RondaError, Scenario, ValuationModel};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Assumptions for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Discount rate, e.g. WACC (default: 0.08)
    pub discount_rate: f64,

    /// Perpetual growth after the projection window (default: 0.03)
    pub terminal_growth: f64,

    /// Years of explicit projection (default: 5)
    pub projection_years: u32,

    /// Growth rate that replaces reported and historical growth (default: none)
    pub growth_override: Option<f64>,

    /// Discount-rate step of the sensitivity sweep; historical growth is also
    /// capped at `discount_rate - delta_discount` (default: 0.02)
    pub delta_discount: f64,

    /// Terminal-growth step of the sensitivity sweep (default: 0.01)
    pub delta_terminal: f64,

    /// Growth-rate step of the sensitivity sweep (default: 0.05)
    pub delta_growth: f64,

    /// Grid rounding and labelling
    pub sensitivity: SensitivityConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.08,
            terminal_growth: 0.03,
            projection_years: 5,
            growth_override: None,
            delta_discount: 0.02,
            delta_terminal: 0.01,
            delta_growth: 0.05,
            sensitivity: SensitivityConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Ceiling applied to historical growth.
    pub const fn growth_cap(&self) -> f64 {
        self.discount_rate - self.delta_discount
    }

    /// Checks the settings that are not scenario-specific.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidData`] for a zero projection horizon or a
    /// negative or non-finite sweep step.
    pub fn validate(&self) -> Result<()> {
        if self.projection_years == 0 {
            return Err(RondaError::InvalidData(
                "projection_years must be at least 1".to_string(),
            ));
        }
        let deltas = [
            ("delta_discount", self.delta_discount),
            ("delta_terminal", self.delta_terminal),
            ("delta_growth", self.delta_growth),
        ];
        for (name, delta) in deltas {
            if !delta.is_finite() || delta < 0.0 {
                return Err(RondaError::InvalidData(format!(
                    "{name} must be a non-negative number, got {delta}"
                )));
            }
        }
        Ok(())
    }
}

/// Everything the data collaborator supplies about a company.
#[derive(Debug, Clone)]
pub struct CompanyInputs {
    /// Ticker symbol.
    pub symbol: String,
    /// Raw cash-flow statement.
    pub statement: CashFlowStatement,
    /// Shares outstanding.
    pub shares_outstanding: f64,
    /// Current market price per share.
    pub current_price: f64,
    /// Revenue growth reported by the provider, if any.
    pub revenue_growth: Option<f64>,
}

/// Immutable result of an analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Ticker symbol.
    pub symbol: String,
    /// Normalized free-cash-flow series.
    pub series: FcfSeries,
    /// Historical CAGR after capping.
    pub historical_growth: f64,
    /// Revenue growth reported by the provider, if any.
    pub reported_growth: Option<f64>,
    /// Growth rate used for the headline valuation and its source.
    pub growth: GrowthChoice,
    /// Headline valuation.
    pub valuation: ValuationResult,
    /// Historical free cash flow by year.
    pub historical: Vec<HistoricalFcfRow>,
    /// Explicit-stage projection of the headline scenario.
    pub projections: Vec<ProjectionRow>,
    /// Sweeps the grid was built from.
    pub sweeps: Sweeps,
    /// Sensitivity grid around the headline scenario.
    pub sensitivity: SensitivityGrid,
}

impl AnalysisReport {
    /// Undervalued or overvalued against the current price.
    pub fn verdict(&self) -> ValuationVerdict {
        self.valuation.verdict()
    }

    /// The headline scenario.
    pub const fn scenario(&self) -> &Scenario {
        &self.valuation.scenario
    }
}

/// Runs the valuation pipeline for one company.
///
/// # Example
///
/// ```ignore
/// use ronda_analysis::{Analysis, AnalysisConfig};
///
/// let analysis = Analysis::new(AnalysisConfig::default());
/// let report = analysis.run(&inputs, 2025)?;
/// println!("{}: {:.2} per share", report.symbol, report.valuation.value_per_share);
/// ```
pub struct Analysis {
    config: AnalysisConfig,
    model: Box<dyn ValuationModel>,
}

impl fmt::Debug for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analysis")
            .field("config", &self.config)
            .field("model", &self.model.name())
            .finish()
    }
}

impl Default for Analysis {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Analysis {
    /// Create an analysis using the two-stage DCF model.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_model(config, Box::new(TwoStageDcf::default()))
    }

    /// Create an analysis using a custom valuation model.
    #[must_use]
    pub fn with_model(config: AnalysisConfig, model: Box<dyn ValuationModel>) -> Self {
        Self { config, model }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Runs the pipeline. Projection rows start at `base_year + 1`.
    ///
    /// # Errors
    ///
    /// - [`RondaError::InvalidData`] for an invalid configuration
    /// - [`RondaError::MissingData`] / [`RondaError::InsufficientData`] from
    ///   free-cash-flow extraction
    /// - [`RondaError::InvalidScenario`] if the headline scenario has no
    ///   finite valuation (grid cells never fail this way)
    /// - [`RondaError::DivisionDomain`] for a non-positive share count or price
    pub fn run(&self, inputs: &CompanyInputs, base_year: i32) -> Result<AnalysisReport> {
        let config = &self.config;
        config.validate()?;

        let series = extract_free_cash_flow(&inputs.statement)?;
        let last_fcf = series.last_value();

        let historical_growth = compute_historical_growth(&series, config.growth_cap())?;
        let growth = select_growth(
            config.growth_override,
            inputs.revenue_growth,
            historical_growth,
        );

        let scenario = Scenario::new(
            config.discount_rate,
            config.terminal_growth,
            growth.rate,
            config.projection_years,
        );
        let valuation = value_scenario(
            self.model.as_ref(),
            last_fcf,
            scenario,
            inputs.shares_outstanding,
            inputs.current_price,
        )?;

        let historical = build_historical_table(&series);
        let projections = build_projection_table(last_fcf, &scenario, base_year);

        let sweeps = Sweeps::around(
            &scenario,
            config.delta_discount,
            config.delta_terminal,
            config.delta_growth,
        );
        let sensitivity = SensitivityGridBuilder::new(self.model.as_ref(), config.sensitivity.clone())
            .build(
                last_fcf,
                inputs.shares_outstanding,
                &sweeps,
                config.projection_years,
                inputs.current_price,
            )?;

        debug!(
            symbol = %inputs.symbol,
            growth = growth.rate,
            source = %growth.source,
            value_per_share = valuation.value_per_share,
            margin_of_safety = valuation.margin_of_safety,
            "analysis complete"
        );

        Ok(AnalysisReport {
            symbol: inputs.symbol.clone(),
            series,
            historical_growth,
            reported_growth: inputs.revenue_growth,
            growth,
            valuation,
            historical,
            projections,
            sweeps,
            sensitivity,
        })
    }
}
