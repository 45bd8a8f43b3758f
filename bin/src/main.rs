//! Ronda CLI binary.
//!
//! Provides a command-line interface for the Ronda DCF valuation engine.

mod cmd;
mod input;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ronda_analysis::{Analysis, AnalysisConfig, AnalysisReport};
use std::{path::PathBuf, process};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Two-stage DCF valuation with sensitivity analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a company and compare against its market price
    Value(AnalysisArgs),

    /// Show the sensitivity grid around the headline scenario
    Grid(AnalysisArgs),

    /// Show historical and projected free cash flow
    Project(AnalysisArgs),
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Args)]
struct AnalysisArgs {
    /// Company file (JSON)
    file: PathBuf,

    /// Discount rate, e.g. WACC
    #[arg(short = 'r', long, env = "RONDA_DISCOUNT_RATE", default_value = "0.08")]
    discount_rate: f64,

    /// Perpetual growth after the projection window
    #[arg(
        short = 't',
        long,
        env = "RONDA_TERMINAL_GROWTH",
        default_value = "0.03",
        allow_negative_numbers = true
    )]
    terminal_growth: f64,

    /// Years of explicit projection
    #[arg(short = 'n', long, env = "RONDA_YEARS", default_value = "5")]
    years: u32,

    /// Growth rate override (defaults to reported or historical growth)
    #[arg(short, long, env = "RONDA_GROWTH", allow_negative_numbers = true)]
    growth: Option<f64>,

    /// Discount-rate sweep step; also caps historical growth below the discount rate
    #[arg(long, env = "RONDA_DELTA_DISCOUNT", default_value = "0.02")]
    delta_discount: f64,

    /// Terminal-growth sweep step
    #[arg(long, env = "RONDA_DELTA_TERMINAL", default_value = "0.01")]
    delta_terminal: f64,

    /// Growth-rate sweep step
    #[arg(long, env = "RONDA_DELTA_GROWTH", default_value = "0.05")]
    delta_growth: f64,

    /// Output format
    #[arg(short, long, env = "RONDA_FORMAT", value_enum, default_value = "text")]
    format: OutputFormat,
}

impl AnalysisArgs {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            discount_rate: self.discount_rate,
            terminal_growth: self.terminal_growth,
            projection_years: self.years,
            growth_override: self.growth,
            delta_discount: self.delta_discount,
            delta_terminal: self.delta_terminal,
            delta_growth: self.delta_growth,
            ..AnalysisConfig::default()
        }
    }

    fn analyze(&self) -> Result<AnalysisReport> {
        let inputs = input::load_company(&self.file)?;
        let report = Analysis::new(self.config()).run(&inputs, Local::now().year())?;
        Ok(report)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Value(args) => cmd::value::show_valuation(&args.analyze()?, args.format)?,
        Commands::Grid(args) => cmd::grid::show_grid(&args.analyze()?, args.format)?,
        Commands::Project(args) => {
            cmd::project::show_projection(&args.analyze()?, args.format)?;
        }
    }

    Ok(())
}
