//! Project command implementation.

use super::{print_banner, print_heading, print_json};
use crate::OutputFormat;
use anyhow::Result;
use ronda_analysis::AnalysisReport;
use serde_json::json;

/// Show historical free cash flow and the explicit projection.
pub(crate) fn show_projection(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&json!({
            "symbol": report.symbol,
            "historical": report.historical,
            "projections": report.projections,
        }));
    }

    print_banner(&format!("Cash Flow Projection: {}", report.symbol));

    print_heading("HISTORICAL FREE CASH FLOW");
    println!("{:<8} {:>18}", "Year", "Free Cash Flow");
    println!("{}", "─".repeat(27));
    for row in &report.historical {
        println!("{:<8} {:>18.2}", row.year, row.free_cash_flow);
    }
    println!();

    print_heading("PROJECTED FREE CASH FLOW");
    println!("{:<8} {:>18} {:>18}", "Year", "Projected", "Discounted");
    println!("{}", "─".repeat(46));
    for row in &report.projections {
        println!(
            "{:<8} {:>18.2} {:>18.2}",
            row.year, row.projected_fcf, row.discounted_fcf
        );
    }
    let explicit: f64 = report.projections.iter().map(|r| r.discounted_fcf).sum();
    println!("{}", "─".repeat(46));
    println!("{:<8} {:>18} {:>18.2}", "Total", "", explicit);
    println!();

    Ok(())
}
