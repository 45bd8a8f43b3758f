//! Value command implementation.

use super::{pct, print_banner, print_heading, print_json};
use crate::OutputFormat;
use anyhow::Result;
use ronda_analysis::AnalysisReport;
use serde_json::json;

/// Show the headline valuation.
pub(crate) fn show_valuation(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    let valuation = &report.valuation;

    if format == OutputFormat::Json {
        return print_json(&json!({
            "symbol": report.symbol,
            "historical_growth": report.historical_growth,
            "reported_growth": report.reported_growth,
            "growth": report.growth,
            "valuation": valuation,
            "verdict": report.verdict(),
        }));
    }

    print_banner(&format!("DCF Valuation: {}", report.symbol));

    let scenario = report.scenario();
    println!("Base FCF:          {:.2}", valuation.base_fcf);
    println!(
        "Growth rate:       {} ({})",
        pct(scenario.growth_rate),
        report.growth.source
    );
    println!("Historical CAGR:   {} (capped)", pct(report.historical_growth));
    if let Some(reported) = report.reported_growth {
        println!("Revenue growth:    {}", pct(reported));
    }
    println!("Discount rate:     {}", pct(scenario.discount_rate));
    println!("Terminal growth:   {}", pct(scenario.terminal_growth));
    println!("Projection years:  {}", scenario.projection_years);
    println!();

    print_heading("RESULT");
    println!("{:<22} {:>18.2}", "Enterprise value", valuation.enterprise_value);
    println!("{:<22} {:>18.0}", "Shares outstanding", valuation.shares_outstanding);
    println!("{:<22} {:>18.2}", "Value per share", valuation.value_per_share);
    println!("{:<22} {:>18.2}", "Current price", valuation.current_price);
    println!(
        "{:<22} {:>17.2}%",
        "Margin of safety", valuation.margin_of_safety
    );
    println!();
    println!("Verdict: {}", report.verdict());
    println!();

    Ok(())
}
