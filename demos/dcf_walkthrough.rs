//! Step-by-step two-stage DCF valuation of a fictional company.
//!
//! This example demonstrates:
//! - Deriving free cash flow from operating cash flow and capital expenditure
//! - Estimating a capped historical growth rate
//! - Valuing the company and computing the margin of safety
//! - Sweeping discount rate, terminal growth and growth into a sensitivity grid
//!
//! Run with `cargo run -p ronda-demos --example dcf_walkthrough`.

use ronda::dcf::{
    build_projection_table, build_sensitivity_grid, compute_historical_growth,
    extract_free_cash_flow, value_scenario,
};
use ronda::prelude::*;

/// Fiscal years of the statement.
const YEARS: [i32; 5] = [2020, 2021, 2022, 2023, 2024];

/// Operating cash flow per year (millions).
const OPERATING: [f64; 5] = [820.0, 905.0, 990.0, 1_120.0, 1_240.0];

/// Capital expenditure per year, reported as outflows (millions).
const CAPEX: [f64; 5] = [-260.0, -270.0, -300.0, -330.0, -350.0];

/// Shares outstanding (millions) and market price.
const SHARES: f64 = 120.0;
const PRICE: f64 = 82.5;

/// Valuation assumptions.
const DISCOUNT_RATE: f64 = 0.09;
const TERMINAL_GROWTH: f64 = 0.025;
const PROJECTION_YEARS: u32 = 5;
const DELTA_DISCOUNT: f64 = 0.02;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let dates: Vec<Date> = YEARS
        .iter()
        .filter_map(|&y| Date::from_ymd_opt(y, 12, 31))
        .collect();
    let operating: Vec<Option<f64>> = OPERATING.iter().copied().map(Some).collect();
    let capex: Vec<Option<f64>> = CAPEX.iter().copied().map(Some).collect();

    let statement = CashFlowStatement::from_line_items(
        &dates,
        &[
            ("Operating Cash Flow", operating.as_slice()),
            ("Capital Expenditure", capex.as_slice()),
        ],
    )?;

    // 1. Normalize
    let series = extract_free_cash_flow(&statement)?;
    println!("Free cash flow:");
    for point in &series {
        println!("  {}  {:>10.1}", point.date, point.value);
    }

    // 2. Growth, capped below the discount rate
    let growth = compute_historical_growth(&series, DISCOUNT_RATE - DELTA_DISCOUNT)?;
    println!("\nHistorical growth (capped): {:.2}%", growth * 100.0);

    // 3. Headline valuation
    let scenario = Scenario::new(DISCOUNT_RATE, TERMINAL_GROWTH, growth, PROJECTION_YEARS);
    let model = TwoStageDcf::default();
    let result = value_scenario(&model, series.last_value(), scenario, SHARES, PRICE)?;

    println!("\nProjection:");
    for row in build_projection_table(series.last_value(), &scenario, 2024) {
        println!(
            "  {}  {:>10.1}  {:>10.1}",
            row.year, row.projected_fcf, row.discounted_fcf
        );
    }

    println!("\nEnterprise value:  {:>10.1}", result.enterprise_value);
    println!("Value per share:   {:>10.2}", result.value_per_share);
    println!("Current price:     {:>10.2}", result.current_price);
    println!("Margin of safety:  {:>9.1}%", result.margin_of_safety);
    println!("Verdict:           {}", result.verdict());

    // 4. Sensitivity
    let sweeps = Sweeps::around(&scenario, DELTA_DISCOUNT, 0.01, 0.05);
    let grid = build_sensitivity_grid(
        series.last_value(),
        SHARES,
        &sweeps,
        PROJECTION_YEARS,
        PRICE,
    )?;

    for table in grid.iter() {
        println!("\nGrowth {}", table.growth_label);
        print!("{:>6}", "");
        for label in &table.terminal_labels {
            print!("{label:>10}");
        }
        println!();
        for (row, label) in table.discount_labels.iter().enumerate() {
            print!("{label:>6}");
            for value in table.values.row(row) {
                match value {
                    Some(v) => print!("{v:>10.2}"),
                    None => print!("{:>10}", "n/a"),
                }
            }
            println!();
        }
    }

    Ok(())
}
