//! Grid command implementation.

use super::{print_banner, print_heading, print_json};
use crate::OutputFormat;
use anyhow::Result;
use ronda_analysis::AnalysisReport;
use ronda_dcf::SensitivityTable;

const CELL_WIDTH: usize = 12;

/// Show value per share across the sensitivity sweeps.
pub(crate) fn show_grid(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    let grid = &report.sensitivity;

    if format == OutputFormat::Json {
        return print_json(grid);
    }

    print_banner(&format!("Sensitivity Analysis: {}", report.symbol));
    println!("Rows: discount rate    Columns: terminal growth");
    println!("Current price: {:.2}", grid.current_price);
    println!();

    for table in grid.iter() {
        print_heading(&format!("GROWTH {}", table.growth_label));
        print_table(table);
        println!();
    }

    let invalid: usize = grid.iter().map(SensitivityTable::invalid_count).sum();
    if invalid > 0 {
        println!("n/a: terminal growth at or above the discount rate ({invalid} cells)");
        println!();
    }

    Ok(())
}

fn print_table(table: &SensitivityTable) {
    print!("{:<8}", "");
    for label in &table.terminal_labels {
        print!("{label:>CELL_WIDTH$}");
    }
    println!();
    println!(
        "{}",
        "─".repeat(8 + CELL_WIDTH * table.terminal_labels.len())
    );

    for (row, label) in table.discount_labels.iter().enumerate() {
        print!("{label:<8}");
        for col in 0..table.terminal_labels.len() {
            match table.values[[row, col]] {
                Some(v) => print!("{v:>CELL_WIDTH$.2}"),
                None => print!("{:>CELL_WIDTH$}", "n/a"),
            }
        }
        println!();
    }
}
