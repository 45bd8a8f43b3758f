//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod grid;
pub(crate) mod project;
pub(crate) mod value;

use anyhow::Result;
use serde::Serialize;

const RULE_WIDTH: usize = 62;

/// Print a boxed section title.
pub(crate) fn print_banner(title: &str) {
    println!("\n╔{}╗", "═".repeat(RULE_WIDTH));
    println!("║{title:^RULE_WIDTH$}║");
    println!("╚{}╝\n", "═".repeat(RULE_WIDTH));
}

/// Print a heavy horizontal rule around a heading.
pub(crate) fn print_heading(heading: &str) {
    println!("{}", "━".repeat(RULE_WIDTH));
    println!("{heading}");
    println!("{}\n", "━".repeat(RULE_WIDTH));
}

/// Print any serializable value as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a fraction as a percentage with two decimals.
pub(crate) fn pct(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct() {
        assert_eq!(pct(0.08), "8.00%");
        assert_eq!(pct(-0.0325), "-3.25%");
    }
}
