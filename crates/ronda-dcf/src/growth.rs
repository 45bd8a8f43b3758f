//! Historical growth estimation.

use ronda_traits::{FcfSeries, Result, stats};
use tracing::debug;

/// Compound growth of the series, capped at `cap_rate`.
///
/// ```text
/// g = (last / first)^(1 / (len - 1)) - 1
/// result = min(g, cap_rate)
/// ```
///
/// A small or volatile early base can produce an explosive CAGR, so callers
/// pass a ceiling such as the discount rate less a margin.
///
/// # Errors
///
/// Propagates [`stats::cagr`] errors; a validated series never triggers them.
pub fn compute_historical_growth(series: &FcfSeries, cap_rate: f64) -> Result<f64> {
    let growth = stats::cagr(series.first().value, series.last_value(), series.periods())?;

    if growth > cap_rate {
        debug!(growth, cap_rate, "historical growth capped");
        Ok(cap_rate)
    } else {
        Ok(growth)
    }
}
