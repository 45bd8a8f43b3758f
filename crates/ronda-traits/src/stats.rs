//! Numeric helpers shared by the valuation crates.

use crate::{Result, RondaError};

/// Whether `value` is a finite number strictly greater than zero.
pub const fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Compound annual growth rate between two positive amounts.
///
/// ```text
/// CAGR = (end / start)^(1 / periods) - 1
/// ```
///
/// # Errors
///
/// - [`RondaError::InsufficientData`] if `periods` is zero
/// - [`RondaError::Arithmetic`] if `start` or `end` is not a positive finite
///   number, since the fractional power is undefined
///
/// # Examples
///
/// ```
/// use ronda_traits::stats::cagr;
///
/// let g = cagr(100.0, 121.0, 2).unwrap();
/// assert!((g - 0.10).abs() < 1e-12);
/// ```
pub fn cagr(start: f64, end: f64, periods: usize) -> Result<f64> {
    if periods == 0 {
        return Err(RondaError::InsufficientData(
            "compound growth needs at least one period".to_string(),
        ));
    }
    if !is_positive_finite(start) {
        return Err(RondaError::Arithmetic(format!(
            "compound growth is undefined for a starting value of {start}"
        )));
    }
    if !is_positive_finite(end) {
        return Err(RondaError::Arithmetic(format!(
            "compound growth is undefined for an ending value of {end}"
        )));
    }

    Ok((end / start).powf(1.0 / periods as f64) - 1.0)
}

/// Rounds to `decimals` decimal places, halves away from zero.
///
/// Non-finite input is returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cagr() {
        assert_relative_eq!(cagr(100.0, 150.0, 2).unwrap(), 1.5f64.sqrt() - 1.0);
        assert_relative_eq!(cagr(100.0, 100.0, 4).unwrap(), 0.0);
        assert!(cagr(150.0, 100.0, 1).unwrap() < 0.0);
    }

    #[test]
    fn test_cagr_guards() {
        assert!(matches!(cagr(0.0, 100.0, 2), Err(RondaError::Arithmetic(_))));
        assert!(matches!(cagr(-1.0, 100.0, 2), Err(RondaError::Arithmetic(_))));
        assert!(matches!(cagr(1.0, f64::NAN, 2), Err(RondaError::Arithmetic(_))));
        assert!(matches!(cagr(1.0, 2.0, 0), Err(RondaError::InsufficientData(_))));
    }

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(12.3456, 2), 12.35);
        assert_relative_eq!(round_to(-12.3449, 2), -12.34);
        assert_relative_eq!(round_to(7.0, 0), 7.0);
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_is_positive_finite() {
        assert!(is_positive_finite(1e-9));
        assert!(!is_positive_finite(0.0));
        assert!(!is_positive_finite(-3.0));
        assert!(!is_positive_finite(f64::INFINITY));
        assert!(!is_positive_finite(f64::NAN));
    }
}
