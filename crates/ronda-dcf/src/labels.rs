//! Percentage labels for sweep axes.

/// Upper bound on label precision when disambiguating close values.
pub const MAX_LABEL_DECIMALS: usize = 6;

/// Formats a fraction as a percentage, e.g. `0.085` with 1 decimal is `"8.5%"`.
///
/// Values that round to zero never carry a minus sign.
pub fn percent_label(value: f64, decimals: usize) -> String {
    let label = format!("{:.*}%", decimals, value * 100.0);
    match label.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| matches!(c, '0' | '.' | '%')) => rest.to_string(),
        _ => label,
    }
}

/// Labels a whole sweep, starting at `min_decimals` of precision.
///
/// If two distinct values would share a label, precision is raised until
/// every distinct value has its own label (up to [`MAX_LABEL_DECIMALS`]).
///
/// ```
/// use ronda_dcf::labels::percent_labels;
///
/// assert_eq!(percent_labels(&[0.06, 0.08, 0.10], 0), ["6%", "8%", "10%"]);
/// assert_eq!(percent_labels(&[0.075, 0.08], 0), ["7.5%", "8.0%"]);
/// ```
pub fn percent_labels(values: &[f64], min_decimals: usize) -> Vec<String> {
    let mut decimals = min_decimals;
    loop {
        let labels: Vec<String> = values.iter().map(|&v| percent_label(v, decimals)).collect();
        if decimals >= MAX_LABEL_DECIMALS || is_unambiguous(values, &labels) {
            return labels;
        }
        decimals += 1;
    }
}

fn is_unambiguous(values: &[f64], labels: &[String]) -> bool {
    for i in 0..values.len() {
        for j in (i + 1)..values.len() {
            if labels[i] == labels[j] && values[i] != values[j] {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(0.08, 0), "8%");
        assert_eq!(percent_label(0.03, 1), "3.0%");
        assert_eq!(percent_label(0.225, 1), "22.5%");
        assert_eq!(percent_label(-0.05, 1), "-5.0%");
    }

    #[test]
    fn test_negative_zero_label() {
        assert_eq!(percent_label(-1e-18, 1), "0.0%");
        assert_eq!(percent_label(-0.0, 0), "0%");
    }

    #[test]
    fn test_floating_noise_keeps_default_precision() {
        let values = [0.08 - 0.02, 0.08, 0.08 + 0.02];
        assert_eq!(percent_labels(&values, 0), ["6%", "8%", "10%"]);
    }

    #[test]
    fn test_collisions_raise_precision() {
        let labels = percent_labels(&[0.02, 0.025, 0.03], 0);
        assert_eq!(labels, ["2.0%", "2.5%", "3.0%"]);

        let labels = percent_labels(&[0.0301, 0.0302], 1);
        assert_eq!(labels, ["3.01%", "3.02%"]);
    }

    #[test]
    fn test_duplicate_values_share_label() {
        assert_eq!(percent_labels(&[0.05, 0.05], 0), ["5%", "5%"]);
    }

    #[test]
    fn test_precision_bounded() {
        let labels = percent_labels(&[0.1, 0.1 + 1e-15], 0);
        assert_eq!(labels.len(), 2);
        assert!(labels[0].ends_with('%'));
    }
}
