use serde::{Deserialize, Serialize};

/// A derived pool price: the raw value used for computation and its
/// scientific-notation rendering for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPrice {
    pub price: f64,
    pub price_formatted: String,
}

impl DisplayPrice {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            price_formatted: format_scientific(price),
        }
    }
}

/// Renders a value as `d.dddddde±x` with six fractional digits.
///
/// Non-finite values render as `NaN`, `Infinity` or `-Infinity`.
#[must_use]
pub fn format_scientific(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let rendered = format!("{value:.6e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_positive_exponent() {
        assert_eq!(format_scientific(2.0), "2.000000e+0");
        assert_eq!(format_scientific(1234.5678), "1.234568e+3");
    }

    #[test]
    fn test_format_negative_exponent() {
        assert_eq!(format_scientific(0.00025), "2.500000e-4");
    }

    #[test]
    fn test_format_zero_and_non_finite() {
        assert_eq!(format_scientific(0.0), "0.000000e+0");
        assert_eq!(format_scientific(f64::INFINITY), "Infinity");
        assert_eq!(format_scientific(f64::NAN), "NaN");
    }

    #[test]
    fn test_display_price_keeps_raw_value() {
        let price = DisplayPrice::new(1.5);
        assert_eq!(price.price, 1.5);
        assert_eq!(price.price_formatted, "1.500000e+0");
    }
}
