/// Active bin id at which the bin price is exactly 1 (2^23).
pub const CENTER_BIN_ID: u32 = 1 << 23;

/// Bin-step denominator: steps are expressed in basis points.
const BIN_STEP_DENOMINATOR: f64 = 10_000.0;

/// Returns the price of the active bin.
///
/// price = (1 + binStep / 10000) ^ (activeId - 2^23)
#[must_use]
pub fn calculate_bin_price(active_id: u32, bin_step: u16) -> f64 {
    let base = 1.0 + f64::from(bin_step) / BIN_STEP_DENOMINATOR;
    let exponent = i64::from(active_id) - i64::from(CENTER_BIN_ID);
    base.powf(exponent as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_bin_is_one_for_any_step() {
        for step in [0u16, 1, 10, 25, 100, u16::MAX] {
            assert_eq!(calculate_bin_price(CENTER_BIN_ID, step), 1.0);
        }
    }

    #[test]
    fn test_bins_above_and_below_center() {
        let up = calculate_bin_price(CENTER_BIN_ID + 1, 10);
        assert!((up - 1.001).abs() < 1e-12);

        let down = calculate_bin_price(CENTER_BIN_ID - 1, 10);
        assert!((down - 1.0 / 1.001).abs() < 1e-12);
    }

    #[test]
    fn test_distant_bin() {
        // 1.0001^6932 ≈ 2
        let price = calculate_bin_price(CENTER_BIN_ID + 6932, 1);
        assert!((price - 2.0).abs() < 1e-3);
    }
}
