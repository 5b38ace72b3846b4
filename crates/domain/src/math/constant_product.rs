use alloy_primitives::U256;

/// Calculates the spot price of token0 in terms of token1 for a constant
/// product pool (x * y = k).
///
/// formula: price = reserve1 / reserve0 * 10^(decimals0 - decimals1)
///
/// A zero `reserve0` yields a non-finite result, as does a ratio past
/// `f64::MAX`.
#[must_use]
pub fn calculate_spot_price(reserve0: U256, reserve1: U256, decimals0: u8, decimals1: u8) -> f64 {
    let r0 = f64::from(reserve0);
    let r1 = f64::from(reserve1);
    let scale = 10f64.powi(i32::from(decimals0) - i32::from(decimals1));
    (r1 / r0) * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_spot_price_normalizes_decimals() {
        // 1 token0 (18 decimals) against 2000 units of a 6-decimal token1
        let reserve0 = U256::from(1_000_000_000_000_000_000u128);
        let reserve1 = U256::from(2_000_000_000u64);

        let price = calculate_spot_price(reserve0, reserve1, 18, 6);
        assert!((price - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_spot_price_same_decimals() {
        let price = calculate_spot_price(U256::from(2000u64), U256::from(1000u64), 18, 18);
        assert_eq!(price, 0.5);
    }

    #[test]
    fn test_zero_reserve0_is_not_finite() {
        let price = calculate_spot_price(U256::ZERO, U256::from(1000u64), 18, 18);
        assert!(!price.is_finite());

        let empty = calculate_spot_price(U256::ZERO, U256::ZERO, 18, 18);
        assert!(empty.is_nan());
    }

    #[test]
    fn test_large_reserves_keep_precision() {
        let reserve0 = U256::from(3u64) * U256::from(10u64).pow(U256::from(30u64));
        let reserve1 = U256::from(6u64) * U256::from(10u64).pow(U256::from(30u64));
        let price = calculate_spot_price(reserve0, reserve1, 18, 18);
        assert!((price - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_reserves_past_u128() {
        let reserve0 = U256::MAX >> 1;
        let price = calculate_spot_price(reserve0, U256::MAX, 18, 18);
        assert!((price - 2.0).abs() < 1e-12);

        let tiny = calculate_spot_price(U256::MAX, U256::from(1u64), 0, 0);
        assert!(tiny > 0.0 && tiny < 1e-76);
    }
}
