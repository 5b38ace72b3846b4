use alloy_primitives::{U256, Uint};

/// Integer wide enough for `sqrtPriceX96^2 * 10^255` (320 + 848 bits).
type Wide = Uint<1280, 20>;

/// Largest bit length narrowed directly into an `f64` without overflowing.
const MAX_NARROW_BITS: usize = 1000;

/// Converts a Q64.96 square-root price into the price of token0 in token1.
///
/// price = sqrtPriceX96^2 * 10^decimals0 / (2^192 * 10^decimals1)
///
/// The division runs in a 1280-bit integer; only the quotient and the
/// scaled remainder are narrowed, so precision survives prices far outside
/// the `f64` mantissa.
#[must_use]
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256, decimals0: u8, decimals1: u8) -> f64 {
    let sqrt = widen(sqrt_price_x96);
    let numerator = sqrt * sqrt * pow10(decimals0);
    let denominator: Wide = (Wide::from(1u64) << 192) * pow10(decimals1);

    let quotient = numerator / denominator;
    let remainder = numerator % denominator;

    let shift = denominator.bit_len().saturating_sub(MAX_NARROW_BITS);
    let fraction = f64::from(remainder >> shift) / f64::from(denominator >> shift);

    f64::from(quotient) + fraction
}

fn widen(value: U256) -> Wide {
    let mut limbs = [0u64; 20];
    limbs[..4].copy_from_slice(value.as_limbs());
    Wide::from_limbs(limbs)
}

fn pow10(exponent: u8) -> Wide {
    Wide::from(10u64).pow(Wide::from(u64::from(exponent)))
}
