//! Fixed-point price calculators, one per pricing model.
//!
//! Each calculator takes on-chain integers and returns an `f64` price of
//! token0 denominated in token1, adjusted for token decimals. The narrowing
//! to `f64` happens here and nowhere else.

/// Bin-step exponential price.
pub mod bin;
/// Q96 square-root price.
pub mod concentrated_liquidity;
/// Reserve-ratio price.
pub mod constant_product;

pub use bin::{CENTER_BIN_ID, calculate_bin_price};
pub use concentrated_liquidity::sqrt_price_x96_to_price;
pub use constant_product::calculate_spot_price;
