use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Divisor turning a raw pool fee (hundredths of a basis point) into a percentage.
pub const FEE_PERCENT_DIVISOR: u32 = 10_000;

/// Pool fee, both as the raw on-chain integer and as a percentage.
///
/// A raw fee of `3000` is `0.3` percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub fee: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub fee_percent: Decimal,
}

impl Fee {
    pub fn from_raw(raw: u32) -> Self {
        Self {
            fee: raw,
            fee_percent: Decimal::from(raw) / Decimal::from(FEE_PERCENT_DIVISOR),
        }
    }
}
