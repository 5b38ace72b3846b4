//! Decoders for the packed 32-byte `parameters` word of PancakeSwap V4 pool keys.
//!
//! Concentrated-liquidity pools carry the tick spacing as a signed byte at
//! offset 29; bin pools carry the bin step in bits 16..32. Malformed input
//! decodes to a neutral default instead of failing.

use alloy_primitives::{B256, U256, hex};

/// Byte offset (most-significant first) holding the tick spacing.
const TICK_SPACING_BYTE: usize = 29;
/// Bit offset of the bin-step field.
const BIN_STEP_SHIFT: usize = 16;
/// Tick spacing reported for an undecodable word.
pub const DEFAULT_TICK_SPACING: i32 = 0;
/// Bin step reported for an undecodable word.
pub const DEFAULT_BIN_STEP: u16 = 1;

/// Tick spacing encoded in a parameters word.
#[must_use]
pub fn tick_spacing_from_word(word: &B256) -> i32 {
    tick_spacing_from_bytes(word.as_slice())
}

/// Tick spacing from raw bytes; fewer than 30 bytes decode to 0.
#[must_use]
pub fn tick_spacing_from_bytes(bytes: &[u8]) -> i32 {
    bytes
        .get(TICK_SPACING_BYTE)
        .map_or(DEFAULT_TICK_SPACING, |byte| i32::from(*byte as i8))
}

/// Tick spacing from a hex string, with or without `0x`.
#[must_use]
pub fn tick_spacing_from_hex(input: &str) -> i32 {
    hex::decode(input).map_or(DEFAULT_TICK_SPACING, |bytes| tick_spacing_from_bytes(&bytes))
}

/// Bin step encoded in a parameters word.
#[must_use]
pub fn bin_step_from_word(word: &B256) -> u16 {
    let value = U256::from_be_bytes(word.0);
    let field = (value >> BIN_STEP_SHIFT) & U256::from(0xFFFFu64);
    field.to::<u16>()
}

/// Bin step from a hex string of at most 32 bytes; anything else decodes to 1.
///
/// Shorter input is read as a right-aligned big-endian integer.
#[must_use]
pub fn bin_step_from_hex(input: &str) -> u16 {
    let Ok(bytes) = hex::decode(input) else {
        return DEFAULT_BIN_STEP;
    };
    if bytes.len() > 32 {
        return DEFAULT_BIN_STEP;
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    bin_step_from_word(&B256::from(word))
}
