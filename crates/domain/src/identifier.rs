//! Classification and parsing of client-supplied identifiers.

use alloy_primitives::{Address, B256};
use std::str::FromStr;

/// Length of a `0x`-prefixed 32-byte hex string.
const HASH_HEX_LEN: usize = 66;

/// Whether `value` is a valid EVM address.
///
/// All-lowercase and all-uppercase hex is accepted as is; mixed case must
/// carry a valid EIP-55 checksum.
#[must_use]
pub fn is_address(value: &str) -> bool {
    let Some(digits) = value.strip_prefix("0x") else {
        return false;
    };
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    let lower = digits.chars().all(|c| !c.is_ascii_uppercase());
    let upper = digits.chars().all(|c| !c.is_ascii_lowercase());
    if lower || upper {
        return true;
    }
    Address::parse_checksummed(value, None).is_ok()
}

/// Whether `value` looks like a transaction hash: `0x` followed by 64 hex
/// digits, and not an address.
#[must_use]
pub fn is_transaction_hash(value: &str) -> bool {
    value.len() == HASH_HEX_LEN
        && value.starts_with("0x")
        && value[2..].chars().all(|c| c.is_ascii_hexdigit())
        && !is_address(value)
}

/// Parses a 20-byte pool contract address, rejecting bad checksums.
pub fn parse_pool_address(value: &str) -> Option<Address> {
    if !is_address(value) {
        return None;
    }
    Address::from_str(value).ok()
}

/// Parses a 32-byte pool id.
pub fn parse_pool_id(value: &str) -> Option<B256> {
    if value.len() != HASH_HEX_LEN || !value.starts_with("0x") {
        return None;
    }
    B256::from_str(value).ok()
}

/// Parses a transaction hash.
pub fn parse_transaction_hash(value: &str) -> Option<B256> {
    if is_transaction_hash(value) {
        B256::from_str(value).ok()
    } else {
        None
    }
}
