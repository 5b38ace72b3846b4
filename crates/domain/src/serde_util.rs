//! Serde adapters rendering on-chain integers as decimal strings.
//!
//! JSON numbers lose precision past 2^53, so reserves, liquidity and
//! sqrt prices travel as strings.

/// `U256` as a decimal string.
pub mod u256_decimal {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_str(&raw).map_err(D::Error::custom)
    }
}

/// `Option<U256>` as an optional decimal string.
pub mod option_u256_decimal {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| U256::from_str(&raw).map_err(D::Error::custom))
            .transpose()
    }
}

/// `u128` as a decimal string.
pub mod u128_decimal {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super::u256_decimal")]
        big: U256,
        #[serde(with = "super::u128_decimal")]
        liquidity: u128,
        #[serde(with = "super::option_u256_decimal")]
        maybe: Option<U256>,
    }

    #[test]
    fn test_large_integers_render_as_strings() {
        let sample = Sample {
            big: U256::from(2u64).pow(U256::from(160u64)),
            liquidity: u128::MAX,
            maybe: None,
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["big"], "1461501637330902918203684832716283019655932542976");
        assert_eq!(json["liquidity"], u128::MAX.to_string());
        assert!(json["maybe"].is_null());

        let back: Sample = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample);
    }
}
