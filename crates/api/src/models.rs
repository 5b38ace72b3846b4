//! API response models.

use chrono::{DateTime, Utc};
use dexpool_domain::{NetworkConfig, ProtocolFamily};
use serde::{Deserialize, Serialize};

/// One configured chain as listed by `/api/supported`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedNetwork {
    pub key: String,
    pub name: String,
    pub chain_id: u64,
    /// Deployment names present on the chain.
    pub dex: Vec<String>,
}

/// Body of `/api/supported`. Networks keep configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedResponse {
    pub networks: Vec<SupportedNetwork>,
    #[serde(rename = "supportedDEXs")]
    pub supported_dexs: Vec<String>,
}

impl From<&NetworkConfig> for SupportedResponse {
    fn from(networks: &NetworkConfig) -> Self {
        Self {
            networks: networks
                .chains()
                .iter()
                .map(|chain| SupportedNetwork {
                    key: chain.key.clone(),
                    name: chain.name.clone(),
                    chain_id: chain.chain_id,
                    dex: chain
                        .deployments
                        .names()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                })
                .collect(),
            supported_dexs: ProtocolFamily::TOKENS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Body of `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_keeps_configuration_order() {
        let supported = SupportedResponse::from(&NetworkConfig::default());
        let keys: Vec<_> = supported.networks.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["BASE", "BSC", "ETH", "MONAD"]);
        assert_eq!(supported.supported_dexs.len(), 7);
        assert_eq!(supported.supported_dexs[0], "v2");

        let json = serde_json::to_value(&supported).unwrap();
        assert_eq!(json["networks"][1]["chainId"], 56);
        assert!(json["supportedDEXs"].is_array());
    }
}
