use crate::error::RpcError;
use crate::rpc::{AdapterContext, ReceiptData, TransactionData};
use alloy::primitives::utils::{format_ether, format_units};
use alloy::primitives::{Address, B256, Bytes, U256};
use dexpool_domain::ChainConfig;
use dexpool_domain::identifier::parse_transaction_hash;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by transaction lookups.
#[derive(Debug, Clone, Error)]
pub enum TransactionError {
    #[error("network {0} is not configured")]
    UnknownChain(String),
    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),
    #[error("Failed to get transaction on {chain}: {source}")]
    Lookup {
        chain: String,
        #[source]
        source: RpcError,
    },
}

impl TransactionError {
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Lookup { .. })
    }
}

/// Transaction fields with value in ether and gas price in gwei.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    pub value: String,
    pub gas_limit: String,
    pub gas_price: Option<String>,
    pub nonce: u64,
    pub data: Bytes,
    pub block_number: Option<u64>,
    pub block_hash: Option<B256>,
}

/// Receipt fields; `status` is 1 for success and 0 for a revert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSummary {
    pub status: u8,
    pub gas_used: String,
    pub effective_gas_price: String,
    pub logs: usize,
    pub contract_address: Option<Address>,
}

/// A transaction as found on one chain. `receipt` is `None` while pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub network: String,
    pub chain_id: u64,
    pub transaction: TransactionSummary,
    pub receipt: Option<ReceiptSummary>,
    pub explorer: String,
}

impl TransactionDetails {
    fn new(chain: &ChainConfig, tx: TransactionData, receipt: Option<ReceiptData>) -> Self {
        let explorer = chain.explorer_tx_url(&tx.hash.to_string());
        Self {
            network: chain.name.clone(),
            chain_id: chain.chain_id,
            transaction: TransactionSummary {
                hash: tx.hash,
                from: tx.from,
                to: tx.to,
                value: format_ether(tx.value),
                gas_limit: tx.gas_limit.to_string(),
                gas_price: tx.gas_price.map(gwei),
                nonce: tx.nonce,
                data: tx.input,
                block_number: tx.block_number,
                block_hash: tx.block_hash,
            },
            receipt: receipt.map(|receipt| ReceiptSummary {
                status: u8::from(receipt.success),
                gas_used: receipt.gas_used.to_string(),
                effective_gas_price: gwei(receipt.effective_gas_price),
                logs: receipt.log_count,
                contract_address: receipt.contract_address,
            }),
            explorer,
        }
    }
}

fn gwei(wei: u128) -> String {
    format_units(U256::from(wei), "gwei").unwrap_or_else(|_| wei.to_string())
}

/// Looks up transactions on one chain or on every configured chain.
#[derive(Debug, Clone)]
pub struct TransactionService {
    ctx: AdapterContext,
}

impl TransactionService {
    pub fn new(ctx: AdapterContext) -> Self {
        Self { ctx }
    }

    /// `Ok(None)` when the chain does not know the hash.
    pub async fn lookup(
        &self,
        chain_key: &str,
        hash: &str,
    ) -> Result<Option<TransactionDetails>, TransactionError> {
        let chain = self
            .ctx
            .networks
            .chain(chain_key)
            .ok_or_else(|| TransactionError::UnknownChain(chain_key.to_uppercase()))?;
        let hash = parse_transaction_hash(hash)
            .ok_or_else(|| TransactionError::InvalidHash(hash.to_string()))?;
        self.lookup_on(chain, hash).await
    }

    /// Tries every chain in configuration order and returns the first hit.
    ///
    /// Chains that fail are skipped; if every chain fails the last failure
    /// is returned.
    pub async fn lookup_across_chains(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionDetails>, TransactionError> {
        let parsed = parse_transaction_hash(hash)
            .ok_or_else(|| TransactionError::InvalidHash(hash.to_string()))?;

        let mut last_failure = None;
        let mut answered = false;
        for chain in self.ctx.networks.chains() {
            match self.lookup_on(chain, parsed).await {
                Ok(Some(details)) => return Ok(Some(details)),
                Ok(None) => answered = true,
                Err(err) => {
                    warn!(chain = %chain.key, hash = %parsed, error = %err, "Transaction lookup failed");
                    last_failure = Some(err);
                }
            }
        }

        match last_failure {
            Some(err) if !answered => Err(err),
            _ => Ok(None),
        }
    }

    async fn lookup_on(
        &self,
        chain: &ChainConfig,
        hash: B256,
    ) -> Result<Option<TransactionDetails>, TransactionError> {
        let lookup_error = |source| TransactionError::Lookup {
            chain: chain.key.clone(),
            source,
        };
        let reader = self.ctx.connector.connect(chain).map_err(lookup_error)?;

        debug!(chain = %chain.key, hash = %hash, "Looking up transaction");

        let (tx, receipt) = tokio::try_join!(reader.transaction(hash), reader.transaction_receipt(hash))
            .map_err(lookup_error)?;
        Ok(tx.map(|tx| TransactionDetails::new(chain, tx, receipt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockConnector, MockReader, context};
    use std::sync::Arc;

    fn hash() -> B256 {
        B256::repeat_byte(0x0f)
    }

    fn tx() -> TransactionData {
        TransactionData {
            hash: hash(),
            from: Address::repeat_byte(0x01),
            to: Some(Address::repeat_byte(0x02)),
            value: U256::from(1_500_000_000_000_000_000u128),
            nonce: 7,
            gas_limit: 21_000,
            gas_price: Some(3_000_000_000),
            input: Bytes::new(),
            block_number: Some(100),
            block_hash: Some(B256::repeat_byte(0x0b)),
        }
    }

    fn receipt() -> ReceiptData {
        ReceiptData {
            success: true,
            gas_used: 21_000,
            effective_gas_price: 2_500_000_000,
            log_count: 2,
            contract_address: None,
        }
    }

    #[tokio::test]
    async fn test_lookup_formats_units() {
        let reader = MockReader::default().with_transaction(tx(), Some(receipt()));
        let service = TransactionService::new(context(MockConnector::default().with_reader("BSC", reader)));

        let details = service
            .lookup("bsc", &hash().to_string())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(details.network, "BNB Smart Chain");
        assert_eq!(details.chain_id, 56);
        assert_eq!(details.transaction.value, "1.500000000000000000");
        assert_eq!(details.transaction.gas_price.as_deref(), Some("3.000000000"));
        assert_eq!(details.transaction.gas_limit, "21000");
        let receipt = details.receipt.unwrap();
        assert_eq!(receipt.status, 1);
        assert_eq!(receipt.effective_gas_price, "2.500000000");
        assert_eq!(receipt.logs, 2);
        assert_eq!(details.explorer, format!("https://bscscan.com/tx/{}", hash()));
    }

    #[tokio::test]
    async fn test_lookup_rejects_bad_input() {
        let service = TransactionService::new(context(MockConnector::default()));

        let unknown = service.lookup("polygon", &hash().to_string()).await;
        assert!(matches!(unknown, Err(TransactionError::UnknownChain(_))));

        let invalid = service.lookup("ETH", "0x1234").await;
        assert!(matches!(invalid, Err(TransactionError::InvalidHash(_))));
    }

    #[tokio::test]
    async fn test_across_chains_skips_failures() {
        let connector = Arc::new(
            MockConnector::default()
                .with_reader("BASE", MockReader::failing())
                .with_reader("BSC", MockReader::default())
                .with_reader("ETH", MockReader::default().with_transaction(tx(), None)),
        );
        let service = TransactionService::new(context(Arc::clone(&connector)));

        let details = service
            .lookup_across_chains(&hash().to_string())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(details.network, "Ethereum");
        assert!(details.receipt.is_none());
        assert_eq!(connector.connected(), vec!["BASE", "BSC", "ETH"]);
    }

    #[tokio::test]
    async fn test_across_chains_not_found() {
        let connector = MockConnector::default()
            .with_reader("BASE", MockReader::default())
            .with_reader("BSC", MockReader::default())
            .with_reader("ETH", MockReader::default())
            .with_reader("MONAD", MockReader::failing());
        let service = TransactionService::new(context(connector));

        let details = service.lookup_across_chains(&hash().to_string()).await.unwrap();
        assert!(details.is_none());
    }

    #[tokio::test]
    async fn test_across_chains_every_chain_failing() {
        let service = TransactionService::new(context(MockConnector::default()));

        let err = service
            .lookup_across_chains(&hash().to_string())
            .await
            .unwrap_err();
        assert!(!err.is_client_error());
        assert!(err.to_string().starts_with("Failed to get transaction on MONAD"));
    }
}
