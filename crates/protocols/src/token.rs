use crate::rpc::ChainReader;
use alloy::primitives::Address;
use dexpool_domain::{ChainConfig, TokenInfo};
use tracing::debug;

/// Resolves ERC20 metadata for pool currencies.
///
/// Never fails: the zero address is the chain's native asset, and a token
/// whose reads revert is reported as unknown with 18 decimals.
pub struct TokenResolver<'a> {
    reader: &'a dyn ChainReader,
    chain: &'a ChainConfig,
}

impl<'a> TokenResolver<'a> {
    pub fn new(reader: &'a dyn ChainReader, chain: &'a ChainConfig) -> Self {
        Self { reader, chain }
    }

    pub async fn resolve(&self, token: Address) -> TokenInfo {
        if token == Address::ZERO {
            return TokenInfo::native(&self.chain.native_asset);
        }

        let metadata = tokio::try_join!(
            self.reader.erc20_symbol(token),
            self.reader.erc20_name(token),
            self.reader.erc20_decimals(token),
        );

        match metadata {
            Ok((symbol, name, decimals)) => TokenInfo::new(token, symbol, name, decimals),
            Err(err) => {
                debug!(chain = %self.chain.key, token = %token, error = %err, "Token metadata unavailable");
                TokenInfo::unknown(token)
            }
        }
    }

    /// Resolves both sides of a pool concurrently.
    pub async fn resolve_pair(&self, token0: Address, token1: Address) -> (TokenInfo, TokenInfo) {
        tokio::join!(self.resolve(token0), self.resolve(token1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockReader;
    use dexpool_domain::NetworkConfig;

    #[tokio::test]
    async fn test_zero_address_is_native_asset_without_reads() {
        let config = NetworkConfig::default();
        let chain = config.chain("BSC").unwrap();
        let reader = MockReader::default();

        let token = TokenResolver::new(&reader, chain).resolve(Address::ZERO).await;
        assert_eq!(token.symbol, "BNB");
        assert_eq!(token.name, "BNB");
        assert_eq!(token.decimals, 18);
        assert_eq!(reader.call_count(), 0);
    }

    #[tokio::test]
    async fn test_known_token_metadata() {
        let config = NetworkConfig::default();
        let chain = config.chain("ETH").unwrap();
        let usdc = Address::repeat_byte(0xA0);
        let reader = MockReader::default().with_token(usdc, "USDC", "USD Coin", 6);

        let token = TokenResolver::new(&reader, chain).resolve(usdc).await;
        assert_eq!(token, TokenInfo::new(usdc, "USDC", "USD Coin", 6));
    }

    #[tokio::test]
    async fn test_reverting_token_falls_back() {
        let config = NetworkConfig::default();
        let chain = config.chain("BASE").unwrap();
        let reader = MockReader::default();
        let missing = Address::repeat_byte(0x33);

        let (zero, unknown) = TokenResolver::new(&reader, chain)
            .resolve_pair(Address::ZERO, missing)
            .await;
        assert_eq!(zero.symbol, "ETH");
        assert_eq!(unknown, TokenInfo::unknown(missing));
    }
}
