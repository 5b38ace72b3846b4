//! Solidity bindings for every contract the adapters read.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IERC20Metadata {
        function symbol() external view returns (string);
        function name() external view returns (string);
        function decimals() external view returns (uint8);
    }
}

sol! {
    #[sol(rpc)]
    interface IUniswapV2Pair {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function getReserves() external view returns (
            uint112 reserve0,
            uint112 reserve1,
            uint32 blockTimestampLast
        );
    }
}

sol! {
    #[sol(rpc)]
    interface IUniswapV3Pool {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function fee() external view returns (uint24);
        function tickSpacing() external view returns (int24);
        function slot0() external view returns (
            uint160 sqrtPriceX96,
            int24 tick,
            uint16 observationIndex,
            uint16 observationCardinality,
            uint16 observationCardinalityNext,
            uint8 feeProtocol,
            bool unlocked
        );
        function liquidity() external view returns (uint128);
    }
}

// PancakeSwap V3 packs two 16-bit protocol fees into a uint32 `feeProtocol`.
sol! {
    #[sol(rpc)]
    interface IPancakeV3Pool {
        function slot0() external view returns (
            uint160 sqrtPriceX96,
            int24 tick,
            uint16 observationIndex,
            uint16 observationCardinality,
            uint16 observationCardinalityNext,
            uint32 feeProtocol,
            bool unlocked
        );
    }
}

sol! {
    #[sol(rpc)]
    interface IUniswapV4Quoter {
        struct PoolKey {
            address currency0;
            address currency1;
            uint24 fee;
            int24 tickSpacing;
            address hooks;
        }

        function getPoolKey(bytes32 poolId) external view returns (
            address currency0,
            address currency1,
            uint24 fee,
            int24 tickSpacing,
            address hooks
        );
        function getUniswapV4PoolReserve(PoolKey key) external view returns (
            uint256 reserve0,
            uint256 reserve1
        );
    }
}

sol! {
    #[sol(rpc)]
    interface IUniswapV4StateView {
        function getSlot0(bytes32 poolId) external view returns (
            uint160 sqrtPriceX96,
            int24 tick,
            uint24 protocolFee,
            uint24 lpFee
        );
        function getLiquidity(bytes32 poolId) external view returns (uint128 liquidity);
    }
}

sol! {
    #[sol(rpc)]
    interface IPancakeClPoolManager {
        function poolIdToPoolKey(bytes32 id) external view returns (
            address currency0,
            address currency1,
            address hooks,
            address poolManager,
            uint24 fee,
            bytes32 parameters
        );
        function getSlot0(bytes32 id) external view returns (
            uint160 sqrtPriceX96,
            int24 tick,
            uint24 protocolFee,
            uint24 lpFee
        );
        function getLiquidity(bytes32 id) external view returns (uint128 liquidity);
    }
}

sol! {
    #[sol(rpc)]
    interface IPancakeBinPoolManager {
        function getSlot0(bytes32 id) external view returns (
            uint24 activeId,
            uint24 protocolFee,
            uint24 lpFee
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use alloy::sol_types::SolCall;

    // sqrtPriceX96, tick, three observation fields, feeProtocol, unlocked
    fn slot0_return(fee_protocol: u64) -> Vec<u8> {
        let words = [
            U256::from(1u64) << 96,
            U256::from(100u64),
            U256::from(3u64),
            U256::from(8u64),
            U256::from(8u64),
            U256::from(fee_protocol),
            U256::from(1u64),
        ];
        words
            .iter()
            .flat_map(|word| word.to_be_bytes::<32>())
            .collect()
    }

    #[test]
    fn test_pancake_slot0_keeps_both_protocol_fees() {
        let slot0 = IPancakeV3Pool::slot0Call::abi_decode_returns(&slot0_return(0x0c80_0c80)).unwrap();
        assert_eq!(slot0.feeProtocol, 0x0c80_0c80);
        assert_eq!(slot0.observationCardinality, 8);
        assert!(slot0.unlocked);
    }

    #[test]
    fn test_uniswap_slot0_fee_protocol() {
        let slot0 = IUniswapV3Pool::slot0Call::abi_decode_returns(&slot0_return(0x44)).unwrap();
        assert_eq!(slot0.feeProtocol, 0x44);
        assert_eq!(slot0.tick.as_i32(), 100);
    }
}
