//! Contract bindings for both market generations.

/// Futures markets (first generation).
pub mod v1 {
    alloy_sol_types::sol! {
        #[sol(rpc)]
        contract FuturesMarketManager {
            function allMarkets() external view returns (address[] memory);
        }

        #[sol(rpc)]
        contract FuturesMarket {
            function marketKey() external view returns (bytes32);

            event PositionLiquidated(
                uint256 indexed id,
                address indexed account,
                address indexed liquidator,
                int256 size,
                uint256 price,
                uint256 fee
            );
        }
    }
}

/// Perps v2 markets.
pub mod v2 {
    alloy_sol_types::sol! {
        #[sol(rpc)]
        contract PerpsV2MarketManager {
            function allMarkets(bool proxiedMarkets) external view returns (address[] memory);
        }

        #[sol(rpc)]
        contract PerpsV2Market {
            function marketKey() external view returns (bytes32);

            event PositionLiquidated(
                uint256 id,
                address account,
                address liquidator,
                int256 size,
                uint256 price,
                uint256 flaggerFee,
                uint256 liquidatorFee,
                uint256 stakersFee
            );
        }
    }
}
