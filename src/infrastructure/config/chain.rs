//! Chain (event source) configuration.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::units::DEFAULT_DECIMALS;

/// Which `PositionLiquidated` event layout the markets emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiVersion {
    /// Futures markets: indexed id/account/liquidator and a single fee.
    #[default]
    V1,
    /// Perps v2 markets: unindexed fields and three fee components.
    V2,
}

/// Node connection and polling settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// HTTP JSON-RPC endpoint. Overridden by `RPC_URL`.
    #[serde(default)]
    pub rpc_url: String,
    #[serde(default)]
    pub abi_version: AbiVersion,
    /// Market manager used to discover markets.
    #[serde(default)]
    pub manager_address: Option<String>,
    /// Explicit market address → symbol table. When non-empty, only these
    /// markets are watched and discovery is skipped.
    #[serde(default)]
    pub markets: BTreeMap<String, String>,
    /// Seconds between log polls (default: 4).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Blocks to wait before reading a block's logs (default: 0).
    #[serde(default)]
    pub confirmations: u64,
    /// Largest block span per log query (default: 2000).
    #[serde(default = "default_max_block_range")]
    pub max_block_range: u64,
    /// Fixed-point scale of sizes and prices (default: 18).
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

const fn default_poll_interval_secs() -> u64 {
    4
}

const fn default_max_block_range() -> u64 {
    2000
}

const fn default_decimals() -> u32 {
    DEFAULT_DECIMALS
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            abi_version: AbiVersion::default(),
            manager_address: None,
            markets: BTreeMap::new(),
            poll_interval_secs: default_poll_interval_secs(),
            confirmations: 0,
            max_block_range: default_max_block_range(),
            decimals: default_decimals(),
        }
    }
}
