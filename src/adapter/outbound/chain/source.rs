//! Polling liquidation source backed by a JSON-RPC node.

use std::future::Future;
use std::str::FromStr;

use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::Filter;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::contracts::{v1, v2};
use super::decode::{decode_log, event_signature, validate};
use super::directory::{symbol_from_market_key, MarketDirectory};
use crate::domain::LiquidationEvent;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::chain::{AbiVersion, ChainConfig};
use crate::port::LiquidationSource;

fn chain_error(context: &str, e: impl std::fmt::Display) -> Error {
    Error::Chain(format!("{context}: {e}"))
}

/// Liquidation source that polls `eth_getLogs` on the watched markets.
///
/// Polling starts at the chain head observed on connect; earlier
/// liquidations are never replayed.
pub struct ChainLiquidationSource {
    provider: DynProvider,
    abi: AbiVersion,
    directory: MarketDirectory,
    next_block: u64,
    confirmations: u64,
    max_block_range: u64,
}

impl ChainLiquidationSource {
    /// Connect to the node, resolve the market set and record the head.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC URL is missing or invalid, neither a
    /// market table nor a manager address is configured, or the node is
    /// unreachable.
    pub async fn connect(config: &ChainConfig) -> Result<Self> {
        if config.rpc_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "RPC_URL" }.into());
        }
        let rpc_url: url::Url =
            config
                .rpc_url
                .parse()
                .map_err(|e: url::ParseError| ConfigError::InvalidValue {
                    field: "rpc_url",
                    reason: e.to_string(),
                })?;
        let provider = ProviderBuilder::new().connect_http(rpc_url).erased();

        let directory = resolve_markets(&provider, config).await?;
        if directory.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "markets",
                reason: "no markets to watch".to_string(),
            }
            .into());
        }

        let head = provider
            .get_block_number()
            .await
            .map_err(|e| chain_error("failed to read block number", e))?;
        let next_block = safe_head(head, config.confirmations) + 1;

        info!(
            markets = directory.len(),
            abi = ?config.abi_version,
            from_block = next_block,
            "Chain source connected"
        );

        Ok(Self {
            provider,
            abi: config.abi_version,
            directory,
            next_block,
            confirmations: config.confirmations,
            max_block_range: config.max_block_range,
        })
    }

    async fn fetch_range(&self, from: u64, to: u64) -> Result<Vec<LiquidationEvent>> {
        let filter = Filter::new()
            .address(self.directory.addresses())
            .event_signature(event_signature(self.abi))
            .from_block(from)
            .to_block(to);

        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| chain_error("failed to fetch logs", e))?;

        debug!(from, to, logs = logs.len(), "Fetched liquidation logs");

        let mut events = Vec::with_capacity(logs.len());
        for log in &logs {
            let raw = match decode_log(log, self.abi) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(
                        market = %log.address(),
                        block = ?log.block_number,
                        error = %e,
                        "Undecodable liquidation log"
                    );
                    continue;
                }
            };

            match validate(&raw, &self.directory) {
                Ok(event) => events.push(event),
                Err(e) => warn!(
                    market = %self.directory.symbol(&raw.market),
                    error = %e,
                    "Rejected liquidation"
                ),
            }
        }

        Ok(events)
    }
}

#[async_trait]
impl LiquidationSource for ChainLiquidationSource {
    fn markets(&self) -> Vec<String> {
        self.directory.symbols()
    }

    async fn poll(&mut self) -> Result<Vec<LiquidationEvent>> {
        let head = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| chain_error("failed to read block number", e))?;
        let ranges = block_ranges(
            self.next_block,
            safe_head(head, self.confirmations),
            self.max_block_range,
        );

        let mut next_block = self.next_block;
        let this = &*self;
        let events =
            collect_ranges(&mut next_block, ranges, |from, to| this.fetch_range(from, to)).await;
        self.next_block = next_block;

        events
    }
}

/// Build the market directory from config or from the market manager.
async fn resolve_markets(provider: &DynProvider, config: &ChainConfig) -> Result<MarketDirectory> {
    if !config.markets.is_empty() {
        return MarketDirectory::from_config(&config.markets);
    }

    let manager = config
        .manager_address
        .as_deref()
        .ok_or(ConfigError::MissingField {
            field: "manager_address",
        })?;
    let manager = Address::from_str(manager).map_err(|e| ConfigError::InvalidValue {
        field: "manager_address",
        reason: e.to_string(),
    })?;

    let addresses: Vec<Address> = match config.abi_version {
        AbiVersion::V1 => v1::FuturesMarketManager::new(manager, provider.clone())
            .allMarkets()
            .call()
            .await
            .map_err(|e| chain_error("allMarkets() failed", e))?,
        AbiVersion::V2 => v2::PerpsV2MarketManager::new(manager, provider.clone())
            .allMarkets(true)
            .call()
            .await
            .map_err(|e| chain_error("allMarkets(true) failed", e))?,
    };

    let mut directory = MarketDirectory::new();
    for address in addresses {
        let key = match config.abi_version {
            AbiVersion::V1 => {
                v1::FuturesMarket::new(address, provider.clone())
                    .marketKey()
                    .call()
                    .await
            }
            AbiVersion::V2 => {
                v2::PerpsV2Market::new(address, provider.clone())
                    .marketKey()
                    .call()
                    .await
            }
        };

        match key.ok().as_ref().and_then(symbol_from_market_key) {
            Some(symbol) => {
                info!(market = %address, symbol = %symbol, "Market discovered");
                directory.insert(address, symbol);
            }
            None => {
                warn!(market = %address, "Could not read market key; using address");
                directory.insert(address, address.to_checksum(None));
            }
        }
    }

    Ok(directory)
}

/// Newest block deep enough to read.
const fn safe_head(head: u64, confirmations: u64) -> u64 {
    head.saturating_sub(confirmations)
}

/// Inclusive ranges covering `from..=safe_head`, each at most `max_range`
/// blocks long. Empty when there is nothing new.
fn block_ranges(from: u64, safe_head: u64, max_range: u64) -> Vec<(u64, u64)> {
    let max_range = max_range.max(1);
    let mut ranges = Vec::new();
    let mut start = from;
    while start <= safe_head {
        let end = safe_head.min(start.saturating_add(max_range - 1));
        ranges.push((start, end));
        if end == u64::MAX {
            break;
        }
        start = end + 1;
    }
    ranges
}

/// Fetch `ranges` in order, advancing `next_block` past each range that
/// succeeds.
///
/// A failed range stops the cycle with `next_block` left at its start, so it
/// is retried on the next poll. Events from earlier ranges are still
/// returned; the error is only surfaced when no range succeeded.
async fn collect_ranges<F, Fut>(
    next_block: &mut u64,
    ranges: Vec<(u64, u64)>,
    mut fetch: F,
) -> Result<Vec<LiquidationEvent>>
where
    F: FnMut(u64, u64) -> Fut,
    Fut: Future<Output = Result<Vec<LiquidationEvent>>>,
{
    let mut events = Vec::new();
    let mut progressed = false;

    for (from, to) in ranges {
        match fetch(from, to).await {
            Ok(batch) => {
                events.extend(batch);
                *next_block = to + 1;
                progressed = true;
            }
            Err(e) if !progressed => return Err(e),
            Err(e) => {
                warn!(
                    from,
                    to,
                    delivered = events.len(),
                    error = %e,
                    "Log fetch failed; range will be retried"
                );
                break;
            }
        }
    }

    Ok(events)
}
