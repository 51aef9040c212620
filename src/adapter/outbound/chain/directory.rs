//! Market address → symbol table.

use std::collections::BTreeMap;
use std::str::FromStr;

use alloy_primitives::{Address, B256};

use crate::error::{ConfigError, Result};

/// Suffix carried by perps v2 market keys (`sETHPERP`).
const PERP_SUFFIX: &str = "PERP";

/// Human-readable names of the watched markets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketDirectory {
    symbols: BTreeMap<Address, String>,
}

impl MarketDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from configured `address = symbol` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if an address does not parse.
    pub fn from_config(markets: &BTreeMap<String, String>) -> Result<Self> {
        let mut directory = Self::new();
        for (address, symbol) in markets {
            let parsed = Address::from_str(address).map_err(|e| ConfigError::InvalidValue {
                field: "markets",
                reason: format!("{address}: {e}"),
            })?;
            directory.insert(parsed, symbol.trim());
        }
        Ok(directory)
    }

    pub fn insert(&mut self, address: Address, symbol: impl Into<String>) {
        self.symbols.insert(address, symbol.into());
    }

    /// Symbol for a market, falling back to its checksummed address.
    #[must_use]
    pub fn symbol(&self, address: &Address) -> String {
        self.symbols
            .get(address)
            .cloned()
            .unwrap_or_else(|| address.to_checksum(None))
    }

    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        self.symbols.keys().copied().collect()
    }

    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.symbols.values().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Decode a `bytes32` market key such as `sETH` or `sETHPERP` into a symbol.
///
/// The key is read up to the first NUL byte; a trailing `PERP` is dropped.
#[must_use]
pub fn symbol_from_market_key(key: &B256) -> Option<String> {
    let bytes = key.as_slice();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let text = std::str::from_utf8(&bytes[..end]).ok()?.trim();

    let symbol = text
        .strip_suffix(PERP_SUFFIX)
        .filter(|stripped| !stripped.is_empty())
        .unwrap_or(text);

    if symbol.is_empty() {
        None
    } else {
        Some(symbol.to_string())
    }
}
