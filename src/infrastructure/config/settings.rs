//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for endpoints and credentials.
//!
//! # Example
//!
//! ```no_run
//! use srekt::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::chain::ChainConfig;
use super::dispatch::{DispatchConfig, TriggerPolicy};
use super::logging::LoggingConfig;
use super::message::MessageConfig;
use super::severity::SeverityConfig;
use super::sink::{SinkConfig, SinkKind};
use crate::error::{ConfigError, Result};

/// Largest fixed-point scale whose values still fit the 128-bit amounts.
const MAX_DECIMALS: u32 = 38;

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Node endpoint, ABI version and market table.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Threshold table and meme corpus locations.
    #[serde(default)]
    pub severity: SeverityConfig,

    /// Post template.
    #[serde(default)]
    pub message: MessageConfig,

    /// Dispatch queue trigger policy and pacing.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Destination feed.
    #[serde(default)]
    pub sink: SinkConfig,

    /// Enable dry-run mode.
    ///
    /// When true, posts are written to the log regardless of `[sink] kind`.
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// `RPC_URL` in the environment replaces `[chain] rpc_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(rpc_url) = std::env::var("RPC_URL") {
            if !rpc_url.trim().is_empty() {
                config.chain.rpc_url = rpc_url;
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// The sink actually used, taking `dry_run` into account.
    #[must_use]
    pub fn effective_sink(&self) -> SinkKind {
        if self.dry_run {
            SinkKind::Log
        } else {
            self.sink.kind
        }
    }

    fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }

        let chain = &self.chain;
        if !chain.rpc_url.is_empty() {
            url::Url::parse(&chain.rpc_url).map_err(|e| ConfigError::InvalidValue {
                field: "rpc_url",
                reason: e.to_string(),
            })?;
        }
        if let Some(manager) = &chain.manager_address {
            if !is_hex_address(manager) {
                return Err(ConfigError::InvalidValue {
                    field: "manager_address",
                    reason: format!("not a 20-byte hex address: {manager}"),
                }
                .into());
            }
        }
        for (address, symbol) in &chain.markets {
            if !is_hex_address(address) {
                return Err(ConfigError::InvalidValue {
                    field: "markets",
                    reason: format!("not a 20-byte hex address: {address}"),
                }
                .into());
            }
            if symbol.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "markets",
                    reason: format!("empty symbol for {address}"),
                }
                .into());
            }
        }
        if chain.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if chain.max_block_range == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_block_range",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if chain.decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue {
                field: "decimals",
                reason: format!("must be at most {MAX_DECIMALS}"),
            }
            .into());
        }

        if self.severity.thresholds_path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "thresholds_path",
            }
            .into());
        }
        if self.severity.corpus_path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "corpus_path",
            }
            .into());
        }

        if self.message.template.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "template" }.into());
        }

        if self.dispatch.trigger == TriggerPolicy::Periodic && self.dispatch.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0 for the periodic trigger".to_string(),
            }
            .into());
        }

        if self.sink.kind == SinkKind::Twitter {
            url::Url::parse(&self.sink.twitter_api_url).map_err(|e| {
                ConfigError::InvalidValue {
                    field: "twitter_api_url",
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(())
    }
}

/// `0x` followed by exactly 40 hex digits.
fn is_hex_address(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
