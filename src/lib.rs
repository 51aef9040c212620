//! srekt - liquidation feed bot for Synthetix futures markets.
//!
//! Watches `PositionLiquidated` events, grades each liquidation by its
//! US-dollar notional against a threshold table, picks a flavor line from a
//! meme corpus slice for that tier and posts the result to a social feed.
//!
//! # Modules
//!
//! - [`domain`] - Liquidations, severity tiers, meme corpus, message formatting
//! - [`application`] - Classifier, dispatch queue and handling pipeline
//! - [`port`] - Traits for event sources and message sinks
//! - [`adapter`] - Chain source, Twitter/Telegram/log sinks and the CLI
//! - [`infrastructure`] - Configuration, resource loading and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `chain` - JSON-RPC event source (alloy)
//! - `telegram` - Telegram sink (teloxide)
//!
//! # Example
//!
//! ```
//! use srekt::domain::{ThresholdTable, Tier};
//! use rust_decimal_macros::dec;
//!
//! let table = ThresholdTable::parse("0\n100_000\n1_000_000\n").unwrap();
//! assert_eq!(table.classify(dec!(250000)), Tier::new(1));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
