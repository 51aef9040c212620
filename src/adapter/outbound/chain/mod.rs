//! On-chain liquidation source.
//!
//! Polls a node over HTTP for `PositionLiquidated` logs emitted by the
//! watched futures markets, decodes them according to the configured ABI
//! version and validates them before they reach the core.
//!
//! Requires the `chain` feature to be enabled.

mod contracts;
pub mod decode;
pub mod directory;
pub mod source;

pub use decode::{decode_log, validate, RawLiquidation};
pub use directory::MarketDirectory;
pub use source::ChainLiquidationSource;
