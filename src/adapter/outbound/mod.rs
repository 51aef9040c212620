//! Outbound adapters (driven side).

#[cfg(feature = "chain")]
pub mod chain;
pub mod sink;
