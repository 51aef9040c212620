//! Liquidation source port.

use async_trait::async_trait;

use crate::domain::LiquidationEvent;
use crate::error::Result;

/// Delivers liquidations that have passed boundary validation.
///
/// Sources are polled: each call returns everything observed since the
/// previous call, in emission order.
#[async_trait]
pub trait LiquidationSource: Send {
    /// Symbols of the markets being watched.
    fn markets(&self) -> Vec<String>;

    /// Fetch new liquidations.
    async fn poll(&mut self) -> Result<Vec<LiquidationEvent>>;
}
