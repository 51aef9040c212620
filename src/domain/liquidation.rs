//! Liquidation records as they enter the core.

use std::fmt;

use rust_decimal::Decimal;

use super::error::DomainError;
use super::units::to_decimal;

/// Side of the liquidated position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Direction implied by the sign of an on-chain position size.
    #[must_use]
    pub const fn from_negative(is_negative: bool) -> Self {
        if is_negative {
            Self::Short
        } else {
            Self::Long
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated liquidation.
///
/// Built by the event source adapter after boundary checks; amounts stay in
/// their fixed-point representation until formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidationEvent {
    /// Position id assigned by the market contract.
    pub id: u128,
    /// Human-readable market symbol, e.g. `sETH`.
    pub market: String,
    /// Account whose position was liquidated.
    pub account: String,
    /// Keeper that triggered the liquidation.
    pub liquidator: String,
    /// Absolute position size, fixed-point.
    pub size: u128,
    /// Side of the position.
    pub direction: Direction,
    /// Liquidation price, fixed-point.
    pub price: u128,
    /// Total fees paid, fixed-point.
    pub fee: u128,
    /// Block the event was emitted in, when known.
    pub block_number: Option<u64>,
    /// Transaction hash, when known.
    pub tx_hash: Option<String>,
}

impl LiquidationEvent {
    /// Position size as a decimal.
    pub fn size_decimal(&self, decimals: u32) -> Result<Decimal, DomainError> {
        to_decimal(self.size, decimals, "size")
    }

    /// Liquidation price as a decimal.
    pub fn price_decimal(&self, decimals: u32) -> Result<Decimal, DomainError> {
        to_decimal(self.price, decimals, "price")
    }

    /// Size multiplied by price.
    ///
    /// Saturates at [`Decimal::MAX`] so a huge liquidation lands in the top tier.
    pub fn notional(&self, decimals: u32) -> Result<Decimal, DomainError> {
        let size = self.size_decimal(decimals)?;
        let price = self.price_decimal(decimals)?;
        Ok(size.checked_mul(price).unwrap_or(Decimal::MAX))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// The sample sETH short used throughout the tests.
    pub fn eth_short() -> LiquidationEvent {
        LiquidationEvent {
            id: 7,
            market: "sETH".into(),
            account: "0x1111111111111111111111111111111111111111".into(),
            liquidator: "0x2222222222222222222222222222222222222222".into(),
            size: 21_019_416_428_722_031_000,
            direction: Direction::Short,
            price: 1_239_480_485_360_000_000_000,
            fee: 20_000_000_000_000_000_000,
            block_number: Some(1),
            tx_hash: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn direction_from_sign() {
        assert_eq!(Direction::from_negative(true), Direction::Short);
        assert_eq!(Direction::from_negative(false), Direction::Long);
        assert_eq!(Direction::Short.to_string(), "short");
    }

    #[test]
    fn notional_is_size_times_price() {
        let event = fixtures::eth_short();
        let notional = event.notional(18).unwrap();

        assert!(notional > dec!(26053.0));
        assert!(notional < dec!(26054.0));
    }

    #[test]
    fn notional_saturates_on_overflow() {
        let mut event = fixtures::eth_short();
        event.size = u128::MAX;
        event.price = u128::MAX;

        assert_eq!(event.notional(0).ok(), None);
        assert_eq!(event.notional(10).unwrap(), Decimal::MAX);
    }
}
