//! Log decoding and boundary validation.
//!
//! Raw logs are decoded into a [`RawLiquidation`] regardless of ABI version,
//! then [`validate`] narrows the 256-bit values and resolves the market
//! symbol, producing a domain [`LiquidationEvent`].

use alloy_primitives::{Address, B256, I256, U256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::SolEvent;

use super::contracts::{v1, v2};
use super::directory::MarketDirectory;
use crate::domain::error::DomainError;
use crate::domain::{Direction, LiquidationEvent};
use crate::infrastructure::config::chain::AbiVersion;

/// Topic0 of `PositionLiquidated` for an ABI version.
#[must_use]
pub fn event_signature(abi: AbiVersion) -> B256 {
    match abi {
        AbiVersion::V1 => v1::FuturesMarket::PositionLiquidated::SIGNATURE_HASH,
        AbiVersion::V2 => v2::PerpsV2Market::PositionLiquidated::SIGNATURE_HASH,
    }
}

/// A decoded `PositionLiquidated` log, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLiquidation {
    pub market: Address,
    pub id: U256,
    pub account: Address,
    pub liquidator: Address,
    pub size: I256,
    pub price: U256,
    /// Sum of all fee components.
    pub fee: U256,
    pub block_number: Option<u64>,
    pub tx_hash: Option<B256>,
}

/// Decode a log emitted by a market of the given ABI version.
///
/// # Errors
///
/// Returns an error if the topics or data do not match the event layout.
pub fn decode_log(log: &Log, abi: AbiVersion) -> alloy_sol_types::Result<RawLiquidation> {
    let market = log.address();
    let block_number = log.block_number;
    let tx_hash = log.transaction_hash;

    let raw = match abi {
        AbiVersion::V1 => {
            let event = log.log_decode::<v1::FuturesMarket::PositionLiquidated>()?;
            let data = event.inner.data;
            RawLiquidation {
                market,
                id: data.id,
                account: data.account,
                liquidator: data.liquidator,
                size: data.size,
                price: data.price,
                fee: data.fee,
                block_number,
                tx_hash,
            }
        }
        AbiVersion::V2 => {
            let event = log.log_decode::<v2::PerpsV2Market::PositionLiquidated>()?;
            let data = event.inner.data;
            RawLiquidation {
                market,
                id: data.id,
                account: data.account,
                liquidator: data.liquidator,
                size: data.size,
                price: data.price,
                fee: data
                    .flaggerFee
                    .saturating_add(data.liquidatorFee)
                    .saturating_add(data.stakersFee),
                block_number,
                tx_hash,
            }
        }
    };

    Ok(raw)
}

fn narrow(value: U256, field: &'static str) -> Result<u128, DomainError> {
    u128::try_from(value).map_err(|_| DomainError::ValueOverflow {
        field,
        raw: value.to_string(),
    })
}

/// Check a decoded liquidation and convert it into a domain event.
///
/// # Errors
///
/// Rejects zero-size liquidations and values wider than 128 bits.
pub fn validate(
    raw: &RawLiquidation,
    directory: &MarketDirectory,
) -> Result<LiquidationEvent, DomainError> {
    if raw.size.is_zero() {
        return Err(DomainError::ZeroSize {
            id: raw.id.to_string(),
        });
    }

    Ok(LiquidationEvent {
        id: narrow(raw.id, "id")?,
        market: directory.symbol(&raw.market),
        account: raw.account.to_checksum(None),
        liquidator: raw.liquidator.to_checksum(None),
        size: narrow(raw.size.unsigned_abs(), "size")?,
        direction: Direction::from_negative(raw.size.is_negative()),
        price: narrow(raw.price, "price")?,
        fee: narrow(raw.fee, "fee")?,
        block_number: raw.block_number,
        tx_hash: raw.tx_hash.map(|hash| hash.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> Address {
        Address::repeat_byte(0x11)
    }

    fn log_for(data: alloy_primitives::LogData) -> Log {
        Log {
            inner: alloy_primitives::Log {
                address: market(),
                data,
            },
            block_number: Some(42),
            transaction_hash: Some(B256::repeat_byte(0x77)),
            ..Default::default()
        }
    }

    fn eth_short_size() -> I256 {
        I256::from_dec_str("-21019416428722031000").unwrap()
    }

    fn eth_price() -> U256 {
        U256::from(1_239_480_485_360_000_000_000u128)
    }

    #[test]
    fn signatures_differ_between_versions() {
        assert_ne!(event_signature(AbiVersion::V1), event_signature(AbiVersion::V2));
    }

    #[test]
    fn decodes_v1_log() {
        let event = v1::FuturesMarket::PositionLiquidated {
            id: U256::from(9),
            account: Address::repeat_byte(0x22),
            liquidator: Address::repeat_byte(0x33),
            size: eth_short_size(),
            price: eth_price(),
            fee: U256::from(20u64),
        };
        let log = log_for(event.encode_log_data());

        let raw = decode_log(&log, AbiVersion::V1).unwrap();
        assert_eq!(raw.market, market());
        assert_eq!(raw.id, U256::from(9));
        assert_eq!(raw.account, Address::repeat_byte(0x22));
        assert_eq!(raw.size, eth_short_size());
        assert_eq!(raw.fee, U256::from(20u64));
        assert_eq!(raw.block_number, Some(42));
    }

    #[test]
    fn decodes_v2_log_and_sums_fees() {
        let event = v2::PerpsV2Market::PositionLiquidated {
            id: U256::from(3),
            account: Address::repeat_byte(0x22),
            liquidator: Address::repeat_byte(0x33),
            size: I256::try_from(5i64).unwrap(),
            price: eth_price(),
            flaggerFee: U256::from(1u64),
            liquidatorFee: U256::from(2u64),
            stakersFee: U256::from(4u64),
        };
        let log = log_for(event.encode_log_data());

        let raw = decode_log(&log, AbiVersion::V2).unwrap();
        assert_eq!(raw.fee, U256::from(7u64));
        assert_eq!(raw.liquidator, Address::repeat_byte(0x33));
    }

    #[test]
    fn wrong_abi_version_fails_to_decode() {
        let event = v1::FuturesMarket::PositionLiquidated {
            id: U256::from(9),
            account: Address::repeat_byte(0x22),
            liquidator: Address::repeat_byte(0x33),
            size: eth_short_size(),
            price: eth_price(),
            fee: U256::ZERO,
        };
        let log = log_for(event.encode_log_data());

        assert!(decode_log(&log, AbiVersion::V2).is_err());
    }

    fn raw() -> RawLiquidation {
        RawLiquidation {
            market: market(),
            id: U256::from(9),
            account: Address::repeat_byte(0x22),
            liquidator: Address::repeat_byte(0x33),
            size: eth_short_size(),
            price: eth_price(),
            fee: U256::from(20u64),
            block_number: Some(42),
            tx_hash: None,
        }
    }

    #[test]
    fn validate_strips_sign_into_direction() {
        let mut directory = MarketDirectory::new();
        directory.insert(market(), "sETH");

        let event = validate(&raw(), &directory).unwrap();
        assert_eq!(event.market, "sETH");
        assert_eq!(event.size, 21_019_416_428_722_031_000);
        assert_eq!(event.direction, Direction::Short);
        assert_eq!(event.price, 1_239_480_485_360_000_000_000);
        assert_eq!(event.id, 9);
    }

    #[test]
    fn validate_positive_size_is_long() {
        let mut raw = raw();
        raw.size = I256::from_dec_str("1000000000000000000").unwrap();

        let event = validate(&raw, &MarketDirectory::new()).unwrap();
        assert_eq!(event.direction, Direction::Long);
        assert_eq!(event.market, market().to_checksum(None));
    }

    #[test]
    fn validate_rejects_zero_size() {
        let mut raw = raw();
        raw.size = I256::ZERO;

        assert_eq!(
            validate(&raw, &MarketDirectory::new()),
            Err(DomainError::ZeroSize { id: "9".into() })
        );
    }

    #[test]
    fn validate_rejects_oversized_price() {
        let mut raw = raw();
        raw.price = U256::MAX;

        assert!(matches!(
            validate(&raw, &MarketDirectory::new()),
            Err(DomainError::ValueOverflow { field: "price", .. })
        ));
    }
}
