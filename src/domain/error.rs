//! Domain validation errors.
//!
//! Returned when a threshold table, corpus or liquidation record violates
//! the invariants the classifier relies on.
//!
//! # Examples
//!
//! ```
//! use srekt::domain::error::DomainError;
//! use srekt::domain::severity::ThresholdTable;
//!
//! let result = ThresholdTable::try_new(vec![]);
//! assert!(matches!(result, Err(DomainError::EmptyThresholds)));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The threshold table must contain at least one tier.
    #[error("threshold table cannot be empty")]
    EmptyThresholds,

    /// Thresholds must be monotonically non-decreasing.
    #[error("threshold {index} ({value}) is lower than the previous threshold ({previous})")]
    UnorderedThresholds {
        /// Index of the offending threshold.
        index: usize,
        /// The offending value.
        value: Decimal,
        /// The value at `index - 1`.
        previous: Decimal,
    },

    /// A threshold line could not be parsed as a number.
    #[error("threshold on line {line} is not a number: {text:?}")]
    InvalidThreshold {
        /// 1-based line number in the source resource.
        line: usize,
        /// The raw text.
        text: String,
    },

    /// The meme corpus must contain at least one line.
    #[error("meme corpus cannot be empty")]
    EmptyCorpus,

    /// A fixed-point value does not fit in the decimal representation.
    #[error("{field} does not fit in a decimal: {raw}")]
    ValueOverflow {
        /// Name of the field being converted.
        field: &'static str,
        /// The raw integer, as text.
        raw: String,
    },

    /// A liquidation carried a zero position size.
    #[error("liquidation {id} has zero size")]
    ZeroSize {
        /// Position id of the liquidation.
        id: String,
    },
}
