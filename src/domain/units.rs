//! Fixed-point token amounts.
//!
//! On-chain sizes and prices are integers scaled by `10^decimals`. These
//! helpers turn them into display strings and [`Decimal`] values.

use rust_decimal::Decimal;

use super::error::DomainError;

/// Scale used by the futures contracts for both size and price.
pub const DEFAULT_DECIMALS: u32 = 18;

/// Number of characters kept when displaying a position size.
pub const SIZE_DISPLAY_CHARS: usize = 7;

const MAX_MANTISSA: u128 = 79_228_162_514_264_337_593_543_950_335;
const MAX_SCALE: u32 = 28;

/// Render a fixed-point integer as a decimal string.
///
/// Trailing fractional zeros are dropped but at least one fractional digit
/// is kept, so `10^18` at 18 decimals renders as `"1.0"`.
#[must_use]
pub fn format_units(raw: u128, decimals: u32) -> String {
    let digits = raw.to_string();
    let width = decimals as usize;
    if width == 0 {
        return format!("{digits}.0");
    }

    let padded = if digits.len() <= width {
        format!("{}{}", "0".repeat(width + 1 - digits.len()), digits)
    } else {
        digits
    };

    let (int_part, frac_part) = padded.split_at(padded.len() - width);
    let frac_part = frac_part.trim_end_matches('0');
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };

    format!("{int_part}.{frac_part}")
}

/// Cut a string to its first `max_chars` characters.
///
/// This is a character cut, not numeric rounding.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Convert a fixed-point integer into a [`Decimal`].
///
/// Values whose mantissa exceeds 96 bits lose low-order fractional digits
/// (truncated) until they fit. Returns [`DomainError::ValueOverflow`] when
/// even the integer part does not fit.
pub fn to_decimal(raw: u128, decimals: u32, field: &'static str) -> Result<Decimal, DomainError> {
    let mut mantissa = raw;
    let mut scale = decimals;

    while scale > MAX_SCALE || (mantissa > MAX_MANTISSA && scale > 0) {
        mantissa /= 10;
        scale -= 1;
    }

    let overflow = || DomainError::ValueOverflow {
        field,
        raw: raw.to_string(),
    };
    let mantissa = i128::try_from(mantissa).map_err(|_| overflow())?;

    Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|_| overflow())
}
