//! Outbound message formatting.
//!
//! Messages are rendered from a template with the placeholders `{marker}`,
//! `{size}`, `{market}`, `{direction}`, `{price}` and `{flavor}`.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::DomainError;
use super::liquidation::LiquidationEvent;
use super::severity::Tier;
use super::units::{format_units, truncate_chars, SIZE_DISPLAY_CHARS};

/// Template used when none is configured.
pub const DEFAULT_TEMPLATE: &str =
    "{marker} Liquidated {size} {market} {direction} @ {price}\n\n{flavor}";

/// Severity marker repeated once per tier.
pub const DEFAULT_MARKER: &str = "🚫";

/// Format a dollar amount: `$` prefix, two decimals, no grouping.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

/// Renders liquidations into post text.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    template: String,
    marker: String,
    decimals: u32,
}

impl MessageFormatter {
    #[must_use]
    pub fn new(template: impl Into<String>, marker: impl Into<String>, decimals: u32) -> Self {
        Self {
            template: template.into(),
            marker: marker.into(),
            decimals,
        }
    }

    /// The marker repeated `tier.intensity()` times.
    #[must_use]
    pub fn marker_for(&self, tier: Tier) -> String {
        self.marker.repeat(tier.intensity())
    }

    /// Render a message for a classified liquidation.
    pub fn format(
        &self,
        event: &LiquidationEvent,
        tier: Tier,
        flavor: &str,
    ) -> Result<String, DomainError> {
        let size = truncate_chars(&format_units(event.size, self.decimals), SIZE_DISPLAY_CHARS);
        let price = format_usd(event.price_decimal(self.decimals)?);

        let marker = self.marker_for(tier);

        Ok(fill_template(&self.template, |key| match key {
            "marker" => Some(marker.as_str()),
            "size" => Some(size.as_str()),
            "market" => Some(event.market.as_str()),
            "direction" => Some(event.direction.as_str()),
            "price" => Some(price.as_str()),
            "flavor" => Some(flavor),
            _ => None,
        }))
    }
}

/// Substitute `{key}` placeholders in one pass over `template`.
///
/// Inserted values are never rescanned. Unknown keys and unmatched braces
/// are copied through unchanged.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let value = tail[1..]
            .find('}')
            .and_then(|close| lookup(&tail[1..=close]).map(|value| (value, close + 2)));

        match value {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE, DEFAULT_MARKER, super::units::DEFAULT_DECIMALS)
    }
}
