//! Handler for the `preview` command.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::adapter::inbound::cli::command::PreviewArgs;
use crate::adapter::outbound::sink::LogSink;
use crate::application::pipeline::LiquidationPipeline;
use crate::domain::{Direction, LiquidationEvent};
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap::{build_formatter, build_queue};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::resources::load_classifier;

/// Render and print the post for a hand-made liquidation.
pub fn execute(args: &PreviewArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let event = preview_event(args)?;
    let text = render(&config, &event, args.seed)?;
    println!("{text}");
    Ok(())
}

/// Build the liquidation described by the command-line arguments.
pub fn preview_event(args: &PreviewArgs) -> Result<LiquidationEvent> {
    let (negative, size) = parse_signed(&args.size)?;
    if size == 0 {
        return Err(ConfigError::InvalidValue {
            field: "size",
            reason: "must not be zero".to_string(),
        }
        .into());
    }

    let price = args
        .price
        .trim()
        .parse::<u128>()
        .map_err(|e| ConfigError::InvalidValue {
            field: "price",
            reason: e.to_string(),
        })?;

    Ok(LiquidationEvent {
        id: 0,
        market: args.market.clone(),
        account: String::new(),
        liquidator: String::new(),
        size,
        direction: Direction::from_negative(negative),
        price,
        fee: 0,
        block_number: None,
        tx_hash: None,
    })
}

fn render(config: &Config, event: &LiquidationEvent, seed: Option<u64>) -> Result<String> {
    let classifier = Arc::new(load_classifier(&config.severity)?);
    let queue = build_queue(config, Arc::new(LogSink));
    let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let pipeline = LiquidationPipeline::with_rng(
        classifier,
        build_formatter(config),
        queue,
        config.chain.decimals,
        rng,
    );
    pipeline.render(event)
}

/// Split a signed decimal integer into sign and magnitude.
fn parse_signed(raw: &str) -> Result<(bool, u128)> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let magnitude = digits
        .parse::<u128>()
        .map_err(|e| ConfigError::InvalidValue {
            field: "size",
            reason: format!("{raw}: {e}"),
        })?;
    Ok((negative, magnitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(size: &str) -> PreviewArgs {
        PreviewArgs {
            market: "sETH".into(),
            size: size.into(),
            price: "1239480485360000000000".into(),
            seed: Some(7),
            config: None,
        }
    }

    #[test]
    fn negative_size_is_short() {
        let event = preview_event(&args("-21019416428722031000")).unwrap();
        assert_eq!(event.direction, Direction::Short);
        assert_eq!(event.size, 21_019_416_428_722_031_000);
    }

    #[test]
    fn unsigned_and_plus_sizes_are_long() {
        assert_eq!(preview_event(&args("5")).unwrap().direction, Direction::Long);
        assert_eq!(preview_event(&args("+5")).unwrap().direction, Direction::Long);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(preview_event(&args("-0")).is_err());
    }

    #[test]
    fn garbage_size_is_rejected() {
        assert!(preview_event(&args("12abc")).is_err());
        assert!(preview_event(&args("--5")).is_err());
    }
}
