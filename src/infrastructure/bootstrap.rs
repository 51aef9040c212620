//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::outbound::sink::{LogSink, TwitterSink};
use crate::application::classifier::SeverityClassifier;
use crate::application::dispatch::DispatchQueue;
use crate::application::pipeline::LiquidationPipeline;
use crate::domain::MessageFormatter;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::sink::SinkKind;
use crate::port::{LiquidationSource, MessageSink};

/// Build the configured sink. Credentials are read from the environment.
///
/// # Errors
///
/// Returns an error if the sink's credentials are missing.
pub fn build_sink(config: &Config) -> Result<Arc<dyn MessageSink>> {
    let kind = config.effective_sink();
    let sink: Arc<dyn MessageSink> = match kind {
        SinkKind::Log => Arc::new(LogSink),
        SinkKind::Twitter => Arc::new(TwitterSink::from_env(&config.sink.twitter_api_url)?),
        SinkKind::Telegram => build_telegram_sink()?,
    };
    info!(sink = kind.as_str(), dry_run = config.dry_run, "Sink initialized");
    Ok(sink)
}

#[cfg(feature = "telegram")]
fn build_telegram_sink() -> Result<Arc<dyn MessageSink>> {
    use crate::adapter::outbound::sink::telegram::{TelegramConfig, TelegramSink};

    Ok(Arc::new(TelegramSink::new(TelegramConfig::from_env()?)))
}

#[cfg(not(feature = "telegram"))]
fn build_telegram_sink() -> Result<Arc<dyn MessageSink>> {
    Err(crate::error::ConfigError::InvalidValue {
        field: "kind",
        reason: "telegram sink requires the telegram feature".to_string(),
    }
    .into())
}

/// Build the message formatter from `[message]` and `[chain] decimals`.
#[must_use]
pub fn build_formatter(config: &Config) -> MessageFormatter {
    MessageFormatter::new(
        config.message.template.clone(),
        config.message.marker.clone(),
        config.chain.decimals,
    )
}

/// Build the dispatch queue in front of `sink`.
#[must_use]
pub fn build_queue(config: &Config, sink: Arc<dyn MessageSink>) -> Arc<DispatchQueue> {
    Arc::new(DispatchQueue::new(sink, config.dispatch.post_spacing()))
}

/// Wire classifier, formatter and queue into a pipeline.
#[must_use]
pub fn build_pipeline(
    config: &Config,
    classifier: Arc<SeverityClassifier>,
    queue: Arc<DispatchQueue>,
) -> LiquidationPipeline {
    LiquidationPipeline::new(
        classifier,
        build_formatter(config),
        queue,
        config.chain.decimals,
    )
}

/// Poll interval of the event source.
#[must_use]
pub fn poll_interval(config: &Config) -> Duration {
    Duration::from_secs(config.chain.poll_interval_secs)
}

/// Connect the on-chain liquidation source.
///
/// # Errors
///
/// Returns an error if the node cannot be reached or no markets resolve.
#[cfg(feature = "chain")]
pub async fn build_source(config: &Config) -> Result<Box<dyn LiquidationSource>> {
    use crate::adapter::outbound::chain::ChainLiquidationSource;

    let source = ChainLiquidationSource::connect(&config.chain).await?;
    Ok(Box::new(source))
}

/// Without the `chain` feature there is no event source.
///
/// # Errors
///
/// Always returns a configuration error.
#[cfg(not(feature = "chain"))]
pub async fn build_source(_config: &Config) -> Result<Box<dyn LiquidationSource>> {
    Err(crate::error::ConfigError::InvalidValue {
        field: "chain",
        reason: "the event source requires the chain feature".to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::liquidation::fixtures;
    use crate::domain::Tier;

    #[test]
    fn dry_run_builds_log_sink() {
        let config = Config::parse_toml("dry_run = true\n[sink]\nkind = \"twitter\"\n").unwrap();
        let sink = build_sink(&config).unwrap();
        assert_eq!(sink.name(), "log");
    }

    #[test]
    fn formatter_uses_configured_template() {
        let config = Config::parse_toml(
            "[message]\ntemplate = \"{marker}|{market}|{flavor}\"\nmarker = \"x\"\n",
        )
        .unwrap();
        let formatter = build_formatter(&config);

        let text = formatter
            .format(&fixtures::eth_short(), Tier::new(2), "gm")
            .unwrap();
        assert_eq!(text, "xxx|sETH|gm");
    }
}
