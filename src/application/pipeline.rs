//! Liquidation handling pipeline.
//!
//! Turns each incoming liquidation into post text and hands it to the
//! dispatch queue:
//!
//! ```text
//! LiquidationEvent ─▶ notional ─▶ tier + flavor ─▶ message ─▶ DispatchQueue
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::domain::{LiquidationEvent, MessageFormatter};
use crate::error::Result;
use crate::port::LiquidationSource;

use super::classifier::SeverityClassifier;
use super::dispatch::DispatchQueue;

/// Classifies, formats and enqueues liquidations.
pub struct LiquidationPipeline {
    classifier: Arc<SeverityClassifier>,
    formatter: MessageFormatter,
    queue: Arc<DispatchQueue>,
    decimals: u32,
    rng: Mutex<StdRng>,
}

impl LiquidationPipeline {
    #[must_use]
    pub fn new(
        classifier: Arc<SeverityClassifier>,
        formatter: MessageFormatter,
        queue: Arc<DispatchQueue>,
        decimals: u32,
    ) -> Self {
        Self::with_rng(classifier, formatter, queue, decimals, StdRng::from_entropy())
    }

    /// Build a pipeline with a caller-provided random source.
    #[must_use]
    pub fn with_rng(
        classifier: Arc<SeverityClassifier>,
        formatter: MessageFormatter,
        queue: Arc<DispatchQueue>,
        decimals: u32,
        rng: StdRng,
    ) -> Self {
        Self {
            classifier,
            formatter,
            queue,
            decimals,
            rng: Mutex::new(rng),
        }
    }

    #[must_use]
    pub fn queue(&self) -> &Arc<DispatchQueue> {
        &self.queue
    }

    /// Render the post text for a liquidation without enqueuing it.
    pub fn render(&self, event: &LiquidationEvent) -> Result<String> {
        let notional = event.notional(self.decimals)?;
        let mut rng = self.rng.lock();
        let classification = self.classifier.assess(notional, &mut *rng);

        let text = self
            .formatter
            .format(event, classification.tier, classification.flavor)?;

        info!(
            market = %event.market,
            id = event.id,
            direction = %event.direction,
            notional = %notional.round_dp(2),
            tier = classification.tier.index(),
            line = classification.line_index,
            "Liquidation classified"
        );

        Ok(text)
    }

    /// Render a liquidation and append it to the dispatch queue.
    pub fn handle(&self, event: &LiquidationEvent) -> Result<()> {
        let text = self.render(event)?;
        self.queue.enqueue(text);
        Ok(())
    }

    /// Poll `source` forever, handling every liquidation it yields.
    ///
    /// Poll failures and unrenderable events are logged and skipped.
    pub async fn run<S: LiquidationSource + ?Sized>(
        &self,
        source: &mut S,
        poll_interval: Duration,
    ) {
        info!(markets = ?source.markets(), "Listening for liquidations");

        loop {
            match source.poll().await {
                Ok(events) => {
                    for event in &events {
                        if let Err(e) = self.handle(event) {
                            warn!(market = %event.market, id = event.id, error = %e, "Skipping liquidation");
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Liquidation poll failed");
                }
            }
            sleep(poll_interval).await;
        }
    }
}
