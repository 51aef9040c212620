//! Dry-run sink that writes posts to the log.

use async_trait::async_trait;
use tracing::info;

use crate::port::{DeliveryError, MessageSink};

/// Logs each message instead of posting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl MessageSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn post(&self, text: &str) -> Result<(), DeliveryError> {
        info!(message = %text, "Post (dry run)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_sink_always_succeeds() {
        assert_eq!(tokio_test::block_on(LogSink.post("🚫 Liquidated")), Ok(()));
        assert_eq!(LogSink.name(), "log");
    }
}
