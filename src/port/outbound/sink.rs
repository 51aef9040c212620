//! Message sink port.
//!
//! A sink accepts one text payload per call and reports success or failure.
//! Failures are non-fatal: the dispatch loop logs them and moves on.

use async_trait::async_trait;
use thiserror::Error;

/// Why a post did not reach the feed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The remote service answered but refused the post.
    #[error("{sink} rejected the post: {reason}")]
    Rejected {
        /// Name of the sink.
        sink: &'static str,
        /// Status and body, or the service's error message.
        reason: String,
    },

    /// The request never got a usable answer.
    #[error("{sink} transport failure: {reason}")]
    Transport {
        /// Name of the sink.
        sink: &'static str,
        /// Underlying error text.
        reason: String,
    },
}

/// Destination for outbound messages.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `post` is awaited by the drain loop; a hanging call stalls the queue
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Deliver one message.
    async fn post(&self, text: &str) -> Result<(), DeliveryError>;
}
