//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   ┌─────────────┐     ┌────────────────────────────┐     ┌─────────┐
//!   │ Liquidation │ ──▶ │ classify → enqueue → drain │ ──▶ │ Message │
//!   │ Source      │     │       (application)        │     │ Sink    │
//!   └─────────────┘     └────────────────────────────┘     └─────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`LiquidationSource`] - delivers validated liquidations (chain adapter)
//! - [`MessageSink`] - accepts outbound post text (Twitter, Telegram, log)

pub mod outbound;

pub use outbound::sink::{DeliveryError, MessageSink};
pub use outbound::source::LiquidationSource;
