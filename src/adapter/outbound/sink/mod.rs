//! Message sink adapters.
//!
//! Implements the `port::MessageSink` trait for the supported feeds.

pub mod log;
#[cfg(feature = "telegram")]
pub mod telegram;
pub mod twitter;

pub use log::LogSink;
#[cfg(feature = "telegram")]
pub use telegram::TelegramSink;
pub use twitter::TwitterSink;
