//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the bot's use cases.

pub mod classifier;
pub mod dispatch;
pub mod pipeline;
