//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the two external collaborators of the bot: the
//! event source delivering liquidations and the sink accepting posts.

pub mod sink;
pub mod source;
