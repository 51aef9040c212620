//! Infrastructure configuration modules.

pub mod chain;
pub mod dispatch;
pub mod logging;
pub mod message;
pub mod settings;
pub mod severity;
pub mod sink;
