//! Chain-agnostic domain logic.
//!
//! - [`severity`] - threshold table and tier classification
//! - [`corpus`] - meme corpus and flavor-line selection
//! - [`message`] - post formatting
//! - [`liquidation`] - validated liquidation records
//! - [`units`] - fixed-point conversion

pub mod corpus;
pub mod error;
pub mod liquidation;
pub mod message;
pub mod severity;
pub mod units;

pub use corpus::MemeCorpus;
pub use liquidation::{Direction, LiquidationEvent};
pub use message::MessageFormatter;
pub use severity::{ThresholdTable, Tier};
