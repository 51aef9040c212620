//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - command-line entry points
//! - [`outbound`] - event source and message sinks

pub mod inbound;
pub mod outbound;
