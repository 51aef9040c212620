//! Runtime orchestration.
//!
//! - [`runtime`] - startup, event loop and shutdown

pub mod runtime;

pub use runtime::{serve, Orchestrator};
