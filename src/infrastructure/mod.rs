//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`orchestration`] - Runtime orchestration
//! - [`resources`] - Threshold table and meme corpus loading

pub mod bootstrap;
pub mod config;
pub mod orchestration;
pub mod resources;
