//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`exchange`] - Feed reconnection and resubscription
//! - [`orchestration`] - Runtime wiring and shutdown

pub mod config;
pub mod exchange;
pub mod orchestration;
