//! Application orchestration.
//!
//! Runtime wiring and lifecycle management.

mod runtime;

pub use runtime::run_with_shutdown;
