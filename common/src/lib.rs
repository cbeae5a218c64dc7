//! Shared models for `netprobe`: scan configuration, target parsing and the
//! error types every layer reports through.

pub mod config;
pub mod error;
pub mod log;
pub mod network;

#[doc(hidden)]
pub use tracing;
