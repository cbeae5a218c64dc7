//! # netprobe core
//!
//! Bounded-concurrency reachability probing.
//!
//! * [`probe`]: single-target checks (TCP connect, TCP handshake, ping subprocess).
//! * [`dispatcher`]: runs one probe per target on a bounded worker pool.
//! * [`report`]: folds unordered outcomes into a sorted [`report::ScanReport`].
//! * [`scanner`]: the entry point tying parsing, limits, probing and aggregation together.
//! * [`network`]: name resolution and traceroute helpers.

pub mod dispatcher;
pub mod network;
pub mod probe;
pub mod report;
pub mod scanner;
