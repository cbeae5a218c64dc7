use std::time::Duration;

use thiserror::Error;

/// Why a target specification was refused.
///
/// Every variant is raised before the first probe is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("target specification is empty")]
    Empty,

    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),

    #[error("invalid range end '{0}'")]
    InvalidRangeEnd(String),

    #[error("invalid CIDR block '{0}'")]
    InvalidCidr(String),

    #[error("invalid port '{0}' (expected 1-65535)")]
    InvalidPort(String),

    #[error("range starts at {start} but ends at {end}")]
    InvertedRange { start: String, end: String },

    #[error("{kind} range expands past the limit of {max}")]
    TooLarge { kind: &'static str, max: usize },

    #[error("'{0}' does not resolve to an address")]
    Unresolvable(String),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("{probe} probes cannot be sent to {target} targets")]
    IncompatibleProbe {
        probe: &'static str,
        target: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("'{0}' is not installed")]
    MissingBinary(String),

    #[error("traceroute exited with {0}")]
    Failed(std::process::ExitStatus),

    #[error("traceroute did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("failed to run traceroute: {0}")]
    Io(#[from] std::io::Error),
}
