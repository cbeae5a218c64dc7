//! Single-target reachability checks.
//!
//! A [`Prober`] answers one question about one [`Target`] and never fails:
//! timeouts, refusals, spawn errors and unsupported targets all come back as
//! an unreachable [`ProbeOutcome`].
//!
//! The set of probes is closed. [`ProbeKind`] names each one and builds it
//! from a [`Config`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use netprobe_common::config::Config;
use netprobe_common::error::ScanError;
use netprobe_common::network::target::{Target, TargetKind};

pub mod icmp;
pub mod tcp;

pub use icmp::PingProber;
pub use tcp::{HandshakeProber, TcpConnectProber};

/// Result of exactly one probe invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub target: Target,
    pub reachable: bool,
    pub metadata: Option<String>,
}

impl ProbeOutcome {
    pub fn reachable(target: Target) -> Self {
        Self {
            target,
            reachable: true,
            metadata: None,
        }
    }

    pub fn unreachable(target: Target) -> Self {
        Self {
            target,
            reachable: false,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }
}

/// Strategy for checking whether a single target answers.
#[async_trait]
pub trait Prober: Send + Sync {
    /// The kind of target this prober knows how to check.
    fn accepts(&self) -> TargetKind;

    async fn probe(&self, target: Target) -> ProbeOutcome;
}

/// The available probe strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Full TCP connect against one port of a fixed host.
    TcpConnect,
    /// TCP handshake against a fixed port; any answer means the host is up.
    TcpHandshake,
    /// The platform `ping` binary.
    Icmp,
}

impl ProbeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::TcpConnect => "tcp-connect",
            ProbeKind::TcpHandshake => "tcp-handshake",
            ProbeKind::Icmp => "icmp",
        }
    }

    pub fn target_kind(&self) -> TargetKind {
        match self {
            ProbeKind::TcpConnect => TargetKind::Port,
            ProbeKind::TcpHandshake | ProbeKind::Icmp => TargetKind::Host,
        }
    }

    /// Builds the prober used for host sweeps.
    pub fn host_prober(self, cfg: &Config) -> Result<Arc<dyn Prober>, ScanError> {
        match self {
            ProbeKind::TcpHandshake => Ok(Arc::new(HandshakeProber::new(cfg.timeout))),
            ProbeKind::Icmp => Ok(Arc::new(PingProber::new(cfg.ping_count, cfg.timeout))),
            ProbeKind::TcpConnect => Err(ScanError::IncompatibleProbe {
                probe: self.as_str(),
                target: TargetKind::Host.as_str(),
            }),
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProbeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "icmp" | "ping" => Ok(ProbeKind::Icmp),
            "tcp" | "handshake" | "tcp-handshake" => Ok(ProbeKind::TcpHandshake),
            "connect" | "tcp-connect" => Ok(ProbeKind::TcpConnect),
            other => Err(format!("unknown probe '{other}' (expected icmp, tcp or connect)")),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_kind_parses_aliases() {
        assert_eq!("ICMP".parse::<ProbeKind>(), Ok(ProbeKind::Icmp));
        assert_eq!("ping".parse::<ProbeKind>(), Ok(ProbeKind::Icmp));
        assert_eq!("tcp".parse::<ProbeKind>(), Ok(ProbeKind::TcpHandshake));
        assert_eq!("connect".parse::<ProbeKind>(), Ok(ProbeKind::TcpConnect));
        assert!("udp".parse::<ProbeKind>().is_err());
    }

    #[test]
    fn host_prober_matches_target_kind() {
        let cfg = Config::default();

        let prober = ProbeKind::Icmp.host_prober(&cfg).unwrap();
        assert_eq!(prober.accepts(), TargetKind::Host);

        let prober = ProbeKind::TcpHandshake.host_prober(&cfg).unwrap();
        assert_eq!(prober.accepts(), TargetKind::Host);

        assert!(matches!(
            ProbeKind::TcpConnect.host_prober(&cfg),
            Err(ScanError::IncompatibleProbe { .. })
        ));
    }
}
