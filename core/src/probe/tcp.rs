use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use netprobe_common::network::service;
use netprobe_common::network::target::{Target, TargetKind};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use super::{ProbeOutcome, Prober};

pub const HANDSHAKE_PORT: u16 = 443;

/// Connect scan of one host: a port is open when the three-way handshake
/// completes before the timeout.
#[derive(Debug, Clone)]
pub struct TcpConnectProber {
    host: IpAddr,
    timeout: Duration,
}

impl TcpConnectProber {
    pub fn new(host: IpAddr, timeout: Duration) -> Self {
        Self { host, timeout }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    fn accepts(&self) -> TargetKind {
        TargetKind::Port
    }

    async fn probe(&self, target: Target) -> ProbeOutcome {
        let Target::Port(port) = target else {
            debug!(%target, "tcp connect probe skipped non-port target");
            return ProbeOutcome::unreachable(target);
        };

        let socket_addr: SocketAddr = SocketAddr::new(self.host, port);

        match timeout(self.timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                let outcome = ProbeOutcome::reachable(target);
                match service::service_name(port) {
                    Some(name) => outcome.with_metadata(name),
                    None => outcome,
                }
            }
            Ok(Err(e)) => {
                debug!(%socket_addr, error = %e, "port closed");
                ProbeOutcome::unreachable(target)
            }
            Err(_elapsed) => {
                debug!(%socket_addr, "port timed out");
                ProbeOutcome::unreachable(target)
            }
        }
    }
}

/// Host sweep without raw sockets.
///
/// A host is up if it answers a handshake on [`HANDSHAKE_PORT`] either by
/// accepting or by refusing the connection. Silence and routing errors mean
/// it is not.
#[derive(Debug, Clone)]
pub struct HandshakeProber {
    port: u16,
    timeout: Duration,
}

impl HandshakeProber {
    pub fn new(timeout: Duration) -> Self {
        Self::with_port(HANDSHAKE_PORT, timeout)
    }

    pub fn with_port(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }
}

#[async_trait]
impl Prober for HandshakeProber {
    fn accepts(&self) -> TargetKind {
        TargetKind::Host
    }

    async fn probe(&self, target: Target) -> ProbeOutcome {
        let Target::Host(addr) = target else {
            debug!(%target, "handshake probe skipped non-host target");
            return ProbeOutcome::unreachable(target);
        };

        let socket_addr: SocketAddr = SocketAddr::new(addr, self.port);

        match timeout(self.timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_)) => {
                ProbeOutcome::reachable(target).with_metadata(format!("tcp/{} open", self.port))
            }
            Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => {
                ProbeOutcome::reachable(target).with_metadata(format!("tcp/{} closed", self.port))
            }
            Ok(Err(e)) => {
                debug!(%socket_addr, error = %e, "handshake failed");
                ProbeOutcome::unreachable(target)
            }
            Err(_elapsed) => ProbeOutcome::unreachable(target),
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
