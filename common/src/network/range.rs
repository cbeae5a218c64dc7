//! # Contiguous target ranges
//!
//! Inclusive IPv4 and port ranges as produced by the target parser. Ranges are
//! validated on construction, so an inverted range cannot exist.

use std::net::{IpAddr, Ipv4Addr};

use pnet::ipnetwork::Ipv4Network;

use crate::error::TargetError;

/// An inclusive, non-empty range of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    start_addr: Ipv4Addr,
    end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Result<Self, TargetError> {
        if start_addr > end_addr {
            return Err(TargetError::InvertedRange {
                start: start_addr.to_string(),
                end: end_addr.to_string(),
            });
        }
        Ok(Self {
            start_addr,
            end_addr,
        })
    }

    pub fn start(&self) -> Ipv4Addr {
        self.start_addr
    }

    pub fn end(&self) -> Ipv4Addr {
        self.end_addr
    }

    /// Number of addresses covered. Computed without iterating.
    pub fn len(&self) -> u64 {
        u64::from(u32::from(self.end_addr)) - u64::from(u32::from(self.start_addr)) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn to_iter(&self) -> impl Iterator<Item = IpAddr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(|ip| IpAddr::V4(Ipv4Addr::from(ip)))
    }
}

/// The usable host addresses of a CIDR block.
///
/// Network and broadcast addresses are dropped when the block is large
/// enough to have them (prefix /30 and wider).
pub fn cidr_hosts(ip: Ipv4Addr, prefix: u8) -> Result<Ipv4Range, TargetError> {
    let network = Ipv4Network::new(ip, prefix)
        .map_err(|_| TargetError::InvalidCidr(format!("{ip}/{prefix}")))?;

    let first: u32 = network.network().into();
    let last: u32 = network.broadcast().into();

    if prefix <= 30 {
        Ipv4Range::new(Ipv4Addr::from(first + 1), Ipv4Addr::from(last - 1))
    } else {
        Ipv4Range::new(Ipv4Addr::from(first), Ipv4Addr::from(last))
    }
}

/// An inclusive, non-empty range of TCP ports. Port 0 is never part of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Result<Self, TargetError> {
        if start == 0 {
            return Err(TargetError::InvalidPort(start.to_string()));
        }
        if start > end {
            return Err(TargetError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn single(port: u16) -> Result<Self, TargetError> {
        Self::new(port, port)
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
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
