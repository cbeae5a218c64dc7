//! # Scan Target Model
//!
//! Defines what a probe is aimed at and how textual specifications turn into
//! concrete target lists.
//!
//! Host specifications accept:
//! * A single address (`192.168.1.5`, `::1`).
//! * An IPv4 range, full or abbreviated (`192.168.1.1-192.168.1.254`, `192.168.1.1-254`).
//! * A CIDR block (`192.168.1.0/24`).
//! * A comma-separated mix of the above.
//!
//! Port specifications accept single ports, `start-end` ranges and
//! comma-separated mixes (`22,80,8000-8100`).
//!
//! Expansion is bounded: a specification that would produce more targets than
//! the caller allows is rejected without materialising the whole range.

use std::collections::BTreeSet;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::error::TargetError;
use crate::network::range::{self, Ipv4Range, PortRange};

/// A single thing to probe.
///
/// Ordering is the natural one: addresses numerically, ports numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Host(IpAddr),
    Port(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Host,
    Port,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Host => "host",
            TargetKind::Port => "port",
        }
    }
}

impl Target {
    pub fn kind(&self) -> TargetKind {
        match self {
            Target::Host(_) => TargetKind::Host,
            Target::Port(_) => TargetKind::Port,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Host(addr) => write!(f, "{addr}"),
            Target::Port(port) => write!(f, "{port}"),
        }
    }
}

/// A parsed, not yet expanded, host specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSpec {
    Host { target_addr: IpAddr },
    Range { ipv4_range: Ipv4Range },
    Multi { specs: Vec<HostSpec> },
}

impl FromStr for HostSpec {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TargetError::Empty);
        }

        if s.contains(',') {
            return parse_commas(s);
        }

        if let Some(spec) = parse_host(s) {
            return Ok(spec);
        }

        if let Some(spec) = parse_ip_range(s)? {
            return Ok(spec);
        }

        if let Some(spec) = parse_cidr(s)? {
            return Ok(spec);
        }

        Err(TargetError::InvalidAddress(s.to_string()))
    }
}

impl HostSpec {
    /// Expands into a sorted, de-duplicated list of host targets.
    pub fn expand(&self, max: usize) -> Result<Vec<Target>, TargetError> {
        let mut hosts: BTreeSet<IpAddr> = BTreeSet::new();
        self.collect_into(&mut hosts, max)?;
        Ok(hosts.into_iter().map(Target::Host).collect())
    }

    fn collect_into(&self, hosts: &mut BTreeSet<IpAddr>, max: usize) -> Result<(), TargetError> {
        let too_large = || TargetError::TooLarge { kind: "host", max };

        match self {
            HostSpec::Host { target_addr } => {
                hosts.insert(*target_addr);
            }
            HostSpec::Range { ipv4_range } => {
                if ipv4_range.len() > max as u64 {
                    return Err(too_large());
                }
                for ip in ipv4_range.to_iter() {
                    hosts.insert(ip);
                    if hosts.len() > max {
                        return Err(too_large());
                    }
                }
            }
            HostSpec::Multi { specs } => {
                for spec in specs {
                    spec.collect_into(hosts, max)?;
                }
            }
        }

        if hosts.len() > max {
            return Err(too_large());
        }
        Ok(())
    }
}

/// A parsed port specification: one or more inclusive ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    ranges: Vec<PortRange>,
}

impl FromStr for PortSpec {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranges: Vec<PortRange> = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_port_range)
            .collect::<Result<_, _>>()?;

        if ranges.is_empty() {
            return Err(TargetError::Empty);
        }
        Ok(Self { ranges })
    }
}

impl PortSpec {
    /// Expands into a sorted, de-duplicated list of port targets.
    pub fn expand(&self, max: usize) -> Result<Vec<Target>, TargetError> {
        let too_large = || TargetError::TooLarge { kind: "port", max };
        let mut ports: BTreeSet<u16> = BTreeSet::new();

        for range in &self.ranges {
            if range.len() > max {
                return Err(too_large());
            }
            ports.extend(range.iter());
            if ports.len() > max {
                return Err(too_large());
            }
        }

        Ok(ports.into_iter().map(Target::Port).collect())
    }
}

/// Parses and expands a host specification in one go.
pub fn parse_hosts(spec: &str, max: usize) -> Result<Vec<Target>, TargetError> {
    spec.parse::<HostSpec>()?.expand(max)
}

/// Parses and expands a port specification in one go.
pub fn parse_ports(spec: &str, max: usize) -> Result<Vec<Target>, TargetError> {
    spec.parse::<PortSpec>()?.expand(max)
}

/// Parses a comma-separated list (e.g. "192.168.1.5, 10.0.0.1-50").
fn parse_commas(s: &str) -> Result<HostSpec, TargetError> {
    let specs: Vec<HostSpec> = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(HostSpec::from_str)
        .collect::<Result<_, _>>()?;

    if specs.is_empty() {
        return Err(TargetError::Empty);
    }
    Ok(HostSpec::Multi { specs })
}

fn parse_host(s: &str) -> Option<HostSpec> {
    s.parse::<IpAddr>()
        .ok()
        .map(|target_addr| HostSpec::Host { target_addr })
}

/// Parses "1.1.1.1-2.2.2.2" or the abbreviated "1.1.1.1-50".
fn parse_ip_range(s: &str) -> Result<Option<HostSpec>, TargetError> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Ok(None);
    };

    let start_str = start_str.trim();
    let start_addr = start_str
        .parse::<Ipv4Addr>()
        .map_err(|_| TargetError::InvalidAddress(start_str.to_string()))?;

    let end_addr = parse_range_end_addr(end_str.trim(), &start_addr)?;
    let ipv4_range = Ipv4Range::new(start_addr, end_addr)?;

    Ok(Some(HostSpec::Range { ipv4_range }))
}

/// The trailing octets given after the dash replace the trailing octets of
/// the start address, so "192.168.1.10-2.66" ends at 192.168.2.66.
fn parse_range_end_addr(end_str: &str, start_addr: &Ipv4Addr) -> Result<Ipv4Addr, TargetError> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr);
    }

    let invalid = || TargetError::InvalidRangeEnd(end_str.to_string());

    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet| octet.parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| invalid())?;

    if partial_octets.is_empty() || partial_octets.len() > 4 {
        return Err(invalid());
    }

    let mut end_octets = start_addr.octets();
    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Ok(Ipv4Addr::from(end_octets))
}

fn parse_cidr(s: &str) -> Result<Option<HostSpec>, TargetError> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let ip = ip_str
        .parse::<Ipv4Addr>()
        .map_err(|_| TargetError::InvalidAddress(ip_str.to_string()))?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|_| TargetError::InvalidCidr(s.to_string()))?;

    let ipv4_range = range::cidr_hosts(ip, prefix)?;
    Ok(Some(HostSpec::Range { ipv4_range }))
}

fn parse_port_range(s: &str) -> Result<PortRange, TargetError> {
    match s.split_once('-') {
        Some((start, end)) => PortRange::new(parse_port(start)?, parse_port(end)?),
        None => PortRange::single(parse_port(s)?),
    }
}

fn parse_port(s: &str) -> Result<u16, TargetError> {
    let s = s.trim();
    s.parse::<u16>()
        .map_err(|_| TargetError::InvalidPort(s.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
