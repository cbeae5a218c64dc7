use std::net::{IpAddr, Ipv6Addr};
use std::time::Duration;

use colored::*;
use netprobe_common::network::service;
use netprobe_common::network::target::Target;
use netprobe_core::report::ScanReport;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    if ipv6_addr.is_loopback() {
        return "LOOP";
    }
    let first_byte = ipv6_addr.octets()[0];
    if (0x20..=0x3F).contains(&first_byte) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

/// The tree heading for a target: the address, or `port/tcp`.
pub fn target_name(target: &Target) -> String {
    match target {
        Target::Host(ip) => ip.to_string(),
        Target::Port(port) => format!("{port}/tcp"),
    }
}

/// Detail lines shown under an active target.
pub fn target_details(target: &Target, report: &ScanReport) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();

    match target {
        Target::Host(IpAddr::V4(ipv4_addr)) => {
            details.push(("IPv4".to_string(), ipv4_addr.to_string().color(colors::IPV4_ADDR)));
        }
        Target::Host(IpAddr::V6(ipv6_addr)) => {
            let kind: &str = ipv6_to_type_str(ipv6_addr);
            details.push((kind.to_string(), ipv6_addr.to_string().color(colors::IPV6_ADDR)));
        }
        Target::Port(port) => {
            let name: &str = service::service_name(*port).unwrap_or("unknown");
            details.push(("Service".to_string(), name.color(colors::ACCENT)));
        }
    }

    if let Some(meta) = report.detail(target) {
        details.push(("Probe".to_string(), meta.color(colors::TEXT_DEFAULT)));
    }

    details.push(("State".to_string(), state(target).color(colors::OPEN).bold()));
    details
}

fn state(target: &Target) -> &'static str {
    match target {
        Target::Host(_) => "up",
        Target::Port(_) => "open",
    }
}

pub fn elapsed(total_time: Duration) -> ColoredString {
    format!("{:.2}s", total_time.as_secs_f64()).bold().yellow()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn ipv6_kinds() {
        assert_eq!(ipv6_to_type_str(&"2606:4700::1111".parse().unwrap()), "GUA");
        assert_eq!(ipv6_to_type_str(&"fd00::1".parse().unwrap()), "ULA");
        assert_eq!(ipv6_to_type_str(&"fe80::1".parse().unwrap()), "LLA");
        assert_eq!(ipv6_to_type_str(&Ipv6Addr::LOCALHOST), "LOOP");
    }

    #[test]
    fn port_details_carry_service_and_probe_metadata() {
        let target = Target::Port(22);
        let mut report = ScanReport::default();
        report.details.insert(target, "SSH".to_string());

        let keys: Vec<String> = target_details(&target, &report)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["Service", "Probe", "State"]);
        assert_eq!(target_name(&target), "22/tcp");
        assert_eq!(target_name(&Target::Host(IpAddr::V4(Ipv4Addr::LOCALHOST))), "127.0.0.1");
    }
}
