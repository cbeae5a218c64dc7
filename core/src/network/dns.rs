use std::net::IpAddr;

use netprobe_common::error::TargetError;
use tokio::net::lookup_host;
use tracing::debug;

/// Turns an address literal or host name into one address, IPv4 preferred.
pub async fn resolve(host: &str) -> Result<IpAddr, TargetError> {
    let host: &str = host.trim();
    if host.is_empty() {
        return Err(TargetError::Empty);
    }

    if let Ok(addr) = host.parse::<IpAddr>() {
        return Ok(addr);
    }

    let unresolvable = || TargetError::Unresolvable(host.to_string());

    let addrs: Vec<IpAddr> = lookup_host((host, 0))
        .await
        .map_err(|e| {
            debug!(host, error = %e, "lookup failed");
            unresolvable()
        })?
        .map(|socket_addr| socket_addr.ip())
        .collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(unresolvable)
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
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn literals_skip_the_resolver() {
        assert_eq!(
            resolve(" 192.168.1.7 ").await,
            Ok(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 7)))
        );
        assert_eq!(resolve("::1").await, Ok("::1".parse().unwrap()));
    }

    #[tokio::test]
    async fn localhost_resolves() {
        let addr = resolve("localhost").await.unwrap();
        assert!(addr.is_loopback());
    }

    #[tokio::test]
    async fn garbage_is_unresolvable() {
        assert_eq!(resolve("").await, Err(TargetError::Empty));
        assert!(matches!(
            resolve("no such host.invalid").await,
            Err(TargetError::Unresolvable(_))
        ));
    }
}
