use std::time::Duration;

use netprobe_common::config::{Config, ScanLimits};
use netprobe_common::error::{ScanError, TargetError};
use netprobe_common::network::target::Target;
use netprobe_core::probe::TcpConnectProber;
use netprobe_core::scanner::Scanner;

use crate::util::{Counting, LOCALHOST, closed_port, listener};

fn scanner() -> Scanner {
    Scanner::new(Config::default().with_timeout(Duration::from_millis(500)))
}

#[tokio::test]
async fn listening_port_is_reported_open() {
    let (_listener, port) = listener().await;

    let report = scanner()
        .scan_ports(LOCALHOST, &port.to_string())
        .await
        .unwrap();

    assert_eq!(report.active, vec![Target::Port(port)]);
    assert!(report.inactive.is_empty());
    assert_eq!(report.total, 1);
}

#[tokio::test]
async fn freed_port_is_reported_closed() {
    let port = closed_port().await;

    let report = scanner()
        .scan_ports(LOCALHOST, &port.to_string())
        .await
        .unwrap();

    assert!(report.active.is_empty());
    assert_eq!(report.inactive, vec![Target::Port(port)]);
}

#[tokio::test]
async fn mixed_ports_come_back_sorted_and_partitioned() {
    let (_a, open_a) = listener().await;
    let (_b, open_b) = listener().await;
    let shut = closed_port().await;

    let spec = format!("{shut},{open_b},{open_a}");
    let report = scanner().scan_ports(LOCALHOST, &spec).await.unwrap();

    let mut expected_open = vec![Target::Port(open_a), Target::Port(open_b)];
    expected_open.sort();
    expected_open.dedup();

    assert_eq!(report.active, expected_open);
    assert!(!report.active.contains(&Target::Port(shut)));
    assert!(report.is_consistent());
}

#[tokio::test]
async fn malformed_port_range_is_rejected_before_probing() {
    let prober = Counting::new(TcpConnectProber::new(LOCALHOST, Duration::from_millis(200)));

    let result = scanner().scan_ports_with("100-abc", prober.clone()).await;

    assert!(matches!(
        result,
        Err(ScanError::Target(TargetError::InvalidPort(_)))
    ));
    assert_eq!(prober.calls(), 0);
}

#[tokio::test]
async fn port_range_over_the_limit_is_rejected_before_probing() {
    let prober = Counting::new(TcpConnectProber::new(LOCALHOST, Duration::from_millis(200)));
    let scanner = Scanner::new(Config::default().with_limits(ScanLimits {
        max_hosts: 1,
        max_ports: 100,
    }));

    let result = scanner.scan_ports_with("1-101", prober.clone()).await;

    assert!(matches!(
        result,
        Err(ScanError::Target(TargetError::TooLarge { kind: "port", .. }))
    ));
    assert_eq!(prober.calls(), 0);
}

#[tokio::test]
async fn wide_range_with_few_workers_still_covers_every_port() {
    let (_listener, port) = listener().await;
    let first = port.saturating_sub(20).max(1);
    let last = port.saturating_add(20);

    let scanner = Scanner::new(
        Config::default()
            .with_workers(3)
            .with_timeout(Duration::from_millis(300)),
    );
    let report = scanner
        .scan_ports(LOCALHOST, &format!("{first}-{last}"))
        .await
        .unwrap();

    assert_eq!(report.total, usize::from(last - first) + 1);
    assert!(report.active.contains(&Target::Port(port)));
    assert!(report.is_consistent());
}
