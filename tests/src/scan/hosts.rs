use std::sync::Arc;
use std::time::Duration;

use netprobe_common::config::Config;
use netprobe_common::error::{ScanError, TargetError};
use netprobe_common::network::target::Target;
use netprobe_core::probe::HandshakeProber;
use netprobe_core::scanner::Scanner;

use crate::util::{Counting, LOCALHOST, closed_port, listener};

#[tokio::test]
async fn handshake_sweep_finds_loopback_with_a_listener() {
    let (_listener, port) = listener().await;
    let prober = Arc::new(HandshakeProber::with_port(port, Duration::from_millis(500)));

    let report = Scanner::new(Config::default())
        .scan_hosts_with("127.0.0.1-127.0.0.1", prober)
        .await
        .unwrap();

    assert_eq!(report.active, vec![Target::Host(LOCALHOST)]);
    assert_eq!(report.total, 1);
    assert!(report.detail(&Target::Host(LOCALHOST)).is_some());
}

#[tokio::test]
async fn refused_handshake_still_counts_as_alive() {
    let port = closed_port().await;
    let prober = Arc::new(HandshakeProber::with_port(port, Duration::from_millis(500)));

    let report = Scanner::new(Config::default())
        .scan_hosts_with("127.0.0.1", prober)
        .await
        .unwrap();

    assert_eq!(report.active, vec![Target::Host(LOCALHOST)]);
}

#[tokio::test]
async fn invalid_octets_issue_no_probes() {
    let prober = Counting::new(HandshakeProber::new(Duration::from_millis(200)));

    let result = Scanner::new(Config::default())
        .scan_hosts_with("300.1.1.1-300.1.1.5", prober.clone())
        .await;

    assert!(matches!(
        result,
        Err(ScanError::Target(TargetError::InvalidAddress(_)))
    ));
    assert_eq!(prober.calls(), 0);
}

#[tokio::test]
async fn oversized_cidr_issues_no_probes() {
    let prober = Counting::new(HandshakeProber::new(Duration::from_millis(200)));

    let result = Scanner::new(Config::default())
        .scan_hosts_with("10.0.0.0/16", prober.clone())
        .await;

    assert!(matches!(
        result,
        Err(ScanError::Target(TargetError::TooLarge { kind: "host", max: 255 }))
    ));
    assert_eq!(prober.calls(), 0);
}
