//! The scanning use case.
//!
//! A [`Scanner`] owns the [`Config`] of one invocation. Each scan goes through
//! the same three steps:
//! 1. **Plan**: parse the specification and enforce the size limits. Nothing
//!    has touched the network if this fails.
//! 2. **Probe**: hand every target to the worker pool.
//! 3. **Aggregate**: fold the unordered outcomes into a sorted [`ScanReport`].

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use netprobe_common::config::Config;
use netprobe_common::error::{ScanError, TargetError};
use netprobe_common::network::target::{self, Target};
use tracing::debug;

use crate::dispatcher::{self, ProgressCallback};
use crate::probe::{ProbeKind, ProbeOutcome, Prober, TcpConnectProber};
use crate::report::ScanReport;

pub struct Scanner {
    cfg: Config,
    on_progress: Option<ProgressCallback>,
}

impl Scanner {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            on_progress: None,
        }
    }

    /// Reports the number of finished probes as the scan advances.
    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    pub fn plan_hosts(&self, spec: &str) -> Result<Vec<Target>, TargetError> {
        target::parse_hosts(spec, self.cfg.limits.max_hosts)
    }

    pub fn plan_ports(&self, spec: &str) -> Result<Vec<Target>, TargetError> {
        target::parse_ports(spec, self.cfg.limits.max_ports)
    }

    /// Sweeps a host specification with the given probe kind.
    pub async fn scan_hosts(&self, spec: &str, kind: ProbeKind) -> Result<ScanReport, ScanError> {
        let prober: Arc<dyn Prober> = kind.host_prober(&self.cfg)?;
        self.scan_hosts_with(spec, prober).await
    }

    pub async fn scan_hosts_with(
        &self,
        spec: &str,
        prober: Arc<dyn Prober>,
    ) -> Result<ScanReport, ScanError> {
        let targets: Vec<Target> = self.plan_hosts(spec)?;
        self.run(targets, prober).await
    }

    /// Connect-scans the ports of `spec` on `host`.
    pub async fn scan_ports(&self, host: IpAddr, spec: &str) -> Result<ScanReport, ScanError> {
        let prober = Arc::new(TcpConnectProber::new(host, self.cfg.timeout));
        self.scan_ports_with(spec, prober).await
    }

    pub async fn scan_ports_with(
        &self,
        spec: &str,
        prober: Arc<dyn Prober>,
    ) -> Result<ScanReport, ScanError> {
        let targets: Vec<Target> = self.plan_ports(spec)?;
        self.run(targets, prober).await
    }

    /// Probes an already planned target list.
    ///
    /// Every target must be of the kind the prober accepts.
    pub async fn run(
        &self,
        targets: Vec<Target>,
        prober: Arc<dyn Prober>,
    ) -> Result<ScanReport, ScanError> {
        let accepted = prober.accepts();
        if let Some(stray) = targets.iter().find(|t| t.kind() != accepted) {
            return Err(ScanError::IncompatibleProbe {
                probe: accepted.as_str(),
                target: stray.kind().as_str(),
            });
        }

        let started: Instant = Instant::now();
        let total: usize = targets.len();
        debug!(total, workers = self.cfg.max_workers, "starting scan");

        let outcomes: Vec<ProbeOutcome> = dispatcher::dispatch(
            targets,
            prober,
            self.cfg.max_workers,
            self.on_progress.clone(),
        )
        .await;

        let report = ScanReport::from_outcomes(outcomes);
        debug!(
            active = report.active.len(),
            inactive = report.inactive.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scan finished"
        );

        Ok(report)
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
    use async_trait::async_trait;
    use netprobe_common::config::ScanLimits;
    use netprobe_common::network::target::TargetKind;
    use std::collections::BTreeSet;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls; even last octets answer.
    #[derive(Default)]
    struct CountingHostProber {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Prober for CountingHostProber {
        fn accepts(&self) -> TargetKind {
            TargetKind::Host
        }

        async fn probe(&self, target: Target) -> ProbeOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match target {
                Target::Host(IpAddr::V4(ip)) if ip.octets()[3] % 2 == 0 => {
                    ProbeOutcome::reachable(target)
                }
                _ => ProbeOutcome::unreachable(target),
            }
        }
    }

    #[tokio::test]
    async fn host_scan_partitions_the_whole_range() {
        let prober = Arc::new(CountingHostProber::default());
        let scanner = Scanner::new(Config::default().with_workers(16));

        let report = scanner
            .scan_hosts_with("10.1.1.1-10.1.1.254", prober.clone())
            .await
            .unwrap();

        let requested: BTreeSet<Target> = scanner.plan_hosts("10.1.1.1-254").unwrap().into_iter().collect();
        let active: BTreeSet<Target> = report.active.iter().copied().collect();
        let inactive: BTreeSet<Target> = report.inactive.iter().copied().collect();

        assert_eq!(report.total, 254);
        assert!(report.is_consistent());
        assert!(active.is_disjoint(&inactive));
        assert_eq!(active.union(&inactive).copied().collect::<BTreeSet<_>>(), requested);
        assert_eq!(report.active.len(), 127);
        assert_eq!(prober.calls.load(Ordering::SeqCst), 254);
    }

    #[tokio::test]
    async fn malformed_range_issues_no_probes() {
        let prober = Arc::new(CountingHostProber::default());
        let scanner = Scanner::new(Config::default());

        let result = scanner.scan_hosts_with("300.1.1.1-300.1.1.5", prober.clone()).await;

        assert!(matches!(
            result,
            Err(ScanError::Target(TargetError::InvalidAddress(_)))
        ));
        assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oversized_range_issues_no_probes() {
        let prober = Arc::new(CountingHostProber::default());
        let limits = ScanLimits {
            max_hosts: 16,
            max_ports: 10,
        };
        let scanner = Scanner::new(Config::default().with_limits(limits));

        let result = scanner.scan_hosts_with("10.0.0.1-10.0.0.17", prober.clone()).await;

        assert!(matches!(
            result,
            Err(ScanError::Target(TargetError::TooLarge { kind: "host", max: 16 }))
        ));
        assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn mismatched_prober_is_refused() {
        let scanner = Scanner::new(Config::default());
        let prober = Arc::new(CountingHostProber::default());

        let result = scanner.scan_ports_with("1-10", prober.clone()).await;

        assert!(matches!(result, Err(ScanError::IncompatibleProbe { .. })));
        assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn connect_kind_cannot_sweep_hosts() {
        let scanner = Scanner::new(Config::default());
        let result = scanner.scan_hosts("127.0.0.1", ProbeKind::TcpConnect).await;
        assert!(matches!(result, Err(ScanError::IncompatibleProbe { .. })));
    }

    #[tokio::test]
    async fn progress_callback_sees_every_probe() {
        let done = Arc::new(AtomicUsize::new(0));
        let done_ref = done.clone();
        let scanner = Scanner::new(Config::default())
            .with_progress(Arc::new(move |n| done_ref.store(n, Ordering::SeqCst)));

        let host = IpAddr::V4(Ipv4Addr::new(10, 9, 9, 1));
        let report = scanner
            .run(vec![Target::Host(host)], Arc::new(CountingHostProber::default()))
            .await
            .unwrap();

        assert_eq!(report.inactive, vec![Target::Host(host)]);
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }
}
