use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use netprobe_common::config::Config;
use netprobe_core::network::dns;
use netprobe_core::probe::TcpConnectProber;
use netprobe_core::report::ScanReport;
use netprobe_core::scanner::Scanner;
use tracing::{Instrument, info};

use crate::commands::{scan_ends, scan_plan};
use crate::terminal::progress;

pub async fn ports(host: &str, spec: &str, cfg: &Config) -> anyhow::Result<()> {
    let scanner = Scanner::new(cfg.clone());
    let targets = scanner.plan_ports(spec)?;
    let addr: IpAddr = dns::resolve(host).await?;

    if host != addr.to_string() {
        info!("{host} resolved to {addr}");
    }
    info!("scanning {} ports on {addr}", targets.len());
    scan_plan(targets.len(), "tcp connect", cfg);

    let span = progress::scan_span("ports", targets.len());
    let scanner = scanner.with_progress(progress::progress_callback(&span));
    let prober = Arc::new(TcpConnectProber::new(addr, cfg.timeout));

    let start_time: Instant = Instant::now();
    let report: ScanReport = scanner.run(targets, prober).instrument(span).await?;

    scan_ends(&format!("ports on {addr}"), &report, start_time.elapsed(), "open", cfg);
    Ok(())
}
