use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use netprobe_common::config::Config;
use netprobe_common::network::target::Target;
use netprobe_core::network::dns;
use netprobe_core::probe::PingProber;
use netprobe_core::report::ScanReport;
use netprobe_core::scanner::Scanner;
use tracing::info;

use crate::commands::scan_ends;

pub async fn ping(host: &str, cfg: &Config) -> anyhow::Result<()> {
    let addr: IpAddr = dns::resolve(host).await?;
    info!("pinging {addr} with {} echo requests", cfg.ping_count);

    let prober = Arc::new(PingProber::new(cfg.ping_count, cfg.timeout));
    let scanner = Scanner::new(cfg.clone());

    let start_time: Instant = Instant::now();
    let report: ScanReport = scanner.run(vec![Target::Host(addr)], prober).await?;

    scan_ends("ping", &report, start_time.elapsed(), "reachable", cfg);
    Ok(())
}
