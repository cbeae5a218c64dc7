use std::sync::Arc;
use std::time::Instant;

use netprobe_common::config::Config;
use netprobe_core::probe::{ProbeKind, Prober};
use netprobe_core::report::ScanReport;
use netprobe_core::scanner::Scanner;
use tracing::{Instrument, info};

use crate::commands::{scan_ends, scan_plan};
use crate::terminal::progress;

pub async fn hosts(spec: &str, kind: ProbeKind, cfg: &Config) -> anyhow::Result<()> {
    let prober: Arc<dyn Prober> = kind.host_prober(cfg)?;
    let scanner = Scanner::new(cfg.clone());
    let targets = scanner.plan_hosts(spec)?;

    info!("sweeping {} hosts with {kind} probes", targets.len());
    scan_plan(targets.len(), kind.as_str(), cfg);

    let span = progress::scan_span("hosts", targets.len());
    let scanner = scanner.with_progress(progress::progress_callback(&span));

    let start_time: Instant = Instant::now();
    let report: ScanReport = scanner.run(targets, prober).instrument(span).await?;

    scan_ends("host sweep", &report, start_time.elapsed(), "active", cfg);
    Ok(())
}
