use std::net::IpAddr;
use std::time::Instant;

use colored::*;
use netprobe_common::config::Config;
use netprobe_core::network::{dns, trace::{Hop, Tracer}};
use tracing::{info, warn};

use crate::terminal::{colors, format, print};

pub async fn trace(host: &str, max_hops: u8, cfg: &Config) -> anyhow::Result<()> {
    let addr: IpAddr = dns::resolve(host).await?;
    let tracer = Tracer::new(max_hops);
    info!("tracing route to {addr}, at most {} hops", tracer.max_hops());

    let start_time: Instant = Instant::now();
    let hops: Vec<Hop> = tracer.trace(addr).await?;

    if hops.is_empty() {
        warn!("traceroute produced no hops");
        print::no_results("traced");
        return Ok(());
    }

    print::header(&format!("route to {addr}"), cfg.quiet);
    for hop in &hops {
        print::print_status(hop.raw.as_str());
    }

    let summary: ColoredString = format!(
        "{} in {}",
        format!("{} hops", hops.len()).bold().green(),
        format::elapsed(start_time.elapsed())
    )
    .color(colors::TEXT_DEFAULT);
    print::fat_separator();
    print::centerln(&summary.to_string());
    Ok(())
}
