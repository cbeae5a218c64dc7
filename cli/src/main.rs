mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands, hosts, ping, ports, trace};
use netprobe_common::config::Config;
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    let cfg = Config::default()
        .with_timeout(Duration::from_millis(commands.timeout))
        .with_workers(commands.workers)
        .with_quiet(commands.quiet);

    match commands.command {
        Commands::Hosts { target, probe } => hosts::hosts(&target, probe, &cfg).await,
        Commands::Ports { host, ports: spec } => ports::ports(&host, &spec, &cfg).await,
        Commands::Ping { host, count } => ping::ping(&host, &cfg.with_ping_count(count)).await,
        Commands::Trace { host, max_hops } => trace::trace(&host, max_hops, &cfg).await,
    }
}
