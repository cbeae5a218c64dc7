pub mod hosts;
pub mod ping;
pub mod ports;
pub mod trace;

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use netprobe_common::config::{Config, DEFAULT_WORKERS};
use netprobe_common::success;
use netprobe_core::network::trace::MAX_HOPS;
use netprobe_core::probe::ProbeKind;
use netprobe_core::report::ScanReport;

use crate::mprint;
use crate::terminal::{colors, format, print};

#[derive(Parser)]
#[command(name = "netprobe")]
#[command(about = "Bounded-concurrency host and port prober.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output, repeat for less
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Per-probe timeout in milliseconds
    #[arg(long, default_value_t = 1_000, global = true)]
    pub timeout: u64,

    /// Maximum probes in flight (capped at 100)
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, global = true)]
    pub workers: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find live hosts in an address range
    #[command(alias = "h")]
    Hosts {
        /// Range, CIDR block, address or a comma-separated mix
        target: String,
        /// Probe used per host: icmp or tcp
        #[arg(short, long, default_value = "icmp")]
        probe: ProbeKind,
    },
    /// Find open TCP ports on one host
    #[command(alias = "p")]
    Ports {
        /// Address or host name
        host: String,
        /// Ports, e.g. 1-1024 or 22,80,443
        #[arg(default_value = "1-1024")]
        ports: String,
    },
    /// Ping a single host
    Ping {
        host: String,
        /// Echo requests to send (1-10)
        #[arg(short, long, default_value_t = 4)]
        count: u8,
    },
    /// Trace the route to a host
    #[command(alias = "t")]
    Trace {
        host: String,
        /// Maximum hops (1-30)
        #[arg(short, long, default_value_t = MAX_HOPS)]
        max_hops: u8,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

const PLAN_KEY_WIDTH: usize = 8;

/// Echoes what is about to be probed and with which settings.
pub(crate) fn scan_plan(targets: usize, probe: &str, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }
    print::header("scan plan", cfg.quiet);
    print::aligned_line("Targets", targets.to_string(), PLAN_KEY_WIDTH);
    print::aligned_line("Probe", probe, PLAN_KEY_WIDTH);
    print::aligned_line("Workers", cfg.max_workers.to_string(), PLAN_KEY_WIDTH);
    print::aligned_line(
        "Timeout",
        format!("{}ms", cfg.timeout.as_millis()),
        PLAN_KEY_WIDTH,
    );
    mprint!();
}

/// Prints the active targets of a finished scan and its summary line.
/// `state` names what an active target is, e.g. "open".
pub(crate) fn scan_ends(
    title: &str,
    report: &ScanReport,
    total_time: Duration,
    state: &str,
    cfg: &Config,
) {
    if report.active.is_empty() {
        print::header(&format!("zero {state}"), cfg.quiet);
        print::no_results(state);
        print_summary(report, total_time, state, cfg);
        return;
    }

    print::header(title, cfg.quiet);
    for (idx, target) in report.active.iter().enumerate() {
        if cfg.quiet > 1 {
            break;
        }
        print::tree_head(idx, &format::target_name(target));
        print::as_tree_one_level(format::target_details(target, report));
        if idx + 1 != report.active.len() {
            mprint!();
        }
    }
    print_summary(report, total_time, state, cfg);
}

fn print_summary(report: &ScanReport, total_time: Duration, state: &str, cfg: &Config) {
    let counts: ColoredString = format!("{}/{} {state}", report.active.len(), report.total)
        .bold()
        .green();
    let output: ColoredString =
        format!("{counts} in {}", format::elapsed(total_time)).color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => {
            mprint!();
            success!("{}", output);
        }
    }
}
