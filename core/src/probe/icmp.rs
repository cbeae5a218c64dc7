//! Host checks through the platform `ping` binary.
//!
//! Spawning `ping` keeps the scanner unprivileged. Each probe owns exactly one
//! child process, which is killed if it outlives its wall-clock budget.

use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use netprobe_common::network::target::{Target, TargetKind};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::{ProbeOutcome, Prober};

const PING_PROGRAM: &str = "ping";
const WALL_CLOCK_SLACK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct PingProber {
    program: String,
    count: u8,
    timeout: Duration,
}

impl PingProber {
    pub fn new(count: u8, timeout: Duration) -> Self {
        Self {
            program: PING_PROGRAM.to_string(),
            count: count.max(1),
            timeout,
        }
    }

    /// Uses another executable in place of `ping`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Hard limit on how long the child process may run.
    pub fn wall_clock(&self) -> Duration {
        self.timeout * u32::from(self.count) + WALL_CLOCK_SLACK
    }
}

#[async_trait]
impl Prober for PingProber {
    fn accepts(&self) -> TargetKind {
        TargetKind::Host
    }

    async fn probe(&self, target: Target) -> ProbeOutcome {
        let Target::Host(addr) = target else {
            debug!(%target, "ping probe skipped non-host target");
            return ProbeOutcome::unreachable(target);
        };

        let mut cmd = Command::new(&self.program);
        cmd.args(ping_args(self.count, self.timeout, addr))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match timeout(self.wall_clock(), cmd.output()).await {
            Ok(Ok(output)) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let outcome = ProbeOutcome::reachable(target);
                match parse_average_rtt(&stdout) {
                    Some(rtt) => outcome.with_metadata(format!("rtt {rtt}")),
                    None => outcome,
                }
            }
            Ok(Ok(output)) => {
                debug!(%addr, status = %output.status, "no echo reply");
                ProbeOutcome::unreachable(target)
            }
            Ok(Err(e)) => {
                debug!(%addr, program = %self.program, error = %e, "failed to spawn ping");
                ProbeOutcome::unreachable(target)
            }
            Err(_elapsed) => {
                debug!(%addr, "ping exceeded its wall clock, killed");
                ProbeOutcome::unreachable(target)
            }
        }
    }
}

/// Count and reply-wait flags for the current platform.
pub fn ping_args(count: u8, wait: Duration, addr: IpAddr) -> Vec<String> {
    let count: String = count.to_string();
    let millis: u128 = wait.as_millis().max(1);

    let (count_flag, wait_flag, wait_value) = if cfg!(windows) {
        ("-n", "-w", millis.to_string())
    } else if cfg!(target_os = "macos") {
        ("-c", "-W", millis.to_string())
    } else {
        // iputils takes whole seconds
        ("-c", "-W", millis.div_ceil(1000).to_string())
    };

    vec![
        count_flag.to_string(),
        count,
        wait_flag.to_string(),
        wait_value,
        addr.to_string(),
    ]
}

/// Pulls the average round-trip time out of `ping` output.
///
/// Understands the `min/avg/max` summary of iputils, BSD and busybox, and
/// the `Average =` (or localized `Moyenne =`) line printed on Windows.
pub fn parse_average_rtt(stdout: &str) -> Option<String> {
    for line in stdout.lines() {
        let lower: String = line.to_ascii_lowercase();

        if lower.contains("min/avg/max") {
            let (_, values) = line.split_once('=')?;
            let avg: &str = values.trim().split('/').nth(1)?;
            return Some(format!("{} ms", avg.trim()));
        }

        if lower.contains("average") || lower.contains("moyenne") {
            let value: &str = line.rsplit('=').next()?.trim();
            let value: &str = value.trim_end_matches("ms").trim();
            if value.is_empty() {
                return None;
            }
            return Some(format!("{value} ms"));
        }
    }
    None
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
