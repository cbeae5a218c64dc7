//! Route tracing through the platform `traceroute` / `tracert` binary.

use std::io::ErrorKind;
use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use netprobe_common::error::TraceError;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

pub const MAX_HOPS: u8 = 30;
pub const TRACE_TIMEOUT: Duration = Duration::from_secs(120);

/// One numbered line of traceroute output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub raw: String,
}

#[derive(Debug, Clone)]
pub struct Tracer {
    program: String,
    max_hops: u8,
    timeout: Duration,
}

impl Tracer {
    pub fn new(max_hops: u8) -> Self {
        Self {
            program: trace_program().to_string(),
            max_hops: max_hops.clamp(1, MAX_HOPS),
            timeout: TRACE_TIMEOUT,
        }
    }

    /// Uses another executable in place of the platform tracer.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_hops(&self) -> u8 {
        self.max_hops
    }

    pub async fn trace(&self, addr: IpAddr) -> Result<Vec<Hop>, TraceError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(trace_args(self.max_hops, addr))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        debug!(program = %self.program, %addr, max_hops = self.max_hops, "starting trace");

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(TraceError::MissingBinary(self.program.clone()));
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_elapsed) => return Err(TraceError::TimedOut(self.timeout)),
        };

        if !output.status.success() {
            return Err(TraceError::Failed(output.status));
        }

        Ok(parse_hops(&String::from_utf8_lossy(&output.stdout)))
    }
}

fn trace_program() -> &'static str {
    if cfg!(windows) { "tracert" } else { "traceroute" }
}

pub fn trace_args(max_hops: u8, addr: IpAddr) -> Vec<String> {
    let hops_flag: &str = if cfg!(windows) { "-h" } else { "-m" };
    vec![hops_flag.to_string(), max_hops.to_string(), addr.to_string()]
}

/// Keeps the lines that start with a hop number, verbatim.
///
/// Headers, blank lines and the `Trace complete.` trailer of `tracert` all
/// fall out.
pub fn parse_hops(stdout: &str) -> Vec<Hop> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| is_hop_line(line))
        .map(|line| Hop {
            raw: line.to_string(),
        })
        .collect()
}

fn is_hop_line(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|first| first.parse::<u8>().is_ok())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
