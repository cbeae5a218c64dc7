use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1_000);
pub const MIN_TIMEOUT: Duration = Duration::from_millis(100);
pub const MAX_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_WORKERS: usize = 10;
pub const MAX_WORKERS: usize = 100;

pub const DEFAULT_PING_COUNT: u8 = 1;
pub const MAX_PING_COUNT: u8 = 10;

pub const DEFAULT_MAX_HOSTS: usize = 255;
pub const DEFAULT_MAX_PORTS: usize = 10_000;

/// Upper bounds on how many targets a single scan may enumerate.
///
/// A specification that expands past these is rejected before any probe runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    pub max_hosts: usize,
    pub max_ports: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_hosts: DEFAULT_MAX_HOSTS,
            max_ports: DEFAULT_MAX_PORTS,
        }
    }
}

/// Settings for one scan invocation.
///
/// Built once by the caller and handed to the scanner, which passes the
/// relevant pieces down to the probes it constructs.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long a single probe waits for an answer.
    ///
    /// For ping probes this is the per-reply wait; the subprocess itself is
    /// bounded by `count * timeout` plus one second.
    pub timeout: Duration,
    /// Maximum number of probes in flight at once.
    pub max_workers: usize,
    /// Echo requests sent by each ping probe.
    pub ping_count: u8,
    pub limits: ScanLimits,
    /// Output verbosity, 0 is full output.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_workers: DEFAULT_WORKERS,
            ping_count: DEFAULT_PING_COUNT,
            limits: ScanLimits::default(),
            quiet: 0,
        }
    }
}

impl Config {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.clamp(MIN_TIMEOUT, MAX_TIMEOUT);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.max_workers = clamp_workers(workers);
        self
    }

    pub fn with_ping_count(mut self, count: u8) -> Self {
        self.ping_count = count.clamp(1, MAX_PING_COUNT);
        self
    }

    pub fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_quiet(mut self, quiet: u8) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Keeps a worker count inside `1..=MAX_WORKERS`.
pub fn clamp_workers(workers: usize) -> usize {
    workers.clamp(1, MAX_WORKERS)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
