//! Bounded worker pool for probes.
//!
//! Each target becomes one spawned task. A semaphore holding `max_workers`
//! permits is acquired *before* spawning, so no more than `max_workers`
//! probes (and therefore sockets or child processes) exist at any time.
//! Outcomes travel back through the join handles and are only merged once
//! every task has finished.

use std::collections::HashSet;
use std::sync::Arc;

use netprobe_common::config;
use netprobe_common::network::target::Target;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::probe::{ProbeOutcome, Prober};

/// Called with the number of finished probes after each completion.
pub type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Runs `prober` once per target and waits for all of them.
///
/// The returned outcomes are in completion order. Every target gets exactly
/// one outcome; a task that panics is recorded as unreachable.
pub async fn dispatch(
    targets: Vec<Target>,
    prober: Arc<dyn Prober>,
    max_workers: usize,
    on_progress: Option<ProgressCallback>,
) -> Vec<ProbeOutcome> {
    let workers: usize = config::clamp_workers(max_workers);
    let semaphore: Arc<Semaphore> = Arc::new(Semaphore::new(workers));
    let total: usize = targets.len();

    debug!(total, workers, "dispatching probes");

    let mut tasks: JoinSet<ProbeOutcome> = JoinSet::new();
    let mut outcomes: Vec<ProbeOutcome> = Vec::with_capacity(total);
    let mut finished: usize = 0;

    for target in targets.iter().copied() {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let prober = Arc::clone(&prober);

        tasks.spawn(async move {
            let outcome = prober.probe(target).await;
            drop(permit);
            outcome
        });

        // Harvest whatever already finished so the set does not grow with the
        // target list.
        while let Some(joined) = tasks.try_join_next() {
            record(joined, &mut outcomes, &mut finished, &on_progress);
        }
    }

    while let Some(joined) = tasks.join_next().await {
        record(joined, &mut outcomes, &mut finished, &on_progress);
    }

    if outcomes.len() < total {
        fill_missing(&targets, &mut outcomes);
    }

    outcomes
}

fn record(
    joined: Result<ProbeOutcome, tokio::task::JoinError>,
    outcomes: &mut Vec<ProbeOutcome>,
    finished: &mut usize,
    on_progress: &Option<ProgressCallback>,
) {
    match joined {
        Ok(outcome) => outcomes.push(outcome),
        Err(e) => warn!("probe task did not complete: {e}"),
    }

    *finished += 1;
    if let Some(cb) = on_progress {
        cb(*finished);
    }
}

/// Gives every target that lost its task an unreachable outcome.
fn fill_missing(targets: &[Target], outcomes: &mut Vec<ProbeOutcome>) {
    let seen: HashSet<Target> = outcomes.iter().map(|o| o.target).collect();

    for target in targets {
        if !seen.contains(target) {
            outcomes.push(ProbeOutcome::unreachable(*target).with_metadata("probe failed"));
        }
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
