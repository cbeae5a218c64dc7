use std::collections::BTreeMap;

use netprobe_common::network::target::Target;

use crate::probe::ProbeOutcome;

/// The sorted active/inactive partition of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanReport {
    pub active: Vec<Target>,
    pub inactive: Vec<Target>,
    pub total: usize,
    /// Probe metadata of active targets (service name, round-trip time, ...).
    pub details: BTreeMap<Target, String>,
}

impl ScanReport {
    /// Folds outcomes, in any order, into a report.
    ///
    /// Repeated outcomes for one target collapse into a single entry which is
    /// active if any of them was reachable.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = ProbeOutcome>,
    {
        let mut merged: BTreeMap<Target, (bool, Option<String>)> = BTreeMap::new();

        for outcome in outcomes {
            let entry = merged.entry(outcome.target).or_insert((false, None));
            if outcome.reachable {
                entry.0 = true;
                // Smallest string wins so duplicates stay order independent.
                entry.1 = match (entry.1.take(), outcome.metadata) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
            }
        }

        let mut report = ScanReport {
            total: merged.len(),
            ..Default::default()
        };

        // BTreeMap iteration is already in natural target order.
        for (target, (reachable, metadata)) in merged {
            if reachable {
                report.active.push(target);
                if let Some(meta) = metadata {
                    report.details.insert(target, meta);
                }
            } else {
                report.inactive.push(target);
            }
        }

        report
    }

    pub fn detail(&self, target: &Target) -> Option<&str> {
        self.details.get(target).map(String::as_str)
    }

    pub fn is_consistent(&self) -> bool {
        self.active.len() + self.inactive.len() == self.total
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use std::net::{IpAddr, Ipv4Addr};

    fn outcomes() -> Vec<ProbeOutcome> {
        (1..=40u16)
            .map(|port| {
                let target = Target::Port(port);
                if port % 4 == 0 {
                    ProbeOutcome::reachable(target).with_metadata(format!("svc-{port}"))
                } else {
                    ProbeOutcome::unreachable(target)
                }
            })
            .collect()
    }

    #[test]
    fn partitions_and_sorts() {
        let mut shuffled = outcomes();
        shuffled.reverse();
        let report = ScanReport::from_outcomes(shuffled);

        assert_eq!(report.total, 40);
        assert_eq!(report.active.len(), 10);
        assert_eq!(report.inactive.len(), 30);
        assert!(report.is_consistent());
        assert!(report.active.windows(2).all(|w| w[0] < w[1]));
        assert!(report.inactive.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(report.detail(&Target::Port(8)), Some("svc-8"));
        assert_eq!(report.detail(&Target::Port(7)), None);
    }

    #[test]
    fn shuffled_completion_order_gives_identical_report() {
        let expected = ScanReport::from_outcomes(outcomes());
        let mut rng = rand::rng();

        for _ in 0..20 {
            let mut shuffled = outcomes();
            shuffled.shuffle(&mut rng);
            assert_eq!(ScanReport::from_outcomes(shuffled), expected);
        }
    }

    #[test]
    fn hosts_sort_numerically_not_lexically() {
        let host = |d: u8| Target::Host(IpAddr::V4(Ipv4Addr::new(10, 0, 0, d)));
        let report = ScanReport::from_outcomes(vec![
            ProbeOutcome::reachable(host(100)),
            ProbeOutcome::reachable(host(9)),
            ProbeOutcome::reachable(host(20)),
        ]);
        assert_eq!(report.active, vec![host(9), host(20), host(100)]);
    }

    #[test]
    fn duplicate_outcomes_collapse_to_reachable() {
        let target = Target::Port(22);
        let report = ScanReport::from_outcomes(vec![
            ProbeOutcome::unreachable(target),
            ProbeOutcome::reachable(target).with_metadata("SSH"),
        ]);

        assert_eq!(report.total, 1);
        assert_eq!(report.active, vec![target]);
        assert!(report.inactive.is_empty());
    }

    #[test]
    fn empty_input_gives_empty_report() {
        let report = ScanReport::from_outcomes(Vec::new());
        assert_eq!(report, ScanReport::default());
        assert!(report.is_consistent());
    }
}
