use std::collections::HashSet;
use std::sync::Mutex;

use super::*;
use crate::network::provider::{EnumerationError, RawAdapter, UpdateError};
use crate::network::InterfaceId;

/// Records every `set_metric` call and fails for a configured set of ids.
struct MockProvider {
    calls: Mutex<Vec<(InterfaceId, u32, bool)>>,
    fail_ids: HashSet<u64>,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_ids: HashSet::new(),
        }
    }

    fn failing_for(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_ids: ids.into_iter().collect(),
        }
    }

    fn calls(&self) -> Vec<(InterfaceId, u32, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

impl NetworkProvider for MockProvider {
    fn enumerate(&self) -> Result<Vec<RawAdapter>, EnumerationError> {
        unreachable!("reconciliation works on an already-built snapshot");
    }

    fn set_metric(
        &self,
        id: InterfaceId,
        metric: u32,
        clear_automatic: bool,
    ) -> Result<(), UpdateError> {
        self.calls.lock().unwrap().push((id, metric, clear_automatic));
        if self.fail_ids.contains(&id.0) {
            return Err(UpdateError::Platform {
                message: "write rejected".to_string(),
            });
        }
        Ok(())
    }
}

fn itf(name: &str, id: u64) -> Interface {
    Interface {
        name: name.to_string(),
        description: String::new(),
        ip_addresses: vec![],
        subnet_prefix_length: 0,
        gateways: vec![],
        dns_servers: vec![],
        dns_suffix: String::new(),
        metric: 0,
        automatic_metric: false,
        connected: true,
        id: InterfaceId(id),
    }
}

fn itf_auto(name: &str, id: u64) -> Interface {
    Interface {
        automatic_metric: true,
        ..itf(name, id)
    }
}

fn names(input: &[&str]) -> Vec<String> {
    input.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn assigns_dense_metrics_in_input_order() {
    let provider = MockProvider::new();
    let snapshot = vec![itf("Ethernet", 1), itf("Wi-Fi", 2), itf("VPN", 3)];

    let report = apply_order(&provider, &snapshot, &names(&["VPN", "Ethernet", "Wi-Fi"]));

    assert_eq!(report.skipped, 0);
    assert!(report.is_clean());
    assert_eq!(
        provider.calls(),
        vec![
            (InterfaceId(3), 10, false),
            (InterfaceId(1), 20, false),
            (InterfaceId(2), 30, false),
        ]
    );
}

#[test]
fn unmatched_names_do_not_consume_a_position() {
    let provider = MockProvider::new();
    let snapshot = vec![itf("Wi-Fi", 1), itf("Ethernet", 2)];

    let report = apply_order(
        &provider,
        &snapshot,
        &names(&["Wi-Fi", "Ghost-NIC", "Ethernet"]),
    );

    assert_eq!(report.skipped, 1);
    assert_eq!(
        provider.calls(),
        vec![(InterfaceId(1), 10, false), (InterfaceId(2), 20, false)]
    );
}

#[test]
fn blank_lines_count_as_skipped() {
    let provider = MockProvider::new();
    let snapshot = vec![itf("Ethernet", 1)];

    let report = apply_order(&provider, &snapshot, &names(&["", "Ethernet", ""]));

    assert_eq!(report.skipped, 2);
    assert_eq!(provider.calls(), vec![(InterfaceId(1), 10, false)]);
}

#[test]
fn automatic_metric_cleared_in_same_write() {
    let provider = MockProvider::new();
    let snapshot = vec![itf_auto("Wi-Fi", 1), itf("Ethernet", 2)];

    let report = apply_order(&provider, &snapshot, &names(&["Wi-Fi", "Ethernet"]));

    assert_eq!(
        provider.calls(),
        vec![(InterfaceId(1), 10, true), (InterfaceId(2), 20, false)]
    );
    assert!(report.applied[0].cleared_automatic);
    assert!(!report.applied[1].cleared_automatic);
}

#[test]
fn unmentioned_interfaces_are_left_untouched() {
    let provider = MockProvider::new();
    let snapshot = vec![itf("Ethernet", 1), itf_auto("Wi-Fi", 2)];

    apply_order(&provider, &snapshot, &names(&["Ethernet"]));

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, InterfaceId(1));
}

#[test]
fn matching_is_case_sensitive_and_exact() {
    let provider = MockProvider::new();
    let snapshot = vec![itf("Wi-Fi", 1)];

    let report = apply_order(&provider, &snapshot, &names(&["wi-fi", "Wi-Fi ", "Wi-Fi"]));

    assert_eq!(report.skipped, 2);
    assert_eq!(provider.calls(), vec![(InterfaceId(1), 10, false)]);
}

#[test]
fn duplicate_live_names_first_match_wins_repeatedly() {
    let provider = MockProvider::new();
    let snapshot = vec![itf("Ethernet", 1), itf("Ethernet", 2)];

    apply_order(&provider, &snapshot, &names(&["Ethernet", "Ethernet"]));

    // Both input occurrences re-match the first interface in enumeration
    // order; the second adapter is never written.
    assert_eq!(
        provider.calls(),
        vec![(InterfaceId(1), 10, false), (InterfaceId(1), 20, false)]
    );
}

#[test]
fn failed_write_does_not_abort_remaining_names() {
    let provider = MockProvider::failing_for([2]);
    let snapshot = vec![itf("A", 1), itf("B", 2), itf("C", 3)];

    let report = apply_order(&provider, &snapshot, &names(&["A", "B", "C"]));

    assert_eq!(report.applied.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "B");
    assert!(!report.is_clean());
    // The failed name still consumed its position slot.
    assert_eq!(
        provider.calls(),
        vec![
            (InterfaceId(1), 10, false),
            (InterfaceId(2), 20, false),
            (InterfaceId(3), 30, false),
        ]
    );
}

#[test]
fn empty_input_does_nothing() {
    let provider = MockProvider::new();
    let snapshot = vec![itf("Ethernet", 1)];

    let report = apply_order(&provider, &snapshot, &[]);

    assert_eq!(report.skipped, 0);
    assert!(report.applied.is_empty());
    assert!(provider.calls().is_empty());
}

#[test]
fn render_parse_reconcile_round_trip_keeps_enumeration_order() {
    use crate::network::codec;

    let provider = MockProvider::new();
    let snapshot = vec![itf("Ethernet", 1), itf("Wi-Fi", 2), itf("VPN", 3)];

    let text = codec::render(&snapshot);
    let parsed = codec::parse(&text);
    let report = apply_order(&provider, &snapshot, &parsed);

    assert_eq!(report.skipped, 0);
    assert_eq!(
        provider.calls(),
        vec![
            (InterfaceId(1), 10, false),
            (InterfaceId(2), 20, false),
            (InterfaceId(3), 30, false),
        ]
    );
}

#[test]
fn applying_the_same_list_twice_yields_the_same_metrics() {
    let snapshot = vec![itf("Wi-Fi", 1), itf("Ethernet", 2)];
    let order = names(&["Ethernet", "Wi-Fi"]);

    let first = MockProvider::new();
    apply_order(&first, &snapshot, &order);

    // Second pass sees the metrics the first pass wrote and the automatic
    // flag already cleared.
    let snapshot_after = vec![
        Interface {
            metric: 20,
            ..itf("Wi-Fi", 1)
        },
        Interface {
            metric: 10,
            ..itf("Ethernet", 2)
        },
    ];
    let second = MockProvider::new();
    apply_order(&second, &snapshot_after, &order);

    assert_eq!(first.calls(), second.calls());
}
