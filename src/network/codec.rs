//! Line-oriented text codec for the operator-facing name list.
//!
//! The textual round-trip surface carries only names, one per line.
//! Everything else an [`Interface`] knows stays in structured form.

use super::Interface;

/// Renders a snapshot as one interface name per line, in enumeration
/// order. Sorting (e.g. by metric) is the presentation layer's job, not
/// this codec's.
#[must_use]
pub fn render(interfaces: &[Interface]) -> String {
    let mut text = String::new();
    for itf in interfaces {
        text.push_str(&itf.name);
        text.push('\n');
    }
    text
}

/// Parses operator-edited text back into an ordered name list.
///
/// Splits on line boundaries, preserves order and blank lines, does not
/// trim and does not deduplicate. Trimming/dedup policy is intentionally
/// left to the reconciler's matching semantics.
#[must_use]
pub fn parse(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::InterfaceId;

    fn named(name: &str, id: u64) -> Interface {
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
            connected: false,
            id: InterfaceId(id),
        }
    }

    #[test]
    fn render_emits_one_name_per_line() {
        let snapshot = vec![named("Ethernet", 1), named("Wi-Fi", 2)];
        assert_eq!(render(&snapshot), "Ethernet\nWi-Fi\n");
    }

    #[test]
    fn render_of_empty_snapshot_is_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn parse_preserves_order() {
        assert_eq!(parse("Wi-Fi\nEthernet\n"), vec!["Wi-Fi", "Ethernet"]);
    }

    #[test]
    fn parse_preserves_blank_lines_as_empty_entries() {
        assert_eq!(parse("Wi-Fi\n\nEthernet"), vec!["Wi-Fi", "", "Ethernet"]);
    }

    #[test]
    fn parse_does_not_trim() {
        assert_eq!(parse("  Wi-Fi \n"), vec!["  Wi-Fi "]);
    }

    #[test]
    fn parse_does_not_deduplicate() {
        assert_eq!(parse("Wi-Fi\nWi-Fi\n"), vec!["Wi-Fi", "Wi-Fi"]);
    }

    #[test]
    fn parse_handles_crlf_line_endings() {
        assert_eq!(parse("Wi-Fi\r\nEthernet\r\n"), vec!["Wi-Fi", "Ethernet"]);
    }

    #[test]
    fn render_then_parse_round_trips() {
        let snapshot = vec![named("Ethernet", 1), named("Wi-Fi", 2), named("vEthernet (WSL)", 3)];
        let names = parse(&render(&snapshot));
        assert_eq!(names, vec!["Ethernet", "Wi-Fi", "vEthernet (WSL)"]);
    }
}
