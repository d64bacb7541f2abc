//! Message synthesis and IPv4 token extraction.
//!
//! The octet alternation is deliberately loose (`1?[0-9]?[0-9]` admits any
//! one or two digit group) and must not be tightened into a numeric 0-255
//! check.

use std::sync::LazyLock;

use iprecon_core::{IpSet, Table};
use regex::Regex;

/// Dotted-quad token, word-boundary delimited.
pub const IPV4_PATTERN: &str = r"\b((?:25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])){3})\b";

static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(IPV4_PATTERN).unwrap());

/// Build the per-row scan target by joining text columns with single spaces.
///
/// Falls back to every column when no column is classed as text.
pub fn synthesize_messages(table: &Table) -> Vec<String> {
    let mut columns = table.text_columns();
    if columns.is_empty() {
        columns = (0..table.headers().len()).collect();
    }

    table
        .rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|&i| row[i].as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// All non-overlapping IPv4 tokens in `message`, leftmost first.
pub fn ips_in(message: &str) -> impl Iterator<Item = &str> {
    IPV4_RE.find_iter(message).map(|m| m.as_str())
}

/// Scan every message and collect the distinct tokens.
pub fn extract_ips<'a, I>(messages: I) -> IpSet
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ips = IpSet::new();
    for message in messages {
        ips.extend(ips_in(message));
    }
    ips
}

/// Synthesize messages for `table` and extract their IPs.
pub fn extract_from_table(table: &Table) -> IpSet {
    let messages = synthesize_messages(table);
    let ips = extract_ips(messages.iter().map(String::as_str));

    tracing::debug!(
        rows = table.len(),
        unique_ips = ips.len(),
        "Scanned syslog messages"
    );

    ips
}
