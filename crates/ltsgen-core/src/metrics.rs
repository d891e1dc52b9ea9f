//! Extraction of state and transition counts from generator output.
//!
//! `lps2lts` reports progress with lines such as
//! `Generated LTS with 1234 states and 5678 transitions.`; only the two
//! counts are of interest.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// State-space size reported by the toolchain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metrics {
    pub states: u64,
    pub transitions: u64,
}

fn metrics_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+)\s+states\s+and\s+(\d+)\s+transitions")
            .expect("metrics pattern is a valid regex")
    })
}

/// Parse the first `<n> states and <m> transitions` occurrence in `line`.
///
/// Returns `None` for lines without the pattern, and for counts that do not
/// fit in a `u64`.
pub fn parse_metrics(line: &str) -> Option<Metrics> {
    let caps = metrics_pattern().captures(line)?;
    let states = caps[1].parse().ok()?;
    let transitions = caps[2].parse().ok()?;
    Some(Metrics {
        states,
        transitions,
    })
}
