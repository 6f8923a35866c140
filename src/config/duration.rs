//! Duration parsing for command-line timeouts.

use anyhow::Context;

/// Parse a duration string like "1h", "30m", "10s", "500ms" or "500" into
/// milliseconds.
///
/// - Plain numbers are milliseconds: "500"
/// - Milliseconds suffix: "500ms"
/// - Seconds suffix: "10s"
/// - Minutes suffix: "30m"
/// - Hours suffix: "1h"
pub fn parse_duration_to_millis(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    // "ms" before "m" and "s"
    if let Some(num_str) = s.strip_suffix("ms") {
        return num_str
            .parse()
            .with_context(|| format!("Invalid milliseconds value: {num_str}"));
    }
    let units = [('h', "hours", 3_600_000), ('m', "minutes", 60_000), ('s', "seconds", 1000)];
    for (suffix, unit, millis) in units {
        if let Some(num_str) = s.strip_suffix(suffix) {
            let count: u64 = num_str
                .parse()
                .with_context(|| format!("Invalid {unit} value: {num_str}"))?;
            return count
                .checked_mul(millis)
                .with_context(|| format!("Invalid {unit} value: {num_str} is too large"));
        }
    }

    s.parse::<u64>()
        .with_context(|| format!("Invalid duration value: {s}"))
}
