//! Compact duration-string parsing.
//!
//! Durations are written as a digit run followed by a single unit character:
//! `"30s"`, `"45m"`, `"24h"`, `"7d"`. Every consumer (cache TTL, token
//! expiry) goes through [`parse_duration`] with its own fallback, so the
//! lenient-default rules are applied uniformly instead of per call site.

use chrono::Duration;
use tracing::warn;

/// Parse a compact duration string into a [`Duration`].
///
/// An unknown or missing unit, or a malformed numeric prefix, falls back to
/// `fallback` rather than failing. The fallback is deliberate configuration
/// leniency, not silent data loss: every fallback emits a warning so a typo
/// in a config file is visible in the logs.
pub fn parse_duration(input: &str, fallback: Duration) -> Duration {
    let trimmed = input.trim();

    let Some(unit) = trimmed.chars().next_back() else {
        warn!(input, "Empty duration string, using default");
        return fallback;
    };

    let value = match trimmed[..trimmed.len() - unit.len_utf8()].parse::<i64>() {
        Ok(v) if v >= 0 => v,
        _ => {
            warn!(input, "Malformed duration value, using default");
            return fallback;
        }
    };

    match unit {
        's' => Duration::seconds(value),
        'm' => Duration::minutes(value),
        'h' => Duration::hours(value),
        'd' => Duration::days(value),
        _ => {
            warn!(input, unit = %unit, "Unknown duration unit, using default");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default() -> Duration {
        Duration::hours(1)
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_duration("30s", default()), Duration::seconds(30));
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_duration("45m", default()), Duration::minutes(45));
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_duration("24h", default()), Duration::hours(24));
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_duration("7d", default()), Duration::days(7));
    }

    #[test]
    fn test_unknown_unit_falls_back() {
        assert_eq!(parse_duration("10w", default()), default());
    }

    #[test]
    fn test_missing_unit_falls_back() {
        // "100" parses its last char as the unit, leaving "10" as the value,
        // so the unknown unit '0' triggers the fallback.
        assert_eq!(parse_duration("100", default()), default());
    }

    #[test]
    fn test_malformed_prefix_falls_back() {
        assert_eq!(parse_duration("xh", default()), default());
        assert_eq!(parse_duration("-5h", default()), default());
    }

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(parse_duration("", default()), default());
        assert_eq!(parse_duration("   ", default()), default());
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(parse_duration(" 5m ", default()), Duration::minutes(5));
    }
}
