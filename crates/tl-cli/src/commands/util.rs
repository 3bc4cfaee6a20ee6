//! Shared utilities for CLI commands.

use anyhow::Context;
use tl_core::{Time, TimePeriod, TimeType};

/// Parse a time argument in the given calendar.
///
/// Supports:
/// - Full form: "2010-01-31 12:00:00"
/// - Date only: "2010-01-31" (midnight)
/// - "now"
/// - Integers for numeric time: "42"
pub fn parse_time(time_type: TimeType, s: &str) -> anyhow::Result<Time> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("now") {
        return Ok(time_type.now());
    }
    let full = if time_type.is_date_time() && !s.contains(' ') {
        format!("{s} 00:00:00")
    } else {
        s.to_string()
    };
    time_type
        .parse_time(&full)
        .with_context(|| format!("invalid {time_type} time: {s}"))
}

/// Parse a start and end argument into a period.
pub fn parse_period(time_type: TimeType, start: &str, end: &str) -> anyhow::Result<TimePeriod> {
    let start = parse_time(time_type, start)?;
    let end = parse_time(time_type, end)?;
    TimePeriod::new(time_type, start, end).context("invalid period")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only_means_midnight() {
        let short = parse_time(TimeType::Gregorian, "2010-01-31").unwrap();
        let full = parse_time(TimeType::Gregorian, "2010-01-31 00:00:00").unwrap();
        assert_eq!(short, full);
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_time(TimeType::Numeric, " 42 ").unwrap(), Time::from_ticks(42));
        assert_eq!(parse_time(TimeType::Numeric, "now").unwrap(), Time::from_ticks(0));
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse_time(TimeType::Gregorian, "2010-02-30").unwrap_err();
        assert!(err.to_string().contains("invalid gregorian time"));
        assert!(parse_time(TimeType::Numeric, "ten").is_err());
    }

    #[test]
    fn test_parse_period_rejects_reversed_bounds() {
        assert!(parse_period(TimeType::Numeric, "0", "10").is_ok());
        let err = parse_period(TimeType::Numeric, "10", "0").unwrap_err();
        assert_eq!(err.to_string(), "invalid period");
    }
}
