//! Convert command for showing a time in another calendar.
//!
//! Date calendars share one absolute time axis, so a time written in one of
//! them can be shown in any other. Numeric time has no dates and only
//! converts to itself.

use anyhow::{Context, Result};
use tl_core::TimeType;

use super::util::parse_time;

/// Reinterprets `time`, written in `from`, as a time string of `to`.
pub fn convert(time: &str, from: TimeType, to: TimeType) -> Result<String> {
    if from.is_date_time() != to.is_date_time() {
        anyhow::bail!("can't convert between {from} and {to} time");
    }
    let time = parse_time(from, time)?;
    let time = to
        .check_bounds(time)
        .with_context(|| format!("time is outside the {to} range"))?;
    Ok(to.time_string(time))
}

pub fn run(time: &str, from: TimeType, to: TimeType) -> Result<()> {
    let output = convert(time, from, to)?;
    println!("{output}");
    Ok(())
}
