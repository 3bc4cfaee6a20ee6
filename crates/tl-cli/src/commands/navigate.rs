//! Navigate command for applying a navigation step to a period.

use std::fmt::Write;

use anyhow::{Context, Result};
use tl_core::{NavigationContext, NavigationStep, TimePeriod, TimeType, WeekStart};

use super::util::{parse_period, parse_time};

/// Applies `step` and describes the resulting period, or `missing date` when
/// the step lands on a date the calendar doesn't have.
pub fn navigate(
    step: NavigationStep,
    period: &TimePeriod,
    context: &NavigationContext,
) -> Result<String> {
    let time_type = period.time_type();
    let Some(new_period) = step
        .apply(period, context)
        .with_context(|| format!("can't apply {step}"))?
    else {
        return Ok("missing date\n".to_string());
    };
    let mut output = String::new();
    writeln!(output, "{}", time_type.format_period(&new_period)).unwrap();
    writeln!(output, "start: {}", time_type.time_string(new_period.start())).unwrap();
    writeln!(output, "end:   {}", time_type.time_string(new_period.end())).unwrap();
    Ok(output)
}

pub fn run(
    step: NavigationStep,
    time_type: TimeType,
    start: &str,
    end: &str,
    target: Option<&str>,
    week_start: WeekStart,
) -> Result<()> {
    let period = parse_period(time_type, start, end)?;
    let mut context = NavigationContext::new(time_type.now(), week_start);
    if let Some(target) = target {
        context = context.with_target(parse_time(time_type, target)?);
    }
    print!("{}", navigate(step, &period, &context)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_core::Time;

    fn context(time_type: TimeType) -> NavigationContext {
        NavigationContext::new(time_type.now(), WeekStart::Monday)
    }

    #[test]
    fn test_numeric_forward() {
        let period = parse_period(TimeType::Numeric, "0", "100").unwrap();
        let output = navigate(NavigationStep::Forward, &period, &context(TimeType::Numeric)).unwrap();
        insta::assert_snapshot!(output, @r"
        100 to 200
        start: 100
        end:   200
        ");
    }

    #[test]
    fn test_forward_pages_whole_months() {
        let period = parse_period(TimeType::Gregorian, "2010-01-01", "2010-02-01").unwrap();
        let output =
            navigate(NavigationStep::Forward, &period, &context(TimeType::Gregorian)).unwrap();
        assert_eq!(output.lines().next(), Some("1 Feb 2010 to 1 Mar 2010"));
    }

    #[test]
    fn test_missing_leap_day() {
        let period = parse_period(TimeType::Gregorian, "1892-02-29", "1896-02-29").unwrap();
        let output =
            navigate(NavigationStep::Forward, &period, &context(TimeType::Gregorian)).unwrap();
        assert_eq!(output, "missing date\n");
    }

    #[test]
    fn test_go_to_time_needs_target() {
        let period = parse_period(TimeType::Numeric, "0", "100").unwrap();
        let context = context(TimeType::Numeric);
        let err = navigate(NavigationStep::GoToTime, &period, &context).unwrap_err();
        assert_eq!(err.to_string(), "can't apply go-to-time");

        let context = context.with_target(Time::from_ticks(1000));
        let output = navigate(NavigationStep::GoToTime, &period, &context).unwrap();
        assert!(output.starts_with("950 to 1050\n"));
    }
}
