//! Navigation steps and event duplication.
//!
//! Each [`NavigationStep`] maps the displayed period to a new one. Steps never
//! modify their input: a step that fails leaves the caller's period as it was.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::appearance::WeekStart;
use crate::calendar::{CalendarDateTime, DateCalendar};
use crate::error::TimeError;
use crate::period::TimePeriod;
use crate::strip::{Strip, StripUnit};
use crate::time::{Time, TimeDelta};
use crate::time_type::TimeType;

/// One entry of a time type's navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationStep {
    Today,
    GoToDate,
    GoToTime,
    Backward,
    Forward,
    ForwardOneWeek,
    BackOneWeek,
    ForwardOneMonth,
    BackOneMonth,
    ForwardOneYear,
    BackOneYear,
    FitMillennium,
    FitCentury,
    FitDecade,
    FitYear,
    FitMonth,
    FitWeek,
    FitDay,
}

/// A labelled navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub label: &'static str,
    pub step: NavigationStep,
}

const fn entry(label: &'static str, step: NavigationStep) -> NavigationEntry {
    NavigationEntry { label, step }
}

pub(crate) static DATE_NAVIGATION: [NavigationEntry; 17] = [
    entry("Go to Today", NavigationStep::Today),
    entry("Go to Date", NavigationStep::GoToDate),
    entry("Backward", NavigationStep::Backward),
    entry("Forward", NavigationStep::Forward),
    entry("Forward One Week", NavigationStep::ForwardOneWeek),
    entry("Back One Week", NavigationStep::BackOneWeek),
    entry("Forward One Month", NavigationStep::ForwardOneMonth),
    entry("Back One Month", NavigationStep::BackOneMonth),
    entry("Forward One Year", NavigationStep::ForwardOneYear),
    entry("Back One Year", NavigationStep::BackOneYear),
    entry("Fit Millennium", NavigationStep::FitMillennium),
    entry("Fit Century", NavigationStep::FitCentury),
    entry("Fit Decade", NavigationStep::FitDecade),
    entry("Fit Year", NavigationStep::FitYear),
    entry("Fit Month", NavigationStep::FitMonth),
    entry("Fit Week", NavigationStep::FitWeek),
    entry("Fit Day", NavigationStep::FitDay),
];

pub(crate) static NUMERIC_NAVIGATION: [NavigationEntry; 3] = [
    entry("Go to Time", NavigationStep::GoToTime),
    entry("Backward", NavigationStep::Backward),
    entry("Forward", NavigationStep::Forward),
];

/// Inputs a step may need besides the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationContext {
    /// Used by [`NavigationStep::Today`].
    pub now: Time,
    pub week_start: WeekStart,
    /// Used by [`NavigationStep::GoToDate`] and [`NavigationStep::GoToTime`].
    pub target: Option<Time>,
}

impl NavigationContext {
    pub const fn new(now: Time, week_start: WeekStart) -> Self {
        Self {
            now,
            week_start,
            target: None,
        }
    }

    #[must_use]
    pub const fn with_target(mut self, target: Time) -> Self {
        self.target = Some(target);
        self
    }
}

impl NavigationStep {
    pub const ALL: [Self; 18] = [
        Self::Today,
        Self::GoToDate,
        Self::GoToTime,
        Self::Backward,
        Self::Forward,
        Self::ForwardOneWeek,
        Self::BackOneWeek,
        Self::ForwardOneMonth,
        Self::BackOneMonth,
        Self::ForwardOneYear,
        Self::BackOneYear,
        Self::FitMillennium,
        Self::FitCentury,
        Self::FitDecade,
        Self::FitYear,
        Self::FitMonth,
        Self::FitWeek,
        Self::FitDay,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::GoToDate => "go-to-date",
            Self::GoToTime => "go-to-time",
            Self::Backward => "backward",
            Self::Forward => "forward",
            Self::ForwardOneWeek => "forward-one-week",
            Self::BackOneWeek => "back-one-week",
            Self::ForwardOneMonth => "forward-one-month",
            Self::BackOneMonth => "back-one-month",
            Self::ForwardOneYear => "forward-one-year",
            Self::BackOneYear => "back-one-year",
            Self::FitMillennium => "fit-millennium",
            Self::FitCentury => "fit-century",
            Self::FitDecade => "fit-decade",
            Self::FitYear => "fit-year",
            Self::FitMonth => "fit-month",
            Self::FitWeek => "fit-week",
            Self::FitDay => "fit-day",
        }
    }

    /// Applies the step to `period`.
    ///
    /// Returns `Ok(None)` when a date the step needs does not exist in the
    /// calendar, for example paging a period starting on February 29 by whole
    /// years into a common year.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the result would leave the calendar range,
    /// `MissingTarget` for go-to steps without a target, and `Unsupported` for
    /// calendar steps on numeric time.
    pub fn apply(
        self,
        period: &TimePeriod,
        context: &NavigationContext,
    ) -> Result<Option<TimePeriod>, TimeError> {
        let time_type = period.time_type();
        debug!(step = self.name(), %time_type, "navigating");
        match self {
            Self::Today => Ok(Some(period.center(context.now))),
            Self::GoToDate | Self::GoToTime => {
                let target = context.target.ok_or(TimeError::MissingTarget)?;
                Ok(Some(period.center(target)))
            }
            Self::Backward | Self::Forward => {
                let direction = if self == Self::Forward { 1 } else { -1 };
                match time_type.calendar() {
                    Some(cal) => page(period, cal, direction),
                    None => period.move_delta(period.delta() * direction).map(Some),
                }
            }
            Self::ForwardOneWeek | Self::BackOneWeek => {
                let cal = time_type.date_calendar(self.name())?;
                let week = TimeDelta::from_days(i64::from(cal.days_in_week()));
                let week = if self == Self::ForwardOneWeek { week } else { -week };
                period.move_delta(week).map(Some)
            }
            Self::ForwardOneMonth | Self::BackOneMonth => {
                let cal = time_type.date_calendar(self.name())?;
                let forward = self == Self::ForwardOneMonth;
                period.move_delta(month_step(period, cal, forward)).map(Some)
            }
            Self::ForwardOneYear | Self::BackOneYear => {
                time_type.date_calendar(self.name())?;
                let year = TimeDelta::from_days(365);
                let year = if self == Self::ForwardOneYear { year } else { -year };
                period.move_delta(year).map(Some)
            }
            Self::FitMillennium => fit_years(period, self.name(), 1000),
            Self::FitCentury => fit_years(period, self.name(), 100),
            Self::FitDecade => {
                let cal = time_type.date_calendar(self.name())?;
                let mean = cal.from_time(period.mean_time());
                let year = mean.year.div_euclid(10) * 10;
                fit(period, cal, year_start(year), year_start(year + 10))
            }
            Self::FitYear => {
                let cal = time_type.date_calendar(self.name())?;
                let mean = cal.from_time(period.mean_time());
                fit(period, cal, year_start(mean.year), year_start(mean.year + 1))
            }
            Self::FitMonth => {
                let cal = time_type.date_calendar(self.name())?;
                let mean = cal.from_time(period.mean_time());
                let start = CalendarDateTime::from_ymd(mean.year, mean.month, 1);
                fit(period, cal, start, cal.add_months(&start, 1))
            }
            Self::FitWeek => {
                time_type.date_calendar(self.name())?;
                let week = Strip::new(time_type, StripUnit::Week(context.week_start));
                let start = week.start(period.mean_time());
                period.update(start, week.increment(start)).map(Some)
            }
            Self::FitDay => {
                time_type.date_calendar(self.name())?;
                let start = period.mean_time().start_of_day();
                period.update(start, start + TimeDelta::from_days(1)).map(Some)
            }
        }
    }
}

impl fmt::Display for NavigationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NavigationStep {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.name() == s.trim())
            .ok_or_else(|| TimeError::Parse {
                input: s.to_string(),
            })
    }
}

/// Converts a calendar date, mapping dates that do not exist to `None`.
fn existing_time(
    cal: &dyn DateCalendar,
    datetime: &CalendarDateTime,
) -> Result<Option<Time>, TimeError> {
    match cal.to_time(datetime) {
        Ok(time) => Ok(Some(time)),
        Err(TimeError::InvalidDate { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

const fn year_start(year: i64) -> CalendarDateTime {
    CalendarDateTime::from_ymd(year, 1, 1)
}

fn fit(
    period: &TimePeriod,
    cal: &dyn DateCalendar,
    start: CalendarDateTime,
    end: CalendarDateTime,
) -> Result<Option<TimePeriod>, TimeError> {
    let (Some(start), Some(end)) = (existing_time(cal, &start)?, existing_time(cal, &end)?) else {
        return Ok(None);
    };
    period.update(start, end).map(Some)
}

/// Fits a span of `years` around the mean time, kept inside the calendar range.
fn fit_years(
    period: &TimePeriod,
    operation: &'static str,
    years: i64,
) -> Result<Option<TimePeriod>, TimeError> {
    let time_type = period.time_type();
    let cal = time_type.date_calendar(operation)?;
    let mean = cal.from_time(period.mean_time());
    let min_year = first_whole_year(time_type, cal);
    let max_year = cal.from_time(time_type.max_time()).year - years;
    let year = if mean.year > max_year {
        max_year
    } else {
        (mean.year.div_euclid(years) * years).max(min_year)
    };
    fit(period, cal, year_start(year), year_start(year + years))
}

/// The first year that starts inside the calendar range.
fn first_whole_year(time_type: TimeType, cal: &dyn DateCalendar) -> i64 {
    let min = time_type.min_time();
    let year = cal.from_time(min).year;
    let starts_inside = cal
        .to_time(&year_start(year))
        .is_ok_and(|start| start >= min);
    if starts_inside { year } else { year + 1 }
}

/// Pages by whole years, whole months, or the period's own length.
fn page(
    period: &TimePeriod,
    cal: &dyn DateCalendar,
    direction: i64,
) -> Result<Option<TimePeriod>, TimeError> {
    let start = cal.from_time(period.start());
    let end = cal.from_time(period.end());

    let year_diff = end.year - start.year;
    if year_diff > 0 && start.replace(end.year, start.month) == end {
        let shift = year_diff * direction;
        let new_start = start.replace(start.year + shift, start.month);
        let new_end = end.replace(end.year + shift, end.month);
        return fit(period, cal, new_start, new_end);
    }

    let months_in_year = i64::from(cal.months_in_year());
    let month_diff = (end.year * months_in_year + i64::from(end.month))
        - (start.year * months_in_year + i64::from(start.month));
    if month_diff > 0 && start.is_first_of_month() && end.is_first_of_month() {
        let shift = month_diff * direction;
        return fit(
            period,
            cal,
            cal.add_months(&start, shift),
            cal.add_months(&end, shift),
        );
    }

    period.move_delta(period.delta() * direction).map(Some)
}

/// Length of the month containing the mean time going forward, or of the
/// month before it going backward.
fn month_step(period: &TimePeriod, cal: &dyn DateCalendar, forward: bool) -> TimeDelta {
    let mean = cal.from_time(period.mean_time());
    let month = CalendarDateTime::from_ymd(mean.year, mean.month, 1);
    let (month, sign) = if forward {
        (month, 1)
    } else {
        (cal.add_months(&month, -1), -1)
    };
    TimeDelta::from_days(i64::from(cal.days_in_month(month.year, month.month))) * sign
}

/// Units an event can be duplicated by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateUnit {
    Day,
    Week,
    Month,
    Year,
}

impl DuplicateUnit {
    pub const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Year => "Year",
        }
    }

    /// Moves `period` by `count` units.
    ///
    /// Month and year moves keep the day of month, so they return `None` when
    /// that day does not exist in the target month. Moves that leave the
    /// calendar range also return `None`.
    pub fn apply(self, period: &TimePeriod, count: i64) -> Option<TimePeriod> {
        let cal = period.time_type().calendar()?;
        match self {
            Self::Day => period.move_delta(TimeDelta::from_days(count)).ok(),
            Self::Week => {
                let days = i64::from(cal.days_in_week()) * count;
                period.move_delta(TimeDelta::from_days(days)).ok()
            }
            Self::Month | Self::Year => {
                let months = if self == Self::Year {
                    count * i64::from(cal.months_in_year())
                } else {
                    count
                };
                let start = cal.add_months(&cal.from_time(period.start()), months);
                let end = cal.add_months(&cal.from_time(period.end()), months);
                let start = cal.to_time(&start).ok()?;
                let end = cal.to_time(&end).ok()?;
                period.update(start, end).ok()
            }
        }
    }
}

impl fmt::Display for DuplicateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
