//! Time types: the calendar policy a timeline is built on.
//!
//! A [`TimeType`] decides how ticks map to dates, where the valid range ends,
//! how far the view may zoom, how times are parsed and labelled, and which
//! strips and navigation steps apply.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, Local, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::appearance::WeekStart;
use crate::calendar::{self, Bosparanian, CalendarDateTime, Coptic, DateCalendar, Gregorian, Pharaonic};
use crate::error::{Bound, TimeError};
use crate::metrics::Metrics;
use crate::navigation::{self, DuplicateUnit, NavigationEntry};
use crate::period::TimePeriod;
use crate::strip::{Strip, StripUnit};
use crate::time::{SECONDS_IN_DAY, Time, TimeDelta};

static DATE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d+)-(\d+)-(\d+) (\d+):(\d+):(\d+)$").unwrap());

static NUMERIC_TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+$").unwrap());

/// Last julian day supported by the non-Gregorian date calendars.
const MAX_JULIAN_DAY: i64 = 5_369_833;

const NUMERIC_LIMIT: i64 = 1_000_000_000_000_000;

/// The calendar a timeline measures time in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeType {
    #[default]
    Gregorian,
    Numeric,
    Pharaonic,
    Bosparanian,
    Coptic,
}

impl TimeType {
    pub const ALL: [Self; 5] = [
        Self::Gregorian,
        Self::Numeric,
        Self::Pharaonic,
        Self::Bosparanian,
        Self::Coptic,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::Numeric => "numeric",
            Self::Pharaonic => "pharaonic",
            Self::Bosparanian => "bosparanian",
            Self::Coptic => "coptic",
        }
    }

    /// The date calendar behind this time type, `None` for numeric time.
    pub fn calendar(self) -> Option<&'static dyn DateCalendar> {
        let calendar: &'static dyn DateCalendar = match self {
            Self::Gregorian => &Gregorian,
            Self::Pharaonic => &Pharaonic,
            Self::Bosparanian => &Bosparanian,
            Self::Coptic => &Coptic,
            Self::Numeric => return None,
        };
        Some(calendar)
    }

    pub const fn is_date_time(self) -> bool {
        !matches!(self, Self::Numeric)
    }

    pub(crate) fn date_calendar(
        self,
        operation: &'static str,
    ) -> Result<&'static dyn DateCalendar, TimeError> {
        self.calendar().ok_or(TimeError::Unsupported {
            time_type: self,
            operation,
        })
    }

    pub fn min_time(self) -> Time {
        match self {
            Self::Gregorian => {
                Time::from_julian_day(calendar::gregorian::ymd_to_julian_day(10, 1, 1), 0)
            }
            Self::Numeric => Time::from_ticks(-NUMERIC_LIMIT),
            Self::Pharaonic | Self::Bosparanian | Self::Coptic => Time::from_julian_day(0, 0),
        }
    }

    pub fn max_time(self) -> Time {
        match self {
            Self::Gregorian => {
                Time::from_julian_day(calendar::gregorian::ymd_to_julian_day(9990, 1, 1), 0)
            }
            Self::Numeric => Time::from_ticks(NUMERIC_LIMIT),
            Self::Pharaonic | Self::Bosparanian | Self::Coptic => {
                Time::from_julian_day(MAX_JULIAN_DAY, 0)
            }
        }
    }

    /// Message shown when a time falls before [`min_time`](Self::min_time).
    pub fn min_time_message(self) -> String {
        let min = self.min_time();
        match self.calendar() {
            Some(cal) => {
                let (year, _, _) = cal.julian_day_to_ymd(min.julian_day());
                format!("can't be before year {}", cal.format_year(year))
            }
            None => format!("can't be before {min}"),
        }
    }

    /// Message shown when a time falls after [`max_time`](Self::max_time).
    pub fn max_time_message(self) -> String {
        let max = self.max_time();
        match self.calendar() {
            Some(cal) => {
                let last = max - TimeDelta::from_seconds(1);
                let (year, _, _) = cal.julian_day_to_ymd(last.julian_day());
                format!("can't be after year {}", cal.format_year(year))
            }
            None => format!("can't be after {max}"),
        }
    }

    /// Fails with `OutOfRange` unless `time` lies within the supported range.
    pub fn check_bounds(self, time: Time) -> Result<Time, TimeError> {
        if time < self.min_time() {
            Err(TimeError::out_of_range(self, Bound::Left))
        } else if time > self.max_time() {
            Err(TimeError::out_of_range(self, Bound::Right))
        } else {
            Ok(time)
        }
    }

    pub const fn zero_delta(self) -> TimeDelta {
        TimeDelta::ZERO
    }

    /// The shortest span a period may be zoomed to.
    pub const fn min_zoom_delta(self) -> TimeDelta {
        match self {
            Self::Numeric => TimeDelta::from_ticks(2),
            _ => TimeDelta::from_seconds(60),
        }
    }

    pub const fn min_zoom_message(self) -> &'static str {
        match self {
            Self::Numeric => "Can't zoom deeper than 2",
            _ => "Can't zoom deeper than 1 minute",
        }
    }

    /// The longest span a period may have.
    pub const fn max_zoom_delta(self) -> TimeDelta {
        match self {
            Self::Numeric => TimeDelta::from_ticks(1000),
            _ => TimeDelta::from_days(1200 * 365),
        }
    }

    pub const fn max_zoom_message(self) -> &'static str {
        match self {
            Self::Numeric => "Can't zoom wider than 1000",
            _ => "Can't zoom wider than 1200 years",
        }
    }

    pub fn to_tuple(self, time: Time) -> Result<CalendarDateTime, TimeError> {
        Ok(self.date_calendar("to_tuple")?.from_time(time))
    }

    /// Converts a calendar date and time to a [`Time`] within range.
    pub fn from_tuple(self, datetime: &CalendarDateTime) -> Result<Time, TimeError> {
        let cal = self.date_calendar("from_tuple")?;
        self.to_time_in_range(cal, datetime)
    }

    fn to_time_in_range(
        self,
        cal: &dyn DateCalendar,
        datetime: &CalendarDateTime,
    ) -> Result<Time, TimeError> {
        let time = cal.to_time(datetime).map_err(|err| match err {
            TimeError::OutOfRange { bound, .. } => TimeError::out_of_range(self, bound),
            other => other,
        })?;
        self.check_bounds(time)
    }

    /// The current wall clock time. Numeric timelines start at zero.
    pub fn now(self) -> Time {
        if !self.is_date_time() {
            return Time::from_ticks(0);
        }
        let now = Local::now().naive_local();
        let julian_day = calendar::gregorian::ymd_to_julian_day(
            i64::from(now.year()),
            now.month(),
            now.day(),
        );
        Time::from_julian_day(julian_day, i64::from(now.num_seconds_from_midnight()))
    }

    /// Parses `"Y-M-D h:m:s"` for date calendars or an integer for numeric time.
    pub fn parse_time(self, input: &str) -> Result<Time, TimeError> {
        let input = input.trim();
        let parse_error = || TimeError::Parse {
            input: input.to_string(),
        };
        let Some(cal) = self.calendar() else {
            if !NUMERIC_TIME_RE.is_match(input) {
                return Err(parse_error());
            }
            let ticks = input.parse::<i64>().map_err(|_| parse_error())?;
            return self.check_bounds(Time::from_ticks(ticks));
        };
        let caps = DATE_TIME_RE.captures(input).ok_or_else(parse_error)?;
        let year = caps[1].parse::<i64>().map_err(|_| parse_error())?;
        let mut fields = [0_u32; 5];
        for (field, index) in fields.iter_mut().zip(2..=6) {
            *field = caps[index].parse().map_err(|_| parse_error())?;
        }
        let [month, day, hour, minute, second] = fields;
        self.to_time_in_range(cal, &CalendarDateTime::new(year, month, day, hour, minute, second))
    }

    /// Inverse of [`parse_time`](Self::parse_time).
    pub fn time_string(self, time: Time) -> String {
        match self.calendar() {
            Some(cal) => cal.from_time(time).to_string(),
            None => time.to_string(),
        }
    }

    /// Human readable label for a period, such as `"1 Jan 2010 to 5 Jan 2010"`.
    pub fn format_period(self, period: &TimePeriod) -> String {
        let Some(cal) = self.calendar() else {
            if period.is_period() {
                return format!("{} to {}", period.start(), period.end());
            }
            return period.start().to_string();
        };
        let with_time = period.has_nonzero_time();
        let label = |time: Time| {
            let datetime = cal.from_time(time);
            let date = format!(
                "{} {} {}",
                datetime.day,
                cal.month_abbreviation(datetime.month),
                cal.format_year(datetime.year)
            );
            if with_time {
                format!("{date} {:02}:{:02}", datetime.hour, datetime.minute)
            } else {
                date
            }
        };
        if period.is_period() {
            format!("{} to {}", label(period.start()), label(period.end()))
        } else {
            label(period.start())
        }
    }

    /// Describes a delta in days, hours and minutes, or as a plain number.
    pub fn format_delta(self, delta: TimeDelta) -> String {
        if !self.is_date_time() {
            return delta.ticks().to_string();
        }
        let seconds = delta.ticks();
        let days = seconds / SECONDS_IN_DAY;
        let hours = (seconds % SECONDS_IN_DAY) / 3600;
        let minutes = (seconds % 3600) / 60;
        let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
            .into_iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, unit)| {
                if count == 1 {
                    format!("1 {unit}")
                } else {
                    format!("{count} {unit}s")
                }
            })
            .collect();
        if parts.is_empty() {
            "0".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// The period shown when a timeline is first opened.
    pub fn default_time_period(self) -> Result<TimePeriod, TimeError> {
        if self.is_date_time() {
            TimePeriod::centered(self, self.now(), TimeDelta::from_days(30))
        } else {
            TimePeriod::centered(self, Time::from_ticks(0), TimeDelta::from_ticks(100))
        }
    }

    pub const fn half_delta(self, delta: TimeDelta) -> TimeDelta {
        delta.half()
    }

    /// Extra room added around periods that are fitted into view.
    pub const fn margin_delta(self, delta: TimeDelta) -> TimeDelta {
        TimeDelta::from_ticks(delta.ticks() / 24)
    }

    /// Picks `(major, minor)` strips for the current zoom level.
    pub fn choose_strip(self, metrics: &Metrics, week_start: WeekStart) -> (Strip, Strip) {
        if !self.is_date_time() {
            let delta = metrics.period().delta().ticks().max(1);
            let mut size = 1_i64;
            while size.saturating_mul(100) <= delta {
                size *= 10;
            }
            return (
                Strip::new(self, StripUnit::Numeric(size * 10)),
                Strip::new(self, StripUnit::Numeric(size)),
            );
        }
        let one_day_width = metrics.calc_exact_delta_width(TimeDelta::from_days(1));
        let (major, minor) = if one_day_width > 20000.0 {
            (StripUnit::Hour, StripUnit::Minute)
        } else if one_day_width > 600.0 {
            (StripUnit::Day, StripUnit::Hour)
        } else if one_day_width > 45.0 {
            (StripUnit::Week(week_start), StripUnit::Weekday)
        } else if one_day_width > 25.0 {
            (StripUnit::Month, StripUnit::Day)
        } else if one_day_width > 1.5 {
            (StripUnit::Year, StripUnit::Month)
        } else if one_day_width > 0.12 {
            (StripUnit::Decade, StripUnit::Year)
        } else if one_day_width > 0.012 {
            (StripUnit::Century, StripUnit::Decade)
        } else {
            (StripUnit::Century, StripUnit::Century)
        };
        (Strip::new(self, major), Strip::new(self, minor))
    }

    /// Navigation entries offered for this time type.
    ///
    /// The iterator is cheap to clone and can be requested again at any time.
    pub fn navigation_functions(
        self,
    ) -> std::iter::Copied<std::slice::Iter<'static, NavigationEntry>> {
        let entries: &'static [NavigationEntry] = if self.is_date_time() {
            &navigation::DATE_NAVIGATION
        } else {
            &navigation::NUMERIC_NAVIGATION
        };
        entries.iter().copied()
    }

    /// Units events can be duplicated by.
    pub const fn duplicate_functions(self) -> &'static [DuplicateUnit] {
        if self.is_date_time() {
            &DuplicateUnit::ALL
        } else {
            &[]
        }
    }
}

impl fmt::Display for TimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeType {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|time_type| time_type.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TimeError::Parse {
                input: s.to_string(),
            })
    }
}
