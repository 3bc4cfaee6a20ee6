//! Calendar-aligned strips used for gridlines, labels and snapping.

use crate::appearance::WeekStart;
use crate::calendar::{CalendarDateTime, DateCalendar, Gregorian, gregorian};
use crate::time::{Time, TimeDelta};
use crate::time_type::TimeType;

/// The unit a strip is divided into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripUnit {
    Century,
    Decade,
    Year,
    Month,
    Week(WeekStart),
    Weekday,
    Day,
    Hour,
    Minute,
    /// Numeric bands of the given size, a power of ten.
    Numeric(i64),
}

/// A strip of one unit in one time type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strip {
    time_type: TimeType,
    unit: StripUnit,
}

impl Strip {
    pub(crate) const fn new(time_type: TimeType, unit: StripUnit) -> Self {
        Self { time_type, unit }
    }

    pub const fn unit(&self) -> StripUnit {
        self.unit
    }

    fn calendar(&self) -> &'static dyn DateCalendar {
        self.time_type.calendar().unwrap_or(&Gregorian)
    }

    /// Start of the strip containing `time`.
    pub fn start(&self, time: Time) -> Time {
        let cal = self.calendar();
        let datetime = cal.from_time(time);
        let year = datetime.year;
        match self.unit {
            StripUnit::Century => {
                let start = date_time(cal, year.div_euclid(100) * 100, 1, 1);
                start.max(self.time_type.min_time())
            }
            StripUnit::Decade => date_time(cal, year.div_euclid(10) * 10, 1, 1),
            StripUnit::Year => date_time(cal, year, 1, 1),
            StripUnit::Month => date_time(cal, year, datetime.month, 1),
            StripUnit::Week(week_start) => {
                let julian_day = time.julian_day();
                let day_of_week = cal.day_of_week(julian_day);
                let days_back = if week_start == WeekStart::Sunday && cal.days_in_week() == 7 {
                    (day_of_week + 1) % 7
                } else {
                    day_of_week
                };
                Time::from_julian_day(julian_day - i64::from(days_back), 0)
            }
            StripUnit::Weekday | StripUnit::Day => time.start_of_day(),
            StripUnit::Hour => {
                time.start_of_day() + TimeDelta::from_seconds(i64::from(datetime.hour) * 3600)
            }
            StripUnit::Minute => {
                let seconds = i64::from(datetime.hour) * 3600 + i64::from(datetime.minute) * 60;
                time.start_of_day() + TimeDelta::from_seconds(seconds)
            }
            StripUnit::Numeric(size) => Time::from_ticks(time.ticks().div_euclid(size) * size),
        }
    }

    /// Start of the strip following the one that starts at `time`.
    pub fn increment(&self, time: Time) -> Time {
        let cal = self.calendar();
        let years = |count: i64| {
            let datetime = cal.from_time(time);
            let moved = cal.add_months_clamped(&datetime, count * i64::from(cal.months_in_year()));
            to_time(cal, &moved)
        };
        match self.unit {
            StripUnit::Century => years(100),
            StripUnit::Decade => years(10),
            StripUnit::Year => years(1),
            StripUnit::Month => {
                let datetime = cal.from_time(time);
                let days = cal.days_in_month(datetime.year, datetime.month);
                time + TimeDelta::from_days(i64::from(days))
            }
            StripUnit::Week(_) => time + TimeDelta::from_days(i64::from(cal.days_in_week())),
            StripUnit::Weekday | StripUnit::Day => time + TimeDelta::from_days(1),
            StripUnit::Hour => time + TimeDelta::from_seconds(3600),
            StripUnit::Minute => time + TimeDelta::from_seconds(60),
            StripUnit::Numeric(size) => time + TimeDelta::from_ticks(size),
        }
    }

    /// Label for the strip starting at `time`.
    pub fn label(&self, time: Time, major: bool) -> String {
        let cal = self.calendar();
        let datetime = cal.from_time(time);
        let day_month_year = || {
            format!(
                "{} {} {}",
                datetime.day,
                cal.month_abbreviation(datetime.month),
                cal.format_year(datetime.year)
            )
        };
        match self.unit {
            StripUnit::Century if major => {
                let next_start = datetime.year.div_euclid(100) * 100 + 100;
                format!("{} century", next_start.div_euclid(100))
            }
            StripUnit::Century => String::new(),
            StripUnit::Decade => format!("{}s", datetime.year.div_euclid(10) * 10),
            StripUnit::Year => cal.format_year(datetime.year),
            StripUnit::Month if major => format!(
                "{} {}",
                cal.month_abbreviation(datetime.month),
                cal.format_year(datetime.year)
            ),
            StripUnit::Month => cal.month_abbreviation(datetime.month).to_string(),
            StripUnit::Week(week_start) if major => self.week_label(time, week_start),
            StripUnit::Week(_) => String::new(),
            StripUnit::Weekday => {
                let weekday = cal.weekday_abbreviation(cal.day_of_week(time.julian_day()));
                if major {
                    format!("{weekday} {}", day_month_year())
                } else {
                    weekday
                }
            }
            StripUnit::Day if major => day_month_year(),
            StripUnit::Day => datetime.day.to_string(),
            StripUnit::Hour if major => format!("{} {}", day_month_year(), datetime.hour),
            StripUnit::Hour => datetime.hour.to_string(),
            StripUnit::Minute if major => {
                format!("{} {:02}:{:02}", day_month_year(), datetime.hour, datetime.minute)
            }
            StripUnit::Minute => format!("{:02}", datetime.minute),
            StripUnit::Numeric(_) => time.to_string(),
        }
    }

    /// `"Week 23 (1-7 Jun 2009)"` for Gregorian Monday weeks, the bare range otherwise.
    fn week_label(&self, time: Time, week_start: WeekStart) -> String {
        let first = self.start(time);
        let last = self.increment(first) - TimeDelta::from_days(1);
        let range = self.range_string(first, last);
        if self.time_type == TimeType::Gregorian && week_start == WeekStart::Monday {
            format!("Week {} ({range})", gregorian::week_number(first.julian_day()))
        } else {
            range
        }
    }

    fn range_string(&self, first: Time, last: Time) -> String {
        let cal = self.calendar();
        let a = cal.from_time(first);
        let b = cal.from_time(last);
        let month = |m| cal.month_abbreviation(m);
        if a.year != b.year {
            return format!(
                "{} {} {}-{} {} {}",
                a.day,
                month(a.month),
                cal.format_year(a.year),
                b.day,
                month(b.month),
                cal.format_year(b.year)
            );
        }
        if a.month == b.month {
            format!("{}-{} {} {}", a.day, b.day, month(a.month), cal.format_year(a.year))
        } else {
            format!(
                "{} {}-{} {} {}",
                a.day,
                month(a.month),
                b.day,
                month(b.month),
                cal.format_year(a.year)
            )
        }
    }
}

fn date_time(cal: &dyn DateCalendar, year: i64, month: u32, day: u32) -> Time {
    Time::from_julian_day(cal.ymd_to_julian_day(year, month, day), 0)
}

/// Converts a date known to exist in `cal`.
fn to_time(cal: &dyn DateCalendar, datetime: &CalendarDateTime) -> Time {
    let seconds =
        i64::from(datetime.hour) * 3600 + i64::from(datetime.minute) * 60 + i64::from(datetime.second);
    Time::from_julian_day(
        cal.ymd_to_julian_day(datetime.year, datetime.month, datetime.day),
        seconds,
    )
}
