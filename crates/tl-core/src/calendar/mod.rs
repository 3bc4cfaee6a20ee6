//! Date calendars.
//!
//! Every date calendar maps `(year, month, day)` to a julian day number, so
//! all of them share the same [`Time`] representation and can be converted
//! between each other through it.

pub mod arithmetic;
pub mod bosparanian;
pub mod coptic;
pub mod gregorian;
pub mod pharaonic;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Bound, TimeError};
use crate::time::Time;

pub use bosparanian::Bosparanian;
pub use coptic::Coptic;
pub use gregorian::Gregorian;
pub use pharaonic::Pharaonic;

/// A calendar-specific breakdown of a [`Time`].
///
/// Construction does not validate; [`DateCalendar::to_time`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDateTime {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarDateTime {
    pub const fn new(year: i64, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight on the given date.
    pub const fn from_ymd(year: i64, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    pub const fn to_tuple(&self) -> (i64, u32, u32, u32, u32, u32) {
        (self.year, self.month, self.day, self.hour, self.minute, self.second)
    }

    /// Same time of day and day of month in another year and month.
    #[must_use]
    pub const fn replace(&self, year: i64, month: u32) -> Self {
        Self { year, month, ..*self }
    }

    pub const fn is_midnight(&self) -> bool {
        self.hour == 0 && self.minute == 0 && self.second == 0
    }

    pub const fn is_first_of_month(&self) -> bool {
        self.day == 1 && self.is_midnight()
    }

    pub const fn is_first_day_in_year(&self) -> bool {
        self.month == 1 && self.is_first_of_month()
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Largest year magnitude any calendar converts. Well beyond every time
/// type's range, and small enough that the julian day arithmetic cannot
/// overflow.
pub const YEAR_LIMIT: u64 = 1_000_000_000;

pub const fn is_valid_time(hour: u32, minute: u32, second: u32) -> bool {
    hour < 24 && minute < 60 && second < 60
}

/// A calendar made of years, months and days.
pub trait DateCalendar: fmt::Debug + Sync {
    /// Lowercase calendar name, used in error messages.
    fn name(&self) -> &'static str;

    fn months_in_year(&self) -> u32;

    fn days_in_month(&self, year: i64, month: u32) -> u32;

    /// Converts a valid date to a julian day number.
    fn ymd_to_julian_day(&self, year: i64, month: u32, day: u32) -> i64;

    fn julian_day_to_ymd(&self, julian_day: i64) -> (i64, u32, u32);

    fn month_name(&self, month: u32) -> &'static str;

    fn days_in_week(&self) -> u32 {
        7
    }

    /// Zero-based position within the week.
    fn day_of_week(&self, julian_day: i64) -> u32 {
        julian_day.rem_euclid(7) as u32
    }

    fn weekday_abbreviation(&self, day_of_week: u32) -> String {
        const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        WEEKDAYS[day_of_week as usize % 7].to_string()
    }

    fn month_abbreviation(&self, month: u32) -> &'static str {
        let name = self.month_name(month);
        name.get(..3).unwrap_or(name)
    }

    fn format_year(&self, year: i64) -> String {
        year.to_string()
    }

    fn is_valid(&self, year: i64, month: u32, day: u32) -> bool {
        (1..=self.months_in_year()).contains(&month)
            && day >= 1
            && day <= self.days_in_month(year, month)
    }

    /// Converts a date and time to a [`Time`] without checking time type bounds.
    fn to_time(&self, datetime: &CalendarDateTime) -> Result<Time, TimeError> {
        if datetime.year.unsigned_abs() > YEAR_LIMIT {
            let bound = if datetime.year < 0 { Bound::Left } else { Bound::Right };
            return Err(TimeError::OutOfRange {
                bound,
                message: format!("year {} is out of range", datetime.year),
            });
        }
        if !self.is_valid(datetime.year, datetime.month, datetime.day) {
            return Err(TimeError::InvalidDate {
                calendar: self.name(),
                year: datetime.year,
                month: datetime.month,
                day: datetime.day,
            });
        }
        if !is_valid_time(datetime.hour, datetime.minute, datetime.second) {
            return Err(TimeError::InvalidTime {
                hour: datetime.hour,
                minute: datetime.minute,
                second: datetime.second,
            });
        }
        let julian_day = self.ymd_to_julian_day(datetime.year, datetime.month, datetime.day);
        let seconds = i64::from(datetime.hour) * 3600
            + i64::from(datetime.minute) * 60
            + i64::from(datetime.second);
        Ok(Time::from_julian_day(julian_day, seconds))
    }

    fn from_time(&self, time: Time) -> CalendarDateTime {
        let (year, month, day) = self.julian_day_to_ymd(time.julian_day());
        let (hour, minute, second) = time.time_of_day();
        CalendarDateTime::new(year, month, day, hour, minute, second)
    }

    /// Moves a date by whole months, keeping the day of month.
    fn add_months(&self, datetime: &CalendarDateTime, months: i64) -> CalendarDateTime {
        let per_year = i64::from(self.months_in_year());
        let index = datetime.year * per_year + i64::from(datetime.month) - 1 + months;
        datetime.replace(
            index.div_euclid(per_year),
            (index.rem_euclid(per_year) + 1) as u32,
        )
    }

    /// Like [`add_months`](Self::add_months) but clamps the day to the month length.
    fn add_months_clamped(&self, datetime: &CalendarDateTime, months: i64) -> CalendarDateTime {
        let mut moved = self.add_months(datetime, months);
        moved.day = moved.day.min(self.days_in_month(moved.year, moved.month));
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_months_wraps_years() {
        let date = CalendarDateTime::from_ymd(2010, 11, 15);
        let moved = Gregorian.add_months(&date, 3);
        assert_eq!(moved.to_tuple(), (2011, 2, 15, 0, 0, 0));
        let back = Gregorian.add_months(&date, -11);
        assert_eq!(back.to_tuple(), (2009, 12, 15, 0, 0, 0));
    }

    #[test]
    fn test_add_months_clamped_keeps_date_valid() {
        let date = CalendarDateTime::from_ymd(2010, 1, 31);
        let moved = Gregorian.add_months_clamped(&date, 1);
        assert_eq!(moved.to_tuple(), (2010, 2, 28, 0, 0, 0));
    }

    #[test]
    fn test_add_months_uses_thirteen_month_years() {
        let date = CalendarDateTime::from_ymd(100, 12, 1);
        let moved = Coptic.add_months(&date, 2);
        assert_eq!((moved.year, moved.month), (101, 1));
    }

    #[test]
    fn test_to_time_rejects_bad_time_of_day() {
        let datetime = CalendarDateTime::new(2010, 1, 1, 24, 0, 0);
        assert!(matches!(
            Gregorian.to_time(&datetime),
            Err(TimeError::InvalidTime { hour: 24, .. })
        ));
    }

    #[test]
    fn test_display_pads_fields() {
        let datetime = CalendarDateTime::new(2009, 8, 5, 7, 3, 9);
        assert_eq!(datetime.to_string(), "2009-08-05 07:03:09");
    }
}
