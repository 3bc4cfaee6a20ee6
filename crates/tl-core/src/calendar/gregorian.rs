//! Proleptic Gregorian calendar.

use super::DateCalendar;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

pub const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 400 == 0 || year % 100 != 0)
}

pub const fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Converts a Gregorian date to a julian day number.
///
/// Uses floor division throughout so dates before the julian day epoch still
/// convert consistently.
pub const fn ymd_to_julian_day(year: i64, month: u32, day: u32) -> i64 {
    let month = month as i64;
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day as i64 + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

pub const fn julian_day_to_ymd(julian_day: i64) -> (i64, u32, u32) {
    let a = julian_day + 32044;
    let b = (4 * a + 3).div_euclid(146_097);
    let c = a - (146_097 * b).div_euclid(4);
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2).div_euclid(153);
    let day = e - (153 * m + 2).div_euclid(5) + 1;
    let month = m + 3 - 12 * m.div_euclid(10);
    let year = 100 * b + d - 4800 + m.div_euclid(10);
    (year, month as u32, day as u32)
}

fn monday_of_week_one(year: i64) -> i64 {
    let jan_4 = ymd_to_julian_day(year, 1, 4);
    jan_4 - jan_4.rem_euclid(7)
}

/// ISO 8601 week number of the given julian day.
pub fn week_number(julian_day: i64) -> u32 {
    let (year, _, _) = julian_day_to_ymd(julian_day);
    [year + 1, year, year - 1]
        .into_iter()
        .map(|y| julian_day - monday_of_week_one(y))
        .find(|diff| *diff >= 0)
        .map_or(1, |diff| (diff / 7 + 1) as u32)
}

impl DateCalendar for Gregorian {
    fn name(&self) -> &'static str {
        "gregorian"
    }

    fn months_in_year(&self) -> u32 {
        12
    }

    fn days_in_month(&self, year: i64, month: u32) -> u32 {
        days_in_month(year, month)
    }

    fn ymd_to_julian_day(&self, year: i64, month: u32, day: u32) -> i64 {
        ymd_to_julian_day(year, month, day)
    }

    fn julian_day_to_ymd(&self, julian_day: i64) -> (i64, u32, u32) {
        julian_day_to_ymd(julian_day)
    }

    fn month_name(&self, month: u32) -> &'static str {
        MONTH_NAMES[(month as usize).saturating_sub(1) % 12]
    }

    fn format_year(&self, year: i64) -> String {
        if year <= 0 {
            format!("{} BC", 1 - year)
        } else {
            year.to_string()
        }
    }
}
