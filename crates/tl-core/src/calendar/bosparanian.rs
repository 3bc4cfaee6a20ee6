//! Bosparanian calendar of the Aventurian game world.
//!
//! Twelve 30-day months followed by five nameless days, no leap years. Years
//! are counted from the fall of Bosparan (BF).

use super::DateCalendar;

const MONTH_NAMES: [&str; 13] = [
    "Praios",
    "Rondra",
    "Efferd",
    "Travia",
    "Boron",
    "Hesinde",
    "Firun",
    "Tsa",
    "Phex",
    "Peraine",
    "Ingerimm",
    "Rahja",
    "Nameless Days",
];

const WEEKDAYS: [&str; 7] = ["Win", "Ear", "Mar", "Pra", "Roh", "Fir", "Wat"];

/// Julian day offset of year 0, shifted by three days so weeks line up.
const EPOCH_OFFSET: i64 = 365 * 100 * 73 - 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct Bosparanian;

impl DateCalendar for Bosparanian {
    fn name(&self) -> &'static str {
        "bosparanian"
    }

    fn months_in_year(&self) -> u32 {
        13
    }

    fn days_in_month(&self, _year: i64, month: u32) -> u32 {
        if month == 13 { 5 } else { 30 }
    }

    fn ymd_to_julian_day(&self, year: i64, month: u32, day: u32) -> i64 {
        year * 365 + i64::from(month - 1) * 30 + i64::from(day) - 1 + EPOCH_OFFSET
    }

    fn julian_day_to_ymd(&self, julian_day: i64) -> (i64, u32, u32) {
        let bosparanian_day = julian_day - EPOCH_OFFSET;
        let year = bosparanian_day.div_euclid(365);
        let day_of_year = bosparanian_day.rem_euclid(365);
        if day_of_year >= 360 {
            return (year, 13, (day_of_year - 359) as u32);
        }
        (year, (day_of_year / 30 + 1) as u32, (day_of_year % 30 + 1) as u32)
    }

    fn month_name(&self, month: u32) -> &'static str {
        MONTH_NAMES[(month as usize).saturating_sub(1) % 13]
    }

    fn month_abbreviation(&self, month: u32) -> &'static str {
        if month == 13 {
            "NL"
        } else {
            let name = self.month_name(month);
            name.get(..3).unwrap_or(name)
        }
    }

    fn weekday_abbreviation(&self, day_of_week: u32) -> String {
        WEEKDAYS[day_of_week as usize % 7].to_string()
    }

    fn format_year(&self, year: i64) -> String {
        format!("{year} BF")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarDateTime;
    use crate::error::{Bound, TimeError};

    #[test]
    fn test_round_trip_full_year() {
        for month in 1..=13 {
            for day in 1..=Bosparanian.days_in_month(1000, month) {
                let julian_day = Bosparanian.ymd_to_julian_day(1000, month, day);
                assert_eq!(Bosparanian.julian_day_to_ymd(julian_day), (1000, month, day));
            }
        }
    }

    #[test]
    fn test_nameless_days_end_the_year() {
        let last = Bosparanian.ymd_to_julian_day(1000, 13, 5);
        assert_eq!(Bosparanian.julian_day_to_ymd(last + 1), (1001, 1, 1));
    }

    #[test]
    fn test_short_month_abbreviation() {
        assert_eq!(Bosparanian.month_abbreviation(1), "Pra");
        assert_eq!(Bosparanian.month_abbreviation(13), "NL");
    }

    #[test]
    fn test_huge_years_are_out_of_range() {
        let far = CalendarDateTime::from_ymd(i64::MAX, 13, 5);
        assert!(matches!(
            Bosparanian.to_time(&far),
            Err(TimeError::OutOfRange {
                bound: Bound::Right,
                ..
            })
        ));
        let limit = CalendarDateTime::from_ymd(1_000_000_000, 1, 1);
        let time = Bosparanian.to_time(&limit).unwrap();
        assert_eq!(Bosparanian.from_time(time), limit);
    }
}
