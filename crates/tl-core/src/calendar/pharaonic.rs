//! Egyptian civil (pharaonic) calendar.
//!
//! 365-day years of twelve 30-day months followed by five epagomenal days.
//! Weeks are 10-day decans counted from the start of each month.

use super::DateCalendar;
use super::arithmetic::{self, EGYPTIAN};

const MONTH_NAMES: [&str; 13] = [
    "Thoth",
    "Phaophi",
    "Athyr",
    "Choiak",
    "Tybi",
    "Mechir",
    "Phamenoth",
    "Pharmuthi",
    "Pachon",
    "Payni",
    "Epiphi",
    "Mesore",
    "Epagomenae",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Pharaonic;

impl DateCalendar for Pharaonic {
    fn name(&self) -> &'static str {
        "pharaonic"
    }

    fn months_in_year(&self) -> u32 {
        13
    }

    fn days_in_month(&self, _year: i64, month: u32) -> u32 {
        if month == 13 { 5 } else { 30 }
    }

    fn ymd_to_julian_day(&self, year: i64, month: u32, day: u32) -> i64 {
        arithmetic::to_julian_day(&EGYPTIAN, year, month, day)
    }

    fn julian_day_to_ymd(&self, julian_day: i64) -> (i64, u32, u32) {
        arithmetic::from_julian_day(&EGYPTIAN, julian_day)
    }

    fn month_name(&self, month: u32) -> &'static str {
        MONTH_NAMES[(month as usize).saturating_sub(1) % 13]
    }

    fn days_in_week(&self) -> u32 {
        10
    }

    fn day_of_week(&self, julian_day: i64) -> u32 {
        let (_, _, day) = self.julian_day_to_ymd(julian_day);
        (day - 1) % 10
    }

    fn weekday_abbreviation(&self, day_of_week: u32) -> String {
        format!("D{}", day_of_week % 10 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarDateTime;
    use crate::error::{Bound, TimeError};

    #[test]
    fn test_year_has_365_days() {
        let start = Pharaonic.ymd_to_julian_day(100, 1, 1);
        let next = Pharaonic.ymd_to_julian_day(101, 1, 1);
        assert_eq!(next - start, 365);
    }

    #[test]
    fn test_rejects_month_fourteen_and_sixth_epagomenal_day() {
        assert!(Pharaonic.to_time(&CalendarDateTime::from_ymd(100, 14, 1)).is_err());
        assert!(Pharaonic.to_time(&CalendarDateTime::from_ymd(100, 13, 6)).is_err());
        assert!(Pharaonic.to_time(&CalendarDateTime::from_ymd(100, 13, 5)).is_ok());
    }

    #[test]
    fn test_decans_restart_each_month() {
        let julian_day = Pharaonic.ymd_to_julian_day(100, 2, 11);
        assert_eq!(Pharaonic.day_of_week(julian_day), 0);
        assert_eq!(Pharaonic.day_of_week(julian_day + 9), 9);
        assert_eq!(Pharaonic.day_of_week(julian_day + 20), 0);
    }

    #[test]
    fn test_huge_years_are_out_of_range() {
        let early = CalendarDateTime::from_ymd(-5_000_000_000_000, 1, 1);
        assert!(matches!(
            Pharaonic.to_time(&early),
            Err(TimeError::OutOfRange {
                bound: Bound::Left,
                ..
            })
        ));
        let limit = CalendarDateTime::from_ymd(1_000_000_000, 13, 5);
        let time = Pharaonic.to_time(&limit).unwrap();
        assert_eq!(Pharaonic.from_time(time), limit);
    }
}
