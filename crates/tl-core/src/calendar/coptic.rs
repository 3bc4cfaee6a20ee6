//! Coptic calendar: twelve 30-day months and a short thirteenth month.

use super::DateCalendar;
use super::arithmetic::{self, COPTIC};

const MONTH_NAMES: [&str; 13] = [
    "Thout", "Paopi", "Hathor", "Koiak", "Tobi", "Meshir", "Paremhat", "Parmouti", "Pashons",
    "Paoni", "Epip", "Mesori", "Nasie",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Coptic;

pub const fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 3
}

impl DateCalendar for Coptic {
    fn name(&self) -> &'static str {
        "coptic"
    }

    fn months_in_year(&self) -> u32 {
        13
    }

    fn days_in_month(&self, year: i64, month: u32) -> u32 {
        match month {
            13 if is_leap_year(year) => 6,
            13 => 5,
            _ => 30,
        }
    }

    fn ymd_to_julian_day(&self, year: i64, month: u32, day: u32) -> i64 {
        arithmetic::to_julian_day(&COPTIC, year, month, day)
    }

    fn julian_day_to_ymd(&self, julian_day: i64) -> (i64, u32, u32) {
        arithmetic::from_julian_day(&COPTIC, julian_day)
    }

    fn month_name(&self, month: u32) -> &'static str {
        MONTH_NAMES[(month as usize).saturating_sub(1) % 13]
    }
}
