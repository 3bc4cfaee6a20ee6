//! Absolute time ticks and deltas.
//!
//! A [`Time`] is calendar agnostic. Date calendars count one tick per second
//! starting at julian day 0; the numeric time type uses ticks as plain numbers.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Seconds in one day.
pub const SECONDS_IN_DAY: i64 = 24 * 60 * 60;

/// An absolute point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(i64);

impl Time {
    /// Creates a time from raw ticks.
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Creates a time from a julian day and seconds into that day.
    pub const fn from_julian_day(julian_day: i64, seconds: i64) -> Self {
        Self(julian_day * SECONDS_IN_DAY + seconds)
    }

    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// The julian day this time falls on.
    pub const fn julian_day(self) -> i64 {
        self.0.div_euclid(SECONDS_IN_DAY)
    }

    /// Seconds elapsed since midnight.
    pub const fn seconds_of_day(self) -> i64 {
        self.0.rem_euclid(SECONDS_IN_DAY)
    }

    /// Returns `(hour, minute, second)`.
    pub const fn time_of_day(self) -> (u32, u32, u32) {
        let seconds = self.seconds_of_day();
        (
            (seconds / 3600) as u32,
            ((seconds / 60) % 60) as u32,
            (seconds % 60) as u32,
        )
    }

    /// Midnight of the same day.
    pub const fn start_of_day(self) -> Self {
        Self::from_julian_day(self.julian_day(), 0)
    }

    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        self.0.checked_add(delta.0).map(Self)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed distance between two times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeDelta(i64);

impl TimeDelta {
    pub const ZERO: Self = Self(0);

    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Also used by the numeric time type, where one tick is one unit.
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub const fn from_days(days: i64) -> Self {
        Self(days * SECONDS_IN_DAY)
    }

    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// Whole days, truncated toward zero.
    pub const fn whole_days(self) -> i64 {
        self.0 / SECONDS_IN_DAY
    }

    /// Scales by a factor, truncating toward zero.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self((self.0 as f64 * factor) as i64)
    }

    /// Half of this delta, rounded toward negative infinity.
    #[must_use]
    pub const fn half(self) -> Self {
        Self(self.0.div_euclid(2))
    }

    /// How many times `other` fits in this delta.
    pub fn ratio(self, other: Self) -> f64 {
        self.0 as f64 / other.0 as f64
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl Add<TimeDelta> for Time {
    type Output = Self;

    fn add(self, rhs: TimeDelta) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub<TimeDelta> for Time {
    type Output = Self;

    fn sub(self, rhs: TimeDelta) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sub for Time {
    type Output = TimeDelta;

    fn sub(self, rhs: Self) -> TimeDelta {
        TimeDelta(self.0 - rhs.0)
    }
}

impl Add for TimeDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeDelta {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for TimeDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<i64> for TimeDelta {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}
