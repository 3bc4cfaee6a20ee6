//! Validated time periods.
//!
//! A [`TimePeriod`] is never mutated in place. Every operation that changes it
//! returns a new, validated period or an error, so a rejected navigation keeps
//! the previous period intact.

use serde::Serialize;

use crate::error::{Bound, TimeError};
use crate::time::{Time, TimeDelta};
use crate::time_type::TimeType;

/// A span `[start, end]` within the range of its time type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimePeriod {
    time_type: TimeType,
    start: Time,
    end: Time,
}

impl TimePeriod {
    /// Creates a validated period.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when a bound lies outside the time type's range,
    /// `InvalidPeriod` when `start > end`, and `PeriodTooLong` when the span
    /// exceeds the widest zoom.
    pub fn new(time_type: TimeType, start: Time, end: Time) -> Result<Self, TimeError> {
        time_type.check_bounds(start)?;
        time_type.check_bounds(end)?;
        if start > end {
            return Err(TimeError::InvalidPeriod);
        }
        if end - start > time_type.max_zoom_delta() {
            return Err(TimeError::PeriodTooLong {
                message: time_type.max_zoom_message(),
            });
        }
        Ok(Self {
            time_type,
            start,
            end,
        })
    }

    /// A period of `length` whose mean time is `time`.
    pub fn centered(time_type: TimeType, time: Time, length: TimeDelta) -> Result<Self, TimeError> {
        let start = time - length.half();
        Self::new(time_type, start, start + length)
    }

    /// A zero-length period.
    pub fn point(time_type: TimeType, time: Time) -> Result<Self, TimeError> {
        Self::new(time_type, time, time)
    }

    pub const fn time_type(&self) -> TimeType {
        self.time_type
    }

    pub const fn start(&self) -> Time {
        self.start
    }

    pub const fn end(&self) -> Time {
        self.end
    }

    /// Same time type with new bounds, validated like [`new`](Self::new).
    pub fn update(&self, start: Time, end: Time) -> Result<Self, TimeError> {
        Self::new(self.time_type, start, end)
    }

    pub fn delta(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Start plus half the delta.
    pub fn mean_time(&self) -> Time {
        self.start + self.time_type.half_delta(self.delta())
    }

    /// True for periods longer than a single point in time.
    pub fn is_period(&self) -> bool {
        self.start != self.end
    }

    /// Inclusive containment.
    pub fn inside(&self, time: Time) -> bool {
        self.start <= time && time <= self.end
    }

    /// True when the periods share at least one point, borders included.
    pub fn overlap(&self, other: &Self) -> bool {
        !(other.end < self.start || other.start > self.end)
    }

    /// Whether either bound falls somewhere other than midnight.
    pub fn has_nonzero_time(&self) -> bool {
        self.time_type.is_date_time()
            && (self.start.seconds_of_day() != 0 || self.end.seconds_of_day() != 0)
    }

    /// The time at a fraction of the way through the period.
    pub fn time_at_percent(&self, percent: f64) -> Time {
        self.start + self.delta().scale(percent)
    }

    /// Shrinks (positive `ticks`) or grows (negative) the period by a tenth of
    /// its delta per tick on each side.
    pub fn zoom(&self, ticks: i32) -> Result<Self, TimeError> {
        let delta = self.delta().scale(f64::from(ticks) / 10.0);
        let new_delta = self.delta() - delta * 2;
        if new_delta > self.time_type.max_zoom_delta() {
            return Err(TimeError::PeriodTooLong {
                message: self.time_type.max_zoom_message(),
            });
        }
        if new_delta < self.time_type.min_zoom_delta() {
            return Err(TimeError::PeriodTooShort {
                message: self.time_type.min_zoom_message(),
            });
        }
        let start = self.shifted(self.start, delta)?;
        let end = self.shifted(self.end, -delta)?;
        self.update(start, end)
    }

    /// Moves the period a tenth of its delta left (`-1`) or right (`1`).
    ///
    /// Fails instead of clamping when a bound would leave the range, even when
    /// the period already touches that bound.
    pub fn move_by(&self, direction: i32) -> Result<Self, TimeError> {
        self.move_delta(self.delta().scale(f64::from(direction) / 10.0))
    }

    /// Shifts both bounds by `delta`.
    pub fn move_delta(&self, delta: TimeDelta) -> Result<Self, TimeError> {
        let start = self.shifted(self.start, delta)?;
        let end = self.shifted(self.end, delta)?;
        self.update(start, end)
    }

    /// Recenters on `time`, keeping the length.
    ///
    /// Unlike [`move_by`](Self::move_by) this never fails: a period that
    /// would cross a bound is pushed back against it.
    #[must_use]
    pub fn center(&self, time: Time) -> Self {
        let min = self.time_type.min_time();
        let max = self.time_type.max_time();
        let mut delta = time - self.mean_time();
        if self.start + delta < min {
            delta = min - self.start;
        } else if self.end + delta > max {
            delta = max - self.end;
        }
        Self {
            time_type: self.time_type,
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    fn shifted(&self, time: Time, delta: TimeDelta) -> Result<Time, TimeError> {
        let bound = if delta < TimeDelta::ZERO {
            Bound::Left
        } else {
            Bound::Right
        };
        time.checked_add(delta)
            .ok_or_else(|| TimeError::out_of_range(self.time_type, bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarDateTime;

    fn date(year: i64, month: u32, day: u32) -> Time {
        TimeType::Gregorian
            .from_tuple(&CalendarDateTime::from_ymd(year, month, day))
            .unwrap()
    }

    fn period(start: Time, end: Time) -> TimePeriod {
        TimePeriod::new(TimeType::Gregorian, start, end).unwrap()
    }

    fn numeric(start: i64, end: i64) -> TimePeriod {
        TimePeriod::new(TimeType::Numeric, Time::from_ticks(start), Time::from_ticks(end)).unwrap()
    }

    #[test]
    fn test_delta_in_days() {
        let p = period(date(2009, 8, 25), date(2009, 8, 30));
        assert_eq!(p.delta(), TimeDelta::from_days(5));
    }

    #[test]
    fn test_start_after_end_is_invalid() {
        let result = TimePeriod::new(TimeType::Gregorian, date(2010, 1, 2), date(2010, 1, 1));
        assert_eq!(result, Err(TimeError::InvalidPeriod));
    }

    #[test]
    fn test_update_with_same_bounds_is_identity() {
        let p = period(date(2009, 8, 25), date(2009, 8, 30));
        assert_eq!(p.update(p.start(), p.end()).unwrap(), p);
    }

    #[test]
    fn test_too_long_period_is_rejected() {
        let result = TimePeriod::new(TimeType::Numeric, Time::from_ticks(0), Time::from_ticks(1001));
        assert!(matches!(result, Err(TimeError::PeriodTooLong { .. })));
    }

    #[test]
    fn test_overlap_is_inclusive_and_symmetric() {
        let a = numeric(0, 10);
        let b = numeric(10, 20);
        let c = numeric(11, 20);
        assert!(a.overlap(&b));
        assert!(b.overlap(&a));
        assert!(!a.overlap(&c));
        assert!(!c.overlap(&a));
    }

    #[test]
    fn test_mean_time_and_inside() {
        let p = numeric(0, 10);
        assert_eq!(p.mean_time(), Time::from_ticks(5));
        assert!(p.inside(Time::from_ticks(10)));
        assert!(!p.inside(Time::from_ticks(11)));
    }

    #[test]
    fn test_zoom_in_then_out_restores_bounds() {
        let p = period(date(2010, 1, 1), date(2010, 1, 11));
        let zoomed = p.zoom(1).unwrap();
        assert_eq!(zoomed.start(), date(2010, 1, 2));
        assert_eq!(zoomed.end(), date(2010, 1, 10));
        let restored = zoomed.zoom(-1).unwrap();
        let drift = (restored.start() - p.start()).abs();
        assert!(drift <= TimeDelta::from_days(1), "drift was {drift:?}");
        assert!(restored.delta() < p.delta());
    }

    #[test]
    fn test_zoom_limits() {
        let p = numeric(0, 10);
        assert!(matches!(p.zoom(5), Err(TimeError::PeriodTooShort { .. })));
        let wide = numeric(0, 900);
        assert!(matches!(wide.zoom(-1), Err(TimeError::PeriodTooLong { .. })));
    }

    #[test]
    fn test_move_by_tenth() {
        let p = numeric(0, 100);
        assert_eq!(p.move_by(1).unwrap(), numeric(10, 110));
        assert_eq!(p.move_by(-1).unwrap(), numeric(-10, 90));
    }

    #[test]
    fn test_move_by_fails_at_bounds_while_center_clamps() {
        let min = TimeType::Gregorian.min_time();
        let p = period(min, min + TimeDelta::from_days(10));
        assert!(matches!(
            p.move_by(-1),
            Err(TimeError::OutOfRange {
                bound: Bound::Left,
                ..
            })
        ));
        let centered = p.center(min - TimeDelta::from_days(100));
        assert_eq!(centered.start(), min);
        assert_eq!(centered.delta(), p.delta());

        let max = TimeType::Gregorian.max_time();
        let late = p.center(max);
        assert_eq!(late.end(), max);
    }

    #[test]
    fn test_center_keeps_length() {
        let p = numeric(0, 10);
        let centered = p.center(Time::from_ticks(100));
        assert_eq!(centered, numeric(95, 105));
    }

    #[test]
    fn test_has_nonzero_time() {
        assert!(!period(date(2010, 1, 1), date(2010, 1, 2)).has_nonzero_time());
        let noon = date(2010, 1, 1) + TimeDelta::from_seconds(12 * 3600);
        assert!(period(date(2010, 1, 1), noon).has_nonzero_time());
        assert!(!numeric(1, 3).has_nonzero_time());
    }
}
