//! Conversion between times and pixel positions.

use crate::period::TimePeriod;
use crate::time::{Time, TimeDelta};

/// Pixel positions are clamped to this distance from the canvas origin so
/// that rect arithmetic on far-off times stays within `i32`.
pub const PIXEL_LIMIT: i32 = 1 << 24;

/// Maps the displayed period onto a canvas of `width x height` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    width: i32,
    height: i32,
    period: TimePeriod,
    divider_position: f64,
}

impl Metrics {
    /// `divider_position` is the divider's fraction of the height, clamped to `[0, 1]`.
    pub fn new(width: i32, height: i32, period: TimePeriod, divider_position: f64) -> Self {
        Self {
            width,
            height,
            period,
            divider_position: divider_position.clamp(0.0, 1.0),
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn period(&self) -> &TimePeriod {
        &self.period
    }

    pub const fn divider_position(&self) -> f64 {
        self.divider_position
    }

    /// Vertical position of the divider line.
    pub fn divider_y(&self) -> i32 {
        (f64::from(self.height) * self.divider_position) as i32
    }

    pub fn calc_exact_x(&self, time: Time) -> f64 {
        f64::from(self.width) * (time - self.period.start()).ratio(self.period.delta())
    }

    /// Rounded pixel position of `time`, clamped to [`PIXEL_LIMIT`].
    pub fn calc_x(&self, time: Time) -> i32 {
        let limit = f64::from(PIXEL_LIMIT);
        self.calc_exact_x(time).round().clamp(-limit, limit) as i32
    }

    pub fn calc_exact_width(&self, period: &TimePeriod) -> f64 {
        self.calc_exact_x(period.end()) - self.calc_exact_x(period.start())
    }

    /// Width in whole pixels. A point in time is one pixel wide.
    pub fn calc_width(&self, period: &TimePeriod) -> i32 {
        let width =
            i64::from(self.calc_x(period.end())) - i64::from(self.calc_x(period.start())) + 1;
        i32::try_from(width).unwrap_or(i32::MAX)
    }

    /// Pixel width a delta of the given length would cover.
    pub fn calc_exact_delta_width(&self, delta: TimeDelta) -> f64 {
        f64::from(self.width) * delta.ratio(self.period.delta())
    }

    /// The time under pixel column `x`.
    pub fn time_at_x(&self, x: i32) -> Time {
        self.period.time_at_percent(f64::from(x) / f64::from(self.width))
    }
}
