//! Appearance and layout settings.
//!
//! An [`Appearance`] is handed to the scene and the drawer by reference; there
//! is no global configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Space between event boxes.
pub const OUTER_PADDING: i32 = 5;
/// Space inside an event box around its text.
pub const INNER_PADDING: i32 = 3;
/// Extra space between events and the divider line.
pub const BASELINE_PADDING: i32 = 15;
/// Periods narrower than this many pixels are drawn as point events.
pub const PERIOD_THRESHOLD: i32 = 20;
/// Size of the marker shown on events carrying extra data.
pub const DATA_INDICATOR_SIZE: i32 = 10;

/// First day of a seven-day week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0, 0, 0);
    pub const WHITE: Self = Self(255, 255, 255);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colors, paddings and flags consumed by layout and drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub week_start: WeekStart,
    pub outer_padding: i32,
    pub inner_padding: i32,
    pub baseline_padding: i32,
    pub period_threshold: i32,
    /// Draw every period as a period, however narrow it is on screen.
    pub never_show_period_events_as_point_events: bool,
    /// Anchor periods shown as point events at their start instead of centering them.
    pub draw_period_events_to_right: bool,
    pub default_event_color: Rgb,
    pub text_color: Rgb,
    pub background_color: Rgb,
    pub divider_line_color: Rgb,
    pub minor_strip_color: Rgb,
    pub major_strip_color: Rgb,
    pub selection_color: Rgb,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            outer_padding: OUTER_PADDING,
            inner_padding: INNER_PADDING,
            baseline_padding: BASELINE_PADDING,
            period_threshold: PERIOD_THRESHOLD,
            never_show_period_events_as_point_events: false,
            draw_period_events_to_right: false,
            default_event_color: Rgb(200, 200, 200),
            text_color: Rgb::BLACK,
            background_color: Rgb::WHITE,
            divider_line_color: Rgb::BLACK,
            minor_strip_color: Rgb(200, 200, 200),
            major_strip_color: Rgb(200, 200, 200),
            selection_color: Rgb(0, 0, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let appearance: Appearance =
            serde_json::from_str(r#"{"week_start": "sunday", "outer_padding": 2}"#).unwrap();
        assert_eq!(appearance.week_start, WeekStart::Sunday);
        assert_eq!(appearance.outer_padding, 2);
        assert_eq!(appearance.inner_padding, INNER_PADDING);
        assert_eq!(appearance.default_event_color, Rgb(200, 200, 200));
    }

    #[test]
    fn test_rgb_display_is_hex() {
        assert_eq!(Rgb(255, 128, 0).to_string(), "#ff8000");
    }
}
