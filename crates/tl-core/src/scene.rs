//! Layout engine.
//!
//! A [`Scene`] is computed from scratch for every draw: it places the visible
//! events as rectangles around the divider line and computes the major and
//! minor strips for the displayed period. Degenerate canvases and periods
//! produce an empty scene instead of an error.

use serde::Serialize;
use tracing::{debug, warn};

use crate::appearance::{Appearance, DATA_INDICATOR_SIZE};
use crate::db::TimelineDb;
use crate::event::{Event, EventId};
use crate::metrics::{Metrics, PIXEL_LIMIT};
use crate::period::TimePeriod;
use crate::strip::Strip;
use crate::time::{Time, TimeDelta};
use crate::view::ViewProperties;

/// Rects are trimmed to stay within this many pixels outside the canvas.
const OFF_SCREEN_MARGIN: i32 = 10;

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Edges are inclusive on the left and top, exclusive on the right and bottom.
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True when the rects share a non-empty area.
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Height of the shared area, zero when the rects don't intersect.
    pub fn intersection_height(&self, other: &Self) -> i32 {
        if self.intersects(other) {
            self.bottom().min(other.bottom()) - self.y.max(other.y)
        } else {
            0
        }
    }

    /// Shrinks the rect by `dx` on the left and right and `dy` on the top and bottom.
    #[must_use]
    pub const fn deflate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x + dx,
            self.y + dy,
            self.width - 2 * dx,
            self.height - 2 * dy,
        )
    }
}

/// One band of a strip, with its pixel extent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripData {
    pub start: Time,
    pub end: Time,
    pub label: String,
    pub x_start: i32,
    pub x_end: i32,
}

/// A rough text measurement for callers without a font engine: 7 pixels per
/// character and a 12 pixel line.
pub fn approximate_text_size(text: &str) -> (i32, i32) {
    let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX / 7);
    (chars * 7, 12)
}

/// The laid out content of one canvas.
#[derive(Debug, Clone)]
pub struct Scene {
    metrics: Metrics,
    appearance: Appearance,
    event_data: Vec<(Event, Rect)>,
    major_strip: Option<Strip>,
    minor_strip: Option<Strip>,
    major_strip_data: Vec<StripData>,
    minor_strip_data: Vec<StripData>,
    hidden_event_count: usize,
}

impl Scene {
    /// Lays out the events of `db` in `view` on a canvas of `(width, height)`.
    ///
    /// `text_size` measures a label as `(width, height)` in pixels.
    pub fn create(
        size: (i32, i32),
        db: &dyn TimelineDb,
        view: &ViewProperties,
        text_size: &dyn Fn(&str) -> (i32, i32),
        appearance: &Appearance,
    ) -> Self {
        let (width, height) = size;
        let period = view.displayed_period;
        let mut scene = Self {
            metrics: Metrics::new(width, height, period, view.divider_position),
            appearance: appearance.clone(),
            event_data: Vec::new(),
            major_strip: None,
            minor_strip: None,
            major_strip_data: Vec::new(),
            minor_strip_data: Vec::new(),
            hidden_event_count: 0,
        };
        if width <= 0 || height <= 0 || period.delta() <= TimeDelta::ZERO {
            debug!(width, height, "empty scene");
            return scene;
        }

        let events = db.get_events(&period);
        let (visible, hidden) = view.filter_events(events, &db.get_categories());
        scene.hidden_event_count = hidden;
        scene.calc_rects(visible, text_size);
        scene.calc_strips(period);
        debug!(
            placed = scene.event_data.len(),
            hidden = scene.hidden_event_count,
            minor_strips = scene.minor_strip_data.len(),
            "created scene"
        );
        scene
    }

    fn calc_rects(&mut self, events: Vec<Event>, text_size: &dyn Fn(&str) -> (i32, i32)) {
        for event in events {
            let as_period = self.display_as_period(&event);
            let mut rect = self.ideal_rect(&event, as_period, text_size);
            self.trim_far_outside_screen(&mut rect);
            self.prevent_overlap(&mut rect, if as_period { 1 } else { -1 });
            if rect.y < 0 || rect.bottom() > self.metrics.height() {
                warn!(id = ?event.id, text = %event.text, "no room for event");
                self.hidden_event_count += 1;
                continue;
            }
            self.event_data.push((event, rect));
        }
        let padding = self.appearance.outer_padding;
        for (_, rect) in &mut self.event_data {
            *rect = rect.deflate(padding, padding);
        }
    }

    fn display_as_period(&self, event: &Event) -> bool {
        self.is_period_event(&event.time_period)
    }

    fn ideal_rect(
        &self,
        event: &Event,
        as_period: bool,
        text_size: &dyn Fn(&str) -> (i32, i32),
    ) -> Rect {
        let Appearance {
            outer_padding: outer,
            inner_padding: inner,
            baseline_padding: baseline,
            ..
        } = self.appearance;
        let divider_y = self.metrics.divider_y();
        let (text_width, text_height) = text_size(&event.text);
        let height = text_height.saturating_add(2 * (inner + outer)).min(PIXEL_LIMIT);
        if as_period {
            let x = self.metrics.calc_x(event.time_period.start()) - outer;
            let width = self.metrics.calc_width(&event.time_period).saturating_add(2 * outer);
            return Rect::new(x, divider_y + baseline, width, height);
        }
        let mut width = text_width.saturating_add(2 * (inner + outer));
        if event.has_data() {
            width = width.saturating_add(DATA_INDICATOR_SIZE / 3);
        }
        let width = width.min(PIXEL_LIMIT);
        let x = if self.appearance.draw_period_events_to_right && event.is_period() {
            self.metrics.calc_x(event.time_period.start())
        } else {
            self.metrics.calc_x(event.mean_time()) - width / 2
        };
        Rect::new(x, divider_y - height - baseline, width, height)
    }

    /// Large coordinates break some drawing backends, so keep rects close to the canvas.
    fn trim_far_outside_screen(&self, rect: &mut Rect) {
        if rect.x < -OFF_SCREEN_MARGIN {
            let beyond = -rect.x - OFF_SCREEN_MARGIN;
            rect.x += beyond;
            rect.width -= beyond;
        }
        let limit = self.metrics.width() + OFF_SCREEN_MARGIN;
        if rect.right() > limit {
            rect.width -= rect.right() - limit;
        }
    }

    /// Moves `rect` away from the divider until it overlaps nothing placed so far.
    fn prevent_overlap(&self, rect: &mut Rect, direction: i32) {
        loop {
            let height = self
                .event_data
                .iter()
                .map(|(_, placed)| rect.intersection_height(placed))
                .find(|height| *height > 0)
                .unwrap_or(0);
            if height == 0 {
                break;
            }
            rect.y += direction * height;
            if rect.y > self.metrics.height() || rect.bottom() < 0 {
                break;
            }
        }
    }

    fn calc_strips(&mut self, period: TimePeriod) {
        let (major, minor) = period
            .time_type()
            .choose_strip(&self.metrics, self.appearance.week_start);
        self.major_strip_data = self.fill_strip(&major, period, true);
        self.minor_strip_data = self.fill_strip(&minor, period, false);
        self.major_strip = Some(major);
        self.minor_strip = Some(minor);
    }

    fn fill_strip(&self, strip: &Strip, period: TimePeriod, major: bool) -> Vec<StripData> {
        let mut data = Vec::new();
        let mut start = strip.start(period.start());
        while start < period.end() {
            let end = strip.increment(start);
            if end <= start {
                break;
            }
            data.push(StripData {
                start,
                end,
                label: strip.label(start, major),
                x_start: self.metrics.calc_x(start),
                x_end: self.metrics.calc_x(end),
            });
            start = end;
        }
        data
    }

    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub const fn width(&self) -> i32 {
        self.metrics.width()
    }

    pub const fn height(&self) -> i32 {
        self.metrics.height()
    }

    pub fn divider_y(&self) -> i32 {
        self.metrics.divider_y()
    }

    /// Placed events with their rects, in placement order.
    pub fn event_data(&self) -> &[(Event, Rect)] {
        &self.event_data
    }

    pub const fn major_strip(&self) -> Option<&Strip> {
        self.major_strip.as_ref()
    }

    pub const fn minor_strip(&self) -> Option<&Strip> {
        self.minor_strip.as_ref()
    }

    pub fn major_strip_data(&self) -> &[StripData] {
        &self.major_strip_data
    }

    pub fn minor_strip_data(&self) -> &[StripData] {
        &self.minor_strip_data
    }

    /// Events that are not drawn, either filtered out by category or without room.
    pub const fn hidden_event_count(&self) -> usize {
        self.hidden_event_count
    }

    pub fn x_pos_for_time(&self, time: Time) -> i32 {
        self.metrics.calc_x(time)
    }

    pub fn time_at_x(&self, x: i32) -> Time {
        self.metrics.time_at_x(x)
    }

    /// Exact pixel distance between two times.
    pub fn distance_between_times(&self, a: Time, b: Time) -> f64 {
        (self.metrics.calc_exact_x(a) - self.metrics.calc_exact_x(b)).abs()
    }

    pub fn width_of_period(&self, period: &TimePeriod) -> i32 {
        self.metrics.calc_width(period)
    }

    /// Whether a period is drawn below the divider rather than as a point event.
    pub fn is_period_event(&self, period: &TimePeriod) -> bool {
        if !period.is_period() {
            return false;
        }
        self.appearance.never_show_period_events_as_point_events
            || self.metrics.calc_width(period) > self.appearance.period_threshold
    }

    pub fn event_at(&self, x: i32, y: i32) -> Option<&Event> {
        self.event_with_rect_at(x, y).map(|(event, _)| event)
    }

    pub fn event_with_rect_at(&self, x: i32, y: i32) -> Option<(&Event, &Rect)> {
        self.event_data
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(event, rect)| (event, rect))
    }

    pub fn event_rect(&self, id: EventId) -> Option<Rect> {
        self.event_data
            .iter()
            .find(|(event, _)| event.id == Some(id))
            .map(|(_, rect)| *rect)
    }
}
