//! Drawing a scene onto a target.
//!
//! The drawer only walks a finished [`Scene`]; all layout decisions are made
//! there. Targets receive plain rectangles, lines and text.

use std::collections::HashMap;

use serde::Serialize;

use crate::appearance::{Appearance, DATA_INDICATOR_SIZE, Rgb};
use crate::event::{Category, CategoryId, Event};
use crate::scene::{Rect, Scene};
use crate::view::ViewProperties;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Something a scene can be drawn onto.
pub trait DrawTarget {
    fn fill_rect(&mut self, rect: Rect, fill: Rgb, border: Option<Rgb>);

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb, style: LineStyle);

    /// `(x, y)` is the top left corner of the text.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        fill: Rgb,
        border: Option<Rgb>,
    },
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Rgb,
        style: LineStyle,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Rgb,
    },
}

/// A [`DrawTarget`] that keeps every call, for tests and JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordingTarget {
    pub commands: Vec<DrawCommand>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts drawn so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawTarget for RecordingTarget {
    fn fill_rect(&mut self, rect: Rect, fill: Rgb, border: Option<Rgb>) {
        self.commands.push(DrawCommand::FillRect { rect, fill, border });
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb, style: LineStyle) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            style,
        });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }
}

impl Rgb {
    /// Scales every channel by `factor`.
    #[must_use]
    pub fn darken(self, factor: f64) -> Self {
        let scale = |channel: u8| (f64::from(channel) * factor).clamp(0.0, 255.0) as u8;
        Self(scale(self.0), scale(self.1), scale(self.2))
    }
}

/// Draws strips, the divider line and event boxes.
pub struct DefaultDrawer<'a> {
    appearance: &'a Appearance,
    text_size: &'a dyn Fn(&str) -> (i32, i32),
}

impl<'a> DefaultDrawer<'a> {
    pub fn new(appearance: &'a Appearance, text_size: &'a dyn Fn(&str) -> (i32, i32)) -> Self {
        Self {
            appearance,
            text_size,
        }
    }

    pub fn draw(
        &self,
        target: &mut dyn DrawTarget,
        scene: &Scene,
        view: &ViewProperties,
        categories: &[Category],
    ) {
        let canvas = Rect::new(0, 0, scene.width(), scene.height());
        target.fill_rect(canvas, self.appearance.background_color, None);
        self.draw_minor_strips(target, scene);
        self.draw_major_strips(target, scene);
        target.draw_line(
            (0, scene.divider_y()),
            (scene.width(), scene.divider_y()),
            self.appearance.divider_line_color,
            LineStyle::Solid,
        );
        self.draw_lines_to_point_events(target, scene, view);
        let categories: HashMap<CategoryId, &Category> = categories
            .iter()
            .filter_map(|category| category.id.map(|id| (id, category)))
            .collect();
        for (event, rect) in scene.event_data() {
            self.draw_event(target, event, *rect, view.is_selected(event), &categories);
        }
    }

    fn draw_minor_strips(&self, target: &mut dyn DrawTarget, scene: &Scene) {
        let color = self.appearance.minor_strip_color;
        for strip in scene.minor_strip_data() {
            target.draw_line(
                (strip.x_end, 0),
                (strip.x_end, scene.height()),
                color,
                LineStyle::Dashed,
            );
            let (text_width, text_height) = (self.text_size)(&strip.label);
            let middle = (strip.x_start + strip.x_end) / 2;
            target.draw_text(
                &strip.label,
                middle - text_width / 2,
                scene.divider_y() - text_height,
                self.appearance.text_color,
            );
        }
    }

    fn draw_major_strips(&self, target: &mut dyn DrawTarget, scene: &Scene) {
        let padding = self.appearance.inner_padding;
        for strip in scene.major_strip_data() {
            target.draw_line(
                (strip.x_end, 0),
                (strip.x_end, scene.height()),
                self.appearance.major_strip_color,
                LineStyle::Solid,
            );
            let (text_width, _) = (self.text_size)(&strip.label);
            let mut x = (strip.x_start + strip.x_end) / 2 - text_width / 2;
            // Keep labels of partly visible strips on screen without crossing strip borders.
            if x - padding < 0 {
                x = padding;
                if x + text_width + padding > strip.x_end {
                    x = strip.x_end - text_width - padding;
                }
            } else if x + text_width + padding > scene.width() {
                x = scene.width() - text_width - padding;
                if x < strip.x_start {
                    x = strip.x_start + padding;
                }
            }
            target.draw_text(&strip.label, x, padding, self.appearance.text_color);
        }
    }

    fn draw_lines_to_point_events(
        &self,
        target: &mut dyn DrawTarget,
        scene: &Scene,
        view: &ViewProperties,
    ) {
        let divider_y = scene.divider_y();
        for (event, rect) in scene.event_data() {
            if rect.y >= divider_y {
                continue;
            }
            let x = scene.x_pos_for_time(event.mean_time());
            let color = if view.is_selected(event) {
                self.appearance.selection_color
            } else {
                self.appearance.text_color
            };
            target.draw_line(
                (x, rect.y + rect.height / 2),
                (x, divider_y),
                color,
                LineStyle::Solid,
            );
        }
    }

    fn draw_event(
        &self,
        target: &mut dyn DrawTarget,
        event: &Event,
        rect: Rect,
        selected: bool,
        categories: &HashMap<CategoryId, &Category>,
    ) {
        let category = event.category.and_then(|id| categories.get(&id));
        let base = category.map_or(self.appearance.default_event_color, |c| c.color);
        let text_color = category.map_or(self.appearance.text_color, |c| c.font_color);
        target.fill_rect(rect, base, Some(base.darken(0.7)));

        let padding = self.appearance.inner_padding;
        if rect.width - 2 * padding > 0 {
            let text_x = (rect.x + padding).max(padding);
            target.draw_text(&event.text, text_x, rect.y + padding, text_color);
        }
        if event.has_data() {
            let size = DATA_INDICATOR_SIZE.min(rect.width).min(rect.height);
            let corner = Rect::new(rect.right() - size, rect.y, size, size);
            target.fill_rect(corner, base.darken(0.6), None);
        }
        if selected {
            let frame = rect.deflate(1, 1);
            let color = self.appearance.selection_color;
            let (left, top, right, bottom) = (frame.x, frame.y, frame.right(), frame.bottom());
            for (from, to) in [
                ((left, top), (right, top)),
                ((right, top), (right, bottom)),
                ((right, bottom), (left, bottom)),
                ((left, bottom), (left, top)),
            ] {
                target.draw_line(from, to, color, LineStyle::Solid);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryDb, TimelineDb};
    use crate::period::TimePeriod;
    use crate::scene::approximate_text_size;
    use crate::time::Time;
    use crate::time_type::TimeType;

    fn period(start: i64, end: i64) -> TimePeriod {
        TimePeriod::new(TimeType::Numeric, Time::from_ticks(start), Time::from_ticks(end)).unwrap()
    }

    fn record(db: &MemoryDb, view: &ViewProperties) -> RecordingTarget {
        let appearance = Appearance::default();
        let scene = Scene::create((1000, 400), db, view, &approximate_text_size, &appearance);
        let mut target = RecordingTarget::new();
        DefaultDrawer::new(&appearance, &approximate_text_size).draw(
            &mut target,
            &scene,
            view,
            &db.get_categories(),
        );
        target
    }

    #[test]
    fn test_draws_background_strips_divider_and_events() {
        let mut db = MemoryDb::new(TimeType::Numeric);
        db.save_event(Event::new(period(20, 40), "span")).unwrap();
        db.save_event(Event::new(period(70, 70), "point")).unwrap();
        let view = ViewProperties::new(period(0, 100));
        let target = record(&db, &view);

        assert!(matches!(
            target.commands[0],
            DrawCommand::FillRect {
                rect: Rect {
                    x: 0,
                    y: 0,
                    width: 1000,
                    height: 400
                },
                ..
            }
        ));
        let texts: Vec<&str> = target.texts().collect();
        assert!(texts.contains(&"span"));
        assert!(texts.contains(&"point"));
        assert!(texts.contains(&"50"));
        assert!(target.commands.contains(&DrawCommand::Line {
            from: (0, 200),
            to: (1000, 200),
            color: Rgb::BLACK,
            style: LineStyle::Solid,
        }));
    }

    #[test]
    fn test_category_colors_are_used() {
        let mut db = MemoryDb::new(TimeType::Numeric);
        let mut category = Category::new("work", Rgb(10, 100, 200));
        category.font_color = Rgb::WHITE;
        let id = db.save_category(category).unwrap();
        db.save_event(Event::new(period(20, 40), "span").with_category(id))
            .unwrap();
        let target = record(&db, &ViewProperties::new(period(0, 100)));
        assert!(target.commands.iter().any(|command| matches!(
            command,
            DrawCommand::FillRect {
                fill: Rgb(10, 100, 200),
                border: Some(Rgb(7, 70, 140)),
                ..
            }
        )));
        assert!(target.commands.iter().any(|command| matches!(
            command,
            DrawCommand::Text { text, color: Rgb::WHITE, .. } if text == "span"
        )));
    }

    #[test]
    fn test_selected_events_get_a_frame() {
        let mut db = MemoryDb::new(TimeType::Numeric);
        let id = db.save_event(Event::new(period(20, 40), "span")).unwrap();
        let mut view = ViewProperties::new(period(0, 100));
        let unselected = record(&db, &view).commands.len();
        view.set_selected(id, true);
        assert_eq!(record(&db, &view).commands.len(), unselected + 4);
    }

    #[test]
    fn test_commands_serialize_with_kind_tag() {
        let command = DrawCommand::Text {
            text: "hi".into(),
            x: 1,
            y: 2,
            color: Rgb::BLACK,
        };
        insta::assert_snapshot!(
            serde_json::to_string(&command).unwrap(),
            @r#"{"kind":"text","text":"hi","x":1,"y":2,"color":[0,0,0]}"#
        );
    }
}
