//! The input state machine behind a timeline canvas.
//!
//! A GUI forwards keyboard and mouse input as [`Input`] values to a
//! [`TimelineController`]. The controller owns the timeline, the view and the
//! current [`InputHandler`] state, and rebuilds the scene whenever it needs to
//! hit-test or snap.

use tracing::debug;

use crate::appearance::Appearance;
use crate::db::{MemoryDb, TimelineDb};
use crate::error::InputError;
use crate::event::EventId;
use crate::navigation::{NavigationContext, NavigationStep};
use crate::period::TimePeriod;
use crate::scene::{Rect, Scene, approximate_text_size};
use crate::time::Time;
use crate::view::ViewProperties;

/// Pixels from a period event's edge that grab the edge instead of the body.
pub const RESIZE_HANDLE_WIDTH: i32 = 5;

/// Which end of a period is being resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

/// One piece of user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Navigate {
        step: NavigationStep,
        target: Option<Time>,
    },
    /// Center the view on a time.
    GoTo(Time),
    /// Mouse wheel zoom, positive zooms in.
    Zoom(i32),
    /// Scroll a tenth of the displayed period, `1` right and `-1` left.
    Scroll(i32),
    /// The canvas changed size.
    Resize { width: i32, height: i32 },
    /// Move the divider line to a fraction of the canvas height.
    SetDivider(f64),
    MouseDown { x: i32, y: i32 },
    MouseMove { x: i32, y: i32 },
    MouseUp,
}

/// What the mouse is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputHandler {
    NoOp,
    MoveByDrag {
        event: EventId,
        /// The event's period when the drag started.
        original: TimePeriod,
        drag_start: Time,
    },
    Resize {
        event: EventId,
        edge: Edge,
    },
}

/// Owns a timeline and its view and applies [`Input`] to them.
#[derive(Debug, Clone)]
pub struct TimelineController {
    db: MemoryDb,
    view: ViewProperties,
    size: (i32, i32),
    appearance: Appearance,
    handler: InputHandler,
}

impl TimelineController {
    pub fn new(
        db: MemoryDb,
        view: ViewProperties,
        size: (i32, i32),
        appearance: Appearance,
    ) -> Self {
        Self {
            db,
            view,
            size,
            appearance,
            handler: InputHandler::NoOp,
        }
    }

    pub const fn db(&self) -> &MemoryDb {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut MemoryDb {
        &mut self.db
    }

    pub const fn view(&self) -> &ViewProperties {
        &self.view
    }

    pub const fn displayed_period(&self) -> TimePeriod {
        self.view.displayed_period
    }

    pub const fn size(&self) -> (i32, i32) {
        self.size
    }

    pub const fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub const fn handler(&self) -> InputHandler {
        self.handler
    }

    /// Lays out the current view.
    pub fn scene(&self) -> Scene {
        Scene::create(
            self.size,
            &self.db,
            &self.view,
            &approximate_text_size,
            &self.appearance,
        )
    }

    /// Applies one input.
    ///
    /// # Errors
    ///
    /// Returns the reason a navigation, zoom or edit was refused. The view and
    /// the timeline are left exactly as they were.
    pub fn handle(&mut self, input: Input) -> Result<(), InputError> {
        let result = self.dispatch(input);
        if let Err(error) = &result {
            debug!(?input, %error, "input rejected");
        }
        result
    }

    fn dispatch(&mut self, input: Input) -> Result<(), InputError> {
        let period = self.view.displayed_period;
        match input {
            Input::Navigate { step, target } => {
                let time_type = period.time_type();
                let mut context = NavigationContext::new(time_type.now(), self.appearance.week_start);
                if let Some(target) = target {
                    context = context.with_target(target);
                }
                match step.apply(&period, &context)? {
                    Some(new_period) => self.view.displayed_period = new_period,
                    None => debug!(step = step.name(), "date does not exist, view unchanged"),
                }
            }
            Input::GoTo(time) => self.view.displayed_period = period.center(time),
            Input::Zoom(ticks) => self.view.displayed_period = period.zoom(ticks)?,
            Input::Scroll(direction) => self.view.displayed_period = period.move_by(direction)?,
            Input::Resize { width, height } => self.size = (width, height),
            Input::SetDivider(position) => self.view.divider_position = position.clamp(0.0, 1.0),
            Input::MouseDown { x, y } => self.mouse_down(x, y),
            Input::MouseMove { x, .. } => self.mouse_moved(x)?,
            Input::MouseUp => self.handler = InputHandler::NoOp,
        }
        Ok(())
    }

    fn mouse_down(&mut self, x: i32, y: i32) {
        let scene = self.scene();
        let Some((event, rect)) = scene.event_with_rect_at(x, y) else {
            self.view.clear_selected();
            self.handler = InputHandler::NoOp;
            return;
        };
        let Some(id) = event.id else {
            return;
        };
        self.view.clear_selected();
        self.view.set_selected(id, true);
        if event.locked {
            debug!(%id, "event is locked");
            self.handler = InputHandler::NoOp;
            return;
        }
        self.handler = match resize_edge(&scene, &event.time_period, rect, x) {
            Some(edge) => InputHandler::Resize { event: id, edge },
            None => InputHandler::MoveByDrag {
                event: id,
                original: event.time_period,
                drag_start: scene.time_at_x(x),
            },
        };
        debug!(%id, handler = ?self.handler, "mouse down on event");
    }

    fn mouse_moved(&mut self, x: i32) -> Result<(), InputError> {
        let scene = self.scene();
        let (id, period) = match self.handler {
            InputHandler::NoOp => return Ok(()),
            InputHandler::MoveByDrag {
                event,
                original,
                drag_start,
            } => {
                let moved = original.move_delta(scene.time_at_x(x) - drag_start)?;
                let period = if scene.is_period_event(&moved) {
                    snap_moved(&scene, &moved)?
                } else {
                    moved
                };
                (event, period)
            }
            InputHandler::Resize { event, edge } => {
                let current = self.db.get_event(event)?.time_period;
                let time = scene.snap(scene.time_at_x(x));
                let period = match edge {
                    Edge::Left => current.update(time.min(current.end()), current.end())?,
                    Edge::Right => current.update(current.start(), time.max(current.start()))?,
                };
                (event, period)
            }
        };
        let mut event = self.db.get_event(id)?;
        if event.locked {
            return Ok(());
        }
        event.time_period = period;
        self.db.save_event(event)?;
        Ok(())
    }
}

fn resize_edge(scene: &Scene, period: &TimePeriod, rect: &Rect, x: i32) -> Option<Edge> {
    if !scene.is_period_event(period) {
        return None;
    }
    if (x - rect.x).abs() <= RESIZE_HANDLE_WIDTH {
        Some(Edge::Left)
    } else if (rect.right() - x).abs() <= RESIZE_HANDLE_WIDTH {
        Some(Edge::Right)
    } else {
        None
    }
}

/// Snaps a dragged period, keeping its length. The start edge wins.
fn snap_moved(scene: &Scene, period: &TimePeriod) -> Result<TimePeriod, InputError> {
    let (start, end) = (period.start(), period.end());
    let length = period.delta();
    let snapped_start = scene.snap(start);
    let snapped_end = scene.snap(end);
    let snapped = if snapped_start != start {
        period.update(snapped_start, snapped_start + length)?
    } else if snapped_end != end {
        period.update(snapped_end - length, snapped_end)?
    } else {
        *period
    };
    Ok(snapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeError;
    use crate::event::Event;
    use crate::time_type::TimeType;

    fn period(start: i64, end: i64) -> TimePeriod {
        TimePeriod::new(TimeType::Numeric, Time::from_ticks(start), Time::from_ticks(end)).unwrap()
    }

    /// Ticks 0..1000 on 1000 pixels: one pixel per tick, minor strips every 100.
    fn controller(events: Vec<Event>) -> (TimelineController, Vec<EventId>) {
        let mut db = MemoryDb::new(TimeType::Numeric);
        let ids = events
            .into_iter()
            .map(|event| db.save_event(event).unwrap())
            .collect();
        let view = ViewProperties::new(period(0, 1000));
        let controller = TimelineController::new(db, view, (1000, 400), Appearance::default());
        (controller, ids)
    }

    fn rect_of(controller: &TimelineController, id: EventId) -> Rect {
        controller.scene().event_rect(id).unwrap()
    }

    fn period_of(controller: &TimelineController, id: EventId) -> (i64, i64) {
        let period = controller.db().get_event(id).unwrap().time_period;
        (period.start().ticks(), period.end().ticks())
    }

    #[test]
    fn test_drag_moves_and_snaps_start() {
        let (mut controller, ids) = controller(vec![Event::new(period(200, 400), "span")]);
        let rect = rect_of(&controller, ids[0]);
        let y = rect.y + rect.height / 2;

        controller.handle(Input::MouseDown { x: 300, y }).unwrap();
        assert!(matches!(controller.handler(), InputHandler::MoveByDrag { .. }));
        assert!(controller.view().selected_event_ids.contains(&ids[0]));

        controller.handle(Input::MouseMove { x: 395, y }).unwrap();
        assert_eq!(period_of(&controller, ids[0]), (300, 500));

        controller.handle(Input::MouseUp).unwrap();
        assert_eq!(controller.handler(), InputHandler::NoOp);
        controller.handle(Input::MouseMove { x: 900, y }).unwrap();
        assert_eq!(period_of(&controller, ids[0]), (300, 500));
    }

    #[test]
    fn test_resize_left_edge_snaps_and_stops_at_end() {
        let (mut controller, ids) = controller(vec![Event::new(period(200, 400), "span")]);
        let rect = rect_of(&controller, ids[0]);
        let y = rect.y + rect.height / 2;

        controller.handle(Input::MouseDown { x: rect.x + 1, y }).unwrap();
        assert_eq!(
            controller.handler(),
            InputHandler::Resize {
                event: ids[0],
                edge: Edge::Left
            }
        );
        controller.handle(Input::MouseMove { x: 150, y }).unwrap();
        assert_eq!(period_of(&controller, ids[0]), (150, 400));
        controller.handle(Input::MouseMove { x: 104, y }).unwrap();
        assert_eq!(period_of(&controller, ids[0]), (100, 400));
        controller.handle(Input::MouseMove { x: 600, y }).unwrap();
        assert_eq!(period_of(&controller, ids[0]), (400, 400));
    }

    #[test]
    fn test_resize_right_edge() {
        let (mut controller, ids) = controller(vec![Event::new(period(200, 400), "span")]);
        let rect = rect_of(&controller, ids[0]);
        let y = rect.y + rect.height / 2;

        controller.handle(Input::MouseDown { x: rect.right() - 1, y }).unwrap();
        controller.handle(Input::MouseMove { x: 505, y }).unwrap();
        assert_eq!(period_of(&controller, ids[0]), (200, 500));
        controller.handle(Input::MouseMove { x: 50, y }).unwrap();
        assert_eq!(period_of(&controller, ids[0]), (200, 200));
    }

    #[test]
    fn test_locked_events_do_not_move() {
        let (mut controller, ids) =
            controller(vec![Event::new(period(200, 400), "fixed").locked()]);
        let rect = rect_of(&controller, ids[0]);
        let y = rect.y + rect.height / 2;

        controller.handle(Input::MouseDown { x: 300, y }).unwrap();
        assert_eq!(controller.handler(), InputHandler::NoOp);
        controller.handle(Input::MouseMove { x: 350, y }).unwrap();
        assert_eq!(period_of(&controller, ids[0]), (200, 400));
    }

    #[test]
    fn test_mouse_down_on_empty_space_clears_selection() {
        let (mut controller, ids) = controller(vec![Event::new(period(200, 400), "span")]);
        let rect = rect_of(&controller, ids[0]);
        controller
            .handle(Input::MouseDown {
                x: 300,
                y: rect.y + 1,
            })
            .unwrap();
        controller.handle(Input::MouseUp).unwrap();
        controller.handle(Input::MouseDown { x: 300, y: 5 }).unwrap();
        assert!(controller.view().selected_event_ids.is_empty());
        assert_eq!(controller.handler(), InputHandler::NoOp);
    }

    #[test]
    fn test_view_commands() {
        let (mut controller, _) = controller(Vec::new());
        controller.handle(Input::Zoom(1)).unwrap();
        assert_eq!(controller.displayed_period(), period(100, 900));
        controller.handle(Input::Scroll(-1)).unwrap();
        assert_eq!(controller.displayed_period(), period(20, 820));
        controller.handle(Input::GoTo(Time::from_ticks(5000))).unwrap();
        assert_eq!(controller.displayed_period(), period(4600, 5400));
        controller
            .handle(Input::Navigate {
                step: NavigationStep::Forward,
                target: None,
            })
            .unwrap();
        assert_eq!(controller.displayed_period(), period(5400, 6200));
        controller.handle(Input::SetDivider(1.5)).unwrap();
        assert!((controller.view().divider_position - 1.0).abs() < f64::EPSILON);
        controller.handle(Input::Resize { width: 800, height: 300 }).unwrap();
        assert_eq!(controller.size(), (800, 300));
    }

    #[test]
    fn test_rejected_input_leaves_view_unchanged() {
        let (mut controller, _) = controller(Vec::new());
        let result = controller.handle(Input::Zoom(-1));
        assert!(matches!(
            result,
            Err(InputError::Time(TimeError::PeriodTooLong { .. }))
        ));
        assert_eq!(controller.displayed_period(), period(0, 1000));

        let result = controller.handle(Input::Navigate {
            step: NavigationStep::GoToDate,
            target: None,
        });
        assert_eq!(result, Err(InputError::Time(TimeError::MissingTarget)));
        assert_eq!(controller.displayed_period(), period(0, 1000));
    }
}
