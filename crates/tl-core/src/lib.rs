//! Core logic for the timeline viewer.
//!
//! This crate contains:
//! - Calendars and time types: absolute [`Time`] ticks and their date
//!   breakdown in the Gregorian, Coptic, Pharaonic and Bosparanian calendars,
//!   plus a plain numeric axis
//! - Periods and navigation: validated [`TimePeriod`] arithmetic, zoom, paging
//!   and fit steps
//! - Layout: strips, the [`Scene`] placing events on a canvas, snapping and the
//!   [`DefaultDrawer`]
//! - Input: the [`TimelineController`] state machine for mouse and command input

pub mod appearance;
pub mod calendar;
pub mod db;
pub mod drawer;
pub mod error;
pub mod event;
pub mod input;
pub mod metrics;
pub mod navigation;
pub mod period;
pub mod scene;
mod snap;
pub mod strip;
pub mod time;
pub mod time_type;
pub mod view;

pub use appearance::{Appearance, Rgb, WeekStart};
pub use calendar::{CalendarDateTime, DateCalendar};
pub use db::{MemoryDb, TimelineDb};
pub use drawer::{DefaultDrawer, DrawCommand, DrawTarget, LineStyle, RecordingTarget};
pub use error::{Bound, DbError, InputError, TimeError};
pub use event::{Category, CategoryId, Event, EventId};
pub use input::{Edge, Input, InputHandler, TimelineController};
pub use metrics::{Metrics, PIXEL_LIMIT};
pub use navigation::{DuplicateUnit, NavigationContext, NavigationEntry, NavigationStep};
pub use period::TimePeriod;
pub use scene::{Rect, Scene, StripData, approximate_text_size};
pub use snap::SNAP_REGION;
pub use strip::{Strip, StripUnit};
pub use time::{Time, TimeDelta};
pub use time_type::TimeType;
pub use view::ViewProperties;
