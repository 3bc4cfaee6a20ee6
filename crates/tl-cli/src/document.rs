//! JSON timeline documents.
//!
//! A document lists categories and events with times written as strings in
//! the document's calendar:
//!
//! ```json
//! {
//!   "calendar": "gregorian",
//!   "categories": [{ "name": "work", "color": [10, 100, 200] }],
//!   "events": [
//!     { "start": "2010-01-01", "end": "2010-01-05", "text": "trip", "category": "work" }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tl_core::{
    Category, CategoryId, Event, MemoryDb, Rgb, TimeDelta, TimePeriod, TimeType, TimelineDb,
};

use crate::commands::util::parse_time;

/// A timeline read from disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// Overrides the configured calendar.
    #[serde(default)]
    pub calendar: Option<TimeType>,
    #[serde(default)]
    pub categories: Vec<DocumentCategory>,
    #[serde(default)]
    pub events: Vec<DocumentEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentCategory {
    pub name: String,
    pub color: Rgb,
    #[serde(default)]
    pub font_color: Rgb,
    /// Name of a category listed earlier.
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentEvent {
    pub start: String,
    /// Missing for point events.
    #[serde(default)]
    pub end: Option<String>,
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub fuzzy: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub ends_today: bool,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl Document {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Builds an in-memory timeline. `fallback` is used when the document
    /// names no calendar.
    pub fn into_db(self, fallback: TimeType) -> Result<MemoryDb> {
        let time_type = self.calendar.unwrap_or(fallback);
        let mut db = MemoryDb::new(time_type);
        let mut ids: HashMap<String, CategoryId> = HashMap::new();

        for entry in self.categories {
            let mut category = Category::new(entry.name.clone(), entry.color);
            category.font_color = entry.font_color;
            if let Some(parent) = &entry.parent {
                let parent_id = *ids.get(parent).with_context(|| {
                    format!("category {} has unknown parent {parent}", entry.name)
                })?;
                category = category.with_parent(parent_id);
            }
            let id = db.save_category(category)?;
            ids.insert(entry.name, id);
        }

        for entry in self.events {
            let start = parse_time(time_type, &entry.start)?;
            let end = match &entry.end {
                Some(end) => parse_time(time_type, end)?,
                None => start,
            };
            let period = TimePeriod::new(time_type, start, end)
                .with_context(|| format!("invalid period for event {}", entry.text))?;
            let mut event = Event::new(period, entry.text.clone());
            if let Some(name) = &entry.category {
                let id = *ids
                    .get(name)
                    .with_context(|| format!("event {} has unknown category {name}", entry.text))?;
                event = event.with_category(id);
            }
            event.fuzzy = entry.fuzzy;
            event.locked = entry.locked;
            event.ends_today = entry.ends_today;
            event.data = entry.data;
            db.save_event(event)?;
        }

        Ok(db)
    }
}

/// A period showing every event of `db` with some margin, or the calendar's
/// default period for an empty timeline.
pub fn fit_all_events(db: &MemoryDb) -> Result<TimePeriod> {
    let time_type = db.time_type();
    let (Some(first), Some(last)) = (db.first_event(), db.last_event()) else {
        return time_type
            .default_time_period()
            .context("no default period");
    };
    let (start, end) = (first.time_period.start(), last.time_period.end());
    let span = (end - start).max(time_type.min_zoom_delta());
    let margin = time_type.margin_delta(span).max(TimeDelta::from_ticks(1));
    let start = start.checked_add(-margin).unwrap_or(start).max(time_type.min_time());
    let end = end.checked_add(margin).unwrap_or(end).min(time_type.max_time());
    let mut period = TimePeriod::new(time_type, start, end)?;
    if period.delta() < time_type.min_zoom_delta() {
        period = TimePeriod::centered(time_type, period.mean_time(), time_type.min_zoom_delta())?;
    }
    Ok(period)
}
