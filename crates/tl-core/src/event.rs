//! Timeline events and categories.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::appearance::Rgb;
use crate::period::TimePeriod;
use crate::time::Time;

/// Generates a numeric ID newtype assigned by a timeline store.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a saved event.
    EventId
);

define_id!(
    /// Identifier of a saved category.
    CategoryId
);

/// Something that happened at a point in time or over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Assigned when the event is first saved.
    pub id: Option<EventId>,
    pub time_period: TimePeriod,
    pub text: String,
    pub category: Option<CategoryId>,
    pub fuzzy: bool,
    /// Locked events can't be moved or resized.
    pub locked: bool,
    pub ends_today: bool,
    /// Free-form extra data such as a description.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl Event {
    pub fn new(time_period: TimePeriod, text: impl Into<String>) -> Self {
        Self {
            id: None,
            time_period,
            text: text.into(),
            category: None,
            fuzzy: false,
            locked: false,
            ends_today: false,
            data: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub const fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// True when any data value is non-empty.
    pub fn has_data(&self) -> bool {
        self.data.values().any(|value| !value.is_empty())
    }

    pub fn mean_time(&self) -> Time {
        self.time_period.mean_time()
    }

    pub fn is_period(&self) -> bool {
        self.time_period.is_period()
    }

    pub fn inside_period(&self, period: &TimePeriod) -> bool {
        self.time_period.overlap(period)
    }
}

/// A named color group for events. Categories may nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<CategoryId>,
    pub name: String,
    pub color: Rgb,
    #[serde(default)]
    pub font_color: Rgb,
    #[serde(default)]
    pub parent: Option<CategoryId>,
}

impl Category {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            id: None,
            name: name.into(),
            color,
            font_color: Rgb::BLACK,
            parent: None,
        }
    }

    #[must_use]
    pub const fn with_parent(mut self, parent: CategoryId) -> Self {
        self.parent = Some(parent);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_type::TimeType;

    fn period(start: i64, end: i64) -> TimePeriod {
        TimePeriod::new(TimeType::Numeric, Time::from_ticks(start), Time::from_ticks(end)).unwrap()
    }

    #[test]
    fn test_has_data_ignores_empty_values() {
        let event = Event::new(period(0, 1), "launch").with_data("description", "");
        assert!(!event.has_data());
        let event = event.with_data("description", "first flight");
        assert!(event.has_data());
    }

    #[test]
    fn test_inside_period_uses_overlap() {
        let event = Event::new(period(5, 10), "window");
        assert!(event.inside_period(&period(10, 20)));
        assert!(!event.inside_period(&period(11, 20)));
    }

    #[test]
    fn test_event_json_omits_empty_data() {
        let event = Event::new(period(1, 1), "point");
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["text"], "point");
        assert_eq!(json["time_period"]["start"], 1);
    }
}
