//! Timeline storage.
//!
//! The scene reads events through [`TimelineDb`]; [`MemoryDb`] is the in-process
//! implementation used by the controller and the CLI.

use tracing::debug;

use crate::error::DbError;
use crate::event::{Category, CategoryId, Event, EventId};
use crate::period::TimePeriod;
use crate::time_type::TimeType;

/// A store of events and categories for one time type.
pub trait TimelineDb {
    fn time_type(&self) -> TimeType;

    /// Events overlapping `period`, in insertion order.
    fn get_events(&self, period: &TimePeriod) -> Vec<Event>;

    fn get_all_events(&self) -> Vec<Event>;

    fn get_event(&self, id: EventId) -> Result<Event, DbError>;

    /// Inserts a new event or replaces the saved event with the same id.
    ///
    /// # Errors
    ///
    /// Fails when the event's id or category is unknown, or when its period
    /// uses another time type.
    fn save_event(&mut self, event: Event) -> Result<EventId, DbError>;

    fn delete_event(&mut self, id: EventId) -> Result<(), DbError>;

    fn get_categories(&self) -> Vec<Category>;

    fn get_category(&self, id: CategoryId) -> Result<Category, DbError>;

    /// Inserts or replaces a category.
    ///
    /// # Errors
    ///
    /// Fails with `CategoryCycle` when the category would become its own
    /// ancestor.
    fn save_category(&mut self, category: Category) -> Result<CategoryId, DbError>;

    /// Removes a category. Its events become uncategorized and its children
    /// move up to its parent.
    fn delete_category(&mut self, id: CategoryId) -> Result<(), DbError>;
}

/// An in-memory [`TimelineDb`].
#[derive(Debug, Clone)]
pub struct MemoryDb {
    time_type: TimeType,
    events: Vec<Event>,
    categories: Vec<Category>,
    next_id: u64,
}

impl MemoryDb {
    pub const fn new(time_type: TimeType) -> Self {
        Self {
            time_type,
            events: Vec::new(),
            categories: Vec::new(),
            next_id: 1,
        }
    }

    const fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Events whose text contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<Event> {
        let query = query.to_lowercase();
        self.events
            .iter()
            .filter(|event| event.text.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// The event starting first.
    pub fn first_event(&self) -> Option<&Event> {
        self.events.iter().min_by_key(|event| event.time_period.start())
    }

    /// The event ending last.
    pub fn last_event(&self) -> Option<&Event> {
        self.events.iter().max_by_key(|event| event.time_period.end())
    }

    fn category_index(&self, id: CategoryId) -> Result<usize, DbError> {
        self.categories
            .iter()
            .position(|category| category.id == Some(id))
            .ok_or(DbError::CategoryNotFound(id.get()))
    }

    fn event_index(&self, id: EventId) -> Result<usize, DbError> {
        self.events
            .iter()
            .position(|event| event.id == Some(id))
            .ok_or(DbError::EventNotFound(id.get()))
    }

    /// Walks up from `parent` and fails if it reaches `id`.
    fn check_ancestry(&self, id: Option<CategoryId>, category: &Category) -> Result<(), DbError> {
        let mut current = category.parent;
        let mut steps = 0;
        while let Some(parent) = current {
            if Some(parent) == id || steps > self.categories.len() {
                return Err(DbError::CategoryCycle {
                    name: category.name.clone(),
                });
            }
            current = self.categories[self.category_index(parent)?].parent;
            steps += 1;
        }
        Ok(())
    }
}

impl TimelineDb for MemoryDb {
    fn time_type(&self) -> TimeType {
        self.time_type
    }

    fn get_events(&self, period: &TimePeriod) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| event.inside_period(period))
            .cloned()
            .collect()
    }

    fn get_all_events(&self) -> Vec<Event> {
        self.events.clone()
    }

    fn get_event(&self, id: EventId) -> Result<Event, DbError> {
        Ok(self.events[self.event_index(id)?].clone())
    }

    fn save_event(&mut self, mut event: Event) -> Result<EventId, DbError> {
        let found = event.time_period.time_type();
        if found != self.time_type {
            return Err(DbError::TimeTypeMismatch {
                expected: self.time_type,
                found,
            });
        }
        if let Some(category) = event.category {
            self.category_index(category)?;
        }
        if let Some(id) = event.id {
            let index = self.event_index(id)?;
            self.events[index] = event;
            debug!(%id, "updated event");
            return Ok(id);
        }
        let id = EventId::new(self.allocate_id());
        event.id = Some(id);
        self.events.push(event);
        debug!(%id, "inserted event");
        Ok(id)
    }

    fn delete_event(&mut self, id: EventId) -> Result<(), DbError> {
        let index = self.event_index(id)?;
        self.events.remove(index);
        Ok(())
    }

    fn get_categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    fn get_category(&self, id: CategoryId) -> Result<Category, DbError> {
        Ok(self.categories[self.category_index(id)?].clone())
    }

    fn save_category(&mut self, mut category: Category) -> Result<CategoryId, DbError> {
        self.check_ancestry(category.id, &category)?;
        if let Some(id) = category.id {
            let index = self.category_index(id)?;
            self.categories[index] = category;
            return Ok(id);
        }
        let id = CategoryId::new(self.allocate_id());
        category.id = Some(id);
        self.categories.push(category);
        Ok(id)
    }

    fn delete_category(&mut self, id: CategoryId) -> Result<(), DbError> {
        let index = self.category_index(id)?;
        let removed = self.categories.remove(index);
        for child in &mut self.categories {
            if child.parent == Some(id) {
                child.parent = removed.parent;
            }
        }
        for event in &mut self.events {
            if event.category == Some(id) {
                event.category = None;
            }
        }
        Ok(())
    }
}
