//! Per-view state: the displayed period, divider, selection and category filter.

use std::collections::{BTreeSet, HashMap};

use crate::event::{Category, CategoryId, Event, EventId};
use crate::period::TimePeriod;

/// State of one timeline view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewProperties {
    pub displayed_period: TimePeriod,
    /// Divider position as a fraction of the canvas height.
    pub divider_position: f64,
    pub hidden_categories: BTreeSet<CategoryId>,
    pub selected_event_ids: BTreeSet<EventId>,
    /// Hide only the category itself instead of its whole subtree.
    pub view_cats_individually: bool,
}

impl ViewProperties {
    pub const fn new(displayed_period: TimePeriod) -> Self {
        Self {
            displayed_period,
            divider_position: 0.5,
            hidden_categories: BTreeSet::new(),
            selected_event_ids: BTreeSet::new(),
            view_cats_individually: false,
        }
    }

    pub fn set_category_visible(&mut self, id: CategoryId, visible: bool) {
        if visible {
            self.hidden_categories.remove(&id);
        } else {
            self.hidden_categories.insert(id);
        }
    }

    pub fn is_category_visible(&self, id: CategoryId) -> bool {
        !self.hidden_categories.contains(&id)
    }

    /// Whether events of `category` are shown, taking hidden ancestors into
    /// account unless categories are viewed individually.
    pub fn is_event_with_category_visible(
        &self,
        category: Option<CategoryId>,
        categories: &[Category],
    ) -> bool {
        let Some(id) = category else {
            return true;
        };
        if self.view_cats_individually {
            return self.is_category_visible(id);
        }
        let parents: HashMap<CategoryId, Option<CategoryId>> = categories
            .iter()
            .filter_map(|c| c.id.map(|id| (id, c.parent)))
            .collect();
        let mut current = Some(id);
        let mut steps = 0;
        while let Some(id) = current {
            if !self.is_category_visible(id) {
                return false;
            }
            steps += 1;
            if steps > parents.len() {
                break;
            }
            current = parents.get(&id).copied().flatten();
        }
        true
    }

    /// Splits events into `(visible, hidden_count)` by category visibility.
    pub fn filter_events(&self, events: Vec<Event>, categories: &[Category]) -> (Vec<Event>, usize) {
        let total = events.len();
        let visible: Vec<Event> = events
            .into_iter()
            .filter(|event| self.is_event_with_category_visible(event.category, categories))
            .collect();
        let hidden = total - visible.len();
        (visible, hidden)
    }

    pub fn is_selected(&self, event: &Event) -> bool {
        event
            .id
            .is_some_and(|id| self.selected_event_ids.contains(&id))
    }

    pub fn set_selected(&mut self, id: EventId, selected: bool) {
        if selected {
            self.selected_event_ids.insert(id);
        } else {
            self.selected_event_ids.remove(&id);
        }
    }

    pub fn clear_selected(&mut self) {
        self.selected_event_ids.clear();
    }
}
