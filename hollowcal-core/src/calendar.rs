//! The view-layer seam.
//!
//! The reconciliation engine only needs a minimal event-collection surface
//! from whatever renders the calendar; rendering, navigation and view
//! switching stay on the other side of this trait. `Calendar` is the
//! in-memory implementation backing the CLI listing and the tests.

use crate::event::Event;

/// Minimal surface the view layer exposes to the reconciliation engine.
pub trait CalendarView {
    fn add_event(&mut self, event: Event);
    fn remove_event(&mut self, id: &str);
    fn remove_all_events(&mut self);
}

/// In-memory event collection.
#[derive(Debug, Default)]
pub struct Calendar {
    events: Vec<Event>,
}

impl Calendar {
    pub fn new() -> Self {
        Calendar::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events ordered by start time, for display.
    pub fn sorted_by_start(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().collect();
        events.sort_by_key(|e| e.start);
        events
    }
}

impl CalendarView for Calendar {
    fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    fn remove_event(&mut self, id: &str) {
        self.events.retain(|e| e.id != id);
    }

    fn remove_all_events(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, hour: u32) -> Event {
        Event {
            id: id.to_string(),
            title: format!("event-{}", id),
            start: Utc.with_ymd_and_hms(2026, 3, 20, hour, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 3, 20, hour + 1, 0, 0).unwrap(),
            all_day: false,
        }
    }

    #[test]
    fn add_remove_and_clear() {
        let mut calendar = Calendar::new();
        calendar.add_event(event("0", 9));
        calendar.add_event(event("1", 8));
        assert_eq!(calendar.len(), 2);

        calendar.remove_event("0");
        assert!(calendar.get("0").is_none());
        assert!(calendar.get("1").is_some());

        calendar.remove_all_events();
        assert!(calendar.is_empty());
    }

    #[test]
    fn sorted_by_start_orders_events() {
        let mut calendar = Calendar::new();
        calendar.add_event(event("0", 12));
        calendar.add_event(event("1", 8));
        let sorted = calendar.sorted_by_start();
        assert_eq!(sorted[0].id, "1");
        assert_eq!(sorted[1].id, "0");
    }
}
