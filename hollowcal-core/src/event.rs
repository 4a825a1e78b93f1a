//! Calendar event types and their contract wire format.
//!
//! Events travel to and from the contract as JSON objects with exactly the
//! fields `title`, `start`, `end` and `allDay`, keyed by the event id.
//! Deletion is logical: a record whose fields are all empty strings marks
//! the slot as deleted and is never rendered. Nothing is ever physically
//! removed from the contract.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event as held by the view layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
}

/// Serialized form of an event.
///
/// `start` and `end` are RFC 3339 strings for timed events and bare
/// `YYYY-MM-DD` for all-day events. `allDay` is a boolean on live records
/// but decodes tolerantly from a string as well, because the tombstone
/// sentinel sets every field to `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "allDay")]
    pub all_day: AllDay,
}

/// Wire shape of the `allDay` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllDay {
    Flag(bool),
    Text(String),
}

impl AllDay {
    pub fn as_bool(&self) -> bool {
        match self {
            AllDay::Flag(flag) => *flag,
            AllDay::Text(_) => false,
        }
    }
}

impl EventRecord {
    /// The soft-delete sentinel: every field empty.
    pub fn tombstone() -> Self {
        EventRecord {
            title: String::new(),
            start: String::new(),
            end: String::new(),
            all_day: AllDay::Text(String::new()),
        }
    }

    /// A record with an empty title is logically deleted.
    pub fn is_tombstone(&self) -> bool {
        self.title.is_empty()
    }

    pub fn from_event(event: &Event) -> Self {
        let (start, end) = if event.all_day {
            (
                event.start.format("%Y-%m-%d").to_string(),
                event.end.format("%Y-%m-%d").to_string(),
            )
        } else {
            (event.start.to_rfc3339(), event.end.to_rfc3339())
        };
        EventRecord {
            title: event.title.clone(),
            start,
            end,
            all_day: AllDay::Flag(event.all_day),
        }
    }

    /// Decode into a view event under the given id.
    ///
    /// Returns `None` when the timestamps do not parse; reconciliation
    /// skips such records instead of failing the whole pass.
    pub fn into_event(self, id: String) -> Option<Event> {
        let start = parse_wire_datetime(&self.start)?;
        let end = parse_wire_datetime(&self.end)?;
        Some(Event {
            id,
            title: self.title,
            start,
            end,
            all_day: self.all_day.as_bool(),
        })
    }
}

/// Parse the date strings found on the wire: RFC 3339 for timed events,
/// bare `YYYY-MM-DD` (midnight UTC) for all-day events. A missing seconds
/// component is tolerated.
pub fn parse_wire_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    None
}
