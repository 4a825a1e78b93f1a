//! Core types and engine for the hollowcal ecosystem.
//!
//! This crate provides everything below the CLI surface:
//! - `Event` and its contract wire format
//! - the JSON protocol spoken to gateway binaries, and the subprocess client
//! - `Session` for connection, identity and contract lifecycle
//! - the full-refresh reconciliation engine in `sync`

pub mod backend;
pub mod calendar;
pub mod error;
pub mod event;
pub mod gateway;
pub mod local_state;
pub mod protocol;
pub mod session;
pub mod store;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::Backend;
pub use calendar::{Calendar, CalendarView};
pub use error::{HollowCalError, HollowCalResult};
pub use event::{Event, EventRecord};
pub use session::Session;
pub use sync::{EventDraft, EventSync, ReconcileStats};
