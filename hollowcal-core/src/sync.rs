//! Full-refresh reconciliation between the contract store and the view.
//!
//! The engine owns the per-session event-id counter. A pass clears the
//! view, pulls the complete key/value snapshot from the store and
//! repopulates the view, numbering events from zero; the counter keeps
//! counting afterwards, so events created next continue from the restored
//! count.
//!
//! Passes and write paths take `&mut` access to the engine, which
//! serializes them within a session. The original browser design had no
//! such exclusivity: a store-handle change could start a second pass while
//! one was in flight and the stale pass could win. That race cannot occur
//! here.

use crate::calendar::CalendarView;
use crate::error::{HollowCalError, HollowCalResult};
use crate::event::{Event, EventRecord};
use crate::store::Store;
use chrono::{DateTime, Utc};

/// A user's date-range selection plus the entered title.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Events decoded and added to the view.
    pub loaded: usize,
    /// Records dropped: ledger tombstones, empty-title sentinels and
    /// undecodable values.
    pub skipped: usize,
}

/// Session-scoped reconciliation state.
#[derive(Debug, Default)]
pub struct EventSync {
    next_id: u64,
}

impl EventSync {
    pub fn new() -> Self {
        EventSync::default()
    }

    /// The id the next created event will get.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Restart numbering, e.g. ahead of a redeployment.
    pub fn reset(&mut self) {
        self.next_id = 0;
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }

    /// Run one full-refresh pass.
    ///
    /// With no bound store, no connection or no contract address this is a
    /// no-op that leaves the view untouched. Events are rendered in the
    /// order of the store's cached mapping, which is not guaranteed stable
    /// across calls; ids are therefore view-local and reassigned from zero
    /// on every pass.
    pub async fn reconcile<S: Store, V: CalendarView>(
        &mut self,
        store: Option<&S>,
        connected: bool,
        view: &mut V,
    ) -> HollowCalResult<ReconcileStats> {
        let Some(store) = store else {
            return Ok(ReconcileStats::default());
        };
        if !connected || store.contract_address().is_empty() {
            return Ok(ReconcileStats::default());
        }

        // Clean slate: makes the pass idempotent and keeps fresh ids from
        // colliding with stale ones.
        view.remove_all_events();
        self.reset();

        let keys = store.get_all_keys().await?;
        let batch = store.get_storage_values(&keys).await?;

        let mut stats = ReconcileStats::default();
        for raw in batch.cached_value.into_values() {
            // None is the ledger's own tombstone marker for the key.
            let Some(raw) = raw else {
                stats.skipped += 1;
                continue;
            };
            let record: EventRecord = match serde_json::from_str(&raw) {
                Ok(record) => record,
                Err(_) => {
                    stats.skipped += 1;
                    continue;
                }
            };
            if record.is_tombstone() {
                stats.skipped += 1;
                continue;
            }
            match record.into_event(self.next_id.to_string()) {
                Some(event) => {
                    self.next_id += 1;
                    view.add_event(event);
                    stats.loaded += 1;
                }
                None => stats.skipped += 1,
            }
        }

        Ok(stats)
    }

    /// Write path for a user-created event.
    ///
    /// The event is added to the view optimistically before the remote
    /// write; a failed `put` is returned to the caller but the view is not
    /// rolled back.
    pub async fn create_event<S: Store, V: CalendarView>(
        &mut self,
        store: Option<&S>,
        connected: bool,
        view: &mut V,
        draft: EventDraft,
    ) -> HollowCalResult<Event> {
        let store = if connected { store } else { None }.ok_or(HollowCalError::NotConnected)?;

        let id = self.allocate_id();
        let event = Event {
            id: id.clone(),
            title: draft.title,
            start: draft.start,
            end: draft.end,
            all_day: draft.all_day,
        };
        view.add_event(event.clone());

        let record = EventRecord::from_event(&event);
        let value = serde_json::to_string(&record)
            .map_err(|e| HollowCalError::Serialization(e.to_string()))?;
        store.put(&id, &value).await?;

        Ok(event)
    }
}

/// Write path for deletion: drop the event from the view, then overwrite
/// its slot with the tombstone sentinel. Never a structural delete.
pub async fn delete_event<S: Store, V: CalendarView>(
    store: Option<&S>,
    connected: bool,
    view: &mut V,
    id: &str,
) -> HollowCalResult<()> {
    let store = if connected { store } else { None }.ok_or(HollowCalError::NotConnected)?;

    view.remove_event(id);

    let value = serde_json::to_string(&EventRecord::tombstone())
        .map_err(|e| HollowCalError::Serialization(e.to_string()))?;
    store.update(id, &value).await?;

    Ok(())
}
