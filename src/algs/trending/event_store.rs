use crate::common::model::InteractionEvent;
use chrono::{DateTime, Utc};
use std::sync::{PoisonError, RwLock};

/// Append-only store of interaction events, shared between ingestion and scoring.
///
/// Appends take the write lock only long enough to push; scoring works on a cloned snapshot,
/// so a fold never holds the lock while it runs. An append racing a snapshot may or may not
/// be part of it.
#[derive(Debug, Default)]
pub struct EventStore {
    events: RwLock<Vec<InteractionEvent>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, event: InteractionEvent) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    pub fn snapshot_all(&self) -> Vec<InteractionEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drops every event whose timestamp is strictly before `cutoff` and returns how many
    /// were removed. Events arrive in any timestamp order, so this is a full pass.
    pub fn evict_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        let before = events.len();
        events.retain(|e| e.timestamp >= cutoff);
        before - events.len()
    }
}
