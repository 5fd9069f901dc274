use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use super::{EventStore, StoreError};
use crate::event::{ChatId, Event};

/// In-memory [`EventStore`] holding raw snapshots. Events go through the full
/// snapshot round-trip on every read and write, so this backend doubles as a
/// faithful stand-in for a durable one in tests.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    snapshots: RwLock<HashMap<ChatId, Value>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn get_event(&self, chat_id: ChatId) -> Result<Option<Event>, StoreError> {
        let snapshots = self.snapshots.read();
        match snapshots.get(&chat_id) {
            Some(snapshot) => Ok(Some(Event::from_snapshot(snapshot)?)),
            None => Ok(None),
        }
    }

    async fn save_event(&self, event: &Event) -> Result<(), StoreError> {
        let snapshot = event.to_snapshot();
        self.snapshots.write().insert(event.chat_id(), snapshot);
        debug!(
            "saved event chat_id={} participants={}",
            event.chat_id(),
            event.participant_count()
        );
        Ok(())
    }

    async fn delete_event(&self, chat_id: ChatId) -> Result<bool, StoreError> {
        let removed = self.snapshots.write().remove(&chat_id).is_some();
        debug!("deleted event chat_id={} removed={}", chat_id, removed);
        Ok(removed)
    }

    async fn count_events(&self) -> Result<i64, StoreError> {
        Ok(self.snapshots.read().len() as i64)
    }
}
