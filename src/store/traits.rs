use async_trait::async_trait;

use super::StoreError;
use crate::event::{ChatId, Event};

/// Persistence seam for events, keyed by owning chat (one active event per
/// chat). Implementations must round-trip every snapshot field exactly.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn get_event(&self, chat_id: ChatId) -> Result<Option<Event>, StoreError>;
    async fn save_event(&self, event: &Event) -> Result<(), StoreError>;
    async fn delete_event(&self, chat_id: ChatId) -> Result<bool, StoreError>;
    async fn count_events(&self) -> Result<i64, StoreError>;
}
