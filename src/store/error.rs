use thiserror::Error;

use crate::event::EventError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored snapshot could not be restored: {0}")]
    Snapshot(#[from] EventError),
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
