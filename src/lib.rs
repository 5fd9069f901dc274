#![forbid(unsafe_code)]

pub mod chat;
pub mod config;
pub mod event;
pub mod store;
pub mod utils;

pub use config::Config;
pub use event::{ChatId, Event, EventError, MessageId, Participant, UserId, NAME_MAX_LENGTH};
pub use store::{EventStore, MemoryEventStore, StoreError};
