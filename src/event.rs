pub use self::error::EventError;
pub use self::model::{ChatId, Event, MessageId, Participant, UserId, NAME_MAX_LENGTH};

pub mod error;
pub mod model;
pub mod snapshot;
