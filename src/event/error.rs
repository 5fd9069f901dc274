use thiserror::Error;

use super::model::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("user {0} is not a participant of this event")]
    ParticipantNotFound(UserId),
    #[error("snapshot is missing required field `{0}`")]
    MissingField(&'static str),
}
