//! Snapshot serialization for [`Event`].
//!
//! The snapshot is the full persistable representation of an event, produced
//! by [`Event::to_snapshot`] and consumed by [`Event::from_snapshot`]. The two
//! are exact inverses; reconstruction reads every field explicitly and rejects
//! records with missing or malformed required fields. Only `started_on` may be
//! absent.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use super::model::{MessageId, UserId};
use super::{Event, EventError, Participant};

impl Event {
    pub fn to_snapshot(&self) -> Value {
        let participants: Map<String, Value> = self
            .participants
            .iter()
            .map(|(user_id, participant)| {
                (
                    user_id.to_string(),
                    json!({
                        "name": participant.name,
                        "match_message_id": participant.match_message_id,
                        "last_join_message_id": participant.last_join_message_id,
                    }),
                )
            })
            .collect();

        json!({
            "origin_message_id": self.origin_message_id,
            "announcement_message_id": self.announcement_message_id,
            "creator_id": self.creator_id,
            "creator_name": self.creator_name,
            "chat_id": self.chat_id,
            "chat_title": self.chat_title,
            "participants": participants,
            "created_on": self.created_on.to_rfc3339(),
            "updated_on": self.updated_on.to_rfc3339(),
            "started": self.started,
            "started_on": self.started_on.map(|stamp| stamp.to_rfc3339()),
        })
    }

    pub fn from_snapshot(snapshot: &Value) -> Result<Self, EventError> {
        Ok(Self {
            origin_message_id: require_i64(snapshot, "origin_message_id")?,
            announcement_message_id: require_nullable_i64(snapshot, "announcement_message_id")?,
            creator_id: require_i64(snapshot, "creator_id")?,
            creator_name: require_str(snapshot, "creator_name")?,
            chat_id: require_i64(snapshot, "chat_id")?,
            chat_title: require_str(snapshot, "chat_title")?,
            participants: require_participants(snapshot)?,
            created_on: require_datetime(snapshot, "created_on")?,
            updated_on: require_datetime(snapshot, "updated_on")?,
            started: require_bool(snapshot, "started")?,
            started_on: optional_datetime(snapshot, "started_on")?,
        })
    }
}

fn field<'a>(snapshot: &'a Value, name: &'static str) -> Result<&'a Value, EventError> {
    snapshot.get(name).ok_or(EventError::MissingField(name))
}

fn require_i64(snapshot: &Value, name: &'static str) -> Result<i64, EventError> {
    field(snapshot, name)?
        .as_i64()
        .ok_or(EventError::MissingField(name))
}

fn require_nullable_i64(
    snapshot: &Value,
    name: &'static str,
) -> Result<Option<MessageId>, EventError> {
    match field(snapshot, name)? {
        Value::Null => Ok(None),
        value => value
            .as_i64()
            .map(Some)
            .ok_or(EventError::MissingField(name)),
    }
}

fn require_str(snapshot: &Value, name: &'static str) -> Result<String, EventError> {
    field(snapshot, name)?
        .as_str()
        .map(str::to_string)
        .ok_or(EventError::MissingField(name))
}

fn require_bool(snapshot: &Value, name: &'static str) -> Result<bool, EventError> {
    field(snapshot, name)?
        .as_bool()
        .ok_or(EventError::MissingField(name))
}

fn parse_datetime(value: &Value, name: &'static str) -> Result<DateTime<Utc>, EventError> {
    value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|stamp| stamp.with_timezone(&Utc))
        .ok_or(EventError::MissingField(name))
}

fn require_datetime(snapshot: &Value, name: &'static str) -> Result<DateTime<Utc>, EventError> {
    parse_datetime(field(snapshot, name)?, name)
}

fn optional_datetime(
    snapshot: &Value,
    name: &'static str,
) -> Result<Option<DateTime<Utc>>, EventError> {
    match snapshot.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_datetime(value, name).map(Some),
    }
}

fn require_participants(snapshot: &Value) -> Result<HashMap<UserId, Participant>, EventError> {
    const FIELD: &str = "participants";

    let entries = field(snapshot, FIELD)?
        .as_object()
        .ok_or(EventError::MissingField(FIELD))?;

    let mut participants = HashMap::with_capacity(entries.len());
    for (raw_id, record) in entries {
        let user_id: UserId = raw_id
            .parse()
            .map_err(|_| EventError::MissingField(FIELD))?;
        participants.insert(
            user_id,
            Participant {
                name: require_str(record, "name")?,
                match_message_id: nullable_message_id(record, "match_message_id")?,
                last_join_message_id: nullable_message_id(record, "last_join_message_id")?,
            },
        );
    }
    Ok(participants)
}

fn nullable_message_id(
    record: &Value,
    name: &'static str,
) -> Result<Option<MessageId>, EventError> {
    match record.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or(EventError::MissingField(name)),
    }
}
