use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use super::EventError;
use crate::chat;

pub type UserId = i64;
pub type ChatId = i64;
pub type MessageId = i64;

/// Display names are cut to this many chars before they are stored.
pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub match_message_id: Option<MessageId>,
    pub last_join_message_id: Option<MessageId>,
}

/// One secret-santa event tied to a group chat.
///
/// The entity is purely in-memory and synchronous; callers serialize mutating
/// access per instance. Every mutating operation bumps `updated_on` through
/// [`Event::touch`].
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub(crate) origin_message_id: MessageId,
    pub(crate) announcement_message_id: Option<MessageId>,
    pub(crate) creator_id: UserId,
    pub(crate) creator_name: String,
    pub(crate) chat_id: ChatId,
    pub(crate) chat_title: String,
    pub(crate) participants: HashMap<UserId, Participant>,
    pub(crate) created_on: DateTime<Utc>,
    pub(crate) updated_on: DateTime<Utc>,
    pub(crate) started: bool,
    pub(crate) started_on: Option<DateTime<Utc>>,
}

fn truncated(name: &str) -> String {
    name.chars().take(NAME_MAX_LENGTH).collect()
}

impl Event {
    pub fn new(
        origin_message_id: MessageId,
        creator_id: UserId,
        creator_name: &str,
        chat_id: ChatId,
        chat_title: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            origin_message_id,
            announcement_message_id: None,
            creator_id,
            creator_name: creator_name.to_string(),
            chat_id,
            chat_title: chat_title.to_string(),
            participants: HashMap::new(),
            created_on: now,
            updated_on: now,
            started: false,
            started_on: None,
        }
    }

    pub fn origin_message_id(&self) -> MessageId {
        self.origin_message_id
    }

    /// The event's identity for external addressing; absent until the
    /// announcement message has been sent.
    pub fn announcement_message_id(&self) -> Option<MessageId> {
        self.announcement_message_id
    }

    /// Alias for [`Event::announcement_message_id`].
    pub fn id(&self) -> Option<MessageId> {
        self.announcement_message_id
    }

    pub fn set_announcement_message_id(&mut self, message_id: MessageId) {
        self.announcement_message_id = Some(message_id);
        self.touch();
    }

    pub fn creator_id(&self) -> UserId {
        self.creator_id
    }

    pub fn creator_name(&self) -> &str {
        &self.creator_name
    }

    pub fn creator_name_escaped(&self) -> String {
        chat::html_escape(&self.creator_name)
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub fn chat_title(&self) -> &str {
        &self.chat_title
    }

    pub fn chat_title_escaped(&self) -> String {
        chat::html_escape(&self.chat_title)
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn updated_on(&self) -> DateTime<Utc> {
        self.updated_on
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn started_on(&self) -> Option<DateTime<Utc>> {
        self.started_on
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// How many participants are still needed to reach `min_participants`.
    /// Negative means the threshold is already exceeded.
    pub fn missing_count(&self, min_participants: i64) -> i64 {
        min_participants - self.participants.len() as i64
    }

    pub fn is_participant(&self, user_id: UserId) -> bool {
        self.participants.contains_key(&user_id)
    }

    pub fn is_creator(&self, user_id: UserId) -> bool {
        self.creator_id == user_id
    }

    /// Iteration surface for the matching engine.
    pub fn participant_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.participants.keys().copied()
    }

    pub fn participant_name(&self, user_id: UserId) -> Result<&str, EventError> {
        self.participant(user_id).map(|p| p.name.as_str())
    }

    pub fn match_message_id(&self, user_id: UserId) -> Result<Option<MessageId>, EventError> {
        self.participant(user_id).map(|p| p.match_message_id)
    }

    pub fn join_message_id(&self, user_id: UserId) -> Result<Option<MessageId>, EventError> {
        self.participant(user_id).map(|p| p.last_join_message_id)
    }

    /// Inserts or overwrites the record for `user_id` and reports whether the
    /// user was already a participant. Re-adding replaces the match/join
    /// message ids with the supplied values, clearing stale pairing links.
    pub fn add_participant(
        &mut self,
        user_id: UserId,
        name: &str,
        match_message_id: Option<MessageId>,
        join_message_id: Option<MessageId>,
    ) -> bool {
        let already_a_participant = self.participants.contains_key(&user_id);
        self.participants.insert(
            user_id,
            Participant {
                name: truncated(name),
                match_message_id,
                last_join_message_id: join_message_id,
            },
        );
        self.touch();
        already_a_participant
    }

    /// Overwrites the stored name verbatim. The caller is expected to pass a
    /// name that already satisfies the length cap; contrast with
    /// [`Event::update_display_name`].
    pub fn set_participant_name(&mut self, user_id: UserId, name: &str) -> Result<(), EventError> {
        self.participant_mut(user_id)?.name = name.to_string();
        self.touch();
        Ok(())
    }

    /// Refreshes the stored name from an external identity source, applying
    /// the usual truncation.
    pub fn update_display_name(&mut self, user_id: UserId, name: &str) -> Result<(), EventError> {
        self.participant_mut(user_id)?.name = truncated(name);
        self.touch();
        Ok(())
    }

    /// Removes `user_id` from the roster. Removal is idempotent: a missing id
    /// returns `false` without error.
    pub fn remove_participant(&mut self, user_id: UserId) -> bool {
        let removed = self.participants.remove(&user_id).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    pub fn set_match_message_id(
        &mut self,
        user_id: UserId,
        message_id: MessageId,
    ) -> Result<(), EventError> {
        self.participant_mut(user_id)?.match_message_id = Some(message_id);
        self.touch();
        Ok(())
    }

    pub fn set_join_message_id(
        &mut self,
        user_id: UserId,
        message_id: MessageId,
    ) -> Result<(), EventError> {
        self.participant_mut(user_id)?.last_join_message_id = Some(message_id);
        self.touch();
        Ok(())
    }

    /// Case-insensitive collision check against all stored names. Returns the
    /// stored (already truncated) name that clashes, so the caller can show
    /// the exact string the new name would collide with.
    pub fn find_duplicate_name(&self, candidate: &str) -> Option<&str> {
        let wanted = truncated(candidate).to_lowercase();
        self.participants
            .values()
            .find(|p| p.name.to_lowercase() == wanted)
            .map(|p| p.name.as_str())
    }

    /// Marks the event as started. Idempotent: a second call keeps the
    /// original `started_on` stamp. Minimum-participant policy is the
    /// caller's job, via [`Event::missing_count`].
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.started_on = Some(Utc::now());
        self.touch();
    }

    /// Deep link to the announcement message, or an empty string when the
    /// chat kind does not support message links or the announcement has not
    /// been sent yet.
    pub fn announcement_link(&self) -> String {
        match self.announcement_message_id {
            Some(message_id) if chat::is_supergroup(self.chat_id) => {
                chat::message_link(self.chat_id, message_id)
            }
            _ => String::new(),
        }
    }

    /// Wraps `text` in an HTML link to the announcement message, falling back
    /// to the bare text when no link can be built.
    pub fn wrap_as_link(&self, text: &str, escape: bool) -> String {
        let text = if escape {
            chat::html_escape(text)
        } else {
            text.to_string()
        };

        let link = self.announcement_link();
        if link.is_empty() {
            return text;
        }
        format!("<a href=\"{link}\">{text}</a>")
    }

    /// HTML mention of a participant, using their stored name.
    pub fn mention(&self, user_id: UserId) -> Result<String, EventError> {
        let participant = self.participant(user_id)?;
        Ok(chat::mention_escaped(user_id, &participant.name))
    }

    fn participant(&self, user_id: UserId) -> Result<&Participant, EventError> {
        self.participants
            .get(&user_id)
            .ok_or(EventError::ParticipantNotFound(user_id))
    }

    fn participant_mut(&mut self, user_id: UserId) -> Result<&mut Participant, EventError> {
        self.participants
            .get_mut(&user_id)
            .ok_or(EventError::ParticipantNotFound(user_id))
    }

    fn touch(&mut self) {
        self.updated_on = Utc::now();
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event(origin={}, participants={}, updated_on={})",
            self.origin_message_id,
            self.participants.len(),
            self.updated_on
        )
    }
}
