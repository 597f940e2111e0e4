//! Chat session for a joined room.
//!
//! Owns the ordered message log and the compose field. Sends are
//! fire-and-forget; the local log is only appended when the broadcast echo
//! of the message arrives (the backend echoes to every room member,
//! including the sender), so one code path covers own and foreign messages
//! and arrival order stays the single ordering authority.

use crate::domain::{ChatEntry, Identity, RoomId};
use crate::infrastructure::dto::ws::{ChatSendPayload, ClientEvent};

/// How a chat entry is aligned when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Messages authored by other users
    Left,
    /// Messages authored by the local user
    Right,
    /// System notices
    Center,
}

/// The chat state of one joined room
#[derive(Debug)]
pub struct ChatSession {
    room_id: RoomId,
    me: Identity,
    log: Vec<ChatEntry>,
    compose: String,
}

impl ChatSession {
    /// Create a session seeded with the fetched message history
    pub fn new(room_id: RoomId, me: Identity, history: Vec<ChatEntry>) -> Self {
        Self {
            room_id,
            me,
            log: history,
            compose: String::new(),
        }
    }

    pub fn set_compose(&mut self, text: &str) {
        self.compose = text.to_string();
    }

    pub fn compose(&self) -> &str {
        &self.compose
    }

    /// Emit the composed message.
    ///
    /// No-op if the compose field is empty or whitespace-only: nothing is
    /// sent and the field is left untouched. Otherwise the field is cleared
    /// and the outbound event returned; the log is NOT appended here.
    pub fn send(&mut self) -> Option<ClientEvent> {
        if self.compose.trim().is_empty() {
            return None;
        }

        let event = ClientEvent::ChatMessage(ChatSendPayload {
            room_id: self.room_id.as_str().to_string(),
            message: self.compose.clone(),
            user_id: self.me.id.clone(),
            username: self.me.username.as_str().to_string(),
        });

        self.compose.clear();
        Some(event)
    }

    /// Append an entry received from the channel (broadcast echo included)
    pub fn receive(&mut self, entry: ChatEntry) {
        self.log.push(entry);
    }

    pub fn log(&self) -> &[ChatEntry] {
        &self.log
    }

    pub fn me(&self) -> &Identity {
        &self.me
    }

    /// Display alignment of an entry relative to the local identity
    pub fn alignment(&self, entry: &ChatEntry) -> Alignment {
        if entry.is_system() {
            Alignment::Center
        } else if entry.author() == Some(&self.me.username) {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }
}
