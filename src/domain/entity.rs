//! Domain entities for rooms, identities and chat history.

use super::value_object::{RoomId, Timestamp, Username, VideoId};

/// The authenticated user of this client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Backend-assigned user identifier
    pub id: String,
    /// Display name, used as the chat author and for `joinRoom`
    pub username: Username,
    /// Registered e-mail address
    pub email: String,
}

/// A watch room as seen by a joined client
///
/// The viewer count is only ever replaced by inbound membership events;
/// the client never derives it locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub video_id: VideoId,
    pub viewers: u32,
}

impl Room {
    pub fn new(id: RoomId, name: String, video_id: VideoId) -> Self {
        Self {
            id,
            name,
            video_id,
            viewers: 0,
        }
    }
}

/// One entry of the room's chat log
///
/// The log is append-only from the client's perspective; insertion order is
/// arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEntry {
    /// A message authored by a user
    User {
        author: Username,
        body: String,
        timestamp: Timestamp,
    },
    /// A synthetic notice emitted by the server (join/leave announcements)
    System { body: String, timestamp: Timestamp },
}

impl ChatEntry {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            ChatEntry::User { timestamp, .. } | ChatEntry::System { timestamp, .. } => *timestamp,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            ChatEntry::User { body, .. } | ChatEntry::System { body, .. } => body,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, ChatEntry::System { .. })
    }

    /// Author of the entry. `None` for system notices.
    pub fn author(&self) -> Option<&Username> {
        match self {
            ChatEntry::User { author, .. } => Some(author),
            ChatEntry::System { .. } => None,
        }
    }
}
