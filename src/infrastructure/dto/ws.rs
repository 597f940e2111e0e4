//! Real-time channel event envelopes.
//!
//! Every frame on the channel is one JSON envelope `{"event": ..., "data":
//! ...}`. Event names follow the backend's naming; the enums below are the
//! complete set a client subscribes to (inbound) or may emit (outbound).

use serde::{Deserialize, Serialize};

/// Events delivered by the server while a room is joined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// A chat message broadcast to the room (the sender receives its own echo)
    #[serde(rename = "chat:message")]
    ChatMessage(ChatMessagePayload),

    /// A synthetic notice (join/leave announcements)
    #[serde(rename = "room:systemMessage")]
    SystemMessage(SystemMessagePayload),

    /// Replacement value for the room's viewer count
    #[serde(rename = "room:usersUpdate")]
    UsersUpdate(UsersUpdatePayload),

    /// Another viewer started playback
    #[serde(rename = "video:play")]
    VideoPlay(PlaybackPayload),

    /// Another viewer paused playback
    #[serde(rename = "video:pause")]
    VideoPause(PlaybackPayload),

    /// Another viewer scrubbed to a new position
    #[serde(rename = "video:seek")]
    VideoSeek(PlaybackPayload),
}

/// Events this client emits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Sent once, immediately after the connection opens
    #[serde(rename = "joinRoom")]
    JoinRoom(JoinRoomPayload),

    /// A chat message authored by the local user
    #[serde(rename = "chat:message")]
    ChatMessage(ChatSendPayload),

    #[serde(rename = "video:play")]
    VideoPlay(PlaybackPayload),

    #[serde(rename = "video:pause")]
    VideoPause(PlaybackPayload),

    #[serde(rename = "video:seek")]
    VideoSeek(PlaybackPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagePayload {
    pub username: String,
    pub message: String,
    /// Unix timestamp in UTC milliseconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMessagePayload {
    pub message: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersUpdatePayload {
    pub count: u32,
}

/// Payload of the three playback events, inbound and outbound alike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackPayload {
    pub room_id: String,
    /// Play-position in seconds
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub room_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSendPayload {
    pub room_id: String,
    pub message: String,
    pub user_id: String,
    pub username: String,
}
