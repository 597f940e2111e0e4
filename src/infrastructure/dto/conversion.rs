//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    entity::{ChatEntry, Identity, Room},
    value_object::{RoomId, Timestamp, Username, VideoId},
};
use crate::infrastructure::dto::{http, ws};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<http::UserDto> for Identity {
    fn from(dto: http::UserDto) -> Self {
        Self {
            id: dto.id,
            username: Username::new(dto.username).expect("Username should be valid in DTO"),
            email: dto.email,
        }
    }
}

impl From<http::MessageRecord> for ChatEntry {
    fn from(dto: http::MessageRecord) -> Self {
        let timestamp = Timestamp::new(dto.timestamp);
        match dto.username {
            Some(username) if !dto.system => ChatEntry::User {
                author: Username::new(username).expect("Username should be valid in DTO"),
                body: dto.message,
                timestamp,
            },
            _ => ChatEntry::System {
                body: dto.message,
                timestamp,
            },
        }
    }
}

impl From<ws::ChatMessagePayload> for ChatEntry {
    fn from(payload: ws::ChatMessagePayload) -> Self {
        ChatEntry::User {
            author: Username::new(payload.username).expect("Username should be valid in payload"),
            body: payload.message,
            timestamp: Timestamp::new(payload.timestamp),
        }
    }
}

impl From<ws::SystemMessagePayload> for ChatEntry {
    fn from(payload: ws::SystemMessagePayload) -> Self {
        ChatEntry::System {
            body: payload.message,
            timestamp: Timestamp::new(payload.timestamp),
        }
    }
}

impl From<(RoomId, http::RoomDetailDto)> for Room {
    fn from((id, dto): (RoomId, http::RoomDetailDto)) -> Self {
        Room::new(
            id,
            dto.name,
            VideoId::new(dto.video_id).expect("VideoId should be valid in DTO"),
        )
    }
}
