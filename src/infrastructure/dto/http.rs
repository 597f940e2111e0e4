//! HTTP API request/response DTOs.
//!
//! Field names mirror the backend wire contract (camelCase). Responses
//! tolerate extra fields; only what the client consumes is modeled.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    pub video_url: String,
}

/// Response of `POST /rooms`
///
/// Older backend deployments answered with `id` instead of `roomId`; both
/// are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedRoom {
    #[serde(rename = "roomId", alias = "id")]
    pub room_id: String,
}

/// Response of `GET /rooms/active`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActiveRooms {
    pub rooms: Vec<ActiveRoomDto>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRoomDto {
    pub room_id: String,
    pub name: String,
    pub users_online: u32,
}

/// Response of `GET /rooms/:id`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub name: String,
    pub video_id: String,
}

/// One entry of `GET /rooms/:id/messages`
///
/// System notices come back without a username; persisted messages may carry
/// `createdAt` instead of `timestamp`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    #[serde(default)]
    pub username: Option<String>,
    pub message: String,
    #[serde(alias = "createdAt")]
    pub timestamp: i64,
    #[serde(default)]
    pub system: bool,
}

/// Error body the backend attaches to rejected requests
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_serializes_confirm_password_camel_case() {
        // テスト項目: 登録リクエストの confirmPassword が camelCase でシリアライズされる
        // given (前提条件):
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
        };

        // when (操作):
        let json = serde_json::to_string(&request).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""confirmPassword":"secret""#));
    }

    #[test]
    fn test_created_room_accepts_room_id_field() {
        // テスト項目: roomId フィールドから CreatedRoom をデシリアライズできる
        // given (前提条件):
        let json = r#"{"roomId":"room-1"}"#;

        // when (操作):
        let created: CreatedRoom = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(created.room_id, "room-1");
    }

    #[test]
    fn test_created_room_accepts_legacy_id_field() {
        // テスト項目: 旧形式の id フィールドからも CreatedRoom をデシリアライズできる
        // given (前提条件):
        let json = r#"{"id":"room-2"}"#;

        // when (操作):
        let created: CreatedRoom = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(created.room_id, "room-2");
    }

    #[test]
    fn test_message_record_accepts_created_at_alias() {
        // テスト項目: createdAt フィールドが timestamp として読み込まれる
        // given (前提条件):
        let json = r#"{"username":"bob","message":"hi","createdAt":5000}"#;

        // when (操作):
        let record: MessageRecord = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(record.timestamp, 5000);
        assert!(!record.system);
    }

    #[test]
    fn test_message_record_without_username_defaults_to_none() {
        // テスト項目: username のないレコード（システム通知）が None になる
        // given (前提条件):
        let json = r#"{"message":"bob joined","timestamp":6000,"system":true}"#;

        // when (操作):
        let record: MessageRecord = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(record.username, None);
        assert!(record.system);
    }

    #[test]
    fn test_room_detail_ignores_extra_fields() {
        // テスト項目: RoomDetailDto が未知のフィールドを無視してデシリアライズされる
        // given (前提条件):
        let json = r#"{"name":"movie night","videoId":"dQw4w9WgXcQ","createdBy":"alice"}"#;

        // when (操作):
        let detail: RoomDetailDto = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(detail.name, "movie night");
        assert_eq!(detail.video_id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_active_rooms_envelope_deserializes() {
        // テスト項目: rooms エンベロープからアクティブルーム一覧を読み込める
        // given (前提条件):
        let json = r#"{"rooms":[{"roomId":"room-1","name":"movie night","usersOnline":3}]}"#;

        // when (操作):
        let active: ActiveRooms = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(active.rooms.len(), 1);
        assert_eq!(active.rooms[0].room_id, "room-1");
        assert_eq!(active.rooms[0].users_online, 3);
    }
}
