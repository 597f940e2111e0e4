//! Domain models for the watch-party client.
//!
//! Entities and value objects mirror what the backend exposes; the client
//! never invents identifiers, it only transports them.

pub mod entity;
pub mod error;
pub mod player;
pub mod value_object;

pub use entity::{ChatEntry, Identity, Room};
pub use error::ValidationError;
pub use player::{PlaybackCommand, Player, PlayerState, PlayerTransition};
pub use value_object::{AuthToken, MessageBody, RoomId, Timestamp, Username, VideoId};
