//! Error types for the domain layer.

use thiserror::Error;

/// Validation errors raised when constructing value objects
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Room ID is empty or whitespace-only
    #[error("Room ID must not be empty")]
    EmptyRoomId,

    /// Username is empty or whitespace-only
    #[error("Username must not be empty")]
    EmptyUsername,

    /// Message body is empty or whitespace-only
    #[error("Message body must not be empty")]
    EmptyMessageBody,

    /// Video ID is empty or whitespace-only
    #[error("Video ID must not be empty")]
    EmptyVideoId,

    /// Auth token is empty
    #[error("Auth token must not be empty")]
    EmptyAuthToken,
}
