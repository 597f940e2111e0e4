//! Message formatting utilities for client display.

use crate::client::chat::Alignment;
use crate::common::time::timestamp_to_clock_time;
use crate::domain::{ChatEntry, PlaybackCommand, Room};
use crate::infrastructure::dto::http::ActiveRoomDto;

/// Width the chat column is rendered into; right-aligned and centered
/// entries are padded against it.
const CHAT_WIDTH: usize = 72;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format one chat entry with its display alignment
    ///
    /// # Arguments
    ///
    /// * `entry` - The entry to render
    /// * `alignment` - Right for own messages, left for others, center for
    ///   system notices
    pub fn format_entry(entry: &ChatEntry, alignment: Alignment) -> String {
        let text = match entry {
            ChatEntry::User {
                author,
                body,
                timestamp,
            } => format!(
                "@{}: {} [{}]",
                author.as_str(),
                body,
                timestamp_to_clock_time(timestamp.value())
            ),
            ChatEntry::System { body, timestamp } => format!(
                "*** {} [{}] ***",
                body,
                timestamp_to_clock_time(timestamp.value())
            ),
        };

        match alignment {
            Alignment::Left => text,
            Alignment::Right => format!("{:>width$}", text, width = CHAT_WIDTH),
            Alignment::Center => {
                let padding = CHAT_WIDTH.saturating_sub(text.chars().count()) / 2;
                format!("{}{}", " ".repeat(padding), text)
            }
        }
    }

    /// Format the banner shown when a room is entered
    pub fn format_room_banner(room: &Room) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str(&format!("Room: {}\n", room.name));
        output.push_str(&format!("{} watching\n", room.viewers));
        output.push_str(&format!(
            "Invite friends: share the room id '{}'\n",
            room.id.as_str()
        ));
        output.push_str("============================================================\n");
        output
    }

    /// Format a viewer-count change notification
    pub fn format_viewers(count: u32) -> String {
        format!("\n{} watching\n", count)
    }

    /// Format an applied inbound playback command
    pub fn format_playback(command: &PlaybackCommand) -> String {
        match command {
            PlaybackCommand::Play { time } => format!("\n|> playing from {:.1}s\n", time),
            PlaybackCommand::Pause { time } => format!("\n|| paused at {:.1}s\n", time),
            PlaybackCommand::Seek { time } => format!("\n>> jumped to {:.1}s\n", time),
        }
    }

    /// Format the active-rooms listing
    pub fn format_active_rooms(rooms: &[ActiveRoomDto]) -> String {
        let mut output = String::new();
        output.push_str("\n------------------------------------------------------------\n");
        output.push_str("Active rooms:\n");

        if rooms.is_empty() {
            output.push_str("(No active rooms right now)\n");
        } else {
            for room in rooms {
                output.push_str(&format!(
                    "{} - {} ({} watching)\n",
                    room.room_id, room.name, room.users_online
                ));
            }
        }

        output.push_str("------------------------------------------------------------\n");
        output
    }
}
