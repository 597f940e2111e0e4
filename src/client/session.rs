//! The live room session loop.
//!
//! One logical thread of control: a single `select!` serializes inbound
//! channel events, user input and the periodic active-room-list refresh, so
//! handler invocations never interleave. Outbound traffic is
//! fire-and-forget. A dropped connection ends the session — there is no
//! automatic reconnection of the room channel.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::client::command::{RoomCommand, parse_room_command};
use crate::client::formatter::MessageFormatter;
use crate::client::ui::redisplay_prompt;
use crate::client::watch::{Update, WatchSession};
use crate::infrastructure::api::RoomsApi;
use crate::infrastructure::channel::EventChannel;
use crate::infrastructure::dto::ws::ClientEvent;

/// Fixed interval of the active-room-list refresh while a room is joined
const ROOM_LIST_REFRESH: Duration = Duration::from_secs(10);

/// How a room session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user left the room; back to the shell
    Left,
    /// The user quit the client entirely
    Quit,
    /// The server closed the connection or it broke
    ConnectionClosed,
}

/// Drive a bootstrapped session until the user leaves or the connection
/// ends. Owns the channel exclusively and releases it before returning.
pub async fn run_room_session(
    mut session: WatchSession,
    mut channel: EventChannel,
    api: &dyn RoomsApi,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> SessionEnd {
    print!("{}", MessageFormatter::format_room_banner(session.room()));
    for entry in session.chat().log().to_vec() {
        let alignment = session.chat().alignment(&entry);
        println!("{}", MessageFormatter::format_entry(&entry, alignment));
    }
    redisplay_prompt();

    let mut refresh = tokio::time::interval(ROOM_LIST_REFRESH);

    let end = loop {
        // Sends happen after the select so no handler touches the channel
        // while its read future is pending.
        let mut outbound: Vec<ClientEvent> = Vec::new();
        let mut finished: Option<SessionEnd> = None;

        tokio::select! {
            inbound = channel.next_event() => match inbound {
                Some(Ok(event)) => {
                    if let Some(update) = session.handle_event(event) {
                        render_update(&session, update);
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!("Channel error: {}", e);
                    finished = Some(SessionEnd::ConnectionClosed);
                }
                None => finished = Some(SessionEnd::ConnectionClosed),
            },

            line = input_rx.recv() => match line {
                None => finished = Some(SessionEnd::Quit),
                Some(line) => {
                    match parse_room_command(&line) {
                        RoomCommand::Chat(text) => {
                            session.chat_mut().set_compose(&text);
                            if let Some(event) = session.chat_mut().send() {
                                outbound.push(event);
                            }
                        }
                        RoomCommand::Play => {
                            session.play();
                            outbound.extend(session.poll_outbound());
                        }
                        RoomCommand::Pause => {
                            session.pause();
                            outbound.extend(session.poll_outbound());
                        }
                        RoomCommand::Seek(seconds) => {
                            session.seek(seconds);
                            outbound.extend(session.poll_outbound());
                        }
                        RoomCommand::Leave => finished = Some(SessionEnd::Left),
                        RoomCommand::Quit => finished = Some(SessionEnd::Quit),
                        RoomCommand::Unknown(command) => {
                            println!("Unknown command: {}", command);
                        }
                    }
                    redisplay_prompt();
                }
            },

            _ = refresh.tick() => {
                // Steady-state refresh, not a retry: a failed poll is logged
                // and the next tick proceeds unaffected
                match api.active_rooms().await {
                    Ok(active) => {
                        tracing::debug!("{} active rooms", active.rooms.len());
                    }
                    Err(e) => {
                        tracing::debug!("Active-room refresh failed: {}", e);
                    }
                }
            }
        }

        // Fire-and-forget: failed sends are logged, never surfaced
        for event in outbound {
            if let Err(e) = channel.send(&event).await {
                tracing::warn!("Failed to send event: {}", e);
            }
        }

        if let Some(end) = finished {
            break end;
        }
    };

    // Subscriptions are removed before the connection closes, so nothing can
    // deliver into torn-down state, and the channel is fully released before
    // any other room is bootstrapped.
    session.teardown();
    channel.close().await;

    end
}

fn render_update(session: &WatchSession, update: Update) {
    match update {
        Update::Message(entry) => {
            let alignment = session.chat().alignment(&entry);
            println!("{}", MessageFormatter::format_entry(&entry, alignment));
        }
        Update::Viewers(count) => {
            print!("{}", MessageFormatter::format_viewers(count));
        }
        Update::Playback(command) => {
            print!("{}", MessageFormatter::format_playback(&command));
        }
    }
    redisplay_prompt();
}
