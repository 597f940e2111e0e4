//! Room watch session: the real-time event router.
//!
//! One `WatchSession` exists per joined room and owns everything the channel
//! feeds: the chat log, the viewer count and the playback synchronizer. It
//! is a pure state machine — the I/O loop lives in
//! [`crate::client::session`] — so every routing rule is testable without a
//! connection.

use std::collections::HashSet;

use crate::client::chat::ChatSession;
use crate::client::playback::PlaybackSynchronizer;
use crate::domain::{ChatEntry, Identity, PlaybackCommand, Player, PlayerState, Room};
use crate::infrastructure::dto::ws::{ClientEvent, PlaybackPayload, ServerEvent};

/// The event kinds a session subscribes to.
///
/// Subscriptions are registered on session start and removed symmetrically
/// on teardown; an event whose kind is no longer subscribed must not mutate
/// any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscription {
    ChatMessage,
    SystemMessage,
    UsersUpdate,
    VideoPlay,
    VideoPause,
    VideoSeek,
}

impl Subscription {
    fn all() -> [Subscription; 6] {
        [
            Subscription::ChatMessage,
            Subscription::SystemMessage,
            Subscription::UsersUpdate,
            Subscription::VideoPlay,
            Subscription::VideoPause,
            Subscription::VideoSeek,
        ]
    }

    fn for_event(event: &ServerEvent) -> Subscription {
        match event {
            ServerEvent::ChatMessage(_) => Subscription::ChatMessage,
            ServerEvent::SystemMessage(_) => Subscription::SystemMessage,
            ServerEvent::UsersUpdate(_) => Subscription::UsersUpdate,
            ServerEvent::VideoPlay(_) => Subscription::VideoPlay,
            ServerEvent::VideoPause(_) => Subscription::VideoPause,
            ServerEvent::VideoSeek(_) => Subscription::VideoSeek,
        }
    }
}

/// What a handled event means for the display layer
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// A chat entry was appended
    Message(ChatEntry),
    /// The viewer count was replaced
    Viewers(u32),
    /// An inbound playback command was applied to the player
    Playback(PlaybackCommand),
}

/// State of one joined room view
pub struct WatchSession {
    room: Room,
    chat: ChatSession,
    sync: PlaybackSynchronizer,
    /// Constructed lazily once room metadata is available; commands arriving
    /// before readiness are dropped
    player: Option<Box<dyn Player>>,
    subscriptions: HashSet<Subscription>,
}

impl WatchSession {
    pub fn new(room: Room, me: Identity, history: Vec<ChatEntry>) -> Self {
        let chat = ChatSession::new(room.id.clone(), me, history);
        Self {
            room,
            chat,
            sync: PlaybackSynchronizer::new(),
            player: None,
            subscriptions: Subscription::all().into_iter().collect(),
        }
    }

    /// Attach the player handle. One-time per session lifetime; a second
    /// attach is ignored.
    pub fn attach_player(&mut self, player: Box<dyn Player>) {
        if self.player.is_some() {
            tracing::warn!("Player already attached, ignoring");
            return;
        }
        self.player = Some(player);
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn viewers(&self) -> u32 {
        self.room.viewers
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    /// Current player state, if the player is ready
    pub fn player_state(&self) -> Option<PlayerState> {
        self.player.as_ref().map(|p| p.state())
    }

    /// Current player position, if the player is ready
    pub fn player_position(&self) -> Option<f64> {
        self.player.as_ref().map(|p| p.position())
    }

    /// Route one inbound event into the session state.
    ///
    /// Returns what changed, for display. Events whose subscription was
    /// removed, and playback commands tagged with a foreign room, are
    /// dropped without touching any state.
    pub fn handle_event(&mut self, event: ServerEvent) -> Option<Update> {
        if !self.subscriptions.contains(&Subscription::for_event(&event)) {
            tracing::debug!("Dropping event after unsubscribe");
            return None;
        }

        match event {
            ServerEvent::ChatMessage(payload) => {
                let entry: ChatEntry = payload.into();
                self.chat.receive(entry.clone());
                Some(Update::Message(entry))
            }
            ServerEvent::SystemMessage(payload) => {
                let entry: ChatEntry = payload.into();
                self.chat.receive(entry.clone());
                Some(Update::Message(entry))
            }
            ServerEvent::UsersUpdate(payload) => {
                self.room.viewers = payload.count;
                Some(Update::Viewers(payload.count))
            }
            ServerEvent::VideoPlay(payload) => {
                let time = payload.time;
                self.apply_playback(payload, PlaybackCommand::Play { time })
            }
            ServerEvent::VideoPause(payload) => {
                let time = payload.time;
                self.apply_playback(payload, PlaybackCommand::Pause { time })
            }
            ServerEvent::VideoSeek(payload) => {
                let time = payload.time;
                self.apply_playback(payload, PlaybackCommand::Seek { time })
            }
        }
    }

    fn apply_playback(
        &mut self,
        payload: PlaybackPayload,
        command: PlaybackCommand,
    ) -> Option<Update> {
        if payload.room_id != self.room.id.as_str() {
            tracing::debug!(
                "Dropping playback command tagged for room '{}'",
                payload.room_id
            );
            return None;
        }

        let Some(player) = self.player.as_deref_mut() else {
            // Player not ready yet; dropped, not queued.
            tracing::debug!("Dropping playback command before player readiness");
            return None;
        };

        self.sync.apply_remote(command, player);

        // The apply just caused player transitions; run them through the
        // synchronizer so the guard swallows them. Nothing returned here is
        // ever forwarded to the channel.
        let transitions = player.take_transitions();
        for transition in transitions {
            if let Some(echo) = self.sync.observe(transition) {
                tracing::warn!("Suppressed echo of remote command: {:?}", echo);
            }
        }

        Some(Update::Playback(command))
    }

    /// Local user intent: start playback
    pub fn play(&mut self) {
        match self.player.as_deref_mut() {
            Some(player) => player.play(),
            None => tracing::debug!("Ignoring play before player readiness"),
        }
    }

    /// Local user intent: pause playback
    pub fn pause(&mut self) {
        match self.player.as_deref_mut() {
            Some(player) => player.pause(),
            None => tracing::debug!("Ignoring pause before player readiness"),
        }
    }

    /// Local user intent: scrub to a position
    pub fn seek(&mut self, seconds: f64) {
        match self.player.as_deref_mut() {
            Some(player) => player.seek_to(seconds),
            None => tracing::debug!("Ignoring seek before player readiness"),
        }
    }

    /// Drain pending player transitions into outbound events.
    ///
    /// Transitions caused by remote applies have already been swallowed, so
    /// everything returned here is user-initiated.
    pub fn poll_outbound(&mut self) -> Vec<ClientEvent> {
        let transitions = match self.player.as_deref_mut() {
            Some(player) => player.take_transitions(),
            None => return Vec::new(),
        };

        let mut events = Vec::new();
        for transition in transitions {
            if let Some(command) = self.sync.observe(transition) {
                events.push(self.to_event(command));
            }
        }
        events
    }

    fn to_event(&self, command: PlaybackCommand) -> ClientEvent {
        let payload = PlaybackPayload {
            room_id: self.room.id.as_str().to_string(),
            time: command.time(),
        };
        match command {
            PlaybackCommand::Play { .. } => ClientEvent::VideoPlay(payload),
            PlaybackCommand::Pause { .. } => ClientEvent::VideoPause(payload),
            PlaybackCommand::Seek { .. } => ClientEvent::VideoSeek(payload),
        }
    }

    /// Remove every subscription registered at session start.
    ///
    /// Events arriving after this mutate nothing; the connection itself is
    /// closed by the owner of the channel.
    pub fn teardown(&mut self) {
        self.subscriptions.clear();
        tracing::debug!("Session for room '{}' torn down", self.room.id.as_str());
    }
}
