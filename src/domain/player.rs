//! Player abstraction for the embedded video player.
//!
//! The real player is an external component; the client only observes its
//! state transitions and issues play/pause/seek commands against it. The
//! trait is the seam the playback synchronizer works through, so tests can
//! substitute a scripted implementation.

/// Observed playback states of the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Playing,
    Paused,
    /// Reported while the player rebuffers, typically right after a scrub
    Buffering,
}

/// One state-change notification from the player
///
/// This is the analogue of the embedded player's state-change callback:
/// every transition carries the play-position at which it was observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTransition {
    pub state: PlayerState,
    pub position: f64,
}

/// A playback synchronization command, as broadcast between viewers
///
/// Transient: commands are dispatched and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackCommand {
    Play { time: f64 },
    Pause { time: f64 },
    Seek { time: f64 },
}

impl PlaybackCommand {
    /// The time-offset in seconds carried by the command
    pub fn time(&self) -> f64 {
        match self {
            PlaybackCommand::Play { time }
            | PlaybackCommand::Pause { time }
            | PlaybackCommand::Seek { time } => *time,
        }
    }
}

/// Handle to the embedded video player
///
/// Mutations queue state-change notifications which the session drains via
/// [`Player::take_transitions`]; notifications fire for both user-initiated
/// and command-initiated mutations, which is why the synchronizer needs its
/// remote-apply guard.
pub trait Player: Send {
    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Jump to the given play-position (seconds)
    fn seek_to(&mut self, seconds: f64);

    /// Current play-position (seconds)
    fn position(&self) -> f64;

    /// Current observed state
    fn state(&self) -> PlayerState;

    /// Drain the state-change notifications queued since the last call
    fn take_transitions(&mut self) -> Vec<PlayerTransition>;
}
