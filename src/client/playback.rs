//! Playback synchronization state machine.
//!
//! Translates locally observed player transitions into outbound
//! synchronization commands, and applies inbound commands to the player.
//! The two directions must never feed into each other: a transition caused
//! by an inbound command is suppressed by the remote-apply guard and is not
//! re-broadcast.

use crate::domain::{PlaybackCommand, Player, PlayerState, PlayerTransition};

/// Position delta below which a rebuffer is not considered a scrub.
const SCRUB_EPSILON: f64 = 0.001;

/// State machine over the player's observed states.
///
/// - playing → emit a play command at the current position
/// - paused → emit a pause command at the current position
/// - buffering at a moved position → emit a seek command (scrub heuristic;
///   the player exposes no dedicated seek event)
///
/// Inbound commands go through [`PlaybackSynchronizer::apply_remote`], which
/// arms the guard so the resulting transitions are swallowed instead of
/// echoed back out.
#[derive(Debug)]
pub struct PlaybackSynchronizer {
    /// Play-position at the last emit (or remote apply)
    last_emitted: f64,
    /// Remote-apply guard: the state the player must settle in before
    /// observed transitions count as user-initiated again
    settle: Option<PlayerState>,
}

impl PlaybackSynchronizer {
    pub fn new() -> Self {
        Self {
            last_emitted: 0.0,
            settle: None,
        }
    }

    /// Process one locally observed player transition.
    ///
    /// Returns the command to broadcast, if the transition was
    /// user-initiated.
    pub fn observe(&mut self, transition: PlayerTransition) -> Option<PlaybackCommand> {
        let PlayerTransition { state, position } = transition;

        if let Some(expected) = self.settle {
            // Transition caused by a remote command we just applied. Track
            // the position so the scrub heuristic stays calibrated, emit
            // nothing, and disarm once the player settles.
            self.last_emitted = position;
            if state == expected {
                self.settle = None;
            }
            return None;
        }

        match state {
            PlayerState::Playing => {
                self.last_emitted = position;
                Some(PlaybackCommand::Play { time: position })
            }
            PlayerState::Paused => {
                self.last_emitted = position;
                Some(PlaybackCommand::Pause { time: position })
            }
            PlayerState::Buffering => {
                if (position - self.last_emitted).abs() > SCRUB_EPSILON {
                    self.last_emitted = position;
                    Some(PlaybackCommand::Seek { time: position })
                } else {
                    None
                }
            }
        }
    }

    /// Apply an inbound command to the player.
    ///
    /// Seeks to the carried offset first, then (for play/pause) invokes the
    /// corresponding transition. Arms the guard with the state the player
    /// settles in; a bare seek leaves the run-state alone, so the guard
    /// expects whatever state the player resumes after rebuffering.
    pub fn apply_remote(&mut self, command: PlaybackCommand, player: &mut dyn Player) {
        player.seek_to(command.time());

        let settle = match command {
            PlaybackCommand::Play { .. } => {
                player.play();
                PlayerState::Playing
            }
            PlaybackCommand::Pause { .. } => {
                player.pause();
                PlayerState::Paused
            }
            PlaybackCommand::Seek { .. } => player.state(),
        };

        self.settle = Some(settle);
        self.last_emitted = command.time();
    }
}

impl Default for PlaybackSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}
