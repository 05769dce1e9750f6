//! Replay Tapes
//!
//! A tape is a seed plus the exact action sequence a game received. Folding
//! the tape from `initial_state_seeded(seed)` reproduces every snapshot
//! bit for bit.

use serde::{Deserialize, Serialize};

use crate::core::hash::StateHash;
use crate::game::action::Action;
use crate::game::state::{initial_state_seeded, GameState};
use crate::game::tick::{fold_actions, reduce_state};

/// Replay errors.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Tape bytes could not be decoded.
    #[error("Invalid tape encoding: {0}")]
    Decode(#[from] bincode::Error),

    /// Tape failed to encode.
    #[error("Tape encoding failed: {0}")]
    Encode(String),
}

/// Recorded game input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayTape {
    /// Seed for the initial rock directions and teleports
    pub seed: u32,
    /// Actions in the order they were applied
    pub actions: Vec<Action>,
}

impl ReplayTape {
    /// Empty tape for a seed.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            actions: Vec::new(),
        }
    }

    /// Append an action.
    pub fn record(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Start state the tape replays from.
    pub fn initial_state(&self) -> GameState {
        initial_state_seeded(self.seed)
    }

    /// Serialize with bincode.
    pub fn encode(&self) -> Result<Vec<u8>, ReplayError> {
        bincode::serialize(self).map_err(|e| ReplayError::Encode(e.to_string()))
    }

    /// Deserialize from bincode.
    pub fn decode(bytes: &[u8]) -> Result<Self, ReplayError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Replay a tape, returning every intermediate snapshot (initial state
/// excluded).
pub fn replay(tape: &ReplayTape) -> Vec<GameState> {
    tape.actions
        .iter()
        .scan(tape.initial_state(), |state, action| {
            *state = reduce_state(state, action);
            Some(state.clone())
        })
        .collect()
}

/// Replay a tape and return only the final state.
pub fn replay_final(tape: &ReplayTape) -> GameState {
    fold_actions(tape.initial_state(), &tape.actions)
}

/// Digest of the final state of a replay.
pub fn replay_hash(tape: &ReplayTape) -> StateHash {
    replay_final(tape).compute_hash()
}
