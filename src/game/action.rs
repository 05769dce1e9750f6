//! Actions and Input Mapping
//!
//! Every state transition is keyed by one [`Action`]. The input adapter turns
//! raw key transitions into actions with [`map_key`]; the timer produces
//! [`Action::Tick`] directly.

use serde::{Deserialize, Serialize};

use crate::core::constants::ROTATION_ACC;

// =============================================================================
// ACTIONS
// =============================================================================

/// A discrete input or timer event. Consumed exactly once by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Set the ship's torque: negative counter-rotates, 0 stops.
    Rotate {
        /// Signed angular increment per tick
        direction: f64,
    },
    /// Start or stop thrusting along the ship's facing.
    Thrust {
        /// Whether the engine is on
        on: bool,
    },
    /// Fire one bullet.
    Shoot,
    /// Advance the simulation to `elapsed`.
    Tick {
        /// Timer value; monotonically increasing
        elapsed: f64,
    },
    /// Jump the ship to a pseudo-random location.
    Teleport,
}

impl Action {
    /// Rotate action.
    pub const fn rotate(direction: f64) -> Self {
        Action::Rotate { direction }
    }

    /// Thrust action.
    pub const fn thrust(on: bool) -> Self {
        Action::Thrust { on }
    }

    /// Tick action.
    pub const fn tick(elapsed: f64) -> Self {
        Action::Tick { elapsed }
    }

    /// Check if this is a timer tick.
    #[inline]
    pub fn is_tick(&self) -> bool {
        matches!(self, Action::Tick { .. })
    }
}

// =============================================================================
// KEYS
// =============================================================================

/// Logical keys the game listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Rotate left
    ArrowLeft,
    /// Rotate right
    ArrowRight,
    /// Thrust
    ArrowUp,
    /// Fire
    Space,
    /// Teleport
    Enter,
}

impl Key {
    /// Every key, in display order.
    pub const ALL: [Key; 5] = [
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::ArrowUp,
        Key::Space,
        Key::Enter,
    ];

    /// Keyboard event code (as in `KeyboardEvent.code`).
    pub const fn code(self) -> &'static str {
        match self {
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            Key::ArrowUp => "ArrowUp",
            Key::Space => "Space",
            Key::Enter => "Enter",
        }
    }

    /// Parse a keyboard event code. Unknown codes are ignored by the game.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }
}

/// Direction of a key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyTransition {
    /// Key pressed
    Down,
    /// Key released
    Up,
}

/// A raw key event from the input device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    /// Which key
    pub key: Key,
    /// Pressed or released
    pub transition: KeyTransition,
    /// Auto-repeat from a held key
    pub repeat: bool,
}

impl KeyInput {
    /// Non-repeating key press.
    pub const fn down(key: Key) -> Self {
        Self {
            key,
            transition: KeyTransition::Down,
            repeat: false,
        }
    }

    /// Key release.
    pub const fn up(key: Key) -> Self {
        Self {
            key,
            transition: KeyTransition::Up,
            repeat: false,
        }
    }
}

/// Map a key event to the action it triggers.
///
/// Auto-repeats never produce an action. `rotate_step` is the torque applied
/// while a rotate key is held (usually [`ROTATION_ACC`]).
pub fn map_key(input: KeyInput, rotate_step: f64) -> Option<Action> {
    if input.repeat {
        return None;
    }

    use KeyTransition::{Down, Up};
    match (input.key, input.transition) {
        (Key::ArrowLeft, Down) => Some(Action::rotate(-rotate_step)),
        (Key::ArrowRight, Down) => Some(Action::rotate(rotate_step)),
        (Key::ArrowLeft | Key::ArrowRight, Up) => Some(Action::rotate(0.0)),
        (Key::ArrowUp, Down) => Some(Action::thrust(true)),
        (Key::ArrowUp, Up) => Some(Action::thrust(false)),
        (Key::Space, Down) => Some(Action::Shoot),
        (Key::Enter, Down) => Some(Action::Teleport),
        (Key::Space | Key::Enter, Up) => None,
    }
}

/// [`map_key`] with the default rotation step.
#[inline]
pub fn map_key_default(input: KeyInput) -> Option<Action> {
    map_key(input, ROTATION_ACC)
}

// =============================================================================
// TESTS
// =============================================================================
