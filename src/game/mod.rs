//! Game Logic Module
//!
//! The pure transition engine. Nothing in here touches a clock, a runtime or
//! a screen.
//!
//! ## Module Structure
//!
//! - `state`: Bodies, identities and the game snapshot
//! - `action`: Actions and key-to-action mapping
//! - `tick`: Movement, expiry and the action dispatcher
//! - `collision`: Collision detection and rock splitting
//! - `replay`: Recorded action tapes

pub mod state;
pub mod action;
pub mod tick;
pub mod collision;
pub mod replay;

// Re-export key types
pub use state::{Body, Circle, GameState, ObjectId, ViewKind, initial_state, initial_state_seeded};
pub use action::{Action, Key, KeyInput, KeyTransition, map_key};
pub use tick::{reduce_state, fold_actions};
pub use replay::{ReplayTape, ReplayError};
