//! Core primitives.
//!
//! Pure, allocation-free building blocks shared by the engine: constants,
//! vector math, the deterministic RNG and the state digest.

pub mod constants;
pub mod vec2;
pub mod rng;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use rng::RngStream;
pub use hash::{StateHash, StateHasher, compute_state_hash};
