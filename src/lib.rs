//! # Asteroids Fold
//!
//! An Asteroids game written as a pure reducer: input and timer events are
//! merged into one action sequence, folded into immutable game snapshots,
//! and each snapshot is handed to a view.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ASTEROIDS FOLD                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/              - Pure primitives                        │
//! │  ├── constants.rs   - Engine parameters                      │
//! │  ├── vec2.rs        - Immutable 2D vector                    │
//! │  ├── rng.rs         - Stateless LCG hash                     │
//! │  └── hash.rs        - State digest for replay checks         │
//! │                                                              │
//! │  game/              - Transition engine (pure)               │
//! │  ├── state.rs       - Bodies and game snapshot               │
//! │  ├── action.rs      - Actions and key mapping                │
//! │  ├── tick.rs        - reduce_state, movement, expiry         │
//! │  ├── collision.rs   - Collisions and rock splitting          │
//! │  └── replay.rs      - Recorded action tapes                  │
//! │                                                              │
//! │  driver/            - Stream composition (effectful)         │
//! │  ├── stream.rs      - Synchronous fold into frames           │
//! │  └── runtime.rs     - Timer + key input on tokio             │
//! │                                                              │
//! │  view/              - Render adapter (effectful)             │
//! │  └── scene.rs       - Headless scene graph                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! timer ─┐
//!        ├─► Action ─► reduce_state(state, action) ─► GameState ─► View
//! keys ──┘                     ▲                           │
//!                              └───────────────────────────┘
//! ```
//!
//! `core/` and `game/` never mutate a snapshot once it has been returned.
//! Given the same seed and actions, the final state hash is identical on
//! every run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod driver;
pub mod view;

// Re-export commonly used types
pub use crate::core::vec2::Vec2;
pub use crate::core::rng::RngStream;
pub use game::action::{Action, Key, KeyInput, KeyTransition};
pub use game::state::{Body, GameState, ObjectId, ViewKind, initial_state, initial_state_seeded};
pub use game::tick::reduce_state;
pub use game::replay::ReplayTape;
pub use driver::{Control, DriverConfig, Frame, StateStream};
pub use view::{SceneView, View};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
