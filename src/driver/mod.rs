//! Stream composition.
//!
//! The only part of the crate that knows about time or input devices. It
//! turns input into actions, folds them through the engine and hands each
//! snapshot to a [`View`](crate::view::View).
//!
//! - `stream`: synchronous fold over an action iterator
//! - `runtime`: tokio driver merging a timer with key input

pub mod stream;
pub mod runtime;

pub use stream::{Control, Frame, StateStream, drive};
pub use runtime::{DriverConfig, DriverError, GameOutcome, run_game};
