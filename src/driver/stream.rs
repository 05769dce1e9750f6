//! Synchronous State Stream
//!
//! Folds an action iterator into a stream of frames. The frame on which the
//! game ends carries [`Control::Stop`] and is the last one produced.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::action::Action;
use crate::game::state::GameState;
use crate::game::tick::reduce_state;
use crate::view::{View, ViewError};

/// What the driver should do after rendering a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    /// Keep feeding actions
    Continue,
    /// The game is over; this was the final frame
    Stop,
}

/// One snapshot and the control signal that goes with it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// State after applying one action
    pub state: GameState,
    /// Stop after this frame?
    pub control: Control,
}

/// Iterator of frames produced by folding `actions` over a start state.
pub struct StateStream<I> {
    actions: I,
    state: GameState,
    stopped: bool,
}

impl<I> StateStream<I>
where
    I: Iterator<Item = Action>,
{
    /// Stream starting from `initial`.
    pub fn new(initial: GameState, actions: I) -> Self {
        Self {
            actions,
            state: initial,
            stopped: false,
        }
    }

    /// Latest state (the start state before the first frame).
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

impl<I> Iterator for StateStream<I>
where
    I: Iterator<Item = Action>,
{
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.stopped {
            return None;
        }

        let action = self.actions.next()?;
        self.state = reduce_state(&self.state, &action);

        let control = if self.state.game_over {
            debug!(time = self.state.sim_time, "game over, stream stopped");
            self.stopped = true;
            Control::Stop
        } else {
            Control::Continue
        };

        Some(Frame {
            state: self.state.clone(),
            control,
        })
    }
}

/// Render every frame of a stream, calling `finish` once after the
/// game-over frame. Returns the last state.
pub fn drive<I, V>(initial: GameState, actions: I, view: &mut V) -> Result<GameState, ViewError>
where
    I: IntoIterator<Item = Action>,
    V: View,
{
    let mut stream = StateStream::new(initial, actions.into_iter());

    for frame in stream.by_ref() {
        view.render(&frame.state)?;
        if frame.control == Control::Stop {
            view.finish(&frame.state)?;
        }
    }

    Ok(stream.state().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::START_ROCK_RADIUS;
    use crate::core::vec2::Vec2;
    use crate::game::state::{create_rock, initial_state_seeded, Circle, ObjectId};
    use crate::view::SceneView;

    /// A rock parked on top of the ship.
    fn doomed_state() -> GameState {
        let state = initial_state_seeded(1);
        let rock = create_rock(
            ObjectId::numbered(state.object_counter, 0.0),
            Circle {
                position: state.ship.position,
                radius: START_ROCK_RADIUS,
            },
            Vec2::ZERO,
        );
        GameState {
            rocks: vec![rock],
            object_counter: state.object_counter + 1,
            ..state
        }
    }

    #[test]
    fn test_frames_per_action() {
        let actions = (0..10).map(|t| Action::tick(t as f64));
        let frames: Vec<Frame> = StateStream::new(initial_state_seeded(1), actions).collect();

        assert_eq!(frames.len(), 10);
        assert!(frames.iter().all(|f| f.control == Control::Continue));
        assert_eq!(frames[9].state.sim_time, 9.0);
    }

    #[test]
    fn test_stream_stops_at_game_over() {
        let actions = (0..10).map(|t| Action::tick(t as f64));
        let frames: Vec<Frame> = StateStream::new(doomed_state(), actions).collect();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].control, Control::Stop);
        assert!(frames[0].state.game_over);
    }

    #[test]
    fn test_drive_finishes_once() {
        let mut view = SceneView::new();
        let actions = (0..10).map(|t| Action::tick(t as f64));
        let last = drive(doomed_state(), actions, &mut view).unwrap();

        assert!(last.game_over);
        assert!(view.is_finished());
        assert_eq!(view.frames(), 1);
    }

    #[test]
    fn test_drive_without_game_over() {
        let mut view = SceneView::new();
        let actions = vec![Action::Shoot, Action::tick(0.0), Action::tick(1.0)];
        let last = drive(initial_state_seeded(1), actions, &mut view).unwrap();

        assert!(!view.is_finished());
        assert_eq!(view.frames(), 3);
        assert_eq!(last.bullets.len(), 1);
    }
}
