//! Async Game Driver
//!
//! Merges a periodic timer with key input into one action sequence, folds
//! it through the engine and renders every resulting state. Runs until the
//! game ends or the optional tick limit is reached.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::core::constants::ROTATION_ACC;
use crate::game::action::{map_key, Action, KeyInput};
use crate::game::state::GameState;
use crate::game::tick::reduce_state;
use crate::view::{View, ViewError};

/// Driver configuration.
#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Timer period between ticks
    pub tick_interval: Duration,
    /// Torque applied while a rotate key is held
    pub rotate_step: f64,
    /// Stop after this many ticks even if the game is still running
    pub max_ticks: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(10),
            rotate_step: ROTATION_ACC,
            max_ticks: None,
        }
    }
}

/// Driver errors.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The view failed to render.
    #[error("View error: {0}")]
    View(#[from] ViewError),
}

/// How a driven game ended.
#[derive(Clone, Debug)]
pub struct GameOutcome {
    /// Last state produced
    pub final_state: GameState,
    /// Every action applied, in order
    pub actions: Vec<Action>,
    /// Number of timer ticks applied
    pub ticks: u64,
}

impl GameOutcome {
    /// Whether the game ended with the ship destroyed.
    pub fn game_over(&self) -> bool {
        self.final_state.game_over
    }
}

/// Run a game from `initial`.
///
/// The timer emits `Tick(0)`, `Tick(1)`, ... Key events are mapped with
/// [`map_key`]; auto-repeats and key-ups that trigger nothing are dropped.
/// When both sources are ready, the runtime picks the order. After the
/// first game-over state is rendered, `view.finish` is called once and the
/// driver returns. A closed input channel only stops key input; ticks go on.
pub async fn run_game<V: View>(
    config: &DriverConfig,
    initial: GameState,
    mut inputs: mpsc::Receiver<KeyInput>,
    view: &mut V,
) -> Result<GameOutcome, DriverError> {
    let mut state = initial;
    let mut actions = Vec::new();
    let mut ticks: u64 = 0;
    let mut inputs_open = true;

    let mut timer = interval(config.tick_interval);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(interval = ?config.tick_interval, max_ticks = ?config.max_ticks, "game started");

    loop {
        let action = tokio::select! {
            _ = timer.tick() => {
                let action = Action::tick(ticks as f64);
                ticks += 1;
                Some(action)
            }
            key = inputs.recv(), if inputs_open => match key {
                Some(key) => map_key(key, config.rotate_step),
                None => {
                    debug!("input channel closed");
                    inputs_open = false;
                    None
                }
            },
        };

        let Some(action) = action else {
            continue;
        };

        state = reduce_state(&state, &action);
        actions.push(action);
        view.render(&state)?;

        if state.game_over {
            view.finish(&state)?;
            info!(ticks, score = state.score, "game over");
            break;
        }

        if action.is_tick() && config.max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "tick limit reached");
            break;
        }
    }

    Ok(GameOutcome {
        final_state: state,
        actions,
        ticks,
    })
}
