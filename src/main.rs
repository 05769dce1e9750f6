//! Asteroids Fold
//!
//! Headless demo: drives one game on the tokio runtime with a scripted
//! pilot, then replays the recorded tape to verify determinism.

use std::time::Duration;
use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use asteroids::{
    VERSION,
    core::constants::{CANVAS_SIZE, DEFAULT_SEED, START_ROCKS_COUNT},
    driver::{run_game, DriverConfig},
    game::{
        action::{Key, KeyInput},
        replay::{replay_hash, ReplayTape},
        state::initial_state_seeded,
    },
    view::SceneView,
};

/// Demo tick budget (20 seconds at the default 10 ms interval).
const DEMO_MAX_TICKS: u64 = 2000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Asteroids Fold v{}", VERSION);
    info!("Canvas: {}x{}, rocks: {}", CANVAS_SIZE, CANVAS_SIZE, START_ROCKS_COUNT);

    demo_game().await
}

/// Key presses for the scripted pilot, with the delay before each one.
fn pilot_script() -> Vec<(Duration, KeyInput)> {
    let ms = Duration::from_millis;
    let mut script = vec![
        (ms(50), KeyInput::down(Key::ArrowRight)),
        (ms(150), KeyInput::up(Key::ArrowRight)),
        (ms(10), KeyInput::down(Key::ArrowUp)),
        (ms(200), KeyInput::up(Key::ArrowUp)),
    ];
    for _ in 0..20 {
        script.push((ms(120), KeyInput::down(Key::Space)));
        script.push((ms(30), KeyInput::up(Key::Space)));
        script.push((ms(60), KeyInput::down(Key::ArrowLeft)));
        script.push((ms(90), KeyInput::up(Key::ArrowLeft)));
    }
    script.push((ms(100), KeyInput::down(Key::Enter)));
    script
}

/// Run one game, then verify the replay.
async fn demo_game() -> anyhow::Result<()> {
    info!("=== Starting Demo Game ===");

    let seed = DEFAULT_SEED;
    let config = DriverConfig {
        max_ticks: Some(DEMO_MAX_TICKS),
        ..Default::default()
    };

    let (tx, rx) = mpsc::channel::<KeyInput>(32);
    let pilot = tokio::spawn(async move {
        for (delay, key) in pilot_script() {
            tokio::time::sleep(delay).await;
            if tx.send(key).await.is_err() {
                // Driver finished first.
                break;
            }
        }
    });

    let mut view = SceneView::new();
    let outcome = run_game(&config, initial_state_seeded(seed), rx, &mut view).await?;
    pilot.abort();

    let state = &outcome.final_state;
    info!("=== Game Results ===");
    info!("Ticks: {}, actions: {}", outcome.ticks, outcome.actions.len());
    info!(
        "Score: {}, rocks left: {}, bullets in flight: {}",
        state.score,
        state.rocks.len(),
        state.bullets.len()
    );
    info!("Scene elements: {}", view.scene().len());
    if outcome.game_over() {
        info!("Ship destroyed at time {}", state.sim_time);
    }

    let hash = state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    let summary = serde_json::json!({
        "sim_time": state.sim_time,
        "score": state.score,
        "object_counter": state.object_counter,
        "game_over": state.game_over,
        "ship": state.ship,
    });
    info!("Final state: {}", serde_json::to_string(&summary)?);

    // Verify determinism by replaying the recorded tape
    info!("=== Verifying Determinism ===");
    let tape = ReplayTape {
        seed,
        actions: outcome.actions,
    };
    let bytes = tape.encode()?;
    info!("Tape: {} actions, {} bytes", tape.len(), bytes.len());

    let decoded = ReplayTape::decode(&bytes)?;
    let replay = replay_hash(&decoded);
    info!("Replay State Hash: {}", hex::encode(replay));

    if hash == replay {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    Ok(())
}
