//! Simulation Constants
//!
//! Fixed parameters of the transition engine. None of these are
//! runtime-configurable; replays depend on them staying put.

/// Side length of the square play area.
pub const CANVAS_SIZE: f64 = 600.0;

/// Age (in simulated time units) after which a bullet expires.
pub const BULLET_LIFETIME: f64 = 100.0;

/// Collision radius of a bullet.
pub const BULLET_RADIUS: f64 = 3.0;

/// Muzzle speed added to the ship's velocity when firing.
pub const BULLET_VELOCITY: f64 = 2.0;

/// Radius of the rocks present at the start of the game.
pub const START_ROCK_RADIUS: f64 = 30.0;

/// Number of rocks present at the start of the game.
pub const START_ROCKS_COUNT: u64 = 5;

/// Rocks smaller than this are destroyed outright instead of splitting.
pub const MIN_SPLIT_RADIUS: f64 = START_ROCK_RADIUS / 4.0;

/// Torque applied per rotate key press.
pub const ROTATION_ACC: f64 = 0.1;

/// Acceleration magnitude while thrusting.
pub const THRUST_ACC: f64 = 0.1;

/// Simulation time of the initial state.
pub const START_TIME: f64 = 0.0;

/// Collision radius of the ship.
pub const SHIP_RADIUS: f64 = 20.0;

/// Reserved identity of the ship.
pub const SHIP_ID: &str = "ship";

/// Seed threaded through the RNG when none is supplied.
pub const DEFAULT_SEED: u32 = 123;
