//! Game State Definitions
//!
//! Value types for every body in play and the aggregate snapshot the engine
//! folds actions into. Snapshots are never mutated once built; transitions
//! construct new ones.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::core::constants::{
    CANVAS_SIZE, DEFAULT_SEED, SHIP_ID, SHIP_RADIUS, START_ROCKS_COUNT, START_ROCK_RADIUS,
    START_TIME,
};
use crate::core::hash::{compute_state_hash, StateHash, StateHasher};
use crate::core::rng::RngStream;
use crate::core::vec2::Vec2;

// =============================================================================
// IDENTITY
// =============================================================================

/// Kind of visual a body is drawn as. Also the prefix of generated ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ViewKind {
    /// The player's ship
    Ship = 0,
    /// An asteroid
    Rock = 1,
    /// A fired bullet
    Bullet = 2,
}

impl ViewKind {
    /// Tag used as the id prefix and CSS-style class name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ViewKind::Ship => "ship",
            ViewKind::Rock => "rock",
            ViewKind::Bullet => "bullet",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a body and the simulation time it was created at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectId {
    /// Unique among all bodies alive in one state
    pub id: String,
    /// Used for expiry
    pub create_time: f64,
}

impl ObjectId {
    /// Identity minted from the object counter.
    pub fn numbered(number: u64, create_time: f64) -> Self {
        Self {
            id: number.to_string(),
            create_time,
        }
    }
}

/// Position and size of a circular body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre
    pub position: Vec2,
    /// Radius, always positive
    pub radius: f64,
}

// =============================================================================
// BODY
// =============================================================================

/// Any circular object taking part in movement and collision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Identity and creation time
    pub identity: ObjectId,

    /// How the render adapter draws it
    pub view_kind: ViewKind,

    /// Centre, always inside the play area after a tick
    pub position: Vec2,

    /// Collision radius
    pub radius: f64,

    /// Displacement per tick
    pub velocity: Vec2,

    /// Change in velocity per tick
    pub acceleration: Vec2,

    /// Facing, in degrees
    pub angle: f64,

    /// Change in angle per tick
    pub angular_velocity: f64,

    /// Change in angular velocity per tick
    pub torque: f64,
}

impl Body {
    /// Unique id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    /// Simulation time this body was created at.
    #[inline]
    pub fn create_time(&self) -> f64 {
        self.identity.create_time
    }

    /// Position and radius.
    #[inline]
    pub fn circle(&self) -> Circle {
        Circle {
            position: self.position,
            radius: self.radius,
        }
    }

    /// Unit vector the body is facing.
    #[inline]
    pub fn facing(&self) -> Vec2 {
        Vec2::unit_vec_in_direction(self.angle)
    }

    fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_str(&self.identity.id);
        hasher.update_f64(self.identity.create_time);
        hasher.update_u8(self.view_kind as u8);
        hasher.update_vec2(self.position);
        hasher.update_f64(self.radius);
        hasher.update_vec2(self.velocity);
        hasher.update_vec2(self.acceleration);
        hasher.update_f64(self.angle);
        hasher.update_f64(self.angular_velocity);
        hasher.update_f64(self.torque);
    }
}

/// The ship: centred, at rest, facing up.
pub fn create_ship() -> Body {
    Body {
        identity: ObjectId {
            id: SHIP_ID.to_string(),
            create_time: START_TIME,
        },
        view_kind: ViewKind::Ship,
        position: Vec2::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0),
        radius: SHIP_RADIUS,
        velocity: Vec2::ZERO,
        acceleration: Vec2::ZERO,
        angle: 0.0,
        angular_velocity: 0.0,
        torque: 0.0,
    }
}

/// Shared constructor for rocks and bullets.
///
/// The body's id is the view kind tag followed by the raw id, so a rock and a
/// bullet minted from the same number never clash.
pub fn create_circle(view_kind: ViewKind, oid: ObjectId, circle: Circle, velocity: Vec2) -> Body {
    debug_assert!(circle.radius > 0.0, "body radius must be positive");
    Body {
        identity: ObjectId {
            id: format!("{}{}", view_kind.as_str(), oid.id),
            create_time: oid.create_time,
        },
        view_kind,
        position: circle.position,
        radius: circle.radius,
        velocity,
        acceleration: Vec2::ZERO,
        angle: 0.0,
        angular_velocity: 0.0,
        torque: 0.0,
    }
}

/// Create a rock.
pub fn create_rock(oid: ObjectId, circle: Circle, velocity: Vec2) -> Body {
    create_circle(ViewKind::Rock, oid, circle, velocity)
}

/// Create a bullet.
pub fn create_bullet(oid: ObjectId, circle: Circle, velocity: Vec2) -> Body {
    create_circle(ViewKind::Bullet, oid, circle, velocity)
}

// =============================================================================
// GAME STATE
// =============================================================================

/// One immutable snapshot of the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Elapsed value of the most recent tick
    pub sim_time: f64,

    /// The ship (singleton, id `"ship"`)
    pub ship: Body,

    /// Live bullets in firing order
    pub bullets: Vec<Body>,

    /// Live rocks
    pub rocks: Vec<Body>,

    /// Bodies removed by the most recent transition.
    ///
    /// May hold the same bullet twice when it hit two rocks at once; the
    /// render adapter dedupes.
    pub exited: Vec<Body>,

    /// Source of numeric id suffixes. Never decreases.
    pub object_counter: u64,

    /// Set once the ship overlaps a rock
    pub game_over: bool,

    /// One point per bullet that hit a rock
    pub score: u32,

    /// Current hash of the deterministic RNG, consumed by teleports
    pub rng_seed: u32,
}

impl GameState {
    /// Look up a live body (ship, bullet or rock) by id.
    pub fn find_body(&self, id: &str) -> Option<&Body> {
        std::iter::once(&self.ship)
            .chain(&self.bullets)
            .chain(&self.rocks)
            .find(|b| b.id() == id)
    }

    /// All live bodies: ship first, then bullets, then rocks.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        std::iter::once(&self.ship)
            .chain(&self.bullets)
            .chain(&self.rocks)
    }

    /// Whether the game is still running.
    #[inline]
    pub fn is_running(&self) -> bool {
        !self.game_over
    }

    /// Deterministic digest of every field.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.sim_time, self.rng_seed, |hasher| {
            self.ship.hash_into(hasher);

            hasher.update_u64(self.bullets.len() as u64);
            for bullet in &self.bullets {
                bullet.hash_into(hasher);
            }

            hasher.update_u64(self.rocks.len() as u64);
            for rock in &self.rocks {
                rock.hash_into(hasher);
            }

            hasher.update_u64(self.exited.len() as u64);
            for body in &self.exited {
                body.hash_into(hasher);
            }

            hasher.update_u64(self.object_counter);
            hasher.update_bool(self.game_over);
            hasher.update_u32(self.score);
        })
    }
}

/// Starting rocks: all at the canvas origin with the given directions.
fn start_rocks(directions: impl Iterator<Item = Vec2>) -> Vec<Body> {
    directions
        .enumerate()
        .map(|(i, direction)| {
            create_rock(
                ObjectId::numbered(i as u64, START_TIME),
                Circle {
                    position: Vec2::ZERO,
                    radius: START_ROCK_RADIUS,
                },
                direction,
            )
        })
        .collect()
}

fn start_state(rocks: Vec<Body>, rng_seed: u32) -> GameState {
    GameState {
        sim_time: START_TIME,
        ship: create_ship(),
        bullets: Vec::new(),
        rocks,
        exited: Vec::new(),
        object_counter: START_ROCKS_COUNT,
        game_over: false,
        score: 0,
        rng_seed,
    }
}

/// Initial state with non-reproducible rock directions.
///
/// Each direction component is `0.5 - uniform(0, 1)`. Use
/// [`initial_state_seeded`] when the game has to replay.
pub fn initial_state() -> GameState {
    let directions = (0..START_ROCKS_COUNT)
        .map(|_| Vec2::new(0.5 - rand::random::<f64>(), 0.5 - rand::random::<f64>()))
        .collect::<Vec<_>>();

    start_state(start_rocks(directions.into_iter()), DEFAULT_SEED)
}

/// Initial state with rock directions drawn from the deterministic RNG.
///
/// Components are `0.5 * scale(h)`, the same `[-0.5, 0.5]` range as
/// [`initial_state`]. The stream continues in `rng_seed`.
pub fn initial_state_seeded(seed: u32) -> GameState {
    let mut stream = RngStream::new(seed);
    let directions = (0..START_ROCKS_COUNT)
        .map(|_| {
            let x = 0.5 * stream.next_value();
            let y = 0.5 * stream.next_value();
            Vec2::new(x, y)
        })
        .collect::<Vec<_>>();

    start_state(start_rocks(directions.into_iter()), stream.seed())
}

// =============================================================================
// TESTS
// =============================================================================
