//! State Transitions
//!
//! [`reduce_state`] applies one [`Action`] to one [`GameState`] and returns
//! the next state. It reads nothing but its two arguments and never mutates
//! the input, so folding the same actions over the same start state always
//! produces the same snapshots.

use tracing::trace;

use crate::core::constants::{
    BULLET_LIFETIME, BULLET_RADIUS, BULLET_VELOCITY, CANVAS_SIZE, THRUST_ACC,
};
use crate::core::rng::{hash, scale};
use crate::core::vec2::Vec2;
use crate::game::action::Action;
use crate::game::collision::handle_collisions;
use crate::game::state::{create_bullet, Body, Circle, GameState, ObjectId};

/// Wrap a position onto the torus formed by the play area.
///
/// Each axis is shifted by one canvas width at most, so a position ends up
/// in `[0, CANVAS_SIZE)` as long as it moved less than a canvas per tick.
pub fn torus_wrap(position: Vec2) -> Vec2 {
    let wrap = |v: f64| {
        if v < 0.0 {
            v + CANVAS_SIZE
        } else if v >= CANVAS_SIZE {
            v - CANVAS_SIZE
        } else {
            v
        }
    };
    Vec2::new(wrap(position.x), wrap(position.y))
}

/// Advance a body by one tick.
///
/// Angle and position advance by the current angular velocity and
/// velocity (position wrapped). Angular velocity then picks up torque and
/// velocity picks up acceleration, so a new torque or thrust takes effect
/// one tick later.
pub fn move_body(body: &Body) -> Body {
    let angular_velocity = body.angular_velocity + body.torque;

    #[cfg(feature = "debug-tracing")]
    trace!(id = body.id(), position = %body.position, velocity = %body.velocity, "move body");

    Body {
        angular_velocity,
        angle: body.angle + body.angular_velocity,
        position: torus_wrap(body.position.add(body.velocity)),
        velocity: body.velocity.add(body.acceleration),
        ..body.clone()
    }
}

/// Check if a bullet has outlived [`BULLET_LIFETIME`] at time `elapsed`.
#[inline]
pub fn bullet_expired(bullet: &Body, elapsed: f64) -> bool {
    elapsed - bullet.create_time() > BULLET_LIFETIME
}

/// One simulation step.
///
/// 1. Bullets older than the lifetime move to `exited` (replacing whatever
///    the previous transition left there).
/// 2. Ship, remaining bullets and rocks move.
/// 3. `sim_time` becomes `elapsed`.
/// 4. Collisions are resolved.
pub fn tick(state: &GameState, elapsed: f64) -> GameState {
    let (expired, active): (Vec<&Body>, Vec<&Body>) = state
        .bullets
        .iter()
        .partition(|b| bullet_expired(b, elapsed));

    if !expired.is_empty() {
        trace!(count = expired.len(), elapsed, "bullets expired");
    }

    let moved = GameState {
        sim_time: elapsed,
        ship: move_body(&state.ship),
        bullets: active.into_iter().map(move_body).collect(),
        rocks: state.rocks.iter().map(move_body).collect(),
        exited: expired.into_iter().cloned().collect(),
        ..state.clone()
    };

    handle_collisions(moved)
}

/// Fire one bullet from the ship's nose.
///
/// The bullet starts one ship radius ahead along the facing direction and
/// inherits the ship's velocity plus the muzzle velocity.
fn shoot(state: &GameState) -> GameState {
    let ship = &state.ship;
    let facing = ship.facing();

    let bullet = create_bullet(
        ObjectId::numbered(state.object_counter, state.sim_time),
        Circle {
            position: ship.position.add(facing.scale(ship.radius)),
            radius: BULLET_RADIUS,
        },
        ship.velocity.add(facing.scale(BULLET_VELOCITY)),
    );

    trace!(id = bullet.id(), time = state.sim_time, "bullet fired");

    let mut bullets = state.bullets.clone();
    bullets.push(bullet);

    GameState {
        bullets,
        object_counter: state.object_counter + 1,
        ..state.clone()
    }
}

/// Jump the ship to a location drawn from the deterministic RNG.
fn teleport(state: &GameState) -> GameState {
    let hx = hash(state.rng_seed);
    let hy = hash(hx);
    let to_canvas = |h: u32| (scale(h) + 1.0) / 2.0 * CANVAS_SIZE;
    let position = torus_wrap(Vec2::new(to_canvas(hx), to_canvas(hy)));

    trace!(%position, "ship teleported");

    GameState {
        ship: Body {
            position,
            ..state.ship.clone()
        },
        rng_seed: hy,
        ..state.clone()
    }
}

/// Apply one action to one state.
pub fn reduce_state(state: &GameState, action: &Action) -> GameState {
    match *action {
        Action::Rotate { direction } => GameState {
            ship: Body {
                torque: direction,
                ..state.ship.clone()
            },
            ..state.clone()
        },
        Action::Thrust { on } => {
            let acceleration = if on {
                state.ship.facing().scale(THRUST_ACC)
            } else {
                Vec2::ZERO
            };
            GameState {
                ship: Body {
                    acceleration,
                    ..state.ship.clone()
                },
                ..state.clone()
            }
        }
        Action::Shoot => shoot(state),
        Action::Tick { elapsed } => tick(state, elapsed),
        Action::Teleport => teleport(state),
    }
}

/// Fold a sequence of actions over a start state, returning the final state.
pub fn fold_actions<'a, I>(initial: GameState, actions: I) -> GameState
where
    I: IntoIterator<Item = &'a Action>,
{
    actions
        .into_iter()
        .fold(initial, |state, action| reduce_state(&state, action))
}
