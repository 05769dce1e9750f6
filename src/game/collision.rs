//! Collision Detection
//!
//! Bullets destroy rocks, big rocks split in two, and a rock touching the
//! ship ends the game. Runs once per tick on the post-movement state.

use std::collections::BTreeSet;
use tracing::{debug, trace};

use crate::core::constants::MIN_SPLIT_RADIUS;
use crate::core::vec2::Vec2;
use crate::game::state::{create_rock, Body, Circle, GameState, ObjectId};

/// Check if two circular bodies overlap.
///
/// Strict: bodies exactly touching do not collide.
#[inline]
pub fn bodies_collided(a: &Body, b: &Body) -> bool {
    a.position.sub(b.position).length() < a.radius + b.radius
}

/// A bullet/rock pair that overlaps, as indices into the state's vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulletRockCollision {
    /// Index into `bullets`
    pub bullet: usize,
    /// Index into `rocks`
    pub rock: usize,
}

/// Every overlapping bullet/rock pair, bullets outer, rocks inner.
///
/// One bullet or rock may appear in several pairs.
pub fn find_bullet_rock_collisions(bullets: &[Body], rocks: &[Body]) -> Vec<BulletRockCollision> {
    bullets
        .iter()
        .enumerate()
        .flat_map(|(bullet, b)| {
            rocks
                .iter()
                .enumerate()
                .filter(move |(_, r)| bodies_collided(b, r))
                .map(move |(rock, _)| BulletRockCollision { bullet, rock })
        })
        .collect()
}

/// Check if the ship overlaps any rock.
pub fn ship_collided(ship: &Body, rocks: &[Body]) -> bool {
    rocks.iter().any(|r| bodies_collided(ship, r))
}

/// Shape and velocity of a rock about to be spawned from a split.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// Half the parent's radius, at the parent's position
    pub circle: Circle,
    /// Parent velocity turned a quarter, scaled by +1 or -1
    pub velocity: Vec2,
}

/// Split a rock into two fragments flying apart perpendicular to its path.
///
/// Rocks below a quarter of the starting radius are destroyed outright.
pub fn split_rock(rock: &Body) -> Option<[Fragment; 2]> {
    if rock.radius < MIN_SPLIT_RADIUS {
        return None;
    }

    let child = |dir: f64| Fragment {
        circle: Circle {
            position: rock.position,
            radius: rock.radius / 2.0,
        },
        velocity: rock.velocity.orthogonal().scale(dir),
    };

    Some([child(1.0), child(-1.0)])
}

/// Resolve all collisions in a post-movement state.
///
/// - `bullets` loses every bullet that hit a rock.
/// - `rocks` loses every rock that was hit and gains the fragments, which
///   take ids from `object_counter` onwards and `create_time = sim_time`.
/// - `exited` is extended with the hit bullets and rocks, one entry per
///   colliding pair.
/// - `game_over` is whether the ship overlaps a rock now.
pub fn handle_collisions(state: GameState) -> GameState {
    let ship_hit = ship_collided(&state.ship, &state.rocks);
    let collisions = find_bullet_rock_collisions(&state.bullets, &state.rocks);

    if ship_hit {
        debug!(time = state.sim_time, "ship collided with a rock");
    }

    if collisions.is_empty() {
        return GameState {
            game_over: ship_hit,
            ..state
        };
    }

    let collided_bullets: Vec<&Body> = collisions.iter().map(|c| &state.bullets[c.bullet]).collect();
    let collided_rocks: Vec<&Body> = collisions.iter().map(|c| &state.rocks[c.rock]).collect();

    // Fragments are spawned per colliding pair, so a rock hit by two
    // bullets in one tick splits twice.
    let new_rocks: Vec<Body> = collided_rocks
        .iter()
        .filter_map(|r| split_rock(r))
        .flatten()
        .enumerate()
        .map(|(i, fragment)| {
            create_rock(
                ObjectId::numbered(state.object_counter + i as u64, state.sim_time),
                fragment.circle,
                fragment.velocity,
            )
        })
        .collect();

    for rock in &new_rocks {
        trace!(id = rock.id(), radius = rock.radius, "rock fragment spawned");
    }

    let hit_bullet_ids: BTreeSet<&str> = collided_bullets.iter().map(|b| b.id()).collect();
    let hit_rock_ids: BTreeSet<&str> = collided_rocks.iter().map(|r| r.id()).collect();

    trace!(
        bullets = hit_bullet_ids.len(),
        rocks = hit_rock_ids.len(),
        fragments = new_rocks.len(),
        "bullet/rock collisions resolved"
    );

    let bullets: Vec<Body> = state
        .bullets
        .iter()
        .filter(|b| !hit_bullet_ids.contains(b.id()))
        .cloned()
        .collect();

    let rocks: Vec<Body> = state
        .rocks
        .iter()
        .filter(|r| !hit_rock_ids.contains(r.id()))
        .cloned()
        .chain(new_rocks.iter().cloned())
        .collect();

    let exited: Vec<Body> = state
        .exited
        .iter()
        .cloned()
        .chain(collided_bullets.iter().map(|b| (*b).clone()))
        .chain(collided_rocks.iter().map(|r| (*r).clone()))
        .collect();

    let object_counter = state.object_counter + new_rocks.len() as u64;
    let score = state.score + hit_bullet_ids.len() as u32;

    GameState {
        bullets,
        rocks,
        exited,
        object_counter,
        game_over: ship_hit,
        score,
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{BULLET_RADIUS, START_ROCK_RADIUS};
    use crate::game::state::{create_bullet, create_ship};

    fn rock_at(n: u64, position: Vec2, radius: f64, velocity: Vec2) -> Body {
        create_rock(ObjectId::numbered(n, 0.0), Circle { position, radius }, velocity)
    }

    fn bullet_at(n: u64, position: Vec2) -> Body {
        create_bullet(
            ObjectId::numbered(n, 0.0),
            Circle {
                position,
                radius: BULLET_RADIUS,
            },
            Vec2::ZERO,
        )
    }

    fn state_with(bullets: Vec<Body>, rocks: Vec<Body>) -> GameState {
        GameState {
            sim_time: 10.0,
            ship: create_ship(),
            bullets,
            rocks,
            exited: Vec::new(),
            object_counter: 100,
            game_over: false,
            score: 0,
            rng_seed: 0,
        }
    }

    #[test]
    fn test_touching_is_not_collision() {
        let a = rock_at(0, Vec2::new(0.0, 0.0), 10.0, Vec2::ZERO);
        let b = rock_at(1, Vec2::new(30.0, 0.0), 20.0, Vec2::ZERO);
        assert!(!bodies_collided(&a, &b));

        let c = rock_at(2, Vec2::new(29.0, 0.0), 20.0, Vec2::ZERO);
        assert!(bodies_collided(&a, &c));
    }

    #[test]
    fn test_full_rock_splits_in_two() {
        let velocity = Vec2::new(1.0, 2.0);
        let rock = rock_at(0, Vec2::new(100.0, 100.0), START_ROCK_RADIUS, velocity);
        let bullet = bullet_at(1, Vec2::new(100.0, 100.0));

        let next = handle_collisions(state_with(vec![bullet], vec![rock]));

        assert!(next.bullets.is_empty());
        assert_eq!(next.rocks.len(), 2);
        assert_eq!(next.object_counter, 102);
        assert_eq!(next.score, 1);

        let (a, b) = (&next.rocks[0], &next.rocks[1]);
        assert_eq!(a.id(), "rock100");
        assert_eq!(b.id(), "rock101");
        assert_eq!(a.radius, START_ROCK_RADIUS / 2.0);
        assert_eq!(b.radius, START_ROCK_RADIUS / 2.0);
        assert_eq!(a.velocity, Vec2::new(2.0, -1.0));
        assert_eq!(b.velocity, Vec2::new(-2.0, 1.0));
        assert_eq!(a.position, Vec2::new(100.0, 100.0));
        assert_eq!(a.create_time(), 10.0);

        let exited: Vec<&str> = next.exited.iter().map(Body::id).collect();
        assert_eq!(exited, vec!["bullet1", "rock0"]);
    }

    #[test]
    fn test_split_threshold_boundary() {
        let at_threshold = rock_at(0, Vec2::ZERO, START_ROCK_RADIUS / 4.0, Vec2::new(1.0, 0.0));
        assert!(split_rock(&at_threshold).is_some());

        let below = rock_at(0, Vec2::ZERO, START_ROCK_RADIUS / 4.0 - 0.01, Vec2::new(1.0, 0.0));
        assert!(split_rock(&below).is_none());
    }

    #[test]
    fn test_small_rock_destroyed_outright() {
        let rock = rock_at(0, Vec2::new(50.0, 50.0), START_ROCK_RADIUS / 8.0, Vec2::new(1.0, 0.0));
        let bullet = bullet_at(1, Vec2::new(50.0, 50.0));

        let next = handle_collisions(state_with(vec![bullet], vec![rock]));

        assert!(next.rocks.is_empty());
        assert!(next.bullets.is_empty());
        assert_eq!(next.object_counter, 100);
        assert_eq!(next.exited.len(), 2);
    }

    #[test]
    fn test_bullet_hitting_two_rocks_listed_twice() {
        let r1 = rock_at(0, Vec2::new(100.0, 100.0), START_ROCK_RADIUS, Vec2::new(1.0, 0.0));
        let r2 = rock_at(1, Vec2::new(110.0, 100.0), START_ROCK_RADIUS, Vec2::new(0.0, 1.0));
        let bullet = bullet_at(2, Vec2::new(105.0, 100.0));

        let next = handle_collisions(state_with(vec![bullet], vec![r1, r2]));

        let bullet_exits = next.exited.iter().filter(|b| b.id() == "bullet2").count();
        assert_eq!(bullet_exits, 2);
        assert_eq!(next.rocks.len(), 4);
        assert_eq!(next.object_counter, 104);
        assert_eq!(next.score, 1);
    }

    #[test]
    fn test_rock_hit_by_two_bullets_splits_per_pair() {
        let rock = rock_at(0, Vec2::new(100.0, 100.0), START_ROCK_RADIUS, Vec2::new(1.0, 0.0));
        let b1 = bullet_at(1, Vec2::new(95.0, 100.0));
        let b2 = bullet_at(2, Vec2::new(105.0, 100.0));

        let next = handle_collisions(state_with(vec![b1, b2], vec![rock]));

        assert!(next.bullets.is_empty());
        assert_eq!(next.rocks.len(), 4);
        assert_eq!(next.score, 2);
        assert!(next.rocks.iter().all(|r| r.id() != "rock0"));
    }

    #[test]
    fn test_ship_collision_sets_game_over() {
        let ship = create_ship();
        let rock = rock_at(0, ship.position, START_ROCK_RADIUS, Vec2::ZERO);

        let next = handle_collisions(state_with(Vec::new(), vec![rock]));
        assert!(next.game_over);
        // Ship collisions do not consume the rock.
        assert_eq!(next.rocks.len(), 1);
    }

    #[test]
    fn test_no_collisions_keeps_state() {
        let rock = rock_at(0, Vec2::new(10.0, 10.0), START_ROCK_RADIUS, Vec2::ZERO);
        let bullet = bullet_at(1, Vec2::new(500.0, 500.0));
        let before = state_with(vec![bullet], vec![rock]);

        let next = handle_collisions(before.clone());
        assert_eq!(next, before);
    }
}
