//! Headless Scene
//!
//! A stand-in for an SVG canvas: one element per live body, keyed by body
//! id, plus the ship's transform and thruster flags. [`SceneView`] projects
//! each [`GameState`] onto it.

use std::collections::{BTreeMap, BTreeSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::constants::CANVAS_SIZE;
use crate::core::vec2::Vec2;
use crate::game::state::{Body, GameState};

/// Id of the text element shown when the game ends.
pub const GAME_OVER_ID: &str = "gameover";

/// Scene errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// Element is not (or no longer) in the scene.
    #[error("Already removed: {0}")]
    AlreadyRemoved(String),
}

/// View errors.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// Rendering was attempted after `finish`.
    #[error("View already finished")]
    Finished,

    /// Scene error.
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Geometry of a scene element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Circle drawn for a rock or bullet
    Ellipse {
        /// Horizontal and vertical radius
        radius: f64,
    },
    /// Text label
    Text {
        /// Label contents
        content: String,
    },
}

/// One element of the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    /// Style class ("rock", "bullet", "gameover")
    pub class: String,
    /// Geometry
    pub shape: Shape,
    /// Centre (ellipses) or anchor (text)
    pub position: Vec2,
}

/// The ship is a fixed element with a transform and three flames.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipVisual {
    /// Translation
    pub position: Vec2,
    /// Rotation in degrees
    pub angle: f64,
    /// Left flame shown while counter-rotating
    pub left_thrust: bool,
    /// Right flame shown while rotating
    pub right_thrust: bool,
    /// Main flame shown while accelerating
    pub thruster: bool,
}

/// Retained-mode scene graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    ship: ShipVisual,
    elements: BTreeMap<String, Visual>,
}

impl Scene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the element for a body, or move it if it exists.
    pub fn upsert_body(&mut self, body: &Body) {
        self.elements
            .entry(body.id().to_string())
            .and_modify(|v| v.position = body.position)
            .or_insert_with(|| Visual {
                class: body.view_kind.as_str().to_string(),
                shape: Shape::Ellipse {
                    radius: body.radius,
                },
                position: body.position,
            });
    }

    /// Add a text element, replacing any element with the same id.
    pub fn add_text(&mut self, id: &str, class: &str, position: Vec2, content: &str) {
        self.elements.insert(
            id.to_string(),
            Visual {
                class: class.to_string(),
                shape: Shape::Text {
                    content: content.to_string(),
                },
                position,
            },
        );
    }

    /// Detach an element.
    pub fn remove(&mut self, id: &str) -> Result<Visual, SceneError> {
        self.elements
            .remove(id)
            .ok_or_else(|| SceneError::AlreadyRemoved(id.to_string()))
    }

    /// Update the ship transform and flames.
    pub fn set_ship(&mut self, ship: ShipVisual) {
        self.ship = ship;
    }

    /// Current ship transform.
    pub fn ship(&self) -> &ShipVisual {
        &self.ship
    }

    /// Look up an element.
    pub fn get(&self, id: &str) -> Option<&Visual> {
        self.elements.get(id)
    }

    /// Check if an element exists.
    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Number of elements (ship excluded).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }
}

/// Consumer of state snapshots.
pub trait View {
    /// Draw one snapshot.
    fn render(&mut self, state: &GameState) -> Result<(), ViewError>;

    /// Called once, after the game-over frame was rendered.
    fn finish(&mut self, state: &GameState) -> Result<(), ViewError>;
}

/// [`View`] that keeps a [`Scene`] in sync with the game.
#[derive(Debug, Default)]
pub struct SceneView {
    scene: Scene,
    frames: u64,
    finished: bool,
}

impl SceneView {
    /// New view over an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The scene as of the last frame.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Number of frames rendered.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether `finish` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Detach every exited body once.
    ///
    /// A bullet that expired and collided in the same tick, or hit two rocks,
    /// shows up more than once; missing elements are logged and skipped.
    fn remove_exited(&mut self, exited: &[Body]) {
        let mut seen = BTreeSet::new();
        for body in exited {
            if !seen.insert(body.id()) {
                continue;
            }
            if let Err(e) = self.scene.remove(body.id()) {
                debug!("{}", e);
            }
        }
    }
}

impl View for SceneView {
    fn render(&mut self, state: &GameState) -> Result<(), ViewError> {
        if self.finished {
            return Err(ViewError::Finished);
        }

        let ship = &state.ship;
        self.scene.set_ship(ShipVisual {
            position: ship.position,
            angle: ship.angle,
            left_thrust: ship.torque < 0.0,
            right_thrust: ship.torque > 0.0,
            thruster: ship.acceleration.length() > 0.0,
        });

        for body in state.bullets.iter().chain(&state.rocks) {
            self.scene.upsert_body(body);
        }

        self.remove_exited(&state.exited);

        if state.game_over {
            self.scene.add_text(
                GAME_OVER_ID,
                "gameover",
                Vec2::new(CANVAS_SIZE / 6.0, CANVAS_SIZE / 2.0),
                "Game Over",
            );
        }

        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self, state: &GameState) -> Result<(), ViewError> {
        if self.finished {
            return Err(ViewError::Finished);
        }
        self.finished = true;
        info!(
            frames = self.frames,
            score = state.score,
            time = state.sim_time,
            "game over"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Action;
    use crate::game::state::initial_state_seeded;
    use crate::game::tick::reduce_state;

    #[test]
    fn test_render_creates_and_moves_elements() {
        let mut view = SceneView::new();
        let state = initial_state_seeded(1);
        view.render(&state).unwrap();

        assert_eq!(view.scene().len(), state.rocks.len());
        assert_eq!(view.scene().get("rock0").unwrap().class, "rock");

        let next = reduce_state(&state, &Action::tick(1.0));
        view.render(&next).unwrap();
        assert_eq!(view.scene().get("rock0").unwrap().position, next.rocks[0].position);
        assert_eq!(view.frames(), 2);
    }

    #[test]
    fn test_ship_flags() {
        let mut view = SceneView::new();
        let state = initial_state_seeded(1);
        let state = reduce_state(&state, &Action::rotate(-0.1));
        let state = reduce_state(&state, &Action::thrust(true));
        view.render(&state).unwrap();

        let ship = view.scene().ship();
        assert!(ship.left_thrust);
        assert!(!ship.right_thrust);
        assert!(ship.thruster);
    }

    #[test]
    fn test_duplicate_exits_tolerated() {
        let mut view = SceneView::new();
        let state = reduce_state(&initial_state_seeded(1), &Action::Shoot);
        view.render(&state).unwrap();
        let bullet = state.bullets[0].clone();
        assert!(view.scene().contains(bullet.id()));

        let removed = GameState {
            bullets: Vec::new(),
            exited: vec![bullet.clone(), bullet.clone()],
            ..state.clone()
        };
        view.render(&removed).unwrap();
        assert!(!view.scene().contains(bullet.id()));

        // Exit of an element that is already gone is not an error.
        view.render(&removed).unwrap();
    }

    #[test]
    fn test_scene_remove_missing() {
        let mut scene = Scene::new();
        assert_eq!(
            scene.remove("rock9"),
            Err(SceneError::AlreadyRemoved("rock9".to_string()))
        );
    }

    #[test]
    fn test_add_text_replaces_existing() {
        let mut scene = Scene::new();
        scene.add_text(GAME_OVER_ID, "game-over", Vec2::ZERO, "Game Over");
        scene.add_text(GAME_OVER_ID, "game-over", Vec2::new(10.0, 20.0), "Game Over");

        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(GAME_OVER_ID).map(|v| v.position), Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn test_game_over_text_and_finish() {
        let mut view = SceneView::new();
        let state = GameState {
            game_over: true,
            ..initial_state_seeded(1)
        };
        view.render(&state).unwrap();
        assert!(matches!(
            view.scene().get(GAME_OVER_ID).map(|v| &v.shape),
            Some(Shape::Text { content }) if content == "Game Over"
        ));

        view.finish(&state).unwrap();
        assert!(view.is_finished());
        assert!(matches!(view.render(&state), Err(ViewError::Finished)));
        assert!(matches!(view.finish(&state), Err(ViewError::Finished)));
    }
}
