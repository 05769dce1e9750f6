//! Render adapter.
//!
//! Consumes state snapshots; never feeds anything back into the engine.

pub mod scene;

pub use scene::{Scene, SceneError, SceneView, ShipVisual, Shape, View, ViewError, Visual};
