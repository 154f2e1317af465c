//! Camera control for the landscape view.
//!
//! Exactly one of two modes is active. Parallax derives the camera position
//! from the pointer every tick; Orbit hands the camera to drag/zoom controls
//! bounded by fixed angular and distance limits.
//!
//! # Invariants
//! - Mode changes only through `CameraController::toggle`.
//! - Camera motion is outside the scene; the scene never reads the camera.

mod controller;
mod orbit;

pub use controller::{CameraConfig, CameraController, CameraMode, parallax_position};
pub use orbit::{OrbitConstraints, OrbitControls};
