use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use vista_input::{DragButton, MouseState};

use crate::orbit::{OrbitConstraints, OrbitControls};

/// Active camera-control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Position follows the pointer.
    #[default]
    Parallax,
    /// Position follows drag/zoom input around the orbit target.
    Orbit,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Parallax => Self::Orbit,
            Self::Orbit => Self::Parallax,
        }
    }
}

/// Camera tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_position: Vec3,
    pub initial_mode: CameraMode,
    pub parallax_strength: f32,
    /// Offset added to pointer y before scaling, lifting the camera above ground.
    pub parallax_y_offset: f32,
    pub parallax_x_bounds: [f32; 2],
    pub parallax_y_bounds: [f32; 2],
    pub orbit_target: Vec3,
    pub orbit: OrbitConstraints,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_position: Vec3::new(0.0, 15.0, 50.0),
            initial_mode: CameraMode::Parallax,
            parallax_strength: 5.0,
            parallax_y_offset: 2.0,
            parallax_x_bounds: [-100.0, 100.0],
            parallax_y_bounds: [1.0, 100.0],
            orbit_target: Vec3::ZERO,
            orbit: OrbitConstraints::default(),
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Camera position under parallax: x and y follow the pointer, z is kept.
pub fn parallax_position(mouse: Vec2, current: Vec3, config: &CameraConfig) -> Vec3 {
    let strength = config.parallax_strength;
    let [min_x, max_x] = config.parallax_x_bounds;
    let [min_y, max_y] = config.parallax_y_bounds;
    Vec3::new(
        (-mouse.x * strength).clamp(min_x, max_x),
        ((mouse.y + config.parallax_y_offset) * strength).clamp(min_y, max_y),
        current.z,
    )
}

/// Owns the camera pose and switches between parallax and orbit control.
#[derive(Debug, Clone)]
pub struct CameraController {
    config: CameraConfig,
    mode: CameraMode,
    position: Vec3,
    forward: Vec3,
    orbit: OrbitControls,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        let mut controller = Self {
            mode: CameraMode::Parallax,
            position: config.initial_position,
            forward: Vec3::NEG_Z,
            orbit: OrbitControls::new(config.orbit_target),
            config,
        };
        if controller.config.initial_mode == CameraMode::Orbit {
            controller.toggle();
        }
        controller
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    pub fn fov_y(&self) -> f32 {
        self.config.fov_degrees.to_radians()
    }

    /// Flip the mode. Entering orbit configures its bounds once and enables
    /// drag input; leaving orbit disables it.
    pub fn toggle(&mut self) -> CameraMode {
        self.mode = self.mode.toggled();
        match self.mode {
            CameraMode::Orbit => {
                self.orbit.apply_constraints(self.config.orbit);
                self.orbit.set_enabled(true);
            }
            CameraMode::Parallax => self.orbit.set_enabled(false),
        }
        tracing::info!(mode = ?self.mode, "camera mode toggled");
        self.mode
    }

    /// Route a pointer drag to the orbit controls. Ignored in parallax mode.
    pub fn drag(&mut self, button: DragButton, delta: Vec2, viewport: Vec2) {
        match button {
            DragButton::Left => self.orbit.rotate(delta, viewport.y),
            DragButton::Middle => self.orbit.zoom(-delta.y / 10.0),
            DragButton::Right => self.orbit.pan(delta, viewport.y),
        }
    }

    /// Wheel zoom. Ignored in parallax mode.
    pub fn zoom(&mut self, steps: f32) {
        self.orbit.zoom(steps);
    }

    /// Recompute the camera pose for this tick.
    pub fn update(&mut self, mouse: &MouseState) {
        match self.mode {
            CameraMode::Parallax => {
                self.position = parallax_position(mouse.position(), self.position, &self.config);
            }
            CameraMode::Orbit => {
                let (position, forward) = self.orbit.update(self.position, self.fov_y());
                self.position = position;
                self.forward = forward;
            }
        }
        tracing::trace!(mode = ?self.mode, position = ?self.position, "camera updated");
    }
}
