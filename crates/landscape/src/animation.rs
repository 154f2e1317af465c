use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use vista_camera::{CameraController, CameraMode};
use vista_flock::BirdFlock;
use vista_input::{Action, MouseState};
use vista_render::{RenderView, Renderer};
use vista_scene::Scene;

use crate::builder::{BuildError, BuiltScene, SceneBuilder};
use crate::config::LandscapeConfig;

/// Canvas size used until the host reports a real one.
const DEFAULT_VIEWPORT: Vec2 = Vec2::new(500.0, 500.0);

/// The running landscape: scene, camera, birds and the pointer they read.
///
/// One `advance` is one animation tick. Ticks are counted, not timed; the
/// host decides how often to call it.
pub struct Landscape {
    scene: Scene,
    camera: CameraController,
    flock: BirdFlock,
    mouse: MouseState,
    rng: StdRng,
    viewport: Vec2,
}

impl Landscape {
    /// Build the scene described by `config`. Without a seed the layout is
    /// drawn from OS entropy.
    pub fn new(config: &LandscapeConfig) -> Result<Self, BuildError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let BuiltScene { scene, flock } = SceneBuilder::new(config).build(&mut rng)?;
        Ok(Self {
            scene,
            camera: CameraController::new(config.camera.clone()),
            flock,
            mouse: MouseState::new(),
            rng,
            viewport: DEFAULT_VIEWPORT,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn flock(&self) -> &BirdFlock {
        &self.flock
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn mode(&self) -> CameraMode {
        self.camera.mode()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Record the drawable size in pixels. Zero-sized viewports are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    /// Apply one input action. Pointer input is stored and read on the next tick.
    pub fn handle(&mut self, action: Action) {
        match action {
            Action::ToggleCameraMode => {
                self.camera.toggle();
            }
            Action::PointerMoved(p) => self.mouse.set(p),
            Action::Drag { button, delta } => self.camera.drag(button, delta, self.viewport),
            Action::Zoom(steps) => self.camera.zoom(steps),
            Action::Noop => {}
        }
    }

    /// One tick: camera, then birds, then the scene's frame counter.
    pub fn advance(&mut self) {
        self.camera.update(&self.mouse);
        let respawned = self.flock.tick(&mut self.rng);
        for bird in self.flock.birds() {
            if let Some(id) = bird.entity {
                if !self.scene.set_position(id, bird.position) {
                    tracing::warn!(entity = %id.short(), "bird entity missing from scene");
                }
            }
        }
        self.scene.step();
        tracing::trace!(tick = self.scene.tick(), respawned, "tick");
    }

    /// The view for the current camera pose.
    pub fn view(&self) -> RenderView {
        let config = self.camera.config();
        RenderView::looking(self.camera.position(), self.camera.forward())
            .with_projection(config.fov_degrees, config.near, config.far)
            .with_aspect(self.viewport.x / self.viewport.y)
    }

    /// Advance one tick and render the result.
    pub fn frame<R: Renderer>(&mut self, renderer: &R) -> R::Output {
        self.advance();
        renderer.render(&self.scene, &self.view())
    }
}
