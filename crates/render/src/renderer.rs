use glam::{Mat4, Vec3};
use std::fmt::Write as _;
use vista_scene::{EntityKind, Scene, Visual};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Width over height of the viewport.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 15.0, 50.0),
            target: Vec3::new(0.0, 15.0, 49.0),
            fov_degrees: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl RenderView {
    /// View looking from `eye` along `forward`.
    pub fn looking(eye: Vec3, forward: Vec3) -> Self {
        Self {
            eye,
            target: eye + forward,
            ..Self::default()
        }
    }

    pub fn with_projection(mut self, fov_degrees: f32, near: f32, far: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
        self
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a view configuration, then produces
/// output. It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

const KINDS: [EntityKind; 9] = [
    EntityKind::Sky,
    EntityKind::Ground,
    EntityKind::GrassBlade,
    EntityKind::Sun,
    EntityKind::Light,
    EntityKind::Mountain,
    EntityKind::TreeTrunk,
    EntityKind::TreeFoliage,
    EntityKind::Bird,
];

/// Text renderer for the CLI and tests.
///
/// Lists per-kind counts and, unless `skip_kinds` filters them, every entity.
/// Grass blades are skipped by default; there are thousands of them.
#[derive(Debug)]
pub struct DebugTextRenderer {
    skip_kinds: Vec<EntityKind>,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self {
            skip_kinds: vec![EntityKind::GrassBlade],
        }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that lists only the summary, no per-entity lines.
    pub fn summary_only() -> Self {
        Self {
            skip_kinds: KINDS.to_vec(),
        }
    }

    /// Renderer that lists every entity, grass included.
    pub fn verbose() -> Self {
        Self {
            skip_kinds: Vec::new(),
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Scene (tick={}, frozen={}) ===",
            scene.tick(),
            scene.is_frozen()
        );
        let _ = writeln!(out, "Entities: {}", scene.entity_count());
        for kind in KINDS {
            let n = scene.count_kind(kind);
            if n > 0 {
                let _ = writeln!(out, "  {kind:?}: {n}");
            }
        }
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        );

        for (id, data) in scene.entities() {
            if self.skip_kinds.contains(&data.kind) {
                continue;
            }
            let p = data.transform.position;
            let texture = match &data.visual {
                Visual::Mesh { material, .. } => material.texture.as_ref().map(|t| t.name.as_str()),
                Visual::Light(_) => None,
            };
            let _ = write!(
                out,
                "  [{}] {:?} pos=({:.2}, {:.2}, {:.2})",
                id.short(),
                data.kind,
                p.x,
                p.y,
                p.z
            );
            if let Some(name) = texture {
                let _ = write!(out, " texture={name}");
            }
            out.push('\n');
        }

        tracing::trace!(bytes = out.len(), "debug frame rendered");
        out
    }
}
