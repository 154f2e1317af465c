use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

/// Keeps the polar angle off the poles so the view basis stays defined.
const POLE_EPSILON: f32 = 1e-6;

/// Fixed bounds for orbit mode. Angles are in radians; the polar angle is
/// measured from +Y, the azimuth around +Y starting at +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConstraints {
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConstraints {
    fn default() -> Self {
        Self {
            min_polar: 0.0,
            max_polar: FRAC_PI_2,
            min_azimuth: -FRAC_PI_4,
            max_azimuth: FRAC_PI_4,
            min_distance: 20.0,
            max_distance: 80.0,
        }
    }
}

/// Drag/zoom/pan controls orbiting a target point.
///
/// Input accumulates between updates; `update` folds it into the camera
/// position and re-applies the constraints.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    constraints: OrbitConstraints,
    enabled: bool,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_scale: f32,
    /// Pan in screen units, already divided by the viewport height.
    pending_pan: Vec2,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            constraints: OrbitConstraints::default(),
            enabled: false,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
            pending_pan: Vec2::ZERO,
        }
    }

    /// Replace the bounds. Applying the same bounds again changes nothing.
    pub fn apply_constraints(&mut self, constraints: OrbitConstraints) {
        self.constraints = constraints;
    }

    pub fn constraints(&self) -> &OrbitConstraints {
        &self.constraints
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable input. Disabling drops input not yet applied.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear_pending();
        }
    }

    /// Rotate by a pointer drag measured in pixels.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        let h = viewport_height.max(1.0);
        self.pending_azimuth -= TAU * delta.x / h * self.rotate_speed;
        self.pending_polar -= TAU * delta.y / h * self.rotate_speed;
    }

    /// Zoom by wheel steps; positive moves toward the target.
    pub fn zoom(&mut self, steps: f32) {
        if !self.enabled {
            return;
        }
        self.pending_scale *= 0.95_f32.powf(steps * self.zoom_speed);
    }

    /// Pan the target by a pointer drag measured in pixels.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        self.pending_pan += delta / viewport_height.max(1.0) * self.pan_speed;
    }

    fn clear_pending(&mut self) {
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_scale = 1.0;
        self.pending_pan = Vec2::ZERO;
    }

    /// Fold pending input into `position` and clamp it to the constraints.
    ///
    /// Returns the new position and the unit forward vector toward the target.
    pub fn update(&mut self, position: Vec3, fov_y: f32) -> (Vec3, Vec3) {
        let c = self.constraints;
        let mut offset = position - self.target;
        if offset.length_squared() <= f32::EPSILON {
            offset = Vec3::Z * c.min_distance;
        }

        let mut radius = offset.length();
        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

        // Pan along the current view plane, scaled so a full-height drag
        // covers the visible height at the target distance.
        if self.pending_pan != Vec2::ZERO {
            let forward = -offset / radius;
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward);
            let visible_height = 2.0 * radius * (fov_y * 0.5).tan();
            let pan = (-self.pending_pan.x * right + self.pending_pan.y * up) * visible_height;
            self.target += pan;
        }

        azimuth = (azimuth + self.pending_azimuth).clamp(c.min_azimuth, c.max_azimuth);
        polar = (polar + self.pending_polar)
            .clamp(c.min_polar, c.max_polar)
            .clamp(POLE_EPSILON, std::f32::consts::PI - POLE_EPSILON);
        radius = (radius * self.pending_scale).clamp(c.min_distance, c.max_distance);
        self.clear_pending();

        let offset = Vec3::new(
            radius * polar.sin() * azimuth.sin(),
            radius * polar.cos(),
            radius * polar.sin() * azimuth.cos(),
        );
        let position = self.target + offset;
        let forward = (-offset).normalize();
        tracing::trace!(?position, azimuth, polar, radius, "orbit update");
        (position, forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOV: f32 = 75.0_f32 * std::f32::consts::PI / 180.0;

    fn enabled() -> OrbitControls {
        let mut o = OrbitControls::default();
        o.set_enabled(true);
        o
    }

    #[test]
    fn default_constraints() {
        let c = OrbitConstraints::default();
        assert_eq!(c.min_polar, 0.0);
        assert_eq!(c.max_polar, FRAC_PI_2);
        assert_eq!(c.min_azimuth, -FRAC_PI_4);
        assert_eq!(c.max_azimuth, FRAC_PI_4);
        assert_eq!(c.min_distance, 20.0);
        assert_eq!(c.max_distance, 80.0);
    }

    #[test]
    fn applying_constraints_twice_is_idempotent() {
        let mut o = OrbitControls::default();
        o.apply_constraints(OrbitConstraints::default());
        let first = *o.constraints();
        o.apply_constraints(OrbitConstraints::default());
        assert_eq!(*o.constraints(), first);
        assert_eq!(first, OrbitConstraints::default());
    }

    #[test]
    fn update_without_input_keeps_in_range_position() {
        let mut o = enabled();
        let start = Vec3::new(0.0, 15.0, 50.0);
        let (pos, forward) = o.update(start, FOV);
        assert!((pos - start).length() < 1e-3);
        assert!((forward - (-start.normalize())).length() < 1e-4);
    }

    #[test]
    fn distance_is_clamped() {
        let mut o = enabled();
        let (pos, _) = o.update(Vec3::new(0.0, 10.0, 200.0), FOV);
        assert!((pos.length() - 80.0).abs() < 1e-3);
        let (pos, _) = o.update(Vec3::new(0.0, 1.0, 5.0), FOV);
        assert!((pos.length() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn zoom_in_and_out() {
        let mut o = enabled();
        let start = Vec3::new(0.0, 30.0, 40.0);
        o.zoom(3.0);
        let (closer, _) = o.update(start, FOV);
        assert!(closer.length() < start.length());
        o.zoom(-100.0);
        let (far, _) = o.update(closer, FOV);
        assert!((far.length() - 80.0).abs() < 1e-3);
    }

    #[test]
    fn azimuth_is_clamped() {
        let mut o = enabled();
        o.rotate(Vec2::new(-10_000.0, 0.0), 500.0);
        let (pos, _) = o.update(Vec3::new(0.0, 15.0, 50.0), FOV);
        assert!((pos.x.atan2(pos.z) - FRAC_PI_4).abs() < 1e-4);

        o.rotate(Vec2::new(10_000.0, 0.0), 500.0);
        let (pos, _) = o.update(pos, FOV);
        assert!((pos.x.atan2(pos.z) + FRAC_PI_4).abs() < 1e-4);
    }

    #[test]
    fn polar_is_clamped() {
        let mut o = enabled();
        let start = Vec3::new(0.0, 15.0, 50.0);
        o.rotate(Vec2::new(0.0, -10_000.0), 500.0);
        let (pos, _) = o.update(start, FOV);
        let polar = (pos.y / pos.length()).acos();
        assert!((polar - FRAC_PI_2).abs() < 1e-4);

        o.rotate(Vec2::new(0.0, 10_000.0), 500.0);
        let (pos, forward) = o.update(start, FOV);
        let polar = (pos.y / pos.length()).acos();
        assert!(polar < 1e-3);
        assert!(forward.is_finite());
    }

    #[test]
    fn below_ground_start_is_lifted() {
        let mut o = enabled();
        let (pos, _) = o.update(Vec3::new(0.0, -30.0, 30.0), FOV);
        assert!(pos.y >= -1e-3);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut o = OrbitControls::default();
        o.rotate(Vec2::new(100.0, 0.0), 500.0);
        o.zoom(5.0);
        o.pan(Vec2::new(50.0, 50.0), 500.0);
        let start = Vec3::new(0.0, 15.0, 50.0);
        let (pos, _) = o.update(start, FOV);
        assert!((pos - start).length() < 1e-3);
        assert_eq!(o.target, Vec3::ZERO);
    }

    #[test]
    fn disabling_drops_pending_input() {
        let mut o = enabled();
        o.zoom(10.0);
        o.set_enabled(false);
        let start = Vec3::new(0.0, 15.0, 50.0);
        let (pos, _) = o.update(start, FOV);
        assert!((pos.length() - start.length()).abs() < 1e-3);
    }

    #[test]
    fn pan_moves_target_sideways() {
        let mut o = enabled();
        o.pan(Vec2::new(100.0, 0.0), 500.0);
        let start = Vec3::new(0.0, 0.0, 50.0);
        let (pos, forward) = o.update(start, FOV);
        // Dragging right moves the target to the camera's left (-x here).
        assert!(o.target.x < 0.0);
        assert!(o.target.y.abs() < 1e-4);
        assert!(((pos - o.target).length() - 50.0).abs() < 1e-3);
        assert!((forward - Vec3::NEG_Z).length() < 1e-4);
    }
}
