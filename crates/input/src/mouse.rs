use glam::Vec2;

/// Latest pointer position, normalized to [-1, 1] on both axes.
///
/// Written by pointer events, read once per tick by the camera controller.
/// Everything runs on the event-loop thread, so plain ownership is enough.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    position: Vec2,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new pointer position; out-of-range input is clamped.
    pub fn set(&mut self, normalized: Vec2) {
        if !normalized.is_finite() {
            tracing::warn!(?normalized, "ignoring non-finite pointer position");
            return;
        }
        self.position = normalized.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}
