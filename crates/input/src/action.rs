use glam::Vec2;

/// Mouse button that started a drag, mapped to an orbit gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragButton {
    /// Rotate around the orbit target.
    Left,
    /// Dolly in and out.
    Middle,
    /// Pan the orbit target.
    Right,
}

/// A high-level action produced by the window shell or by scripted input.
///
/// The landscape consumes actions, never raw window events, so the desktop
/// app and headless runs drive the same camera logic.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Flip between parallax and orbit camera modes.
    ToggleCameraMode,
    /// Pointer moved; coordinates are already normalized to [-1, 1].
    PointerMoved(Vec2),
    /// Pointer dragged by a pixel delta while `DragButton` was held.
    Drag { button: DragButton, delta: Vec2 },
    /// Wheel scrolled; positive values zoom in.
    Zoom(f32),
    /// No-op (unbound input).
    Noop,
}

impl Action {
    /// Pointer movement from window pixel coordinates.
    ///
    /// x grows to the right, y grows upward (screen y is flipped).
    pub fn pointer_from_pixels(position: Vec2, viewport: Vec2) -> Self {
        let width = viewport.x.max(1.0);
        let height = viewport.y.max(1.0);
        let x = (position.x / width) * 2.0 - 1.0;
        let y = -(position.y / height) * 2.0 + 1.0;
        Self::PointerMoved(Vec2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_from_pixels_corners() {
        let viewport = Vec2::new(500.0, 500.0);
        assert_eq!(
            Action::pointer_from_pixels(Vec2::ZERO, viewport),
            Action::PointerMoved(Vec2::new(-1.0, 1.0))
        );
        assert_eq!(
            Action::pointer_from_pixels(Vec2::new(500.0, 500.0), viewport),
            Action::PointerMoved(Vec2::new(1.0, -1.0))
        );
        assert_eq!(
            Action::pointer_from_pixels(Vec2::new(250.0, 250.0), viewport),
            Action::PointerMoved(Vec2::ZERO)
        );
    }

    #[test]
    fn zero_viewport_does_not_divide_by_zero() {
        let a = Action::pointer_from_pixels(Vec2::new(3.0, 3.0), Vec2::ZERO);
        let Action::PointerMoved(p) = a else {
            panic!("expected pointer action");
        };
        assert!(p.is_finite());
    }

    #[test]
    fn drag_is_constructible() {
        let a = Action::Drag {
            button: DragButton::Left,
            delta: Vec2::new(4.0, -2.0),
        };
        assert!(matches!(
            a,
            Action::Drag {
                button: DragButton::Left,
                ..
            }
        ));
        assert!(matches!(Action::Noop, Action::Noop));
    }
}
