use glam::{Vec2, Vec3};

/// Project a world position onto the horizontal (x, z) plane.
///
/// The returned vector stores world x in `.x` and world z in `.y`.
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Euclidean distance on the horizontal plane; height is ignored.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}

/// True when `point` is at least `min_distance` away from every entry of `others`.
pub fn within_range(point: Vec2, others: &[Vec2], min_distance: f32) -> bool {
    others.iter().all(|o| point.distance(*o) >= min_distance)
}
