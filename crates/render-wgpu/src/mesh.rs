use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::{PI, TAU};
use vista_scene::Shape;

const RADIAL_SEGMENTS: u16 = 32;
const SPHERE_RINGS: u16 = 16;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        }
    }
}

/// Unit primitive a scene shape is drawn with. Shapes differ from their unit
/// mesh only by a per-instance scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    Plane,
    Cube,
    Sphere,
    Cone,
    Cylinder,
}

impl MeshKind {
    pub const ALL: [MeshKind; 5] = [
        MeshKind::Plane,
        MeshKind::Cube,
        MeshKind::Sphere,
        MeshKind::Cone,
        MeshKind::Cylinder,
    ];

    /// Unit mesh and scale for a scene shape.
    pub fn for_shape(shape: &Shape) -> (MeshKind, Vec3) {
        match *shape {
            Shape::Plane { width, height } => (MeshKind::Plane, Vec3::new(width, height, 1.0)),
            Shape::Box {
                width,
                height,
                depth,
            } => (MeshKind::Cube, Vec3::new(width, height, depth)),
            Shape::Sphere { radius } => (MeshKind::Sphere, Vec3::splat(radius)),
            Shape::Cone { radius, height } => (MeshKind::Cone, Vec3::new(radius, height, radius)),
            Shape::Cylinder { radius, height } => {
                (MeshKind::Cylinder, Vec3::new(radius, height, radius))
            }
        }
    }

    pub(crate) fn build(self) -> (Vec<Vertex>, Vec<u16>) {
        match self {
            MeshKind::Plane => plane(),
            MeshKind::Cube => cube(),
            MeshKind::Sphere => sphere(RADIAL_SEGMENTS, SPHERE_RINGS),
            MeshKind::Cone => lathe(0.0, RADIAL_SEGMENTS),
            MeshKind::Cylinder => lathe(1.0, RADIAL_SEGMENTS),
        }
    }
}

/// 1×1 quad in the XY plane facing +Z.
fn plane() -> (Vec<Vertex>, Vec<u16>) {
    let n = Vec3::Z;
    let vertices = vec![
        Vertex::new(Vec3::new(-0.5, -0.5, 0.0), n, [0.0, 1.0]),
        Vertex::new(Vec3::new(0.5, -0.5, 0.0), n, [1.0, 1.0]),
        Vertex::new(Vec3::new(0.5, 0.5, 0.0), n, [1.0, 0.0]),
        Vertex::new(Vec3::new(-0.5, 0.5, 0.0), n, [0.0, 0.0]),
    ];
    (vertices, vec![0, 1, 2, 2, 3, 0])
}

/// Unit cube centered on the origin, one quad per face.
fn cube() -> (Vec<Vertex>, Vec<u16>) {
    // (normal, right, up) per face; corners are n/2 ± r/2 ± u/2.
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, right, up) in faces {
        let base = vertices.len() as u16;
        let center = normal * 0.5;
        for (du, dv, uv) in [
            (-0.5, -0.5, [0.0, 1.0]),
            (0.5, -0.5, [1.0, 1.0]),
            (0.5, 0.5, [1.0, 0.0]),
            (-0.5, 0.5, [0.0, 0.0]),
        ] {
            vertices.push(Vertex::new(center + right * du + up * dv, normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

/// UV sphere of radius 1.
fn sphere(segments: u16, rings: u16) -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::new();
    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let phi = v * PI;
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let theta = u * TAU;
            let p = Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos());
            vertices.push(Vertex::new(p, p, [u, v]));
        }
    }
    let stride = segments + 1;
    let mut indices = Vec::new();
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, b + 1, a, b + 1, a + 1]);
        }
    }
    (vertices, indices)
}

/// Capped surface of revolution around +Y, height 1 centered on the origin,
/// bottom radius 1. A top radius of 0 gives a cone, 1 a cylinder.
fn lathe(top_radius: f32, segments: u16) -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let slope = 1.0 - top_radius;

    for seg in 0..=segments {
        let u = seg as f32 / segments as f32;
        let (s, c) = (u * TAU).sin_cos();
        let normal = Vec3::new(s, slope, c).normalize();
        vertices.push(Vertex::new(
            Vec3::new(s * top_radius, 0.5, c * top_radius),
            normal,
            [u, 0.0],
        ));
        vertices.push(Vertex::new(Vec3::new(s, -0.5, c), normal, [u, 1.0]));
    }
    for seg in 0..segments {
        let a = seg * 2;
        indices.extend_from_slice(&[a, a + 1, a + 3, a, a + 3, a + 2]);
    }

    let mut cap = |y: f32, radius: f32, normal: Vec3| {
        let center = vertices.len() as u16;
        vertices.push(Vertex::new(Vec3::new(0.0, y, 0.0), normal, [0.5, 0.5]));
        for seg in 0..=segments {
            let (s, c) = (seg as f32 / segments as f32 * TAU).sin_cos();
            vertices.push(Vertex::new(
                Vec3::new(s * radius, y, c * radius),
                normal,
                [0.5 + s * 0.5, 0.5 - c * 0.5],
            ));
        }
        for seg in 0..segments {
            let (i, j) = (center + 1 + seg, center + 2 + seg);
            if normal.y > 0.0 {
                indices.extend_from_slice(&[center, i, j]);
            } else {
                indices.extend_from_slice(&[center, j, i]);
            }
        }
    };
    cap(-0.5, 1.0, Vec3::NEG_Y);
    if top_radius > 0.0 {
        cap(0.5, top_radius, Vec3::Y);
    }
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(v: &[Vertex], tri: &[u16]) -> Vec3 {
        let p = |i: u16| Vec3::from_array(v[i as usize].position);
        (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]))
    }

    #[test]
    fn indices_are_in_bounds() {
        for kind in MeshKind::ALL {
            let (v, i) = kind.build();
            assert_eq!(i.len() % 3, 0, "{kind:?}");
            assert!(i.iter().all(|&ix| (ix as usize) < v.len()), "{kind:?}");
        }
    }

    #[test]
    fn triangles_wind_outward() {
        // Every non-degenerate triangle faces away from the center.
        for kind in [MeshKind::Cube, MeshKind::Sphere, MeshKind::Cylinder, MeshKind::Cone] {
            let (v, i) = kind.build();
            for tri in i.chunks(3) {
                let n = face_normal(&v, tri);
                if n.length() < 1e-6 {
                    continue;
                }
                let centroid = tri
                    .iter()
                    .map(|&ix| Vec3::from_array(v[ix as usize].position))
                    .sum::<Vec3>()
                    / 3.0;
                assert!(n.dot(centroid) > 0.0, "{kind:?} tri {tri:?}");
            }
        }
    }

    #[test]
    fn plane_faces_z() {
        let (v, i) = MeshKind::Plane.build();
        assert!(face_normal(&v, &i[0..3]).normalize().abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn unit_extents() {
        for kind in MeshKind::ALL {
            let (v, _) = kind.build();
            let max = v
                .iter()
                .map(|v| Vec3::from_array(v.position).abs())
                .fold(Vec3::ZERO, Vec3::max);
            let expected = match kind {
                MeshKind::Plane => Vec3::new(0.5, 0.5, 0.0),
                MeshKind::Cube => Vec3::splat(0.5),
                MeshKind::Sphere => Vec3::ONE,
                MeshKind::Cone | MeshKind::Cylinder => Vec3::new(1.0, 0.5, 1.0),
            };
            assert!(max.abs_diff_eq(expected, 1e-5), "{kind:?} {max:?}");
        }
    }

    #[test]
    fn shape_scales() {
        assert_eq!(
            MeshKind::for_shape(&Shape::Cone {
                radius: 10.0,
                height: 30.0
            }),
            (MeshKind::Cone, Vec3::new(10.0, 30.0, 10.0))
        );
        assert_eq!(
            MeshKind::for_shape(&Shape::Sphere { radius: 4.0 }),
            (MeshKind::Sphere, Vec3::splat(4.0))
        );
        assert_eq!(
            MeshKind::for_shape(&Shape::Plane {
                width: 500.0,
                height: 500.0
            }),
            (MeshKind::Plane, Vec3::new(500.0, 500.0, 1.0))
        );
    }
}
