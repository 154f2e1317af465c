use serde::{Deserialize, Serialize};
use vista_assets::TextureHandle;
use vista_common::Color;

/// Primitive geometry, sized in world units and centered on the entity origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Flat rectangle in the local XY plane.
    Plane { width: f32, height: f32 },
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
    Cone { radius: f32, height: f32 },
    Cylinder { radius: f32, height: f32 },
}

impl Shape {
    /// Size of the shape's bounding box.
    pub fn extents(&self) -> [f32; 3] {
        match *self {
            Shape::Plane { width, height } => [width, height, 0.0],
            Shape::Box {
                width,
                height,
                depth,
            } => [width, height, depth],
            Shape::Sphere { radius } => [radius * 2.0; 3],
            Shape::Cone { radius, height } | Shape::Cylinder { radius, height } => {
                [radius * 2.0, height, radius * 2.0]
            }
        }
    }
}

/// Surface description for a mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub texture: Option<TextureHandle>,
    /// Unlit materials ignore scene lights (sky, sun).
    pub unlit: bool,
    pub double_sided: bool,
}

impl Material {
    pub fn lit(color: Color) -> Self {
        Self {
            color,
            texture: None,
            unlit: false,
            double_sided: false,
        }
    }

    pub fn unlit(color: Color) -> Self {
        Self {
            unlit: true,
            ..Self::lit(color)
        }
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

/// Scene light. Directional lights shine along their entity's position
/// vector toward the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Light {
    Directional { color: Color, intensity: f32 },
    Ambient { color: Color, intensity: f32 },
}

/// What an entity looks like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    Mesh { shape: Shape, material: Material },
    Light(Light),
}

impl Visual {
    pub fn mesh(shape: Shape, material: Material) -> Self {
        Self::Mesh { shape, material }
    }
}
