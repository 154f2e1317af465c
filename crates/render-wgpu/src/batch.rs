use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};
use std::collections::BTreeMap;
use vista_assets::AssetId;
use vista_common::Color;
use vista_scene::{Light, Scene, Visual};

use crate::mesh::MeshKind;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub light_dir: [f32; 4],
    pub light_color: [f32; 4],
    pub ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    pub color: [f32; 4],
    pub params: [f32; 4],
}

/// Lighting terms gathered from the scene's light entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLighting {
    /// Direction toward the directional light.
    pub direction: Vec3,
    pub color: Vec3,
    pub ambient: Vec3,
}

impl Default for FrameLighting {
    fn default() -> Self {
        Self {
            direction: Vec3::Y,
            color: Vec3::ZERO,
            ambient: Vec3::ZERO,
        }
    }
}

impl FrameLighting {
    /// Sum ambient lights; the first directional light wins.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut lighting = Self::default();
        let mut has_directional = false;
        for (position, light) in scene.lights() {
            match light {
                Light::Directional { color, intensity } => {
                    if has_directional {
                        tracing::warn!(?position, "ignoring extra directional light");
                        continue;
                    }
                    has_directional = true;
                    lighting.direction = position.try_normalize().unwrap_or(Vec3::Y);
                    lighting.color = linear_rgb(color) * intensity;
                }
                Light::Ambient { color, intensity } => {
                    lighting.ambient += linear_rgb(color) * intensity;
                }
            }
        }
        lighting
    }

    pub(crate) fn uniforms(&self, view_proj: Mat4) -> Uniforms {
        Uniforms {
            view_proj: view_proj.to_cols_array_2d(),
            light_dir: self.direction.extend(0.0).to_array(),
            light_color: self.color.extend(1.0).to_array(),
            ambient: self.ambient.extend(1.0).to_array(),
        }
    }
}

/// Key that splits draws by mesh, texture and face culling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BatchKey {
    pub mesh: MeshKind,
    pub texture: Option<AssetId>,
    pub double_sided: bool,
}

/// Instances sharing one draw call.
#[derive(Debug, Clone)]
pub(crate) struct Batch {
    pub key: BatchKey,
    pub instances: Vec<InstanceData>,
}

/// Group every mesh entity of the scene into draw batches.
pub(crate) fn build_batches(scene: &Scene) -> Vec<Batch> {
    let mut groups: BTreeMap<BatchKey, Vec<InstanceData>> = BTreeMap::new();
    for data in scene.entities().values() {
        let Visual::Mesh { shape, material } = &data.visual else {
            continue;
        };
        let (mesh, shape_scale) = MeshKind::for_shape(shape);
        let t = &data.transform;
        let model =
            Mat4::from_scale_rotation_translation(t.scale * shape_scale, t.rotation, t.position);
        let normal = Mat3::from_mat4(model).inverse().transpose();
        let key = BatchKey {
            mesh,
            texture: material.texture.as_ref().map(|h| h.id),
            double_sided: material.double_sided,
        };
        groups.entry(key).or_default().push(InstanceData {
            model: model.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
            color: linear_rgb(material.color).extend(material.color.a).to_array(),
            params: [if material.unlit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        });
    }
    groups
        .into_iter()
        .map(|(key, instances)| Batch { key, instances })
        .collect()
}

/// Scene colors are authored in sRGB; shading happens in linear space.
pub(crate) fn linear_rgb(color: Color) -> Vec3 {
    fn channel(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    Vec3::new(channel(color.r), channel(color.g), channel(color.b))
}
