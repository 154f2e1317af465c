//! wgpu render backend for landscape scenes.
//!
//! Draws every scene shape as an instanced unit primitive lit by the scene's
//! directional and ambient lights.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Frame rate is independent of the animation tick; the caller decides when
//!   to advance.

mod batch;
mod gpu;
mod mesh;
mod shaders;

pub use batch::{BatchKey, FrameLighting};
pub use gpu::WgpuRenderer;
pub use mesh::MeshKind;
