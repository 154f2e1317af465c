//! Shared types for the vista workspace: entity ids, transforms, colors and
//! horizontal-plane helpers.

mod planar;
mod types;

pub use planar::{planar, planar_distance, within_range};
pub use types::{Color, EntityId, Transform};
