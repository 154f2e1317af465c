//! Landscape: builds the scene once, then animates it tick by tick.
//!
//! # Invariants
//! - Mountains are recorded before trees are placed; trees keep their distance
//!   from every recorded mountain.
//! - The scene is frozen once built. Ticks move entities, never add them.
//! - Within a tick the camera updates before the birds move.

mod animation;
mod builder;
mod config;

pub use animation::Landscape;
pub use builder::{BuildError, BuiltScene, SceneBuilder};
pub use config::{ConfigError, GrassConfig, LandscapeConfig, MountainConfig, TextureConfig};
