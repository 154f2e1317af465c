//! Scene: the set of visual entities the renderer draws.
//!
//! # Invariants
//! - Every entity carries an explicit `EntityKind` tag; nothing is inferred
//!   from its material or shape.
//! - Composition is frozen after construction: no spawning and no new
//!   placement records. Transforms of existing entities stay mutable.
//! - Placement records only ever grow.

pub mod scene;
pub mod visual;

pub use scene::{EntityData, EntityKind, PlacedEntity, PlacementKind, Scene, SceneError};
pub use visual::{Light, Material, Shape, Visual};
