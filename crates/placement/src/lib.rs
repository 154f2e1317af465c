//! Placement: rejection sampling of positions under minimum-distance
//! constraints on the horizontal plane.
//!
//! # Invariants
//! - Every accepted point respects every constraint registered before it was drawn.
//! - Accepted points are never moved or removed.
//! - Sampling only returns positions; it never touches scene state.
//!
//! The retry policy is explicit: `AttemptLimit::Unbounded` blocks until a
//! candidate is accepted and never returns for infeasible parameters, while
//! `AttemptLimit::PerPlacement` surfaces `PlacementError::Infeasible`.

mod sampler;
mod trees;

pub use sampler::{AttemptLimit, PlacementError, Region, RejectionSampler, scatter};
pub use trees::{TreePlacement, place_trees};
