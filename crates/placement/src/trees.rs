use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use vista_common::planar;

use crate::sampler::{AttemptLimit, PlacementError, Region, RejectionSampler};

/// Parameters for tree placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreePlacement {
    pub count: usize,
    /// Minimum planar distance between two trees.
    pub min_tree_distance: f32,
    /// Minimum planar distance between a tree and a mountain.
    pub min_mountain_distance: f32,
    pub region: Region,
    /// Fixed height of the trunk anchor; not part of any constraint.
    pub y: f32,
    pub attempts: AttemptLimit,
}

impl Default for TreePlacement {
    fn default() -> Self {
        Self {
            count: 20,
            min_tree_distance: 5.0,
            min_mountain_distance: 20.0,
            region: Region::centered(75.0, 75.0),
            y: 1.5,
            attempts: AttemptLimit::default(),
        }
    }
}

/// Place `params.count` trees around already-placed mountains.
///
/// Returns the trunk anchor positions in acceptance order. With
/// `AttemptLimit::Unbounded` this call blocks until every tree is placed.
pub fn place_trees<R: Rng + ?Sized>(
    rng: &mut R,
    params: &TreePlacement,
    mountains: &[Vec3],
) -> Result<Vec<Vec3>, PlacementError> {
    let _span = tracing::info_span!("place_trees", count = params.count).entered();

    let mut sampler = RejectionSampler::new(params.region, params.attempts)?
        .with_spacing(params.min_tree_distance)?
        .with_obstacles(mountains.iter().copied().map(planar), params.min_mountain_distance)?;

    let points: Vec<Vec2> = sampler.place(rng, params.count)?;
    tracing::info!(
        trees = points.len(),
        draws = sampler.total_draws(),
        "trees placed"
    );

    Ok(points
        .into_iter()
        .map(|p| Vec3::new(p.x, params.y, p.y))
        .collect())
}
