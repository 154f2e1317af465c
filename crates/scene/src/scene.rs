use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vista_common::{EntityId, Transform};

use crate::visual::{Light, Visual};

/// What role an entity plays in the landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Sky,
    Ground,
    GrassBlade,
    Sun,
    Light,
    Mountain,
    TreeTrunk,
    TreeFoliage,
    Bird,
}

/// Kinds that take part in placement constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementKind {
    Tree,
    Mountain,
}

/// A constrained placement recorded during construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedEntity {
    pub position: Vec3,
    pub kind: PlacementKind,
}

/// Per-entity data stored in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityData {
    pub kind: EntityKind,
    pub transform: Transform,
    pub visual: Visual,
}

/// Errors from scene mutations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("scene is frozen; cannot {0} after construction")]
    Frozen(&'static str),
}

/// The scene the renderer draws.
///
/// Uses BTreeMap for deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: BTreeMap<EntityId, EntityData>,
    placed: Vec<PlacedEntity>,
    frozen: bool,
    tick: u64,
}

impl Scene {
    /// Create an empty, unfrozen scene at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames advanced since construction.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of entities of the given kind.
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|d| d.kind == kind).count()
    }

    /// Read-only access to all entities (BTreeMap for deterministic iteration).
    pub fn entities(&self) -> &BTreeMap<EntityId, EntityData> {
        &self.entities
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Close the scene to further composition changes.
    pub fn freeze(&mut self) {
        if !self.frozen {
            tracing::info!(
                entities = self.entities.len(),
                placed = self.placed.len(),
                "scene frozen"
            );
        }
        self.frozen = true;
    }

    /// Add a new entity. Returns its id.
    pub fn spawn(
        &mut self,
        kind: EntityKind,
        transform: Transform,
        visual: Visual,
    ) -> Result<EntityId, SceneError> {
        if self.frozen {
            return Err(SceneError::Frozen("spawn"));
        }
        let id = EntityId::new();
        self.entities.insert(
            id,
            EntityData {
                kind,
                transform,
                visual,
            },
        );
        Ok(id)
    }

    /// Record a tree or mountain position for later constraint checks.
    pub fn record_placement(&mut self, placed: PlacedEntity) -> Result<(), SceneError> {
        if self.frozen {
            return Err(SceneError::Frozen("record a placement"));
        }
        tracing::debug!(kind = ?placed.kind, position = ?placed.position, "placement recorded");
        self.placed.push(placed);
        Ok(())
    }

    /// All recorded placements, in recording order.
    pub fn placed(&self) -> &[PlacedEntity] {
        &self.placed
    }

    /// Positions of recorded placements of one kind.
    pub fn placed_positions(&self, kind: PlacementKind) -> Vec<Vec3> {
        self.placed
            .iter()
            .filter(|p| p.kind == kind)
            .map(|p| p.position)
            .collect()
    }

    pub fn mountains(&self) -> Vec<Vec3> {
        self.placed_positions(PlacementKind::Mountain)
    }

    pub fn trees(&self) -> Vec<Vec3> {
        self.placed_positions(PlacementKind::Tree)
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityData> {
        self.entities.get(&id)
    }

    /// Update an existing entity's transform. Allowed after freezing.
    pub fn set_transform(&mut self, id: EntityId, transform: Transform) -> bool {
        if let Some(data) = self.entities.get_mut(&id) {
            data.transform = transform;
            true
        } else {
            false
        }
    }

    /// Move an existing entity, keeping rotation and scale.
    pub fn set_position(&mut self, id: EntityId, position: Vec3) -> bool {
        if let Some(data) = self.entities.get_mut(&id) {
            data.transform.position = position;
            true
        } else {
            false
        }
    }

    /// Lights with the position of the entity carrying them.
    pub fn lights(&self) -> impl Iterator<Item = (Vec3, Light)> + '_ {
        self.entities.values().filter_map(|d| match d.visual {
            Visual::Light(light) => Some((d.transform.position, light)),
            Visual::Mesh { .. } => None,
        })
    }

    /// Advance the frame counter by one.
    pub fn step(&mut self) {
        self.tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::{Material, Shape};
    use vista_common::Color;

    fn cube() -> Visual {
        Visual::mesh(
            Shape::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Material::lit(Color::WHITE),
        )
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert_eq!(s.tick(), 0);
        assert_eq!(s.entity_count(), 0);
        assert!(!s.is_frozen());
        assert!(s.placed().is_empty());
    }

    #[test]
    fn spawn_and_count_by_kind() {
        let mut s = Scene::new();
        s.spawn(EntityKind::Bird, Transform::default(), cube()).unwrap();
        s.spawn(EntityKind::Bird, Transform::default(), cube()).unwrap();
        s.spawn(EntityKind::Sky, Transform::default(), cube()).unwrap();
        assert_eq!(s.entity_count(), 3);
        assert_eq!(s.count_kind(EntityKind::Bird), 2);
        assert_eq!(s.count_kind(EntityKind::Mountain), 0);
    }

    #[test]
    fn frozen_scene_rejects_composition_changes() {
        let mut s = Scene::new();
        let id = s
            .spawn(EntityKind::Bird, Transform::default(), cube())
            .unwrap();
        s.freeze();
        assert!(matches!(
            s.spawn(EntityKind::Bird, Transform::default(), cube()),
            Err(SceneError::Frozen(_))
        ));
        assert!(
            s.record_placement(PlacedEntity {
                position: Vec3::ZERO,
                kind: PlacementKind::Tree,
            })
            .is_err()
        );
        // Existing entities still move.
        assert!(s.set_position(id, Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(s.get(id).unwrap().transform.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn placements_are_filtered_by_tag() {
        let mut s = Scene::new();
        for (x, kind) in [
            (1.0, PlacementKind::Mountain),
            (2.0, PlacementKind::Tree),
            (3.0, PlacementKind::Mountain),
        ] {
            s.record_placement(PlacedEntity {
                position: Vec3::new(x, 0.0, 0.0),
                kind,
            })
            .unwrap();
        }
        assert_eq!(
            s.mountains(),
            vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)]
        );
        assert_eq!(s.trees(), vec![Vec3::new(2.0, 0.0, 0.0)]);
    }

    #[test]
    fn set_transform_unknown_entity() {
        let mut s = Scene::new();
        assert!(!s.set_transform(EntityId::new(), Transform::default()));
        assert!(!s.set_position(EntityId::new(), Vec3::ONE));
    }

    #[test]
    fn lights_are_listed_with_positions() {
        let mut s = Scene::new();
        s.spawn(
            EntityKind::Light,
            Transform::from_position(Vec3::Y),
            Visual::Light(Light::Ambient {
                color: Color::WHITE,
                intensity: 0.05,
            }),
        )
        .unwrap();
        s.spawn(EntityKind::Sky, Transform::default(), cube()).unwrap();
        let lights: Vec<_> = s.lights().collect();
        assert_eq!(lights.len(), 1);
        assert_eq!(lights[0].0, Vec3::Y);
    }

    #[test]
    fn step_increments_tick() {
        let mut s = Scene::new();
        s.step();
        s.step();
        s.step();
        assert_eq!(s.tick(), 3);
    }

    #[test]
    fn btreemap_gives_deterministic_iteration() {
        let mut s = Scene::new();
        for _ in 0..50 {
            s.spawn(EntityKind::GrassBlade, Transform::default(), cube())
                .unwrap();
        }
        let keys: Vec<EntityId> = s.entities().keys().copied().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
