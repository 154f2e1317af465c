use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::FRAC_PI_2;
use vista_assets::{AssetError, TextureCatalog};
use vista_common::{Color, Transform};
use vista_flock::{BirdFlock, FlockError};
use vista_placement::{PlacementError, place_trees, scatter};
use vista_scene::{
    EntityKind, Light, Material, PlacedEntity, PlacementKind, Scene, SceneError, Shape, Visual,
};

use crate::config::LandscapeConfig;

const SKY_COLOR: Color = Color::from_hex(0x87ceeb);
const GRASS_COLOR: Color = Color::from_hex(0x00ff00);
const SUN_COLOR: Color = Color::from_hex(0xffff00);
const TRUNK_COLOR: Color = Color::from_hex(0x8b4513);
const BIRD_COLOR: Color = Color::from_hex(0xff0000);

const BACKDROP_SIZE: f32 = 500.0;
const SKY_DEPTH: f32 = -50.0;
const SUN_POSITION: Vec3 = Vec3::new(30.0, 50.0, -30.0);
const SUN_RADIUS: f32 = 4.0;
const LIGHT_DIRECTION: Vec3 = Vec3::new(20.0, 30.0, 1.0);
const AMBIENT_INTENSITY: f32 = 0.05;
const TRUNK_RADIUS: f32 = 0.5;
const TRUNK_HEIGHT: f32 = 3.0;
const FOLIAGE_RADIUS: f32 = 2.0;
/// Foliage center height above the ground.
const FOLIAGE_Y: f32 = 4.0;
const BIRD_SIZE: Vec3 = Vec3::new(1.0, 0.5, 0.1);

/// Errors from building a landscape scene.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("placement failed: {0}")]
    Placement(#[from] PlacementError),
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("texture lookup failed: {0}")]
    Asset(#[from] AssetError),
    #[error("flock setup failed: {0}")]
    Flock(#[from] FlockError),
}

/// A built, frozen scene plus the flock driving its bird entities.
#[derive(Debug)]
pub struct BuiltScene {
    pub scene: Scene,
    pub flock: BirdFlock,
}

/// One-shot scene construction from a configuration.
///
/// Order matters: mountains are recorded before trees are placed so tree
/// placement sees them as obstacles.
pub struct SceneBuilder<'a> {
    config: &'a LandscapeConfig,
    catalog: TextureCatalog,
    scene: Scene,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(config: &'a LandscapeConfig) -> Self {
        Self {
            catalog: config.textures.catalog(),
            config,
            scene: Scene::new(),
        }
    }

    /// Build every element, then freeze the scene.
    pub fn build<R: Rng + ?Sized>(mut self, rng: &mut R) -> Result<BuiltScene, BuildError> {
        let _span = tracing::info_span!("build_scene").entered();

        self.add_sky()?;
        self.add_ground(rng)?;
        self.add_sun()?;
        self.add_lights()?;
        self.add_mountains(rng)?;
        self.add_trees(rng)?;
        let flock = self.add_birds(rng)?;

        self.scene.freeze();
        tracing::info!(
            entities = self.scene.entity_count(),
            trees = self.scene.count_kind(EntityKind::TreeTrunk),
            birds = flock.len(),
            "scene built"
        );
        Ok(BuiltScene {
            scene: self.scene,
            flock,
        })
    }

    fn add_sky(&mut self) -> Result<(), BuildError> {
        self.scene.spawn(
            EntityKind::Sky,
            Transform::from_position(Vec3::new(0.0, 0.0, SKY_DEPTH)),
            Visual::mesh(
                Shape::Plane {
                    width: BACKDROP_SIZE,
                    height: BACKDROP_SIZE,
                },
                Material::unlit(SKY_COLOR),
            ),
        )?;
        Ok(())
    }

    fn add_ground<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BuildError> {
        self.scene.spawn(
            EntityKind::Ground,
            Transform::default().with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            Visual::mesh(
                Shape::Plane {
                    width: BACKDROP_SIZE,
                    height: BACKDROP_SIZE,
                },
                Material::lit(GRASS_COLOR).double_sided(),
            ),
        )?;

        let grass = &self.config.grass;
        let size = grass.blade_size;
        let blade = Visual::mesh(
            Shape::Box {
                width: size.x,
                height: size.y,
                depth: size.z,
            },
            Material::lit(GRASS_COLOR),
        );
        for p in scatter(rng, grass.region, grass.count)? {
            self.scene.spawn(
                EntityKind::GrassBlade,
                Transform::from_position(Vec3::new(p.x, size.y * 0.5, p.y)),
                blade.clone(),
            )?;
        }
        tracing::debug!(blades = grass.count, "grass scattered");
        Ok(())
    }

    fn add_sun(&mut self) -> Result<(), BuildError> {
        self.scene.spawn(
            EntityKind::Sun,
            Transform::from_position(SUN_POSITION),
            Visual::mesh(Shape::Sphere { radius: SUN_RADIUS }, Material::unlit(SUN_COLOR)),
        )?;
        Ok(())
    }

    fn add_lights(&mut self) -> Result<(), BuildError> {
        self.scene.spawn(
            EntityKind::Light,
            Transform::from_position(LIGHT_DIRECTION.normalize()),
            Visual::Light(Light::Directional {
                color: Color::WHITE,
                intensity: 1.0,
            }),
        )?;
        self.scene.spawn(
            EntityKind::Light,
            Transform::default(),
            Visual::Light(Light::Ambient {
                color: Color::WHITE,
                intensity: AMBIENT_INTENSITY,
            }),
        )?;
        Ok(())
    }

    fn add_mountains<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BuildError> {
        for m in &self.config.mountains {
            let texture = self.catalog.random_texture("mountain", rng)?;
            let color = Color::from_hex(rng.gen_range(0..=0xff_ffff));
            self.scene.spawn(
                EntityKind::Mountain,
                Transform::from_position(m.position),
                Visual::mesh(
                    Shape::Cone {
                        radius: m.radius,
                        height: m.height,
                    },
                    Material::lit(color).with_texture(texture),
                ),
            )?;
            self.scene.record_placement(PlacedEntity {
                position: m.position,
                kind: PlacementKind::Mountain,
            })?;
        }
        Ok(())
    }

    fn add_trees<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BuildError> {
        let trunk = Visual::mesh(
            Shape::Cylinder {
                radius: TRUNK_RADIUS,
                height: TRUNK_HEIGHT,
            },
            Material::lit(TRUNK_COLOR),
        );
        let foliage = Visual::mesh(
            Shape::Sphere {
                radius: FOLIAGE_RADIUS,
            },
            Material::lit(GRASS_COLOR),
        );

        let mountains = self.scene.mountains();
        for position in place_trees(rng, &self.config.trees, &mountains)? {
            self.scene
                .spawn(EntityKind::TreeTrunk, Transform::from_position(position), trunk.clone())?;
            self.scene.spawn(
                EntityKind::TreeFoliage,
                Transform::from_position(Vec3::new(position.x, FOLIAGE_Y, position.z)),
                foliage.clone(),
            )?;
            self.scene.record_placement(PlacedEntity {
                position,
                kind: PlacementKind::Tree,
            })?;
        }
        Ok(())
    }

    fn add_birds<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<BirdFlock, BuildError> {
        let mut flock = BirdFlock::new(self.config.flock.clone(), rng)?;
        let body = Visual::mesh(
            Shape::Box {
                width: BIRD_SIZE.x,
                height: BIRD_SIZE.y,
                depth: BIRD_SIZE.z,
            },
            Material::lit(BIRD_COLOR),
        );
        for bird in flock.birds_mut() {
            let id = self.scene.spawn(
                EntityKind::Bird,
                Transform::from_position(bird.position),
                body.clone(),
            )?;
            bird.entity = Some(id);
        }
        Ok(flock)
    }
}
