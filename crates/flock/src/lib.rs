//! Birds flying across the sky along +x.
//!
//! # Invariants
//! - A bird's x stays within `[x_start, x_end]` after every tick.
//! - On crossing `x_end` a bird restarts at `x_start` with a fresh height and depth.
//! - Birds never read each other's state; tick order does not matter.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use vista_common::EntityId;

/// Flight and respawn parameters shared by every bird.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    pub count: usize,
    /// Distance travelled along +x per tick.
    pub speed: f32,
    pub x_start: f32,
    pub x_end: f32,
    /// Respawn height range, `[min, max)`.
    pub y_range: [f32; 2],
    /// Respawn depth range, `[min, max)`.
    pub z_range: [f32; 2],
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            count: 5,
            speed: 0.2,
            x_start: -50.0,
            x_end: 50.0,
            y_range: [5.0, 20.0],
            z_range: [-50.0, -10.0],
        }
    }
}

/// Errors from flock configuration.
#[derive(Debug, thiserror::Error)]
pub enum FlockError {
    #[error("{axis} range [{min}, {max}) is empty")]
    EmptyRange { axis: &'static str, min: f32, max: f32 },
    #[error("{axis} range [{min}, {max}) is not finite")]
    NonFinite { axis: &'static str, min: f32, max: f32 },
    #[error("speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),
}

impl FlockConfig {
    pub fn validate(&self) -> Result<(), FlockError> {
        for (axis, [min, max]) in [
            ("x", [self.x_start, self.x_end]),
            ("y", self.y_range),
            ("z", self.z_range),
        ] {
            if !(min.is_finite() && max.is_finite() && (max - min).is_finite()) {
                return Err(FlockError::NonFinite { axis, min, max });
            }
            if min >= max {
                return Err(FlockError::EmptyRange { axis, min, max });
            }
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(FlockError::InvalidSpeed(self.speed));
        }
        Ok(())
    }

    fn respawn_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            self.x_start,
            rng.gen_range(self.y_range[0]..self.y_range[1]),
            rng.gen_range(self.z_range[0]..self.z_range[1]),
        )
    }
}

/// A single bird.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub position: Vec3,
    /// Scene entity this bird drives, once spawned into a scene.
    pub entity: Option<EntityId>,
    /// How many times this bird has wrapped back to the start.
    pub respawns: u32,
}

impl Bird {
    /// Advance one tick. Returns true if the bird respawned.
    fn advance<R: Rng + ?Sized>(&mut self, config: &FlockConfig, rng: &mut R) -> bool {
        self.position.x += config.speed;
        if self.position.x > config.x_end {
            self.position = config.respawn_position(rng);
            self.respawns += 1;
            true
        } else {
            false
        }
    }
}

/// Fixed-size collection of independent birds.
#[derive(Debug, Clone)]
pub struct BirdFlock {
    config: FlockConfig,
    birds: Vec<Bird>,
}

impl BirdFlock {
    /// Create `config.count` birds at the start line with random height and depth.
    pub fn new<R: Rng + ?Sized>(config: FlockConfig, rng: &mut R) -> Result<Self, FlockError> {
        config.validate()?;
        let birds = (0..config.count)
            .map(|_| Bird {
                position: config.respawn_position(rng),
                entity: None,
                respawns: 0,
            })
            .collect();
        tracing::debug!(count = config.count, "flock created");
        Ok(Self { config, birds })
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    pub fn birds_mut(&mut self) -> &mut [Bird] {
        &mut self.birds
    }

    pub fn len(&self) -> usize {
        self.birds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.birds.is_empty()
    }

    /// Advance every bird one tick. Returns how many respawned.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut respawned = 0;
        for bird in &mut self.birds {
            if bird.advance(&self.config, rng) {
                tracing::debug!(position = ?bird.position, respawns = bird.respawns, "bird respawned");
                respawned += 1;
            }
        }
        respawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_in_respawn_ranges(bird: &Bird, config: &FlockConfig) {
        let p = bird.position;
        assert!(p.y >= config.y_range[0] && p.y < config.y_range[1]);
        assert!(p.z >= config.z_range[0] && p.z < config.z_range[1]);
    }

    #[test]
    fn new_flock_starts_at_start_line() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = FlockConfig::default();
        let flock = BirdFlock::new(config.clone(), &mut rng).unwrap();
        assert_eq!(flock.len(), 5);
        for bird in flock.birds() {
            assert_eq!(bird.position.x, -50.0);
            assert_in_respawn_ranges(bird, &config);
            assert!(bird.entity.is_none());
            assert_eq!(bird.respawns, 0);
        }
    }

    #[test]
    fn tick_moves_along_x_only() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut flock = BirdFlock::new(FlockConfig::default(), &mut rng).unwrap();
        let before: Vec<Vec3> = flock.birds().iter().map(|b| b.position).collect();
        assert_eq!(flock.tick(&mut rng), 0);
        for (bird, old) in flock.birds().iter().zip(before) {
            assert!((bird.position.x - (old.x + 0.2)).abs() < 1e-5);
            assert_eq!(bird.position.y, old.y);
            assert_eq!(bird.position.z, old.z);
        }
    }

    #[test]
    fn wraps_once_after_crossing_the_end() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = FlockConfig {
            count: 1,
            ..FlockConfig::default()
        };
        let mut flock = BirdFlock::new(config.clone(), &mut rng).unwrap();

        // 100 units at 0.2 per tick; accumulated f32 error puts x just past
        // 50 on tick 500 itself.
        for _ in 0..499 {
            flock.tick(&mut rng);
        }
        assert_eq!(flock.birds()[0].respawns, 0);

        assert_eq!(flock.tick(&mut rng), 1);
        let bird = &flock.birds()[0];
        assert_eq!(bird.respawns, 1);
        assert_eq!(bird.position.x, -50.0);
        assert_in_respawn_ranges(bird, &config);

        let mut total = 0;
        for _ in 500..600 {
            total += flock.tick(&mut rng);
        }
        let bird = &flock.birds()[0];
        assert_eq!(total, 0);
        assert_eq!(bird.respawns, 1);
        assert!(bird.position.x >= -50.0 && bird.position.x < -29.0);
    }

    #[test]
    fn x_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut flock = BirdFlock::new(FlockConfig::default(), &mut rng).unwrap();
        for _ in 0..2_000 {
            flock.tick(&mut rng);
            for bird in flock.birds() {
                assert!(bird.position.x >= -50.0 && bird.position.x <= 50.0);
            }
        }
        assert!(flock.birds().iter().all(|b| b.respawns >= 3));
    }

    #[test]
    fn birds_are_independent() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut flock = BirdFlock::new(FlockConfig::default(), &mut rng).unwrap();
        // Put one bird right at the edge; only it respawns.
        flock.birds_mut()[2].position.x = 49.9;
        let others: Vec<Vec3> = flock
            .birds()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .map(|(_, b)| b.position)
            .collect();
        assert_eq!(flock.tick(&mut rng), 1);
        assert_eq!(flock.birds()[2].position.x, -50.0);
        let after: Vec<Vec3> = flock
            .birds()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .map(|(_, b)| b.position)
            .collect();
        for (a, b) in after.iter().zip(others) {
            assert!((a.x - b.x - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty_y = FlockConfig {
            y_range: [20.0, 5.0],
            ..FlockConfig::default()
        };
        assert!(matches!(
            BirdFlock::new(empty_y, &mut rng),
            Err(FlockError::EmptyRange { axis: "y", .. })
        ));
        let stalled = FlockConfig {
            speed: 0.0,
            ..FlockConfig::default()
        };
        assert!(matches!(
            BirdFlock::new(stalled, &mut rng),
            Err(FlockError::InvalidSpeed(_))
        ));
    }

    #[test]
    fn infinite_ranges_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let open_low = FlockConfig {
            y_range: [f32::NEG_INFINITY, 5.0],
            ..FlockConfig::default()
        };
        assert!(matches!(
            open_low.validate(),
            Err(FlockError::NonFinite { axis: "y", .. })
        ));
        assert!(BirdFlock::new(open_low, &mut rng).is_err());

        let endless = FlockConfig {
            x_end: f32::INFINITY,
            ..FlockConfig::default()
        };
        assert!(matches!(
            endless.validate(),
            Err(FlockError::NonFinite { axis: "x", .. })
        ));

        // Finite bounds whose width overflows f32.
        let too_wide = FlockConfig {
            z_range: [-3e38, 3e38],
            ..FlockConfig::default()
        };
        assert!(matches!(
            BirdFlock::new(too_wide, &mut rng),
            Err(FlockError::NonFinite { axis: "z", .. })
        ));
    }
}
