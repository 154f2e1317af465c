use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use vista_common::within_range;

/// How many candidate draws a single placement may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptLimit {
    /// Redraw until a candidate is accepted. Never returns when the
    /// constraints cannot be met inside the region.
    Unbounded,
    /// Give up on a slot after this many rejected draws.
    PerPlacement(u32),
}

impl Default for AttemptLimit {
    fn default() -> Self {
        Self::PerPlacement(10_000)
    }
}

/// Errors from placement.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error(
        "placement infeasible: placed {placed} of {requested}, last slot rejected {attempts} candidates"
    )]
    Infeasible {
        placed: usize,
        requested: usize,
        attempts: u32,
    },
    #[error("invalid sampling range [{min}, {max}]")]
    InvalidRange { min: f32, max: f32 },
    #[error("invalid minimum distance {0}")]
    InvalidDistance(f32),
}

/// Axis-aligned sampling area on the horizontal plane (x, z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min: Vec2,
    pub max: Vec2,
}

impl Region {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Region of `width` by `depth` centered on the origin.
    pub fn centered(width: f32, depth: f32) -> Self {
        let half = Vec2::new(width, depth) * 0.5;
        Self::new(-half, half)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Bounds must be finite and ordered, and the extent must fit in an f32.
    pub fn validate(&self) -> Result<(), PlacementError> {
        for (min, max) in [(self.min.x, self.max.x), (self.min.y, self.max.y)] {
            if !(min.is_finite() && max.is_finite() && (max - min).is_finite()) || min > max {
                return Err(PlacementError::InvalidRange { min, max });
            }
        }
        Ok(())
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.gen_range(self.min.x..=self.max.x),
            rng.gen_range(self.min.y..=self.max.y),
        )
    }
}

fn validate_distance(d: f32) -> Result<f32, PlacementError> {
    if d.is_finite() && d >= 0.0 {
        Ok(d)
    } else {
        Err(PlacementError::InvalidDistance(d))
    }
}

/// Generate-and-test sampler for points that keep a minimum spacing from each
/// other and from fixed obstacle sets.
#[derive(Debug, Clone)]
pub struct RejectionSampler {
    region: Region,
    limit: AttemptLimit,
    spacing: f32,
    obstacles: Vec<(Vec<Vec2>, f32)>,
    accepted: Vec<Vec2>,
    total_draws: u64,
}

impl RejectionSampler {
    pub fn new(region: Region, limit: AttemptLimit) -> Result<Self, PlacementError> {
        region.validate()?;
        Ok(Self {
            region,
            limit,
            spacing: 0.0,
            obstacles: Vec::new(),
            accepted: Vec::new(),
            total_draws: 0,
        })
    }

    /// Minimum distance between any two accepted points.
    pub fn with_spacing(mut self, min_distance: f32) -> Result<Self, PlacementError> {
        self.spacing = validate_distance(min_distance)?;
        Ok(self)
    }

    /// Fixed points every accepted point must stay `min_distance` away from.
    pub fn with_obstacles(
        mut self,
        points: impl IntoIterator<Item = Vec2>,
        min_distance: f32,
    ) -> Result<Self, PlacementError> {
        let min_distance = validate_distance(min_distance)?;
        self.obstacles
            .push((points.into_iter().collect(), min_distance));
        Ok(self)
    }

    /// Points accepted so far, in acceptance order.
    pub fn accepted(&self) -> &[Vec2] {
        &self.accepted
    }

    /// Candidate draws consumed so far, accepted or not.
    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }

    pub fn into_accepted(self) -> Vec<Vec2> {
        self.accepted
    }

    fn is_acceptable(&self, candidate: Vec2) -> bool {
        within_range(candidate, &self.accepted, self.spacing)
            && self
                .obstacles
                .iter()
                .all(|(points, min)| within_range(candidate, points, *min))
    }

    /// Draw until one candidate is accepted. `None` once the attempt limit is hit.
    fn try_sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Vec2> {
        let mut attempts: u32 = 0;
        loop {
            if let AttemptLimit::PerPlacement(max) = self.limit {
                if attempts >= max {
                    return None;
                }
            }
            attempts = attempts.saturating_add(1);
            self.total_draws += 1;

            let candidate = self.region.draw(rng);
            if self.is_acceptable(candidate) {
                tracing::trace!(?candidate, attempts, "candidate accepted");
                self.accepted.push(candidate);
                return Some(candidate);
            }
        }
    }

    /// Accept one more point.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec2, PlacementError> {
        let placed = self.accepted.len();
        self.try_sample(rng).ok_or(PlacementError::Infeasible {
            placed,
            requested: placed + 1,
            attempts: self.attempt_cap(),
        })
    }

    /// Accept `count` more points, in order.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<Vec2>, PlacementError> {
        let start = self.accepted.len();
        for _ in 0..count {
            if self.try_sample(rng).is_none() {
                let placed = self.accepted.len() - start;
                tracing::warn!(placed, requested = count, "placement gave up");
                return Err(PlacementError::Infeasible {
                    placed,
                    requested: count,
                    attempts: self.attempt_cap(),
                });
            }
        }
        Ok(self.accepted[start..].to_vec())
    }

    fn attempt_cap(&self) -> u32 {
        match self.limit {
            AttemptLimit::PerPlacement(max) => max,
            AttemptLimit::Unbounded => u32::MAX,
        }
    }
}

/// Uniform scatter with no distance constraint.
pub fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    region: Region,
    count: usize,
) -> Result<Vec<Vec2>, PlacementError> {
    region.validate()?;
    Ok((0..count).map(|_| region.draw(rng)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn centered_region() {
        let r = Region::centered(75.0, 40.0);
        assert_eq!(r.min, Vec2::new(-37.5, -20.0));
        assert_eq!(r.max, Vec2::new(37.5, 20.0));
        assert!(r.contains(Vec2::new(37.5, -20.0)));
        assert!(!r.contains(Vec2::new(37.6, 0.0)));
    }

    #[test]
    fn rejects_inverted_or_nan_region() {
        let inverted = Region::new(Vec2::new(5.0, 0.0), Vec2::new(-5.0, 1.0));
        assert!(matches!(
            RejectionSampler::new(inverted, AttemptLimit::Unbounded),
            Err(PlacementError::InvalidRange { .. })
        ));
        let nan = Region::new(Vec2::new(f32::NAN, 0.0), Vec2::ONE);
        assert!(RejectionSampler::new(nan, AttemptLimit::Unbounded).is_err());
    }

    #[test]
    fn rejects_region_wider_than_f32() {
        let mut rng = StdRng::seed_from_u64(2);
        let huge = Region::new(Vec2::new(-3e38, -1.0), Vec2::new(3e38, 1.0));
        assert_eq!(
            huge.validate(),
            Err(PlacementError::InvalidRange {
                min: -3e38,
                max: 3e38,
            })
        );
        assert!(matches!(
            scatter(&mut rng, huge, 10),
            Err(PlacementError::InvalidRange { .. })
        ));
        assert!(RejectionSampler::new(huge, AttemptLimit::default()).is_err());
    }

    #[test]
    fn rejects_negative_distance() {
        let sampler = RejectionSampler::new(Region::centered(10.0, 10.0), AttemptLimit::default())
            .unwrap();
        assert_eq!(
            sampler.clone().with_spacing(-1.0).unwrap_err(),
            PlacementError::InvalidDistance(-1.0)
        );
        assert!(sampler.with_obstacles([Vec2::ZERO], f32::INFINITY).is_err());
    }

    #[test]
    fn accepted_points_keep_spacing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sampler = RejectionSampler::new(Region::centered(60.0, 60.0), AttemptLimit::default())
            .unwrap()
            .with_spacing(6.0)
            .unwrap();
        let points = sampler.place(&mut rng, 30).unwrap();
        assert_eq!(points.len(), 30);
        for (i, a) in points.iter().enumerate() {
            assert!(Region::centered(60.0, 60.0).contains(*a));
            for b in &points[i + 1..] {
                assert!(a.distance(*b) >= 6.0);
            }
        }
    }

    #[test]
    fn obstacles_are_avoided() {
        let mut rng = StdRng::seed_from_u64(8);
        let obstacles = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)];
        let mut sampler = RejectionSampler::new(Region::centered(80.0, 80.0), AttemptLimit::default())
            .unwrap()
            .with_obstacles(obstacles, 15.0)
            .unwrap();
        for p in sampler.place(&mut rng, 25).unwrap() {
            for o in obstacles {
                assert!(p.distance(o) >= 15.0);
            }
        }
    }

    #[test]
    fn bounded_limit_reports_infeasible() {
        let mut rng = StdRng::seed_from_u64(1);
        // Any two points in a 10x10 square are closer than 50 units.
        let mut sampler = RejectionSampler::new(Region::centered(10.0, 10.0), AttemptLimit::PerPlacement(64))
            .unwrap()
            .with_spacing(50.0)
            .unwrap();
        let err = sampler.place(&mut rng, 5).unwrap_err();
        assert_eq!(
            err,
            PlacementError::Infeasible {
                placed: 1,
                requested: 5,
                attempts: 64,
            }
        );
        assert_eq!(sampler.accepted().len(), 1);
        assert_eq!(sampler.total_draws(), 1 + 64);
    }

    #[test]
    fn sample_reports_next_slot() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sampler = RejectionSampler::new(Region::centered(1.0, 1.0), AttemptLimit::PerPlacement(4))
            .unwrap()
            .with_obstacles([Vec2::ZERO], 5.0)
            .unwrap();
        assert_eq!(
            sampler.sample(&mut rng).unwrap_err(),
            PlacementError::Infeasible {
                placed: 0,
                requested: 1,
                attempts: 4,
            }
        );
    }

    #[test]
    fn unbounded_limit_terminates_when_feasible() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut sampler = RejectionSampler::new(Region::centered(75.0, 75.0), AttemptLimit::Unbounded)
            .unwrap()
            .with_spacing(5.0)
            .unwrap();
        assert_eq!(sampler.place(&mut rng, 20).unwrap().len(), 20);
        assert!(sampler.total_draws() >= 20);
    }

    #[test]
    fn zero_spacing_accepts_every_draw() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sampler =
            RejectionSampler::new(Region::new(Vec2::ONE, Vec2::ONE), AttemptLimit::PerPlacement(1))
                .unwrap();
        let points = sampler.place(&mut rng, 10).unwrap();
        assert!(points.iter().all(|p| *p == Vec2::ONE));
        assert_eq!(sampler.total_draws(), 10);
    }

    #[test]
    fn scatter_stays_in_region() {
        let mut rng = StdRng::seed_from_u64(9);
        let region = Region::centered(200.0, 100.0);
        let points = scatter(&mut rng, region, 3000).unwrap();
        assert_eq!(points.len(), 3000);
        assert!(points.iter().all(|p| region.contains(*p)));
    }
}
