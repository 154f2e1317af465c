use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vista_assets::TextureCatalog;
use vista_camera::CameraConfig;
use vista_flock::FlockConfig;
use vista_placement::{AttemptLimit, Region, TreePlacement};

/// Errors from loading or validating a landscape configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Ground cover scattered with no spacing constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    pub count: usize,
    pub region: Region,
    /// Blade box size (width, height, depth). Blades stand on the ground.
    pub blade_size: Vec3,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            count: 3000,
            region: Region::centered(200.0, 100.0),
            blade_size: Vec3::new(0.1, 0.25, 0.1),
        }
    }
}

/// One mountain cone. `position` is the cone's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MountainConfig {
    pub position: Vec3,
    pub radius: f32,
    pub height: f32,
}

fn default_mountains() -> Vec<MountainConfig> {
    vec![
        MountainConfig {
            position: Vec3::new(0.0, 12.0, 1.0),
            radius: 10.0,
            height: 30.0,
        },
        MountainConfig {
            position: Vec3::new(-10.0, 9.0, 5.0),
            radius: 5.0,
            height: 20.0,
        },
        MountainConfig {
            position: Vec3::new(8.0, 8.0, 11.0),
            radius: 5.0,
            height: 20.0,
        },
    ]
}

/// Where textures live and which logical names each category offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub media_dir: PathBuf,
    pub mountain: Vec<String>,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            media_dir: PathBuf::from("media"),
            mountain: (0..5).map(|i| format!("mountain{i}.jpg")).collect(),
        }
    }
}

impl TextureConfig {
    pub fn catalog(&self) -> TextureCatalog {
        let mut catalog = TextureCatalog::new(&self.media_dir);
        catalog.insert_category("mountain", self.mountain.clone());
        catalog
    }
}

/// Everything needed to build and animate a landscape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandscapeConfig {
    /// RNG seed. Without one every run lays the scene out differently.
    pub seed: Option<u64>,
    pub grass: GrassConfig,
    pub mountains: Vec<MountainConfig>,
    pub trees: TreePlacement,
    pub flock: FlockConfig,
    pub camera: CameraConfig,
    pub textures: TextureConfig,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            grass: GrassConfig::default(),
            mountains: default_mountains(),
            trees: TreePlacement::default(),
            flock: FlockConfig::default(),
            camera: CameraConfig::default(),
            textures: TextureConfig::default(),
        }
    }
}

impl LandscapeConfig {
    /// Load from a YAML or JSON file, chosen by extension, and validate.
    /// Files without a `.json` extension are read as YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: Self = if is_json {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        config.validate()?;
        tracing::info!(path = %path.display(), seed = ?config.seed, "configuration loaded");
        Ok(config)
    }

    /// Reject values no scene can be built from. Infeasible tree spacing is
    /// not detected here; placement reports it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        self.flock
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("flock: {e}")))?;

        let t = &self.trees;
        if !(t.min_tree_distance.is_finite() && t.min_tree_distance >= 0.0) {
            return invalid(format!("trees.min_tree_distance {}", t.min_tree_distance));
        }
        if !(t.min_mountain_distance.is_finite() && t.min_mountain_distance >= 0.0) {
            return invalid(format!(
                "trees.min_mountain_distance {}",
                t.min_mountain_distance
            ));
        }
        if t.attempts == AttemptLimit::PerPlacement(0) {
            return invalid("trees.attempts must allow at least one draw".into());
        }
        for (name, region) in [("trees.region", t.region), ("grass.region", self.grass.region)] {
            if let Err(e) = region.validate() {
                return invalid(format!("{name}: {e}"));
            }
        }
        if !self.grass.blade_size.cmpgt(Vec3::ZERO).all() {
            return invalid(format!("grass.blade_size {}", self.grass.blade_size));
        }
        for (i, m) in self.mountains.iter().enumerate() {
            if !(m.radius > 0.0 && m.height > 0.0 && m.position.is_finite()) {
                return invalid(format!("mountains[{i}] {m:?}"));
            }
        }
        if !self.mountains.is_empty() && self.textures.mountain.is_empty() {
            return invalid("textures.mountain is empty".into());
        }

        let c = &self.camera;
        if !(c.fov_degrees > 0.0 && c.fov_degrees < 180.0) {
            return invalid(format!("camera.fov_degrees {}", c.fov_degrees));
        }
        if !(c.near > 0.0 && c.near < c.far) {
            return invalid(format!("camera near {} / far {}", c.near, c.far));
        }
        if c.orbit.min_distance > c.orbit.max_distance {
            return invalid(format!(
                "camera.orbit distance [{}, {}]",
                c.orbit.min_distance, c.orbit.max_distance
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate() {
        let config = LandscapeConfig::default();
        config.validate().unwrap();
        assert_eq!(config.grass.count, 3000);
        assert_eq!(config.mountains.len(), 3);
        assert_eq!(config.trees.count, 20);
        assert_eq!(config.flock.count, 5);
        assert_eq!(config.textures.mountain.len(), 5);
        assert!(config.seed.is_none());
    }

    #[test]
    fn texture_catalog_matches_default_catalog() {
        let catalog = TextureConfig::default().catalog();
        let expected = TextureCatalog::default();
        assert_eq!(catalog.names("mountain"), expected.names("mountain"));
        assert_eq!(catalog.media_dir(), expected.media_dir());
    }

    #[test]
    fn load_yaml_with_partial_fields() {
        let mut tmp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            tmp,
            "seed: 7\ntrees:\n  count: 5\n  attempts: unbounded\nflock:\n  count: 2\n"
        )
        .unwrap();
        let config = LandscapeConfig::load(tmp.path()).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.trees.count, 5);
        assert_eq!(config.trees.attempts, AttemptLimit::Unbounded);
        assert_eq!(config.trees.min_tree_distance, 5.0);
        assert_eq!(config.flock.count, 2);
        assert_eq!(config.grass, GrassConfig::default());
    }

    #[test]
    fn load_json_by_extension() {
        let mut tmp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            tmp,
            r#"{{"trees": {{"attempts": {{"per_placement": 50}}}}, "grass": {{"count": 10}}}}"#
        )
        .unwrap();
        let config = LandscapeConfig::load(tmp.path()).unwrap();
        assert_eq!(config.trees.attempts, AttemptLimit::PerPlacement(50));
        assert_eq!(config.grass.count, 10);
    }

    #[test]
    fn load_reports_parse_and_io_errors() {
        let mut tmp = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(tmp, "trees: [not, a, map]").unwrap();
        assert!(matches!(
            LandscapeConfig::load(tmp.path()),
            Err(ConfigError::Yaml(_))
        ));

        let mut tmp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(tmp, "{{ nope").unwrap();
        assert!(matches!(
            LandscapeConfig::load(tmp.path()),
            Err(ConfigError::Json(_))
        ));

        assert!(matches!(
            LandscapeConfig::load(Path::new("/nonexistent/landscape.yaml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn load_rejects_invalid_values() {
        let mut tmp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(tmp, "flock:\n  y_range: [20.0, 5.0]\n").unwrap();
        let err = LandscapeConfig::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.starts_with("flock")));
    }

    #[test]
    fn validate_catches_bad_fields() {
        let mut config = LandscapeConfig::default();
        config.trees.min_tree_distance = -1.0;
        assert!(config.validate().is_err());

        let mut config = LandscapeConfig::default();
        config.trees.attempts = AttemptLimit::PerPlacement(0);
        assert!(config.validate().is_err());

        let mut config = LandscapeConfig::default();
        config.textures.mountain.clear();
        assert!(config.validate().is_err());
        config.mountains.clear();
        assert!(config.validate().is_ok());

        let mut config = LandscapeConfig::default();
        config.camera.near = 2000.0;
        assert!(config.validate().is_err());

        let mut config = LandscapeConfig::default();
        config.grass.blade_size = Vec3::new(0.1, 0.0, 0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_rejects_unsampleable_ranges() {
        let mut tmp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(tmp, "grass:\n  region:\n    min: [-3.0e38, -1.0]\n    max: [3.0e38, 1.0]\n").unwrap();
        let err = LandscapeConfig::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.starts_with("grass.region")));

        let mut tmp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(tmp, "flock:\n  y_range: [-.inf, 5.0]\n").unwrap();
        let err = LandscapeConfig::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.starts_with("flock")));
    }

    #[test]
    fn round_trips_through_yaml() {
        let config = LandscapeConfig {
            seed: Some(42),
            ..LandscapeConfig::default()
        };
        let text = serde_yaml::to_string(&config).unwrap();
        let back: LandscapeConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
