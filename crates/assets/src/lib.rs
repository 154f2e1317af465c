//! Texture lookup for scene construction.
//!
//! Textures are identified by content-addressed handles computed from their
//! resolved path. The scene stores handles, never raw file paths, and whether
//! the file behind a handle actually exists is left to the renderer that
//! eventually decodes it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Content-addressed texture ID computed from the resolved asset path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// A handle to a texture asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureHandle {
    pub id: AssetId,
    /// Logical name the handle was requested with, e.g. `mountain3.jpg`.
    pub name: String,
    pub path: PathBuf,
}

/// Errors from texture lookups.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("unknown texture category: {0}")]
    UnknownCategory(String),
    #[error("texture category {0} has no entries")]
    EmptyCategory(String),
}

/// Anything that can turn a logical asset name into a texture handle.
pub trait TextureProvider {
    fn load_texture(&self, logical_name: &str) -> TextureHandle;
}

/// Texture catalog: groups logical texture names into categories and resolves
/// them against a media directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureCatalog {
    media_dir: PathBuf,
    categories: BTreeMap<String, Vec<String>>,
}

impl Default for TextureCatalog {
    fn default() -> Self {
        let mut catalog = Self::new("media");
        catalog.insert_category(
            "mountain",
            (0..5).map(|i| format!("mountain{i}.jpg")).collect(),
        );
        catalog
    }
}

impl TextureCatalog {
    /// Create an empty catalog rooted at `media_dir`.
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_dir: media_dir.into(),
            categories: BTreeMap::new(),
        }
    }

    pub fn media_dir(&self) -> &PathBuf {
        &self.media_dir
    }

    /// Register (or replace) the logical names for a category.
    pub fn insert_category(&mut self, category: impl Into<String>, names: Vec<String>) {
        self.categories.insert(category.into(), names);
    }

    /// Logical names registered for a category.
    pub fn names(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Pick one texture of `category` uniformly at random.
    pub fn random_texture<R: Rng + ?Sized>(
        &self,
        category: &str,
        rng: &mut R,
    ) -> Result<TextureHandle, AssetError> {
        let names = self
            .categories
            .get(category)
            .ok_or_else(|| AssetError::UnknownCategory(category.to_string()))?;
        if names.is_empty() {
            return Err(AssetError::EmptyCategory(category.to_string()));
        }
        let name = &names[rng.gen_range(0..names.len())];
        tracing::debug!(category, name = name.as_str(), "picked texture");
        Ok(self.load_texture(name))
    }

    fn content_hash(path: &str) -> AssetId {
        let mut hasher = Sha256::new();
        hasher.update(path.as_bytes());
        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        AssetId(u64::from_le_bytes(bytes))
    }
}

impl TextureProvider for TextureCatalog {
    fn load_texture(&self, logical_name: &str) -> TextureHandle {
        let path = self.media_dir.join(logical_name);
        let id = Self::content_hash(&path.to_string_lossy());
        TextureHandle {
            id,
            name: logical_name.to_string(),
            path,
        }
    }
}
