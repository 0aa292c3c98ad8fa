// Central asset management system

use super::{AssetError, AssetHandle, AssetId, AssetLoader, AssetType, TextureAsset, TextureHandle};
use anyhow::Result;
use image::RgbaImage;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;

/// A decoded texture kept in memory until the renderer uploads it
#[derive(Debug, Clone)]
pub struct TextureData {
    pub name: String,
    pub pixels: RgbaImage,
}

impl TextureData {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Central asset manager for the game
///
/// Handles loading and caching of textures and level files.
#[derive(Debug)]
pub struct AssetManager {
    /// Asset loader
    loader: AssetLoader,

    /// Decoded textures
    textures: HashMap<AssetId, TextureData>,

    /// Path to ID mapping for textures
    texture_paths: HashMap<String, AssetId>,
}

impl AssetManager {
    /// Create a new asset manager
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            textures: HashMap::new(),
            texture_paths: HashMap::new(),
        }
    }

    /// Load and decode a texture from disk, reusing a cached copy
    pub fn load_texture(&mut self, name: &str) -> Result<AssetHandle<TextureAsset>> {
        if let Some(&id) = self.texture_paths.get(name) {
            return Ok(AssetHandle::new(id));
        }

        let bytes = self.loader.load_bytes(AssetType::Texture, name)?;
        let pixels = image::load_from_memory(&bytes)
            .map_err(|source| AssetError::Decode {
                name: name.to_string(),
                source,
            })?
            .to_rgba8();

        debug!("Loaded texture {} ({}x{})", name, pixels.width(), pixels.height());
        Ok(self.store(name, pixels))
    }

    /// Load a texture, logging and returning `None` when it is unavailable
    pub fn try_load_texture(&mut self, name: &str) -> Option<TextureHandle> {
        match self.load_texture(name) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Could not load texture {}: {}", name, e);
                None
            }
        }
    }

    fn store(&mut self, name: &str, pixels: RgbaImage) -> TextureHandle {
        let id = AssetId::from_path(name);
        self.textures.insert(
            id,
            TextureData {
                name: name.to_string(),
                pixels,
            },
        );
        self.texture_paths.insert(name.to_string(), id);
        AssetHandle::new(id)
    }

    /// All decoded textures
    pub fn textures(&self) -> impl Iterator<Item = (AssetId, &TextureData)> {
        self.textures.iter().map(|(id, data)| (*id, data))
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Read a level description
    pub fn load_level_source(&self, name: &str) -> Result<String> {
        self.loader.load_string(AssetType::Level, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let path = dir.join("Textures").join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();
    }

    #[test]
    fn test_load_texture_decodes_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "Mario/Mario0.png", 96, 16);

        let mut assets = AssetManager::new(dir.path());
        let handle = assets.load_texture("Mario/Mario0.png").unwrap();
        let again = assets.load_texture("Mario/Mario0.png").unwrap();

        assert_eq!(handle, again);
        assert_eq!(assets.texture_count(), 1);
        let (id, data) = assets.textures().next().unwrap();
        assert_eq!(id, handle.id());
        assert_eq!((data.width(), data.height()), (96, 16));
    }

    #[test]
    fn test_try_load_missing_texture_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut assets = AssetManager::new(dir.path());
        assert!(assets.try_load_texture("Mario/Mario0.png").is_none());
        assert_eq!(assets.texture_count(), 0);
    }

    #[test]
    fn test_corrupt_texture_reports_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Textures")).unwrap();
        std::fs::write(dir.path().join("Textures/Blocks.png"), b"not a png").unwrap();

        let mut assets = AssetManager::new(dir.path());
        let err = assets.load_texture("Blocks.png").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AssetError>(),
            Some(AssetError::Decode { .. })
        ));
    }
}
