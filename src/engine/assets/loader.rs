// Asset loading functionality

use super::AssetError;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Texture,
    Level,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Texture => "Textures",
            AssetType::Level => "Levels",
        }
    }
}

/// Asset loader responsible for finding and loading asset files
#[derive(Debug)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve_path(asset_type, name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()).into());
        }

        Ok(std::fs::read(&path).map_err(AssetError::from)?)
    }

    /// Load a UTF-8 text asset
    pub fn load_string(&self, asset_type: AssetType, name: &str) -> Result<String> {
        let bytes = self.load_bytes(asset_type, name)?;
        String::from_utf8(bytes)
            .map_err(|e| AssetError::LoadError(format!("{} is not UTF-8: {}", name, e)).into())
    }

    /// Check if an asset exists
    pub fn exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.resolve_path(asset_type, name).exists()
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path(AssetType::Texture, "Mario/Mario0.png");

        assert_eq!(path, PathBuf::from("/game/assets/Textures/Mario/Mario0.png"));
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());

        assert!(!loader.exists(AssetType::Level, "1-1.txt"));
        let err = loader.load_bytes(AssetType::Level, "1-1.txt").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AssetError>(),
            Some(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_string() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Levels")).unwrap();
        std::fs::write(dir.path().join("Levels/1-1.txt"), "M\n#").unwrap();

        let loader = AssetLoader::new(dir.path());
        assert!(loader.exists(AssetType::Level, "1-1.txt"));
        assert_eq!(loader.load_string(AssetType::Level, "1-1.txt").unwrap(), "M\n#");
    }
}
