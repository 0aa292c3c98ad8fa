// Asset management system
//
// Provides centralized loading and caching of game assets.

mod handle;
mod loader;
mod manager;

pub use handle::{AssetHandle, AssetId, TextureAsset, TextureHandle};
pub use loader::{AssetLoader, AssetType};
pub use manager::{AssetManager, TextureData};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("Mario0.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: Mario0.png");
    }
}
