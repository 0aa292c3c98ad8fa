// Typed handles to cached assets

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Stable key of a cached asset, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(u64);

impl AssetId {
    pub fn from_path(path: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// An `AssetId` tagged with the kind of asset it names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle<T> {
    id: AssetId,
    kind: PhantomData<T>,
}

impl<T> AssetHandle<T> {
    pub(crate) fn new(id: AssetId) -> Self {
        Self {
            id,
            kind: PhantomData,
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureAsset;

pub type TextureHandle = AssetHandle<TextureAsset>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(
            AssetId::from_path("Mario/Mario0.png"),
            AssetId::from_path("Mario/Mario0.png")
        );
        assert_ne!(
            AssetId::from_path("Mario/Mario0.png"),
            AssetId::from_path("Blocks.png")
        );
    }

    #[test]
    fn test_handles_compare_by_id() {
        let mario: TextureHandle = AssetHandle::new(AssetId::from_path("Mario/Mario0.png"));
        let blocks: TextureHandle = AssetHandle::new(AssetId::from_path("Blocks.png"));

        assert_eq!(mario, AssetHandle::new(mario.id()));
        assert_ne!(mario, blocks);
    }
}
