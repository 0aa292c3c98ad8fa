// Game configuration: defaults plus environment overrides

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Directory holding `Textures/` and `Levels/`
pub const ASSETS_ENV: &str = "MARIO_ASSETS";
/// Level file name inside `Levels/`
pub const LEVEL_ENV: &str = "MARIO_LEVEL";
/// Window size as `WIDTHxHEIGHT`
pub const WINDOW_ENV: &str = "MARIO_WINDOW";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid window size {0:?}, expected WIDTHxHEIGHT (e.g. 800x600)")]
    InvalidWindowSize(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window_title: String,
    /// Logical window size in pixels
    pub window_size: (u32, u32),
    pub asset_root: PathBuf,
    pub level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Super Mario".to_string(),
            window_size: (800, 600),
            asset_root: PathBuf::from("assets"),
            level: "1-1.txt".to_string(),
        }
    }
}

impl GameConfig {
    /// Defaults with `MARIO_ASSETS`, `MARIO_LEVEL` and `MARIO_WINDOW` applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(root) = lookup(ASSETS_ENV) {
            config.asset_root = PathBuf::from(root);
        }
        if let Some(level) = lookup(LEVEL_ENV) {
            config.level = level;
        }
        if let Some(size) = lookup(WINDOW_ENV) {
            config.window_size = parse_window_size(&size)?;
        }

        Ok(config)
    }
}

/// Parse `WIDTHxHEIGHT`; both sides must be positive integers
pub fn parse_window_size(value: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidWindowSize(value.to_string());

    let (width, height) = value.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let height: u32 = height.trim().parse().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}
