// Gameplay: the player character, level tiles and the level itself

pub mod blocks;
pub mod characters;
pub mod level;
pub mod object;

pub use level::{Level, LevelError, LevelTextures};
