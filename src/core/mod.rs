// Core types shared by the engine and the game

pub mod direction;
pub mod math;
pub mod rect;

pub use direction::Direction;
pub use rect::{FloatRect, IntRect};
