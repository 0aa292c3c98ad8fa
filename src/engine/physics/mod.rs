// Collision against the level's solid tiles using parry2d bounding volumes

mod collision;

pub use collision::{CollisionManager, Resolution};
