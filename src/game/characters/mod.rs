// Player character
//
// - `mario`: the character itself (sprite, animator, movement model)
// - `state`: Idle / Walk / Jump behaviour objects driving it
// - `stats`: tuning constants

pub mod mario;
pub mod state;
pub mod stats;

pub use mario::{Mario, MarioInput, MarioView};
pub use state::{Idle, Jump, MarioState, MarioStateKind, Walk};
pub use stats::{MarioStats, MARIO_STATS};
