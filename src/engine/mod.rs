// Engine modules: animation, assets, timing, input, collision, rendering

pub mod animation;
pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
