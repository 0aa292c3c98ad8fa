// Keyboard input mapped onto game actions
//
// - `action`: the actions and their default key bindings
// - `config`: rebindable source -> action table
// - `state`: pressed / just pressed bookkeeping, tracked per key
// - `manager`: turns winit key events into action state
//
// ```rust
// let mut input = InputManager::new();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // After the frame's fixed updates
// input.update();
//
// if input.state().just_pressed(Action::Jump) { /* ... */ }
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod state;

pub use action::{Action, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
pub use state::ActionState;
