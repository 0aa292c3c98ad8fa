// Input manager: winit keyboard events in, action state out

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::state::ActionState;
use log::trace;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

pub struct InputManager {
    config: InputConfig,
    state: ActionState,
}

impl InputManager {
    /// Input manager with the default key bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::with_defaults())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            state: ActionState::new(),
        }
    }

    /// Process a keyboard event from winit
    ///
    /// Returns the action the key is bound to, if any.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> Option<Action> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        self.handle_source(InputSource::key(code), event.state, event.repeat)
    }

    /// Apply a press or release of `source`; key repeats are ignored
    pub fn handle_source(
        &mut self,
        source: InputSource,
        element_state: ElementState,
        repeat: bool,
    ) -> Option<Action> {
        let action = self.config.get_action(source)?;
        match element_state {
            ElementState::Pressed if !repeat => {
                trace!("{action:?} pressed");
                self.state.press(action, source);
            }
            ElementState::Pressed => {}
            ElementState::Released => {
                trace!("{action:?} released");
                self.state.release(action, source);
            }
        }
        Some(action)
    }

    /// Clear per-frame edges. Call once per frame after the fixed updates
    pub fn update(&mut self) {
        self.state.update();
    }

    pub fn state(&self) -> &ActionState {
        &self.state
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn key(code: KeyCode) -> InputSource {
        InputSource::key(code)
    }

    #[test]
    fn test_press_bound_key() {
        let mut manager = InputManager::new();
        let action = manager.handle_source(key(KeyCode::Space), ElementState::Pressed, false);

        assert_eq!(action, Some(Action::Jump));
        assert!(manager.state().is_pressed(Action::Jump));
        assert!(manager.state().just_pressed(Action::Jump));
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut manager = InputManager::new();
        let action = manager.handle_source(key(KeyCode::KeyZ), ElementState::Pressed, false);

        assert_eq!(action, None);
        assert!(!manager.state().is_pressed(Action::Jump));
    }

    #[test]
    fn test_key_repeat_is_not_a_press() {
        let mut manager = InputManager::new();
        manager.handle_source(key(KeyCode::Space), ElementState::Pressed, true);
        assert!(!manager.state().is_pressed(Action::Jump));
    }

    #[test]
    fn test_update_clears_edges() {
        let mut manager = InputManager::new();
        manager.handle_source(key(KeyCode::KeyD), ElementState::Pressed, false);
        manager.update();

        assert!(manager.state().is_pressed(Action::MoveRight));
        assert!(!manager.state().just_pressed(Action::MoveRight));

        manager.handle_source(key(KeyCode::KeyD), ElementState::Released, false);
        assert!(!manager.state().is_pressed(Action::MoveRight));
    }

    #[test]
    fn test_rebinding_through_config() {
        let mut config = InputConfig::with_defaults();
        config.bind(key(KeyCode::KeyK), Action::Jump);
        let mut manager = InputManager::with_config(config);

        manager.handle_source(key(KeyCode::KeyK), ElementState::Pressed, false);
        assert!(manager.state().is_pressed(Action::Jump));
    }

    #[test]
    fn test_jump_survives_releasing_one_of_two_keys() {
        let mut manager = InputManager::new();
        manager.handle_source(key(KeyCode::Space), ElementState::Pressed, false);
        manager.handle_source(key(KeyCode::ArrowUp), ElementState::Pressed, false);
        manager.update();

        manager.handle_source(key(KeyCode::ArrowUp), ElementState::Released, false);
        assert!(manager.state().is_pressed(Action::Jump));

        manager.handle_source(key(KeyCode::Space), ElementState::Released, false);
        assert!(!manager.state().is_pressed(Action::Jump));
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut manager = InputManager::new();
        manager.handle_source(key(KeyCode::ArrowLeft), ElementState::Pressed, false);
        manager.reset();
        assert_eq!(manager.state().horizontal(), 0.0);
    }
}
