// Per-frame action state

use super::action::{Action, InputSource};
use std::collections::{HashMap, HashSet};

/// Which actions are down, and which went down since the last `update`
///
/// An action bound to several keys stays pressed until the last of those
/// keys is released.
#[derive(Debug, Default)]
pub struct ActionState {
    held: HashMap<Action, HashSet<InputSource>>,
    just_pressed: HashSet<Action>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.held.contains_key(&action)
    }

    /// Pressed since the last `update`
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    pub(crate) fn press(&mut self, action: Action, source: InputSource) {
        let sources = self.held.entry(action).or_default();
        if sources.is_empty() {
            self.just_pressed.insert(action);
        }
        sources.insert(source);
    }

    pub(crate) fn release(&mut self, action: Action, source: InputSource) {
        if let Some(sources) = self.held.get_mut(&action) {
            sources.remove(&source);
            if sources.is_empty() {
                self.held.remove(&action);
            }
        }
    }

    /// Forget this frame's edges; call once the frame's updates have seen them
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
    }

    pub fn reset(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }

    /// Horizontal axis in -1.0..=1.0 (left and right cancel out)
    pub fn horizontal(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        horizontal
    }
}
