// Input manager - turns winit key events into pressed-action state

use super::action::{Action, InputSource};
use super::config::InputConfig;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Instantaneous "is this action held right now" query
///
/// Edge detection (key-down vs. held) is left to the consumer.
pub trait KeySource {
    fn is_pressed(&self, action: Action) -> bool;
}

/// Plain set of held actions, for scripted input and tests
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: HashSet<Action>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.pressed.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }
}

impl KeySource for KeyState {
    fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}

/// Tracks held actions from keyboard events through the bindings
pub struct InputManager {
    /// Key bindings
    config: InputConfig,

    /// Bound keys currently held down
    held_keys: HashSet<KeyCode>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            held_keys: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(key_code, event.state == ElementState::Pressed);
        }
    }

    /// Record a key transition; unbound keys are ignored
    pub fn process_key(&mut self, key_code: KeyCode, pressed: bool) {
        if self.config.get_action(InputSource::key(key_code)).is_none() {
            return;
        }
        if pressed {
            self.held_keys.insert(key_code);
        } else {
            self.held_keys.remove(&key_code);
        }
    }

    /// Forget all held keys (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.held_keys.clear();
    }
}

impl KeySource for InputManager {
    fn is_pressed(&self, action: Action) -> bool {
        self.held_keys
            .iter()
            .any(|key| self.config.get_action(InputSource::key(*key)) == Some(action))
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::ArrowLeft, true);
        assert!(manager.is_pressed(Action::MoveLeft));

        manager.process_key(KeyCode::ArrowLeft, false);
        assert!(!manager.is_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_two_keys_for_one_action() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::KeyA, true);
        manager.process_key(KeyCode::ArrowLeft, true);
        manager.process_key(KeyCode::KeyA, false);
        assert!(manager.is_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::Escape, true);
        manager.process_key(KeyCode::KeyD, true);
        manager.reset();
        assert!(!manager.is_pressed(Action::Quit));
        assert!(!manager.is_pressed(Action::MoveRight));
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::KeyZ, true);
        assert!(!manager.is_pressed(Action::MoveLeft));
        assert!(!manager.is_pressed(Action::MoveRight));
    }

    #[test]
    fn test_rebound_key_drives_action() {
        let mut config = InputConfig::default();
        config.bind(InputSource::key(KeyCode::KeyJ), Action::MoveLeft);
        let mut manager = InputManager::new(config);
        manager.process_key(KeyCode::KeyJ, true);
        assert!(manager.is_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_key_state() {
        let mut keys = KeyState::new();
        keys.press(Action::MoveRight);
        assert!(keys.is_pressed(Action::MoveRight));
        keys.release(Action::MoveRight);
        assert!(!keys.is_pressed(Action::MoveRight));
    }
}
