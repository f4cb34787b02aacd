// Game action definitions and mappings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement intents (each key-down queues one strike in that direction)
    MoveLeft,
    MoveRight,

    // Meta actions
    Quit,
}

/// Represents an input source (keyboard key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings for the player
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Arrow keys plus A/D for one-handed play
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
    ]
}

/// Global bindings (always active, not remappable per player)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![(InputSource::key(KeyCode::Escape), Action::Quit)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_keyboard_creation() {
        let source = InputSource::key(KeyCode::ArrowLeft);
        assert_eq!(source, InputSource::Keyboard(KeyCode::ArrowLeft));
    }

    #[test]
    fn test_default_bindings_cover_both_directions() {
        let bindings = default_bindings();
        assert!(bindings.iter().any(|(_, action)| *action == Action::MoveLeft));
        assert!(bindings.iter().any(|(_, action)| *action == Action::MoveRight));
    }

    #[test]
    fn test_global_bindings_quit_on_escape() {
        let bindings = global_bindings();
        assert_eq!(
            bindings,
            vec![(InputSource::key(KeyCode::Escape), Action::Quit)]
        );
    }

    #[test]
    fn test_no_duplicate_inputs() {
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in default_bindings().into_iter().chain(global_bindings()) {
            assert!(seen_sources.insert(source), "Duplicate input source found");
        }
    }
}
