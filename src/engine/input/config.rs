// Key bindings: which input source triggers which action

use super::action::{default_bindings, global_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys) to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create an empty input configuration
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind an input source to an action, replacing its previous binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(
            default_bindings()
                .into_iter()
                .chain(global_bindings())
                .collect(),
        )
    }
}
