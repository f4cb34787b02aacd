// Input handling system
//
// Keyboard input for a single player, with remappable bindings.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `buffer`: Bounded FIFO of pending inputs
// - `config`: Input configuration and remapping
// - `manager`: Pressed-state tracking from winit key events
//
// The simulation only asks `KeySource::is_pressed`; it derives key-down
// edges itself.

pub mod action;
pub mod buffer;
pub mod config;
pub mod manager;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use buffer::InputBuffer;
pub use config::InputConfig;
pub use manager::{InputManager, KeySource, KeyState};
