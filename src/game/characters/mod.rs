// Character system
//
// This module contains the fighters of a match:
// - Per-kind enemy stats and player tuning
// - Enemy and player state machines
// - Rigs: character data resolved once per match
// - The enemy and player agents themselves

pub mod enemy;
pub mod player;
pub mod rigs;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use enemy::{enforce_spacing, Enemy, EnemyEffect, HitOutcome};
pub use player::{KeySnapshot, MoveIntent, Player, PlayerEffect};
pub use rigs::{standard_library, EnemyRig, PlayerRig, Rigs};
pub use state::{EnemyState, EnemyStateMachine, Mode, PlayerState};
pub use stats::{EnemyKind, EnemyStats, PlayerStats};
