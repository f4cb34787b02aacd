// Beat-em-up layer: characters, effects and the match that runs them

pub mod actor;
pub mod characters;
pub mod context;
pub mod director;
pub mod effects;
pub mod scoreboard;

pub use director::{MatchConfig, MatchDirector};
