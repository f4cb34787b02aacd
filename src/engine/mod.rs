// Engine modules: entities, animation, motion, input, audio, rendering

pub mod audio;
pub mod entity;
pub mod game_loop;
pub mod input;
pub mod kinematics;
pub mod renderer;
pub mod skeleton;
