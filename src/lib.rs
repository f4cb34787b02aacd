// Pinata Brawl - a side-scrolling beat-em-up simulation core

pub mod core;
pub mod engine;
pub mod game;
