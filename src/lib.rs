//! Snake Garden - a wrap-around snake among candies, rocks and trees
//!
//! This library provides:
//! - Core game logic (game module): grid, body chain, movement, collisions, session
//! - Terminal input mapping and ratatui rendering (input, render modules)
//! - Session metrics and the persisted theme preference
//! - The interactive play loop (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod settings;

pub use error::GameError;
