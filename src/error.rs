//! Error types for the game core

use thiserror::Error;

/// Errors raised by session setup and entity placement
///
/// Collisions are not errors: they are ordinary game outcomes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Every cell is taken by the snake, a pickup or an obstacle
    #[error("no free cell left on a {width}x{height} grid")]
    GridFull { width: usize, height: usize },

    /// Configuration values that cannot produce a playable board
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}

/// An input symbol that does not name a direction
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized direction symbol: {0:?}")]
pub struct ParseDirectionError(pub String);
