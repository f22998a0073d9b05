//! Core game logic for the wrap-around snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Renderers read positions from [`GameSession`] after draining its [`GameEvent`]s.

pub mod action;
pub mod body;
pub mod collision;
pub mod config;
pub mod engine;
pub mod entity;
pub mod event;
pub mod grid;
pub mod snake;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use body::{Body, Segment, SegmentScale};
pub use collision::CollisionType;
pub use config::GameConfig;
pub use engine::{GameSession, SessionPhase, TickOutcome};
pub use entity::{Obstacle, ObstacleKind, Pickup};
pub use event::GameEvent;
pub use grid::{CellIndex, Grid, Position};
pub use snake::{MoveReport, Snake};
