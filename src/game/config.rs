use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::error::GameError;

/// Shortest chain a snake may start with
pub const MIN_SNAKE_LENGTH: usize = 4;

/// Largest width or height a board may have
pub const MAX_GRID_DIMENSION: usize = 1024;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Milliseconds between two ticks
    pub tick_period_ms: u64,
    /// Pickups kept on the board at any time
    pub pickup_count: usize,
    /// Obstacles placed when a board is set up
    pub obstacle_count: usize,
    /// Random draws before free-cell search falls back to a full scan
    pub max_spawn_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: MIN_SNAKE_LENGTH,
            tick_period_ms: 240,
            pickup_count: 1,
            obstacle_count: 20,
            max_spawn_attempts: 1024,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Board with no obstacles, handy for scripted runs
    pub fn open(width: usize, height: usize) -> Self {
        Self {
            obstacle_count: 0,
            ..Self::new(width, height)
        }
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Check that a board can be set up from this configuration
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > MAX_GRID_DIMENSION || self.grid_height > MAX_GRID_DIMENSION {
            return Err(GameError::InvalidConfig(format!(
                "grid may be at most {MAX_GRID_DIMENSION}x{MAX_GRID_DIMENSION}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.initial_snake_length < MIN_SNAKE_LENGTH {
            return Err(GameError::InvalidConfig(format!(
                "snake must start with at least {MIN_SNAKE_LENGTH} segments, got {}",
                self.initial_snake_length
            )));
        }
        if self.initial_snake_length > self.grid_width {
            return Err(GameError::InvalidConfig(format!(
                "a snake of {} segments does not fit a row of {} cells",
                self.initial_snake_length, self.grid_width
            )));
        }
        if self.tick_period_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick period must be positive".to_string(),
            ));
        }

        let needed = self.initial_snake_length + self.pickup_count + self.obstacle_count;
        let capacity = self.grid().capacity();
        if needed > capacity {
            return Err(GameError::InvalidConfig(format!(
                "{needed} occupied cells requested on a grid of {capacity}"
            )));
        }

        Ok(())
    }
}
