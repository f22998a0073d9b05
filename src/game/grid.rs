//! Toroidal grid topology
//!
//! The board is a fixed `width x height` field of integer cells whose edges
//! wrap around: leaving through one side re-enters from the opposite side.
//! Cells are identified by a linear [`CellIndex`] (`z * width + x`), which is
//! what every occupancy comparison in the game uses.

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// Linear identity of a grid cell, in `[0, width * height)`
pub type CellIndex = usize;

/// A cell coordinate on the board plane
///
/// The board lies on the x/z plane, so the second axis is `z` rather than `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Move position by delta, without wrapping
    pub fn moved_by(&self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Move position one cell in a direction, without wrapping
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dz) = direction.delta();
        self.moved_by(dx, dz)
    }
}

/// Dimensions of the wrap-around board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells
    pub fn capacity(&self) -> usize {
        self.width * self.height
    }

    /// Center cell, where a fresh snake places its head
    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Wrap each axis back into `[0, dim)`
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(
            pos.x.rem_euclid(self.width as i32),
            pos.z.rem_euclid(self.height as i32),
        )
    }

    /// One step in `direction`, wrapped onto the board
    pub fn step(&self, pos: Position, direction: Direction) -> Position {
        self.wrap(pos.moved_in_direction(direction))
    }

    /// Linear index of a position; the position is wrapped first
    pub fn to_index(&self, pos: Position) -> CellIndex {
        let pos = self.wrap(pos);
        pos.z as usize * self.width + pos.x as usize
    }

    pub fn from_index(&self, index: CellIndex) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }
}
