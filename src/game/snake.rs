//! Movement engine
//!
//! Advances the body chain one cell per tick. Turn requests are buffered and
//! committed at the start of the next tick, and swallowed pickups travel one
//! segment per tick down the body until the tail absorbs them and the chain
//! grows by one segment.

use tracing::debug;

use super::action::Direction;
use super::body::{Body, Segment, SegmentScale};
use super::entity::Pickup;
use super::grid::{CellIndex, Grid, Position};

/// What a single tick did to the snake
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    /// Head position after the move
    pub head: Position,
    pub head_index: CellIndex,
    /// Pickup absorbed at the tail this tick, if any
    pub absorbed: Option<Pickup>,
}

impl MoveReport {
    /// Whether the chain gained a segment this tick
    pub fn grew(&self) -> bool {
        self.absorbed.is_some()
    }
}

/// The snake: body chain plus heading
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    grid: Grid,
    body: Body,
    direction: Direction,
    pending_direction: Option<Direction>,
    /// Cell index of every segment, head first; rebuilt after each move
    occupancy: Vec<CellIndex>,
}

impl Snake {
    /// Create a straight snake of `length` segments with its head at `head`
    pub fn new(grid: Grid, head: Position, direction: Direction, length: usize) -> Self {
        let body = Body::straight(&grid, grid.wrap(head), direction, length);
        let mut snake = Self {
            grid,
            body,
            direction,
            pending_direction: None,
            occupancy: Vec::with_capacity(length),
        };
        snake.update_occupancy();
        snake
    }

    /// Request a turn, applied on the next tick
    ///
    /// Only quarter turns relative to the current heading are accepted; a
    /// later accepted request replaces an earlier one that has not been
    /// applied yet. Returns whether the request was kept.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.direction.is_orthogonal(direction) {
            return false;
        }

        debug!(?direction, "turn queued");
        self.pending_direction = Some(direction);
        true
    }

    /// Request a turn by name; unknown symbols are ignored
    pub fn set_direction_symbol(&mut self, symbol: &str) -> bool {
        match Direction::from_symbol(symbol) {
            Some(direction) => self.set_direction(direction),
            None => false,
        }
    }

    /// Advance the snake by one cell
    pub fn tick(&mut self) -> MoveReport {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let absorbed = self.absorb_tail_pickup();

        self.body.for_each_from_tail(|index, chain| {
            if index == 0 {
                return;
            }

            let (front, rest) = chain.split_at_mut(index);
            let previous = &mut front[index - 1];
            let current = &mut rest[0];

            if let Some(pickup) = previous.pickup.take() {
                current.pickup = Some(pickup);
                current.scale = SegmentScale::Swallowed;
                previous.scale = SegmentScale::Normal;
            }

            current.position = previous.position;
        });

        let head = self.body.head_mut();
        head.position = self.grid.step(head.position, self.direction);
        let head = head.position;

        self.update_occupancy();

        MoveReport {
            head,
            head_index: self.head_index(),
            absorbed,
        }
    }

    /// Put a freshly eaten pickup into the head segment
    pub fn attach_pickup_to_head(&mut self, pickup: Pickup) {
        self.body.head_mut().pickup = Some(pickup);
    }

    /// Release a pickup that reached the tail and grow by one segment
    ///
    /// The new segment sits on the tail's pre-move cell, so the chain is one
    /// longer once the rest of the body has shifted forward.
    fn absorb_tail_pickup(&mut self) -> Option<Pickup> {
        let tail = self.body.tail_mut();
        let pickup = tail.pickup.take()?;
        tail.scale = SegmentScale::Normal;
        let position = tail.position;

        self.body.append(Segment::new(position));
        debug!(points = pickup.points, len = self.body.len(), "pickup absorbed");
        Some(pickup)
    }

    fn update_occupancy(&mut self) {
        let grid = self.grid;
        self.occupancy.clear();
        self.occupancy
            .extend(self.body.positions().map(|pos| grid.to_index(pos)));
    }

    pub fn head(&self) -> Position {
        self.body.head().position
    }

    pub fn head_index(&self) -> CellIndex {
        self.occupancy[0]
    }

    pub fn occupancy(&self) -> &[CellIndex] {
        &self.occupancy
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
