//! The snake's body chain
//!
//! Segments live in a single `Vec` ordered from head (index 0) to tail
//! (last index). Growth pushes onto the end, and position propagation walks
//! the vector backwards, so no segment ever needs a link to its neighbours.

use super::action::Direction;
use super::entity::Pickup;
use super::grid::{Grid, Position};

/// Visual state of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentScale {
    #[default]
    Normal,
    /// Bulging around a swallowed pickup
    Swallowed,
}

impl SegmentScale {
    pub fn factor(&self) -> f32 {
        match self {
            SegmentScale::Normal => 1.0,
            SegmentScale::Swallowed => 1.15,
        }
    }
}

/// One unit of the snake's body
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub position: Position,
    /// Pickup travelling down the body inside this segment
    pub pickup: Option<Pickup>,
    pub scale: SegmentScale,
}

impl Segment {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            pickup: None,
            scale: SegmentScale::Normal,
        }
    }
}

/// Ordered segments from head to tail
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    segments: Vec<Segment>,
}

impl Body {
    /// Create a body with a single head segment
    pub fn new(head: Position) -> Self {
        Self {
            segments: vec![Segment::new(head)],
        }
    }

    /// Create a straight body of `length` segments trailing behind `head`
    pub fn straight(grid: &Grid, head: Position, direction: Direction, length: usize) -> Self {
        let mut body = Self::new(head);
        let (dx, dz) = direction.delta();

        for _ in 1..length {
            let next = grid.wrap(body.tail().position.moved_by(-dx, -dz));
            body.append(Segment::new(next));
        }

        body
    }

    /// Link a new segment after the current tail
    pub fn append(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn head_mut(&mut self) -> &mut Segment {
        &mut self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn tail_mut(&mut self) -> &mut Segment {
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Visit every segment from tail to head
    ///
    /// The callback receives the segment's index and a mutable view of the
    /// whole chain up to and including it, so it can read its predecessor at
    /// `index - 1`.
    pub fn for_each_from_tail<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut [Segment]),
    {
        for index in (0..self.segments.len()).rev() {
            f(index, &mut self.segments[..=index]);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|segment| segment.position)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A body always keeps its head, so this is only true for a broken chain
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
