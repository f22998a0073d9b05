//! Items placed on the board besides the snake

use rand::Rng;

use super::grid::CellIndex;

/// Smallest and largest point value a pickup can carry
pub const MIN_PICKUP_POINTS: u32 = 1;
pub const MAX_PICKUP_POINTS: u32 = 3;

/// A candy the snake can eat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub cell: CellIndex,
    pub points: u32,
}

impl Pickup {
    pub fn new(cell: CellIndex, points: u32) -> Self {
        Self { cell, points }
    }

    /// Pickup with a uniformly drawn point value
    pub fn random<R: Rng + ?Sized>(cell: CellIndex, rng: &mut R) -> Self {
        Self::new(cell, rng.gen_range(MIN_PICKUP_POINTS..=MAX_PICKUP_POINTS))
    }

    /// Display scale, larger for more valuable candy
    pub fn scale(&self) -> f32 {
        0.5 + (self.points as f32 * 0.5) / 3.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Rock,
    Tree,
}

/// A static item whose cell is fatal to enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub cell: CellIndex,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(cell: CellIndex, kind: ObstacleKind) -> Self {
        Self { cell, kind }
    }

    /// Rock or tree with equal odds
    pub fn random<R: Rng + ?Sized>(cell: CellIndex, rng: &mut R) -> Self {
        let kind = if rng.gen_bool(0.5) {
            ObstacleKind::Rock
        } else {
            ObstacleKind::Tree
        };
        Self::new(cell, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_points_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let pickup = Pickup::random(3, &mut rng);
            assert!((MIN_PICKUP_POINTS..=MAX_PICKUP_POINTS).contains(&pickup.points));
            assert_eq!(pickup.cell, 3);
        }
    }

    #[test]
    fn test_pickup_scale() {
        assert!((Pickup::new(0, 1).scale() - 0.6667).abs() < 1e-3);
        assert!((Pickup::new(0, 3).scale() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_random_obstacles_use_both_kinds() {
        let mut rng = StdRng::seed_from_u64(11);
        let kinds: Vec<_> = (0..64).map(|i| Obstacle::random(i, &mut rng).kind).collect();
        assert!(kinds.contains(&ObstacleKind::Rock));
        assert!(kinds.contains(&ObstacleKind::Tree));
    }
}
