//! Collision predicates over the occupancy snapshot taken after a move
//!
//! Eating a pickup is not a collision; [`pickup_at`] only locates it.

use super::entity::{Obstacle, Pickup};
use super::grid::CellIndex;

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit itself
    SelfCollision,
    /// Snake hit a rock or a tree
    Obstacle,
}

/// True if the head's cell appears more than once in the snapshot
pub fn self_collision(occupancy: &[CellIndex], head_index: CellIndex) -> bool {
    occupancy.iter().filter(|&&cell| cell == head_index).count() > 1
}

/// True if any obstacle sits on the head's cell
pub fn entity_collision(head_index: CellIndex, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|obstacle| obstacle.cell == head_index)
}

/// Position in `pickups` of the pickup on the head's cell
pub fn pickup_at(head_index: CellIndex, pickups: &[Pickup]) -> Option<usize> {
    pickups.iter().position(|pickup| pickup.cell == head_index)
}

/// Classify the collision at the head, self-collision first
pub fn detect(
    occupancy: &[CellIndex],
    head_index: CellIndex,
    obstacles: &[Obstacle],
) -> Option<CollisionType> {
    if self_collision(occupancy, head_index) {
        Some(CollisionType::SelfCollision)
    } else if entity_collision(head_index, obstacles) {
        Some(CollisionType::Obstacle)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::ObstacleKind;

    #[test]
    fn test_self_collision() {
        assert!(!self_collision(&[5, 4, 3, 2], 5));
        assert!(self_collision(&[3, 4, 3, 2], 3));
        assert!(self_collision(&[2, 3, 4, 2], 2));
    }

    #[test]
    fn test_entity_collision() {
        let obstacles = [
            Obstacle::new(10, ObstacleKind::Rock),
            Obstacle::new(42, ObstacleKind::Tree),
        ];
        assert!(entity_collision(42, &obstacles));
        assert!(!entity_collision(11, &obstacles));
        assert!(!entity_collision(11, &[]));
    }

    #[test]
    fn test_pickup_lookup() {
        let pickups = [Pickup::new(7, 1), Pickup::new(9, 3)];
        assert_eq!(pickup_at(9, &pickups), Some(1));
        assert_eq!(pickup_at(8, &pickups), None);
    }

    #[test]
    fn test_detect_prefers_self_collision() {
        let obstacles = [Obstacle::new(3, ObstacleKind::Rock)];
        assert_eq!(
            detect(&[3, 4, 3], 3, &obstacles),
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(detect(&[3, 4, 5], 3, &obstacles), Some(CollisionType::Obstacle));
        assert_eq!(detect(&[6, 4, 5], 6, &obstacles), None);
    }
}
