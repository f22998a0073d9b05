use super::collision::CollisionType;
use super::entity::{Obstacle, Pickup};
use super::grid::Position;

/// Notifications queued by the session for renderers and scoreboards
///
/// Events are appended in the order things happen and read back with
/// [`GameSession::drain_events`](super::GameSession::drain_events).
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The tick loop began
    Started,
    /// The tick loop was cancelled
    Stopped,
    /// The snake moved; positions are safe to read
    Updated { head: Position },
    /// The chain grew by one segment at `position`
    SegmentAdded { position: Position },
    PickupSpawned(Pickup),
    /// The head ate a pickup; it now travels down the body
    PickupConsumed(Pickup),
    ObstacleSpawned(Obstacle),
    /// Snake, pickups and obstacles were all torn down
    BoardCleared,
    ScoreChanged(u32),
    Died { cause: CollisionType, score: u32 },
}
