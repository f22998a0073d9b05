//! Game session controller
//!
//! Owns the snake, the board items and the score, and reacts to every move:
//! collisions end the run and rebuild the board, pickups score points and
//! are replaced. The session does not own a clock; the caller drives
//! [`GameSession::tick`] at [`GameConfig::tick_period_ms`] while
//! [`GameSession::is_running`] holds.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    action::{Command, Direction},
    collision::{self, CollisionType},
    config::GameConfig,
    entity::{Obstacle, Pickup},
    event::GameEvent,
    grid::{CellIndex, Grid},
    snake::{MoveReport, Snake},
};
use crate::error::GameError;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Not ticking: fresh board or paused
    Idle,
    Running,
    /// The last run ended in a collision; the board is already rebuilt
    Dead,
}

/// Result of a game tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// The move, or `None` if the session was not running
    pub moved: Option<MoveReport>,
    /// Pickup eaten by the head this tick
    pub ate: Option<Pickup>,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
}

pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    pickups: Vec<Pickup>,
    obstacles: Vec<Obstacle>,
    score: u32,
    phase: SessionPhase,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session with a fresh board
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a session whose placements are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;

        let grid = config.grid();
        let snake = fresh_snake(&config);
        let mut session = Self {
            config,
            grid,
            snake,
            pickups: Vec::new(),
            obstacles: Vec::new(),
            score: 0,
            phase: SessionPhase::Idle,
            rng,
            events: Vec::new(),
        };

        session.announce_snake();
        session.populate()?;
        Ok(session)
    }

    /// Begin ticking; returns false if already running
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }

        info!(score = self.score, "session started");
        self.phase = SessionPhase::Running;
        self.events.push(GameEvent::Started);
        true
    }

    /// Stop ticking without touching the board; returns false if not running
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        info!(score = self.score, "session paused");
        self.phase = SessionPhase::Idle;
        self.events.push(GameEvent::Stopped);
        true
    }

    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Queue a turn for the next tick
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.snake.set_direction(direction)
    }

    /// Queue a turn by name; unknown names are ignored
    pub fn set_direction_symbol(&mut self, symbol: &str) -> bool {
        self.snake.set_direction_symbol(symbol)
    }

    /// Apply an input command, returning whether it changed anything
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Turn(direction) => self.set_direction(direction),
            Command::Toggle => self.toggle(),
            Command::Start => self.start(),
            Command::Stop => self.stop(),
        }
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if !self.is_running() {
            return Ok(TickOutcome::default());
        }

        let report = self.snake.tick();
        if report.grew() {
            self.events.push(GameEvent::SegmentAdded {
                position: self.snake.body().tail().position,
            });
        }
        self.events.push(GameEvent::Updated { head: report.head });

        self.on_updated(report)
    }

    /// React to a completed move: collide, or eat
    fn on_updated(&mut self, report: MoveReport) -> Result<TickOutcome, GameError> {
        let head_index = report.head_index;

        if let Some(cause) = collision::detect(self.snake.occupancy(), head_index, &self.obstacles)
        {
            self.die(cause)?;
            return Ok(TickOutcome {
                moved: Some(report),
                ate: None,
                collision: Some(cause),
            });
        }

        let ate = match collision::pickup_at(head_index, &self.pickups) {
            Some(slot) => {
                let pickup = self.pickups.remove(slot);
                self.snake.attach_pickup_to_head(pickup);
                self.events.push(GameEvent::PickupConsumed(pickup));

                self.score += pickup.points;
                self.events.push(GameEvent::ScoreChanged(self.score));
                debug!(points = pickup.points, score = self.score, "pickup eaten");

                self.spawn_pickup()?;
                Some(pickup)
            }
            None => None,
        };

        Ok(TickOutcome {
            moved: Some(report),
            ate,
            collision: None,
        })
    }

    /// End the current run and rebuild the board
    pub fn die(&mut self, cause: CollisionType) -> Result<(), GameError> {
        info!(?cause, score = self.score, len = self.snake.len(), "snake died");

        self.phase = SessionPhase::Dead;
        self.events.push(GameEvent::Died {
            cause,
            score: self.score,
        });

        self.rebuild()
    }

    /// Stop and start over on a fresh board
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.phase = SessionPhase::Idle;
        self.rebuild()
    }

    fn rebuild(&mut self) -> Result<(), GameError> {
        self.pickups.clear();
        self.obstacles.clear();
        self.events.push(GameEvent::BoardCleared);

        self.snake = fresh_snake(&self.config);
        self.announce_snake();

        self.score = 0;
        self.events.push(GameEvent::ScoreChanged(0));

        self.populate()
    }

    fn announce_snake(&mut self) {
        let positions: Vec<_> = self.snake.body().positions().collect();
        self.events.extend(
            positions
                .into_iter()
                .map(|position| GameEvent::SegmentAdded { position }),
        );
    }

    fn populate(&mut self) -> Result<(), GameError> {
        for _ in 0..self.config.pickup_count {
            self.spawn_pickup()?;
        }
        for _ in 0..self.config.obstacle_count {
            self.spawn_obstacle()?;
        }
        Ok(())
    }

    fn spawn_pickup(&mut self) -> Result<Pickup, GameError> {
        let cell = self.free_cell()?;
        let pickup = Pickup::random(cell, &mut self.rng);
        debug!(cell, points = pickup.points, "pickup spawned");

        self.pickups.push(pickup);
        self.events.push(GameEvent::PickupSpawned(pickup));
        Ok(pickup)
    }

    fn spawn_obstacle(&mut self) -> Result<Obstacle, GameError> {
        let cell = self.free_cell()?;
        let obstacle = Obstacle::random(cell, &mut self.rng);
        debug!(cell, kind = ?obstacle.kind, "obstacle spawned");

        self.obstacles.push(obstacle);
        self.events.push(GameEvent::ObstacleSpawned(obstacle));
        Ok(obstacle)
    }

    /// Pick a random cell not taken by the snake, a pickup or an obstacle
    ///
    /// Draws uniformly for up to `max_spawn_attempts` tries, then picks
    /// uniformly among the cells left after a full scan.
    pub fn free_cell(&mut self) -> Result<CellIndex, GameError> {
        let capacity = self.grid.capacity();

        for _ in 0..self.config.max_spawn_attempts {
            let index = self.rng.gen_range(0..capacity);
            if !self.is_occupied(index) {
                return Ok(index);
            }
        }

        let free: Vec<CellIndex> = (0..capacity)
            .filter(|&index| !self.is_occupied(index))
            .collect();
        free.choose(&mut self.rng)
            .copied()
            .ok_or(GameError::GridFull {
                width: self.grid.width,
                height: self.grid.height,
            })
    }

    /// Check if a cell holds the snake, a pickup or an obstacle
    pub fn is_occupied(&self, index: CellIndex) -> bool {
        self.snake.occupancy().contains(&index)
            || self.pickups.iter().any(|pickup| pickup.cell == index)
            || self.obstacles.iter().any(|obstacle| obstacle.cell == index)
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn fresh_snake(config: &GameConfig) -> Snake {
    let grid = config.grid();
    Snake::new(
        grid,
        grid.center(),
        Direction::Right,
        config.initial_snake_length,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::ObstacleKind;
    use crate::game::grid::Position;
    use std::collections::HashSet;

    fn open_session() -> GameSession {
        let mut session = GameSession::with_seed(GameConfig::open(20, 20), 42).unwrap();
        session.pickups.clear();
        session.drain_events().for_each(drop);
        session
    }

    fn all_cells_distinct(session: &GameSession) -> bool {
        let mut seen = HashSet::new();
        session
            .snake
            .occupancy()
            .iter()
            .copied()
            .chain(session.pickups.iter().map(|p| p.cell))
            .chain(session.obstacles.iter().map(|o| o.cell))
            .all(|cell| seen.insert(cell))
    }

    #[test]
    fn test_new_session() {
        let mut session = GameSession::with_seed(GameConfig::default(), 1).unwrap();

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().len(), 4);
        assert_eq!(session.snake().head_index(), 210);
        assert_eq!(session.pickups().len(), 1);
        assert_eq!(session.obstacles().len(), 20);
        assert!(all_cells_distinct(&session));

        let events: Vec<_> = session.drain_events().collect();
        let segments = events
            .iter()
            .filter(|e| matches!(e, GameEvent::SegmentAdded { .. }))
            .count();
        let obstacles = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned(_)))
            .count();
        assert_eq!(segments, 4);
        assert_eq!(obstacles, 20);
        assert_eq!(session.drain_events().count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = GameSession::new(GameConfig::new(2, 2));
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_grid_rejected_before_setup() {
        let config = GameConfig {
            obstacle_count: 0,
            pickup_count: 0,
            ..GameConfig::new(1 << 32, 1)
        };
        let result = GameSession::with_seed(config, 1);
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_tick_requires_running() {
        let mut session = open_session();
        let head = session.snake().head();

        let outcome = session.tick().unwrap();

        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(session.snake().head(), head);
    }

    #[test]
    fn test_start_and_stop() {
        let mut session = open_session();

        assert!(session.start());
        assert!(!session.start());
        assert!(session.is_running());

        session.tick().unwrap();
        let head = session.snake().head();

        assert!(session.stop());
        assert!(!session.stop());
        assert_eq!(session.phase(), SessionPhase::Idle);
        session.tick().unwrap();
        assert_eq!(session.snake().head(), head);
        assert_eq!(session.snake().len(), 4);

        assert!(session.toggle());
        assert!(session.is_running());
        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events.first(), Some(&GameEvent::Started));
        assert!(events.contains(&GameEvent::Stopped));
    }

    #[test]
    fn test_first_tick_moves_right() {
        let mut session = open_session();
        session.start();

        let outcome = session.tick().unwrap();

        let report = outcome.moved.unwrap();
        assert_eq!(report.head_index, 211);
        assert!(!session.snake().occupancy().contains(&207));
        assert!(session
            .drain_events()
            .any(|e| e == GameEvent::Updated { head: Position::new(11, 10) }));
    }

    #[test]
    fn test_pickup_scores_and_grows_later() {
        let mut session = open_session();
        session.pickups.push(Pickup::new(211, 2));
        session.start();

        let outcome = session.tick().unwrap();

        assert_eq!(outcome.ate, Some(Pickup::new(211, 2)));
        assert_eq!(session.score(), 2);
        assert_eq!(session.pickups().len(), 1);
        let replacement = session.pickups()[0];
        assert!(!session.snake().occupancy().contains(&replacement.cell));
        assert!(all_cells_distinct(&session));
        assert_eq!(session.snake().len(), 4);
        let events: Vec<_> = session.drain_events().collect();
        assert!(events.contains(&GameEvent::ScoreChanged(2)));
        assert!(events.contains(&GameEvent::PickupSpawned(replacement)));

        // keep the replacement out of the snake's path
        session.pickups[0].cell = 0;

        let mut lengths = Vec::new();
        for _ in 0..5 {
            let outcome = session.tick().unwrap();
            assert!(outcome.collision.is_none());
            lengths.push(session.snake().len());
        }

        assert_eq!(lengths, vec![4, 4, 4, 5, 5]);
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn test_obstacle_collision_resets() {
        let config = GameConfig {
            obstacle_count: 3,
            ..GameConfig::new(20, 20)
        };
        let mut session = GameSession::with_seed(config, 5).unwrap();
        session.obstacles = vec![Obstacle::new(211, ObstacleKind::Rock)];
        session.pickups.clear();
        session.score = 7;
        session.start();
        session.drain_events().for_each(drop);

        let outcome = session.tick().unwrap();

        assert_eq!(outcome.collision, Some(CollisionType::Obstacle));
        assert_eq!(outcome.ate, None);
        assert_eq!(session.phase(), SessionPhase::Dead);
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().len(), 4);
        assert_eq!(session.snake().head_index(), 210);
        assert_eq!(session.obstacles().len(), 3);
        assert_eq!(session.pickups().len(), 1);
        assert!(all_cells_distinct(&session));

        let events: Vec<_> = session.drain_events().collect();
        assert!(events.contains(&GameEvent::Died {
            cause: CollisionType::Obstacle,
            score: 7,
        }));
        assert!(events.contains(&GameEvent::BoardCleared));
        assert!(events.contains(&GameEvent::ScoreChanged(0)));

        assert!(session.start());
        assert!(session.is_running());
    }

    #[test]
    fn test_self_collision_resets() {
        let mut session = open_session();
        session.snake = Snake::new(session.grid, Position::new(10, 10), Direction::Right, 5);
        session.start();

        session.set_direction(Direction::Down);
        assert!(session.tick().unwrap().collision.is_none());
        session.set_direction(Direction::Left);
        assert!(session.tick().unwrap().collision.is_none());
        session.set_direction(Direction::Up);
        let outcome = session.tick().unwrap();

        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
        assert_eq!(session.phase(), SessionPhase::Dead);
        assert_eq!(session.snake().len(), 4);
    }

    #[test]
    fn test_apply_commands() {
        let mut session = open_session();

        assert!(session.apply(Command::Start));
        assert!(session.apply(Command::Turn(Direction::Up)));
        assert!(!session.apply(Command::Turn(Direction::Left)));
        assert!(session.set_direction_symbol("down"));
        assert!(!session.set_direction_symbol("sideways"));
        assert!(session.apply(Command::Toggle));
        assert!(!session.is_running());
        assert!(!session.apply(Command::Stop));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = open_session();
        session.start();
        session.tick().unwrap();
        session.score = 4;

        session.reset().unwrap();

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().head_index(), 210);
    }

    #[test]
    fn test_free_cell_scans_when_sampling_gives_up() {
        let config = GameConfig {
            pickup_count: 1,
            obstacle_count: 0,
            max_spawn_attempts: 0,
            ..GameConfig::new(6, 1)
        };
        let mut session = GameSession::with_seed(config, 3).unwrap();

        let cell = session.free_cell().unwrap();

        assert!(!session.is_occupied(cell));
        assert!(cell < 6);
    }

    #[test]
    fn test_free_cell_reports_full_grid() {
        let config = GameConfig {
            pickup_count: 1,
            obstacle_count: 0,
            ..GameConfig::new(5, 1)
        };
        let mut session = GameSession::with_seed(config, 9).unwrap();

        assert_eq!(
            session.free_cell(),
            Err(GameError::GridFull {
                width: 5,
                height: 1
            })
        );
    }

    #[test]
    fn test_long_run_keeps_invariants() {
        let config = GameConfig {
            pickup_count: 3,
            ..GameConfig::new(20, 20)
        };
        let mut session = GameSession::with_seed(config, 1234).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        session.start();

        for _ in 0..500 {
            if !session.is_running() {
                session.start();
            }
            if rng.gen_bool(0.3) {
                let direction = *Direction::ALL.choose(&mut rng).unwrap();
                session.set_direction(direction);
            }

            let len_before = session.snake().len();
            let outcome = session.tick().unwrap();
            let report = outcome.moved.unwrap();

            if outcome.collision.is_some() {
                assert_eq!(session.snake().len(), 4);
                assert_eq!(session.score(), 0);
            } else if report.grew() {
                assert_eq!(session.snake().len(), len_before + 1);
            } else {
                assert_eq!(session.snake().len(), len_before);
            }
            assert_eq!(session.snake().occupancy().len(), session.snake().len());
            assert_eq!(session.pickups().len(), 3);
            assert!(all_cells_distinct(&session));
        }
    }
}
