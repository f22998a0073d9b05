use std::time::{Duration, Instant};

use crate::game::GameEvent;

/// Scoreboard figures kept across runs of one session
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub score: u32,
    pub high_score: u32,
    /// Score of the most recent run that ended in a collision
    pub last_score: u32,
    pub games_played: u32,
    pub pickups_eaten: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            score: 0,
            high_score: 0,
            last_score: 0,
            games_played: 0,
            pickups_eaten: 0,
            running: false,
        }
    }

    /// Refresh the run clock; it only advances while the game is running
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    /// Fold a session event into the figures
    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started => {
                self.running = true;
                // resume the clock where a pause left it
                self.start_time = Instant::now()
                    .checked_sub(self.elapsed_time)
                    .unwrap_or_else(Instant::now);
            }
            GameEvent::Stopped => {
                self.update();
                self.running = false;
            }
            GameEvent::ScoreChanged(score) => {
                self.score = *score;
                self.high_score = self.high_score.max(*score);
            }
            GameEvent::PickupConsumed(_) => self.pickups_eaten += 1,
            GameEvent::Died { score, .. } => self.on_game_over(*score),
            _ => {}
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.last_score = final_score;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
        self.running = false;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Pickup};

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.record(&GameEvent::ScoreChanged(10));
        metrics.record(&GameEvent::Died {
            cause: CollisionType::Obstacle,
            score: 10,
        });
        metrics.record(&GameEvent::ScoreChanged(0));
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.score, 0);
        assert_eq!(metrics.games_played, 1);

        metrics.record(&GameEvent::Died {
            cause: CollisionType::SelfCollision,
            score: 5,
        });
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);
        assert_eq!(metrics.last_score, 5);

        metrics.record(&GameEvent::ScoreChanged(15));
        assert_eq!(metrics.high_score, 15); // Should update
    }

    #[test]
    fn test_pickups_counted() {
        let mut metrics = GameMetrics::new();
        metrics.record(&GameEvent::PickupConsumed(Pickup::new(3, 2)));
        metrics.record(&GameEvent::PickupConsumed(Pickup::new(8, 1)));
        assert_eq!(metrics.pickups_eaten, 2);
    }

    #[test]
    fn test_clock_runs_only_while_started() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        metrics.record(&GameEvent::Started);
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.record(&GameEvent::Stopped);
        let paused_at = metrics.elapsed_time;
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, paused_at);
    }
}
