use std::str::FromStr;

use crate::error::ParseDirectionError;

/// Direction the snake can move
///
/// The board lies on the x/z plane: `Up` heads towards negative z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the delta (dx, dz) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Dot product of the two unit vectors
    pub fn dot(&self, other: Direction) -> i32 {
        let (ax, az) = self.delta();
        let (bx, bz) = other.delta();
        ax * bx + az * bz
    }

    /// Returns true if `other` is a quarter turn away from self
    pub fn is_orthogonal(&self, other: Direction) -> bool {
        self.dot(other) == 0
    }

    /// Map an input symbol (`up`, `down`, `left`, `right`) to a direction
    pub fn from_symbol(symbol: &str) -> Option<Direction> {
        match symbol.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::from_symbol(s).ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// Commands the session accepts from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Request a turn, applied on the next tick
    Turn(Direction),
    /// Pause a running game or resume a stopped one
    Toggle,
    Start,
    Stop,
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Turn(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::Up.dot(Direction::Down), -1);
        assert_eq!(Direction::Left.dot(Direction::Right), -1);
        assert_eq!(Direction::Up.dot(Direction::Up), 1);

        assert!(!Direction::Up.is_orthogonal(Direction::Down));
        assert!(!Direction::Right.is_orthogonal(Direction::Left));
    }

    #[test]
    fn test_orthogonal_directions() {
        for a in Direction::ALL {
            for b in Direction::ALL {
                let expected = a != b && a.dot(b) != -1;
                assert_eq!(a.is_orthogonal(b), expected, "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_symbol_parsing() {
        assert_eq!(Direction::from_symbol("up"), Some(Direction::Up));
        assert_eq!(Direction::from_symbol("LEFT"), Some(Direction::Left));
        assert_eq!(Direction::from_symbol(" right "), Some(Direction::Right));
        assert_eq!(Direction::from_symbol("north"), None);
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Down));
        assert!("sideways".parse::<Direction>().is_err());
    }
}
