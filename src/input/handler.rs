use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameCommand(Command),
    CycleTheme,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => turn(Direction::Up),
            KeyCode::Down => turn(Direction::Down),
            KeyCode::Left => turn(Direction::Left),
            KeyCode::Right => turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => turn(Direction::Right),

            // Controls
            KeyCode::Char(' ') => KeyAction::GameCommand(Command::Toggle),
            KeyCode::Char('t') | KeyCode::Char('T') => KeyAction::CycleTheme,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

fn turn(direction: Direction) -> KeyAction {
    KeyAction::GameCommand(Command::Turn(direction))
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
