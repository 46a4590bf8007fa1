use crate::session::ALPHABET;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys per row of the on-screen keyboard
pub const KEYS_PER_ROW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Guess(char),
    Move(Direction),
    /// Activate whatever control has focus
    Press,
    NewGame,
    Quit,
    Ignore,
}

pub fn map_key(key: KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Command::Quit,
            KeyCode::Char('n') => Command::NewGame,
            _ => Command::Ignore,
        };
    }

    match key.code {
        KeyCode::Esc => Command::Quit,
        KeyCode::Enter | KeyCode::Char(' ') => Command::Press,
        KeyCode::Left => Command::Move(Direction::Left),
        KeyCode::Right => Command::Move(Direction::Right),
        KeyCode::Up => Command::Move(Direction::Up),
        KeyCode::Down => Command::Move(Direction::Down),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => Command::Guess(c.to_ascii_lowercase()),
        _ => Command::Ignore,
    }
}

/// Move the on-screen keyboard cursor. Left/right wrap around the whole
/// alphabet, up/down stay put when there is no row in that direction.
pub fn move_cursor(index: usize, direction: Direction) -> usize {
    let len = ALPHABET.len();
    let index = index.min(len - 1);
    match direction {
        Direction::Left => (index + len - 1) % len,
        Direction::Right => (index + 1) % len,
        Direction::Up => index.checked_sub(KEYS_PER_ROW).unwrap_or(index),
        Direction::Down => {
            let below = index + KEYS_PER_ROW;
            if below < len {
                below
            } else {
                index
            }
        }
    }
}

/// The letter under the keyboard cursor
pub fn letter_at(index: usize) -> Option<char> {
    ALPHABET.chars().nth(index)
}
