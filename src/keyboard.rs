use crate::input::KEYS_PER_ROW;
use crate::session::{GameSession, ALPHABET};
use crate::status::GameStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Available,
    Correct,
    Wrong,
    /// Not guessed, but the game is over
    Disabled,
}

impl KeyState {
    pub fn of(letter: char, session: &GameSession, status: &GameStatus) -> Self {
        match (session.has_guessed(letter), session.in_word(letter)) {
            (true, true) => KeyState::Correct,
            (true, false) => KeyState::Wrong,
            (false, _) if status.is_over => KeyState::Disabled,
            (false, _) => KeyState::Available,
        }
    }

    pub fn is_pressable(&self) -> bool {
        matches!(self, KeyState::Available)
    }
}

/// The 26 keys in display rows, each with its state
pub fn key_rows(session: &GameSession, status: &GameStatus) -> Vec<Vec<(char, KeyState)>> {
    let keys: Vec<(char, KeyState)> = ALPHABET
        .chars()
        .map(|c| (c, KeyState::of(c, session, status)))
        .collect();
    keys.chunks(KEYS_PER_ROW).map(|row| row.to_vec()).collect()
}
