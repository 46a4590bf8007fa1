/// Letters the on-screen keyboard offers, in display order
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// A secret word must be non-empty and made of a-z only.
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase())
}

/// A guess must be a single a-z letter.
pub fn is_valid_guess(letter: char) -> bool {
    letter.is_ascii_lowercase()
}

/// One play-through, from word selection to win or loss.
///
/// Everything else shown on screen is derived from these fields, see
/// [`crate::status::GameStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub secret_word: String,
    /// Insertion order is guess order; never contains duplicates.
    pub guessed_letters: Vec<char>,
    pub time_remaining: u32,
    pub timer_active: bool,
    /// Set by the most recent guess when it was wrong.
    pub farewell_message: Option<String>,
}

impl GameSession {
    pub fn new(secret_word: String, starting_secs: u32) -> Self {
        Self {
            secret_word,
            guessed_letters: Vec::new(),
            time_remaining: starting_secs,
            timer_active: true,
            farewell_message: None,
        }
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed_letters.contains(&letter)
    }

    pub fn in_word(&self, letter: char) -> bool {
        self.secret_word.contains(letter)
    }

    pub fn last_guess(&self) -> Option<char> {
        self.guessed_letters.last().copied()
    }

    pub fn wrong_guess_count(&self) -> usize {
        self.guessed_letters
            .iter()
            .filter(|&&c| !self.in_word(c))
            .count()
    }

    /// Each letter of the secret word, `None` while still hidden.
    pub fn masked_word(&self) -> Vec<Option<char>> {
        self.secret_word
            .chars()
            .map(|c| self.has_guessed(c).then_some(c))
            .collect()
    }
}
