use crate::session::GameSession;
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum LossReason {
    #[strum(serialize = "out of guesses")]
    OutOfGuesses,
    #[strum(serialize = "out of time")]
    OutOfTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost(LossReason),
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Title and subtitle for the status panel; `None` while still playing.
    /// `survivor` is the name of the last language in the list.
    pub fn banner(&self, survivor: &str) -> Option<(String, String)> {
        match self {
            Outcome::InProgress => None,
            Outcome::Won => Some(("You win!".to_string(), "Well done! 🎉".to_string())),
            Outcome::Lost(LossReason::OutOfGuesses) => Some((
                "Game over!".to_string(),
                format!("You lose! Better start learning {survivor} 😭"),
            )),
            Outcome::Lost(LossReason::OutOfTime) => Some((
                "Time's up!".to_string(),
                "The clock ran out before you cracked the word ⏰".to_string(),
            )),
        }
    }
}

/// Values recomputed from a [`GameSession`] after every change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStatus {
    pub wrong_guess_count: usize,
    pub total_allowed_wrong_guesses: usize,
    pub remaining_guesses: usize,
    pub is_won: bool,
    pub is_lost: bool,
    pub is_over: bool,
    pub is_last_guess_wrong: bool,
    pub outcome: Outcome,
}

impl GameStatus {
    pub fn evaluate(session: &GameSession, total_allowed_wrong_guesses: usize) -> Self {
        let wrong_guess_count = session.wrong_guess_count();
        let is_won = session.secret_word.chars().all(|c| session.has_guessed(c));
        let out_of_guesses = wrong_guess_count >= total_allowed_wrong_guesses;
        let out_of_time = session.time_remaining == 0;

        // Win is checked first: a completed word beats any loss condition.
        let outcome = if is_won {
            Outcome::Won
        } else if out_of_guesses {
            Outcome::Lost(LossReason::OutOfGuesses)
        } else if out_of_time {
            Outcome::Lost(LossReason::OutOfTime)
        } else {
            Outcome::InProgress
        };

        Self {
            wrong_guess_count,
            total_allowed_wrong_guesses,
            remaining_guesses: total_allowed_wrong_guesses.saturating_sub(wrong_guess_count),
            is_won,
            is_lost: matches!(outcome, Outcome::Lost(_)),
            is_over: outcome.is_over(),
            is_last_guess_wrong: session.last_guess().is_some_and(|c| !session.in_word(c)),
            outcome,
        }
    }
}

/// Text for the live status line: what the last guess did, the attempts and
/// time left, and the word spelled out with blanks.
pub fn announcement(session: &GameSession, status: &GameStatus) -> String {
    let mut parts = Vec::new();

    if let Some(letter) = session.last_guess() {
        if session.in_word(letter) {
            parts.push(format!("Correct! The letter {letter} is in the word."));
        } else {
            parts.push(format!("Sorry, the letter {letter} is not in the word."));
        }
    }

    parts.push(format!(
        "You have {} attempts and {} seconds left.",
        status.remaining_guesses, session.time_remaining
    ));

    let spelled = session
        .masked_word()
        .into_iter()
        .map(|slot| match slot {
            Some(c) => format!("{c}."),
            None => "blank.".to_string(),
        })
        .join(" ");
    parts.push(format!("Current word: {spelled}"));

    parts.join(" ")
}
