use crate::language::{FarewellText, Language};
use crate::session::{is_valid_guess, GameSession};
use crate::status::GameStatus;
use std::fmt;

/// Everything that can happen to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NewGame {
        secret_word: String,
        starting_secs: u32,
    },
    Guess(char),
    /// One second of the countdown elapsed
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    GameOver,
    AlreadyGuessed,
    NotALetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Wrong,
    Ignored(IgnoreReason),
}

/// Fixed inputs to the reducer: the language tiers and the farewell lookup.
pub struct Rules {
    languages: Vec<Language>,
    farewell: Box<dyn FarewellText>,
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules")
            .field("languages", &self.languages.len())
            .finish_non_exhaustive()
    }
}

impl Rules {
    pub fn new(languages: Vec<Language>, farewell: Box<dyn FarewellText>) -> Self {
        Self {
            languages,
            farewell,
        }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// One wrong guess per language, except the last one standing.
    pub fn total_allowed_wrong_guesses(&self) -> usize {
        self.languages.len().saturating_sub(1)
    }

    pub fn evaluate(&self, session: &GameSession) -> GameStatus {
        GameStatus::evaluate(session, self.total_allowed_wrong_guesses())
    }

    /// Name of the last language in the list, the one a loss leaves you with.
    pub fn survivor(&self) -> &str {
        self.languages.last().map(|l| l.name.as_str()).unwrap_or("")
    }

    fn farewell_for(&self, wrong_guess_count: usize) -> Option<String> {
        let index = wrong_guess_count.checked_sub(1)?;
        let language = self.languages.get(index)?;
        Some(self.farewell.farewell(&language.name))
    }
}

/// Produce the session that follows `action`.
pub fn reduce(session: GameSession, action: Action, rules: &Rules) -> GameSession {
    match action {
        Action::NewGame {
            secret_word,
            starting_secs,
        } => GameSession::new(secret_word, starting_secs),
        Action::Guess(letter) => apply_guess(session, letter, rules).0,
        Action::Tick => apply_tick(session, rules),
    }
}

/// Record a guess. Ignored guesses return the session untouched.
pub fn apply_guess(
    mut session: GameSession,
    letter: char,
    rules: &Rules,
) -> (GameSession, GuessOutcome) {
    if !is_valid_guess(letter) {
        return (session, GuessOutcome::Ignored(IgnoreReason::NotALetter));
    }
    if rules.evaluate(&session).is_over {
        return (session, GuessOutcome::Ignored(IgnoreReason::GameOver));
    }
    if session.has_guessed(letter) {
        return (session, GuessOutcome::Ignored(IgnoreReason::AlreadyGuessed));
    }

    session.guessed_letters.push(letter);
    let status = rules.evaluate(&session);

    let outcome = if status.is_last_guess_wrong {
        session.farewell_message = rules.farewell_for(status.wrong_guess_count);
        GuessOutcome::Wrong
    } else {
        session.farewell_message = None;
        GuessOutcome::Correct
    };

    if status.is_over {
        session.timer_active = false;
    }

    (session, outcome)
}

fn apply_tick(mut session: GameSession, rules: &Rules) -> GameSession {
    if !session.timer_active {
        return session;
    }
    if session.time_remaining == 0 || rules.evaluate(&session).is_over {
        session.timer_active = false;
        return session;
    }

    session.time_remaining -= 1;
    if session.time_remaining == 0 {
        session.timer_active = false;
    }
    session
}
