use crate::countdown::{Countdown, PendingTick, TimerState, COUNTDOWN_INTERVAL};
use crate::language::WordProvider;
use crate::reducer::{apply_guess, reduce, Action, GuessOutcome, Rules};
use crate::session::GameSession;
use crate::status::{announcement, GameStatus, Outcome};
use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SessionStarted { word_len: usize },
    Guessed { letter: char, correct: bool },
    TimeTick { remaining: u32 },
    Ended(Outcome),
}

/// Owns the live session, its countdown and the collaborators used to
/// start new ones.
pub struct Game {
    session: GameSession,
    rules: Rules,
    words: Box<dyn WordProvider>,
    countdown: Countdown,
    starting_secs: u32,
    notices: VecDeque<Notice>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("session", &self.session)
            .field("rules", &self.rules)
            .field("countdown", &self.countdown)
            .field("starting_secs", &self.starting_secs)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Create the controller and start the first session right away.
    pub fn new(
        rules: Rules,
        words: Box<dyn WordProvider>,
        starting_secs: u32,
        now: Instant,
    ) -> Self {
        let mut game = Self {
            session: GameSession::new(String::new(), starting_secs),
            rules,
            words,
            countdown: Countdown::new(COUNTDOWN_INTERVAL),
            starting_secs,
            notices: VecDeque::new(),
        };
        game.start_new_session(now);
        game
    }

    pub fn start_new_session(&mut self, now: Instant) {
        let secret_word = self.words.next_word();
        info!(
            word_len = secret_word.len(),
            starting_secs = self.starting_secs,
            "new session"
        );
        debug!(%secret_word);

        self.countdown.cancel();
        self.notices.push_back(Notice::SessionStarted {
            word_len: secret_word.len(),
        });
        self.dispatch(
            Action::NewGame {
                secret_word,
                starting_secs: self.starting_secs,
            },
            now,
        );
    }

    pub fn submit_guess(&mut self, letter: char, now: Instant) -> GuessOutcome {
        let was_over = self.status().is_over;
        let (next, outcome) = apply_guess(self.session.clone(), letter, &self.rules);
        self.session = next;

        match outcome {
            GuessOutcome::Ignored(reason) => {
                debug!(%letter, ?reason, "guess ignored");
            }
            GuessOutcome::Correct | GuessOutcome::Wrong => {
                let correct = outcome == GuessOutcome::Correct;
                debug!(%letter, correct, "guess recorded");
                self.notices.push_back(Notice::Guessed { letter, correct });
                self.after_change(was_over, now);
            }
        }
        outcome
    }

    /// Apply the countdown decrement `tick`. Returns true when a second was
    /// taken off the clock. A handle from a replaced or cancelled arm does nothing.
    pub fn on_tick(&mut self, tick: PendingTick, now: Instant) -> bool {
        if !self.countdown.fire(tick, now) {
            if !self.countdown.is_current(&tick) {
                debug!(generation = tick.generation, "stale countdown tick ignored");
            }
            return false;
        }
        // re-arm from the deadline so late wake-ups do not stretch the second
        self.dispatch(Action::Tick, tick.due);
        self.notices.push_back(Notice::TimeTick {
            remaining: self.session.time_remaining,
        });
        true
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn status(&self) -> GameStatus {
        self.rules.evaluate(&self.session)
    }

    pub fn timer_state(&self) -> TimerState {
        TimerState::of(&self.session, &self.status())
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn announcement(&self) -> String {
        announcement(&self.session, &self.status())
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Cancel the pending countdown; no further seconds are taken off.
    pub fn shutdown(&mut self) {
        if self.countdown.cancel().is_some() {
            debug!("countdown cancelled");
        }
    }

    fn dispatch(&mut self, action: Action, now: Instant) {
        let was_over = match action {
            Action::NewGame { .. } => false,
            _ => self.status().is_over,
        };
        self.session = reduce(self.session.clone(), action, &self.rules);
        self.after_change(was_over, now);
    }

    fn after_change(&mut self, was_over: bool, now: Instant) {
        self.sync_timer(now);

        let status = self.status();
        if status.is_over && !was_over {
            info!(
                outcome = ?status.outcome,
                wrong_guesses = status.wrong_guess_count,
                time_remaining = self.session.time_remaining,
                "session ended"
            );
            self.notices.push_back(Notice::Ended(status.outcome));
        }
    }

    fn sync_timer(&mut self, now: Instant) {
        match self.timer_state() {
            TimerState::Running => {
                if !self.countdown.is_armed() {
                    self.countdown.arm(now);
                }
            }
            TimerState::Paused => {
                self.countdown.cancel();
                self.session = reduce(self.session.clone(), Action::Tick, &self.rules);
            }
            TimerState::Stopped => {
                self.countdown.cancel();
            }
        }
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.shutdown();
    }
}
