use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use endgame::game::{Game, Notice};
use endgame::input::{map_key, Command};
use endgame::language::{load_languages, FixedWord, RandomFarewell};
use endgame::reducer::{GuessOutcome, IgnoreReason, Rules};
use endgame::runtime::{InputEvent, Runner, TestEventSource, TickRate};
use endgame::status::{LossReason, Outcome};

fn game_for(word: &str, secs: u32, now: Instant) -> Game {
    let rules = Rules::new(load_languages().unwrap(), Box::new(RandomFarewell));
    Game::new(rules, Box::new(FixedWord::new(word).unwrap()), secs, now)
}

fn key(c: char) -> InputEvent {
    InputEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Headless run of the game loop over Runner/TestEventSource, no TTY needed.
#[test]
fn headless_winning_flow() {
    let start = Instant::now();
    let mut game = game_for("hi", 40, start);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), TickRate::from_millis(10));
    for c in ['x', 'H', 'h', 'i'] {
        tx.send(key(c)).unwrap();
    }

    let mut outcomes = Vec::new();
    for _ in 0..100u32 {
        if let InputEvent::Key(k) = runner.step(game.countdown().pending()) {
            if let Command::Guess(c) = map_key(k) {
                outcomes.push(game.submit_guess(c, start));
            }
        }
        if game.status().is_over {
            break;
        }
    }

    assert_eq!(
        outcomes,
        vec![
            GuessOutcome::Wrong,
            GuessOutcome::Correct,
            GuessOutcome::Ignored(IgnoreReason::AlreadyGuessed),
            GuessOutcome::Correct,
        ]
    );
    assert_eq!(game.status().outcome, Outcome::Won);
    assert!(!game.session().timer_active);
    assert!(game.session().farewell_message.is_none());
    assert!(game
        .drain_notices()
        .contains(&Notice::Ended(Outcome::Won)));
}

#[test]
fn headless_timed_loss() {
    let start = Instant::now();
    let mut game = game_for("hello", 1, start);

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), TickRate::from_millis(50));

    // the runner wakes on the countdown deadline rather than on a poll
    let mut quiet_ticks = 0u32;
    for _ in 0..200u32 {
        match runner.step(game.countdown().pending()) {
            InputEvent::Countdown(tick) => {
                assert!(game.on_tick(tick, Instant::now()));
            }
            InputEvent::Tick => quiet_ticks += 1,
            other => panic!("unexpected event {other:?}"),
        }
        if game.status().is_over {
            break;
        }
    }

    assert_eq!(game.session().time_remaining, 0);
    assert_eq!(game.status().outcome, Outcome::Lost(LossReason::OutOfTime));
    assert!(!game.countdown().is_armed());
    assert!(start.elapsed() >= Duration::from_secs(1));
    assert!(quiet_ticks < 40, "{quiet_ticks} quiet ticks");

    let notices = game.drain_notices();
    assert!(notices.contains(&Notice::TimeTick { remaining: 0 }));
    assert!(notices.contains(&Notice::Ended(Outcome::Lost(LossReason::OutOfTime))));
}

#[test]
fn headless_stale_tick_is_ignored() {
    let start = Instant::now();
    let mut game = game_for("hello", 40, start);
    let stale = game.countdown().pending().unwrap();

    game.start_new_session(start);
    assert!(!game.on_tick(stale, start + Duration::from_secs(2)));
    assert_eq!(game.session().time_remaining, 40);
}

#[test]
fn headless_guesses_ignored_after_loss() {
    let now = Instant::now();
    let mut game = game_for("go", 40, now);
    let total = game.rules().total_allowed_wrong_guesses();

    for c in "abcdefhijk".chars().take(total) {
        game.submit_guess(c, now);
    }
    assert_eq!(
        game.status().outcome,
        Outcome::Lost(LossReason::OutOfGuesses)
    );

    let before = game.session().clone();
    assert_eq!(
        game.submit_guess('g', now),
        GuessOutcome::Ignored(IgnoreReason::GameOver)
    );
    assert!(game.countdown().pending().is_none());
    assert_eq!(game.session(), &before);

    game.start_new_session(now);
    assert!(game.session().guessed_letters.is_empty());
    assert_eq!(game.session().time_remaining, 40);
    assert!(game.session().timer_active);
}
