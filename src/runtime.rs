use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::debug;

use crate::countdown::PendingTick;

/// Redraws never come faster than this
pub const MIN_TICK_RATE: Duration = Duration::from_millis(10);

/// What woke the game loop up
#[derive(Clone, Debug)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize,
    /// The pending countdown decrement is due
    Countdown(PendingTick),
    /// A quiet tick with nothing due; animations advance on these
    Tick,
    /// The terminal reader is gone, nothing more will arrive
    Closed,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait InputEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<InputEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // key release events would count every guess twice on some platforms
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    InputEvent::Key(key)
                }
                Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    debug!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed event source for tests and headless runs
pub struct TestEventSource {
    rx: Receiver<InputEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl InputEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Upper bound on how long the loop sleeps between redraws
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickRate(Duration);

impl TickRate {
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms).max(MIN_TICK_RATE))
    }

    pub fn interval(&self) -> Duration {
        self.0
    }

    /// One tick, or less when the countdown decrement is due sooner.
    pub fn wait(&self, pending: Option<&PendingTick>, now: Instant) -> Duration {
        pending.map_or(self.0, |tick| tick.time_left(now).min(self.0))
    }
}

/// Advances the game loop one wake-up at a time
pub struct Runner<E: InputEventSource> {
    event_source: E,
    rate: TickRate,
}

impl<E: InputEventSource> Runner<E> {
    pub fn new(event_source: E, rate: TickRate) -> Self {
        Self { event_source, rate }
    }

    /// Wait for the next thing to happen. A due countdown decrement comes
    /// ahead of queued input, so a stream of key repeats cannot hold the
    /// clock back.
    pub fn step(&self, pending: Option<PendingTick>) -> InputEvent {
        let now = Instant::now();
        if let Some(tick) = pending.filter(|t| t.is_due(now)) {
            return InputEvent::Countdown(tick);
        }

        match self
            .event_source
            .recv_timeout(self.rate.wait(pending.as_ref(), now))
        {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => match pending {
                Some(tick) if tick.is_due(Instant::now()) => InputEvent::Countdown(tick),
                _ => InputEvent::Tick,
            },
            Err(RecvTimeoutError::Disconnected) => InputEvent::Closed,
        }
    }
}
