use crate::session::GameSession;
use crate::status::GameStatus;
use std::time::{Duration, Instant};

pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TimerState {
    Running,
    /// Clock at zero but not yet deactivated
    Paused,
    Stopped,
}

impl TimerState {
    pub fn of(session: &GameSession, status: &GameStatus) -> Self {
        match (session.timer_active, session.time_remaining, status.is_over) {
            (true, 0, _) => TimerState::Paused,
            (true, _, false) => TimerState::Running,
            _ => TimerState::Stopped,
        }
    }
}

/// A scheduled one-second decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTick {
    pub generation: u64,
    pub due: Instant,
}

impl PendingTick {
    pub fn is_due(&self, now: Instant) -> bool {
        self.due <= now
    }

    pub fn time_left(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}

/// Holds at most one pending decrement. Arming always replaces whatever was
/// pending, so re-arming on every state change never stacks timers.
#[derive(Debug)]
pub struct Countdown {
    interval: Duration,
    generation: u64,
    pending: Option<PendingTick>,
}

impl Countdown {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            generation: 0,
            pending: None,
        }
    }

    pub fn arm(&mut self, now: Instant) -> PendingTick {
        self.cancel();
        self.generation += 1;
        let tick = PendingTick {
            generation: self.generation,
            due: now + self.interval,
        };
        self.pending = Some(tick);
        tick
    }

    pub fn cancel(&mut self) -> Option<PendingTick> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether `tick` is still the live one; older handles were cancelled.
    pub fn is_current(&self, tick: &PendingTick) -> bool {
        self.pending
            .is_some_and(|p| p.generation == tick.generation)
    }

    /// Consume `tick` if it is the live decrement and due at `now`.
    /// Handles from a cancelled or replaced arm are ignored.
    pub fn fire(&mut self, tick: PendingTick, now: Instant) -> bool {
        if !self.is_current(&tick) || !tick.is_due(now) {
            return false;
        }
        self.pending = None;
        true
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(COUNTDOWN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_fire() {
        let start = Instant::now();
        let mut countdown = Countdown::default();
        let tick = countdown.arm(start);

        assert!(countdown.is_armed());
        assert!(!countdown.fire(tick, start + Duration::from_millis(999)));
        assert!(countdown.is_armed());
        assert!(countdown.fire(tick, start + Duration::from_millis(1000)));
        assert!(!countdown.is_armed());
        assert!(!countdown.fire(tick, start + Duration::from_secs(5)));
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let start = Instant::now();
        let mut countdown = Countdown::default();
        let first = countdown.arm(start);
        let second = countdown.arm(start + Duration::from_millis(500));

        assert!(!countdown.is_current(&first));
        assert!(countdown.is_current(&second));
        assert_eq!(countdown.pending(), Some(second));

        // the replaced handle never fires, even well past its deadline
        assert!(!countdown.fire(first, start + Duration::from_secs(3)));
        assert!(countdown.is_armed());
        assert!(countdown.fire(second, start + Duration::from_millis(1500)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut countdown = Countdown::new(Duration::from_millis(10));
        let tick = countdown.arm(start);

        assert_eq!(countdown.cancel(), Some(tick));
        assert!(!countdown.is_armed());
        assert!(!countdown.fire(tick, start + Duration::from_secs(1)));
        assert_eq!(countdown.cancel(), None);
    }

    #[test]
    fn test_time_left() {
        let start = Instant::now();
        let tick = Countdown::default().arm(start);

        assert_eq!(
            tick.time_left(start + Duration::from_millis(400)),
            Duration::from_millis(600)
        );
        assert_eq!(tick.time_left(start + Duration::from_secs(3)), Duration::ZERO);
        assert!(!tick.is_due(start));
        assert!(tick.is_due(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_timer_state() {
        let mut session = GameSession::new("go".to_string(), 40);
        let status = GameStatus::evaluate(&session, 8);
        assert_eq!(TimerState::of(&session, &status), TimerState::Running);

        session.time_remaining = 0;
        let status = GameStatus::evaluate(&session, 8);
        assert_eq!(TimerState::of(&session, &status), TimerState::Paused);

        session.timer_active = false;
        let status = GameStatus::evaluate(&session, 8);
        assert_eq!(TimerState::of(&session, &status), TimerState::Stopped);
    }

    #[test]
    fn test_timer_state_stopped_when_over() {
        let mut session = GameSession::new("go".to_string(), 40);
        session.guessed_letters = vec!['g', 'o'];
        let status = GameStatus::evaluate(&session, 8);

        assert_eq!(TimerState::of(&session, &status), TimerState::Stopped);
    }
}
