//! Tick arithmetic for the per-question countdown and progress line.
//!
//! Nothing here sleeps. The services layer owns the intervals and feeds one
//! call to [`Countdown::tick`] or [`ProgressLine::tick`] per elapsed period.

use std::time::Duration;

pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 30;

/// Timing knobs shared by every question of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSettings {
    seconds_per_question: u32,
    countdown_tick: Duration,
    progress_tick: Duration,
    progress_step: f32,
    progress_ceiling: f32,
    auto_advance_delay: Duration,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
            countdown_tick: Duration::from_secs(1),
            progress_tick: Duration::from_millis(30),
            progress_step: 0.5,
            progress_ceiling: 550.0,
            auto_advance_delay: Duration::from_secs(1),
        }
    }
}

impl TimerSettings {
    #[must_use]
    pub fn with_seconds_per_question(mut self, seconds: u32) -> Self {
        self.seconds_per_question = seconds;
        self
    }

    #[must_use]
    pub fn with_auto_advance_delay(mut self, delay: Duration) -> Self {
        self.auto_advance_delay = delay;
        self
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    #[must_use]
    pub fn countdown_tick(&self) -> Duration {
        self.countdown_tick
    }

    #[must_use]
    pub fn progress_tick(&self) -> Duration {
        self.progress_tick
    }

    #[must_use]
    pub fn progress_step(&self) -> f32 {
        self.progress_step
    }

    #[must_use]
    pub fn progress_ceiling(&self) -> f32 {
        self.progress_ceiling
    }

    #[must_use]
    pub fn auto_advance_delay(&self) -> Duration {
        self.auto_advance_delay
    }

    #[must_use]
    pub fn countdown(&self) -> Countdown {
        Countdown::new(self.seconds_per_question)
    }

    #[must_use]
    pub fn progress_line(&self) -> ProgressLine {
        ProgressLine::new(self.progress_step, self.progress_ceiling)
    }
}

/// Two-digit countdown text: `7` renders `07`, `12` renders `12`.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{seconds:02}")
}

/// One countdown step: the value to display and whether time ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTick {
    pub shown: u32,
    pub expired: bool,
}

impl CountdownTick {
    #[must_use]
    pub fn display(&self) -> String {
        format_countdown(self.shown)
    }
}

/// Counts down from the budget, showing each value before decrementing.
///
/// With a budget of 30 the ticks show 30, 29, .., 0; the tick that shows 0 is
/// the one that expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    expired: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            expired: false,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Advance one period. Returns `None` once expired.
    pub fn tick(&mut self) -> Option<CountdownTick> {
        if self.expired {
            return None;
        }
        let shown = self.remaining;
        if self.remaining == 0 {
            self.expired = true;
        } else {
            self.remaining -= 1;
        }
        Some(CountdownTick {
            shown,
            expired: self.expired,
        })
    }
}

/// Visual elapsed-time fill. Purely cosmetic; it never ends a question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressLine {
    value: f32,
    step: f32,
    ceiling: f32,
    stopped: bool,
}

impl ProgressLine {
    #[must_use]
    pub fn new(step: f32, ceiling: f32) -> Self {
        Self {
            value: 0.0,
            step,
            ceiling,
            stopped: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Grow by one step; stops itself once past the ceiling.
    pub fn tick(&mut self) -> Option<f32> {
        if self.stopped {
            return None;
        }
        self.value += self.step;
        if self.value > self.ceiling {
            self.stopped = true;
        }
        Some(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_is_zero_padded() {
        assert_eq!(format_countdown(7), "07");
        assert_eq!(format_countdown(12), "12");
        assert_eq!(format_countdown(0), "00");
    }

    #[test]
    fn countdown_shows_budget_then_expires_after_zero() {
        let mut countdown = Countdown::new(3);
        let shown: Vec<_> = std::iter::from_fn(|| countdown.tick()).collect();
        assert_eq!(
            shown,
            vec![
                CountdownTick { shown: 3, expired: false },
                CountdownTick { shown: 2, expired: false },
                CountdownTick { shown: 1, expired: false },
                CountdownTick { shown: 0, expired: true },
            ]
        );
        assert!(countdown.is_expired());
        assert_eq!(countdown.tick(), None);
    }

    #[test]
    fn default_budget_takes_thirty_one_ticks() {
        let mut countdown = TimerSettings::default().countdown();
        let ticks = std::iter::from_fn(|| countdown.tick()).count();
        assert_eq!(ticks, 31);
    }

    #[test]
    fn progress_stops_past_ceiling() {
        let mut line = ProgressLine::new(0.5, 1.0);
        assert_eq!(line.tick(), Some(0.5));
        assert_eq!(line.tick(), Some(1.0));
        assert!(!line.is_stopped());
        assert_eq!(line.tick(), Some(1.5));
        assert!(line.is_stopped());
        assert_eq!(line.tick(), None);
        assert_eq!(line.value(), 1.5);
    }

    #[test]
    fn default_progress_line_stops_after_1101_ticks() {
        let mut line = TimerSettings::default().progress_line();
        let ticks = std::iter::from_fn(|| line.tick()).count();
        assert_eq!(ticks, 1101);
        assert_eq!(line.value(), 550.5);
    }
}
