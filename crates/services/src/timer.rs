//! Per-question timer tasks.
//!
//! The tasks never touch session state. They only post [`TimerEvent`]s tagged
//! with the generation they were started for; the controller drops events from
//! older generations.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use quiz_core::timer::TimerSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEventKind {
    CountdownTick,
    ProgressTick,
    AutoAdvance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub generation: u64,
    pub kind: TimerEventKind,
}

/// Countdown, progress and auto-advance tasks for the question on screen.
#[derive(Debug, Default)]
pub struct QuestionTimer {
    generation: u64,
    sender: Option<UnboundedSender<TimerEvent>>,
    countdown: Option<JoinHandle<()>>,
    progress: Option<JoinHandle<()>>,
    auto_advance: Option<JoinHandle<()>>,
}

impl QuestionTimer {
    /// A timer with nothing running.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Spawn the countdown and progress tickers. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn start(
        generation: u64,
        settings: &TimerSettings,
        sender: UnboundedSender<TimerEvent>,
    ) -> Self {
        let countdown = spawn_ticker(
            generation,
            TimerEventKind::CountdownTick,
            settings.countdown_tick(),
            sender.clone(),
        );
        let progress = spawn_ticker(
            generation,
            TimerEventKind::ProgressTick,
            settings.progress_tick(),
            sender.clone(),
        );
        Self {
            generation,
            sender: Some(sender),
            countdown: Some(countdown),
            progress: Some(progress),
            auto_advance: None,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        [&self.countdown, &self.progress, &self.auto_advance]
            .into_iter()
            .any(Option::is_some)
    }

    pub fn stop_progress(&mut self) {
        abort(&mut self.progress);
    }

    /// Stop both tickers but leave any pending auto-advance alone.
    pub fn stop_ticks(&mut self) {
        abort(&mut self.countdown);
        abort(&mut self.progress);
    }

    /// Post one `AutoAdvance` after `delay`, replacing an earlier one.
    pub fn schedule_auto_advance(&mut self, delay: Duration) {
        let Some(sender) = self.sender.clone() else {
            return;
        };
        abort(&mut self.auto_advance);
        let generation = self.generation;
        self.auto_advance = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(TimerEvent {
                generation,
                kind: TimerEventKind::AutoAdvance,
            });
        }));
    }

    /// Abort every task. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        abort(&mut self.countdown);
        abort(&mut self.progress);
        abort(&mut self.auto_advance);
        self.sender = None;
    }
}

impl Drop for QuestionTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn abort(task: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = task.take() {
        handle.abort();
    }
}

fn spawn_ticker(
    generation: u64,
    kind: TimerEventKind,
    period: Duration,
    sender: UnboundedSender<TimerEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            if sender.send(TimerEvent { generation, kind }).is_err() {
                break;
            }
        }
    })
}
