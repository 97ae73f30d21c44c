use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnsweredQuestion, QuizReport, SessionQuestion};
use crate::timer::{Countdown, CountdownTick, ProgressLine, TimerSettings};

/// Coarse lifecycle of a quiz session. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("session is not in progress (phase: {phase:?})")]
    NotInProgress { phase: SessionPhase },

    #[error("session has already started")]
    AlreadyStarted,

    #[error("{option:?} is not an option of the current question")]
    UnknownOption { option: String },

    #[error("no question at index {index}")]
    NoCurrentQuestion { index: usize },
}

/// Where the session stands after `begin` or `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A question is now showing.
    Question { index: usize },
    /// The session is over; build the report.
    Finished,
}

/// All mutable state of one quiz run.
///
/// Built fresh for every start and restart, so nothing leaks between runs.
#[derive(Debug, Clone)]
pub struct SessionState {
    questions: Vec<SessionQuestion>,
    current_index: usize,
    settings: TimerSettings,
    countdown: Countdown,
    progress: ProgressLine,
    answers: Vec<AnsweredQuestion>,
    phase: SessionPhase,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionState {
    #[must_use]
    pub fn new(
        questions: Vec<SessionQuestion>,
        settings: TimerSettings,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            questions,
            current_index: 0,
            settings,
            countdown: settings.countdown(),
            progress: settings.progress_line(),
            answers: Vec::new(),
            phase: SessionPhase::NotStarted,
            started_at,
            completed_at: None,
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    #[must_use]
    pub fn questions(&self) -> &[SessionQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&SessionQuestion> {
        self.questions.get(self.current_index)
    }

    /// 1-based position of the current question.
    #[must_use]
    pub fn current_ordinal(&self) -> u32 {
        self.current_question().map_or_else(
            || u32::try_from(self.current_index + 1).unwrap_or(u32::MAX),
            SessionQuestion::ordinal,
        )
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn is_time_up(&self) -> bool {
        self.countdown.is_expired()
    }

    #[must_use]
    pub fn progress_value(&self) -> f32 {
        self.progress.value()
    }

    #[must_use]
    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    #[must_use]
    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Questions the user has seen so far, in session order.
    #[must_use]
    pub fn reached(&self) -> &[SessionQuestion] {
        let end = (self.current_index + 1).min(self.questions.len());
        &self.questions[..end]
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Move from `NotStarted` to showing the first question.
    ///
    /// A session without questions goes straight to `Finished`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::AlreadyStarted` when called twice.
    pub fn begin(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionStateError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(SessionStateError::AlreadyStarted);
        }
        self.phase = SessionPhase::InProgress;
        self.started_at = now;
        self.current_index = 0;
        self.answers.clear();
        self.reset_timer();

        if self.current_question().is_none() {
            self.finish(now);
            return Ok(AdvanceOutcome::Finished);
        }
        Ok(AdvanceOutcome::Question { index: 0 })
    }

    /// Record `option` for the current question, replacing an earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` outside of `InProgress`, `NoCurrentQuestion` if the
    /// index points past the list, and `UnknownOption` if `option` is not offered.
    pub fn select_option(&mut self, option: &str) -> Result<&AnsweredQuestion, SessionStateError> {
        self.ensure_in_progress()?;
        let index = self.current_index;
        let question = self
            .questions
            .get(index)
            .ok_or(SessionStateError::NoCurrentQuestion { index })?
            .question();
        if !question.has_option(option) {
            return Err(SessionStateError::UnknownOption {
                option: option.to_string(),
            });
        }

        let id = question.id();
        let position = match self.answers.iter().position(|a| a.question_id() == id) {
            Some(position) => {
                self.answers[position].reselect(option);
                position
            }
            None => {
                self.answers.push(AnsweredQuestion::selected(question, option));
                self.answers.len() - 1
            }
        };
        Ok(&self.answers[position])
    }

    /// Leave the current question.
    ///
    /// Moves to the next question, or finishes when this was the last one or
    /// the next one is missing. Already finished sessions stay finished.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` if the session never started.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionStateError> {
        match self.phase {
            SessionPhase::NotStarted => Err(SessionStateError::NotInProgress { phase: self.phase }),
            SessionPhase::Finished => Ok(AdvanceOutcome::Finished),
            SessionPhase::InProgress => {
                let next = self.current_index + 1;
                if next < self.questions.len() {
                    self.current_index = next;
                    self.reset_timer();
                    Ok(AdvanceOutcome::Question { index: next })
                } else {
                    self.finish(now);
                    Ok(AdvanceOutcome::Finished)
                }
            }
        }
    }

    /// One countdown period elapsed. `None` when not running or already expired.
    pub fn tick_countdown(&mut self) -> Option<CountdownTick> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        self.countdown.tick()
    }

    /// One progress period elapsed. `None` when not running or past the ceiling.
    pub fn tick_progress(&mut self) -> Option<f32> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        self.progress.tick()
    }

    #[must_use]
    pub fn is_progress_stopped(&self) -> bool {
        self.progress.is_stopped()
    }

    /// Score what has been reached so far; unanswered questions count as skipped.
    #[must_use]
    pub fn report(&self) -> QuizReport {
        QuizReport::build(
            self.reached(),
            &self.answers,
            self.started_at,
            self.completed_at,
        )
    }

    fn finish(&mut self, now: DateTime<Utc>) {
        self.phase = SessionPhase::Finished;
        self.completed_at = Some(now);
    }

    fn reset_timer(&mut self) {
        self.countdown = self.settings.countdown();
        self.progress = self.settings.progress_line();
    }

    fn ensure_in_progress(&self) -> Result<(), SessionStateError> {
        if self.phase == SessionPhase::InProgress {
            Ok(())
        } else {
            Err(SessionStateError::NotInProgress { phase: self.phase })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
