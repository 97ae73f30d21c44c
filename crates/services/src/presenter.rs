//! The seam between quiz logic and whatever draws it.

use std::sync::{Arc, Mutex};

use quiz_core::model::QuizReport;

/// What the screen needs to draw one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub ordinal: u32,
    pub total: usize,
    pub text: String,
    /// Options in display order, shuffled per showing.
    pub options: Vec<String>,
}

impl QuestionView {
    /// Heading shown above the options, e.g. `3. What does DNS stand for?`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}. {}", self.ordinal, self.text)
    }
}

/// Screen updates issued by the controller.
pub trait QuizPresenter {
    fn show_question(&mut self, question: &QuestionView);
    fn update_counter(&mut self, ordinal: u32, total: usize);
    fn update_countdown(&mut self, display: &str);
    fn update_progress(&mut self, value: f32);
    fn set_advance_visible(&mut self, visible: bool);
    fn highlight_option(&mut self, option: &str);
    fn show_result(&mut self, report: &QuizReport);
    /// Back to the initial screen with nothing carried over.
    fn reset(&mut self);
}

/// One call made on a `RecordingPresenter`.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    Question(QuestionView),
    Counter { ordinal: u32, total: usize },
    Countdown(String),
    Progress(f32),
    AdvanceVisible(bool),
    Highlight(String),
    Result(QuizReport),
    Reset,
}

/// Presenter that records every call; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: Arc<Mutex<Vec<PresenterEvent>>>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    #[must_use]
    pub fn questions(&self) -> Vec<QuestionView> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::Question(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn results(&self) -> Vec<QuizReport> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::Result(report) => Some(report),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn last_countdown(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            PresenterEvent::Countdown(display) => Some(display),
            _ => None,
        })
    }

    fn push(&self, event: PresenterEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl QuizPresenter for RecordingPresenter {
    fn show_question(&mut self, question: &QuestionView) {
        self.push(PresenterEvent::Question(question.clone()));
    }

    fn update_counter(&mut self, ordinal: u32, total: usize) {
        self.push(PresenterEvent::Counter { ordinal, total });
    }

    fn update_countdown(&mut self, display: &str) {
        self.push(PresenterEvent::Countdown(display.to_string()));
    }

    fn update_progress(&mut self, value: f32) {
        self.push(PresenterEvent::Progress(value));
    }

    fn set_advance_visible(&mut self, visible: bool) {
        self.push(PresenterEvent::AdvanceVisible(visible));
    }

    fn highlight_option(&mut self, option: &str) {
        self.push(PresenterEvent::Highlight(option.to_string()));
    }

    fn show_result(&mut self, report: &QuizReport) {
        self.push(PresenterEvent::Result(report.clone()));
    }

    fn reset(&mut self) {
        self.push(PresenterEvent::Reset);
    }
}
