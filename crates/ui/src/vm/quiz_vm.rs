use dioxus::prelude::*;
use quiz_core::model::{Identity, QuizReport};
use services::{QuestionView, QuizPresenter};

const RESULT_HEADLINE: &str = "Keep it Up";

/// Which screen is on display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Welcome,
    Form,
    Rules,
    Quiz,
    Result,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub label: String,
    pub options: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub ordinal: u32,
    pub question: String,
    pub selected: String,
    pub correct: String,
    pub is_correct: bool,
}

impl ResultRowVm {
    #[must_use]
    pub fn status_class(&self) -> &'static str {
        if self.is_correct {
            "result-row result-row--correct"
        } else {
            "result-row result-row--wrong"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub headline: &'static str,
    pub score_label: String,
    pub percent: u32,
    pub rows: Vec<ResultRowVm>,
}

impl ResultVm {
    #[must_use]
    pub fn from_report(report: &QuizReport) -> Self {
        let rows = report
            .entries()
            .iter()
            .map(|entry| ResultRowVm {
                ordinal: entry.ordinal(),
                question: entry.question().to_string(),
                selected: entry.selected().to_string(),
                correct: entry.correct().to_string(),
                is_correct: entry.is_correct(),
            })
            .collect();
        Self {
            headline: RESULT_HEADLINE,
            score_label: format!(
                "You got {} out of {}",
                report.correct_count(),
                report.total_count()
            ),
            percent: report.score_percent(),
            rows,
        }
    }
}

/// Everything the quiz window shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizScreen {
    pub stage: Stage,
    pub question: Option<QuestionVm>,
    pub selected: Option<String>,
    pub countdown: String,
    pub progress: f32,
    pub ordinal: u32,
    pub total: usize,
    pub advance_visible: bool,
    pub result: Option<ResultVm>,
    /// Who the next quiz is for. Cleared whenever the screen goes back to welcome.
    pub taker: Option<Identity>,
}

impl QuizScreen {
    pub fn open_form(&mut self) {
        self.stage = Stage::Form;
    }

    pub fn open_rules(&mut self) {
        self.stage = Stage::Rules;
    }

    pub fn submit_identity(&mut self, identity: Identity) {
        self.taker = Some(identity);
        self.open_rules();
    }

    pub fn back_to_welcome(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn counter_label(&self) -> String {
        format!("{} of {} Questions", self.ordinal, self.total)
    }

    #[must_use]
    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.as_deref() == Some(option)
    }

    #[must_use]
    pub fn progress_style(&self) -> String {
        format!("width: {}px", self.progress)
    }
}

impl QuizPresenter for QuizScreen {
    fn show_question(&mut self, question: &QuestionView) {
        self.stage = Stage::Quiz;
        self.question = Some(QuestionVm {
            label: question.label(),
            options: question.options.clone(),
        });
        self.selected = None;
        self.result = None;
    }

    fn update_counter(&mut self, ordinal: u32, total: usize) {
        self.ordinal = ordinal;
        self.total = total;
    }

    fn update_countdown(&mut self, display: &str) {
        self.countdown = display.to_string();
    }

    fn update_progress(&mut self, value: f32) {
        self.progress = value;
    }

    fn set_advance_visible(&mut self, visible: bool) {
        self.advance_visible = visible;
    }

    fn highlight_option(&mut self, option: &str) {
        self.selected = Some(option.to_string());
    }

    fn show_result(&mut self, report: &QuizReport) {
        self.stage = Stage::Result;
        self.question = None;
        self.advance_visible = false;
        self.result = Some(ResultVm::from_report(report));
    }

    fn reset(&mut self) {
        self.back_to_welcome();
    }
}

/// Presenter that writes into the screen signal, so components re-render.
#[derive(Clone, Copy)]
pub struct SignalPresenter {
    screen: Signal<QuizScreen>,
}

impl SignalPresenter {
    #[must_use]
    pub fn new(screen: Signal<QuizScreen>) -> Self {
        Self { screen }
    }
}

impl QuizPresenter for SignalPresenter {
    fn show_question(&mut self, question: &QuestionView) {
        self.screen.write().show_question(question);
    }

    fn update_counter(&mut self, ordinal: u32, total: usize) {
        self.screen.write().update_counter(ordinal, total);
    }

    fn update_countdown(&mut self, display: &str) {
        self.screen.write().update_countdown(display);
    }

    fn update_progress(&mut self, value: f32) {
        self.screen.write().update_progress(value);
    }

    fn set_advance_visible(&mut self, visible: bool) {
        self.screen.write().set_advance_visible(visible);
    }

    fn highlight_option(&mut self, option: &str) {
        self.screen.write().highlight_option(option);
    }

    fn show_result(&mut self, report: &QuizReport) {
        self.screen.write().show_result(report);
    }

    fn reset(&mut self) {
        self.screen.write().reset();
    }
}
