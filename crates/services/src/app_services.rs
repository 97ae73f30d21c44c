use std::sync::Arc;

use log::info;
use quiz_core::timer::TimerSettings;
use quiz_core::{Clock, QuestionBank};
use storage::{QuestionRepository, Storage};

use crate::config::QuizConfig;
use crate::error::AppServicesError;
use crate::presenter::QuizPresenter;
use crate::reporter::ResultReporter;
use crate::sessions::{QuizHandle, QuizRuntime};

/// Loaded question bank plus the collaborators every quiz run shares.
#[derive(Clone)]
pub struct AppServices {
    bank: Arc<QuestionBank>,
    settings: TimerSettings,
    reporter: ResultReporter,
    clock: Clock,
}

impl AppServices {
    /// Load questions from the configured file, or the bundled set.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the questions cannot be loaded or none exist.
    pub async fn from_config(config: &QuizConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = match &config.questions_path {
            Some(path) => Storage::json_file(path),
            None => Storage::bundled(),
        };
        let reporter = ResultReporter::from_config(config.delivery.clone());
        Self::load(&storage, config.timer, reporter, clock).await
    }

    /// Build services over any question source.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the questions cannot be loaded or none exist.
    pub async fn load(
        storage: &Storage,
        settings: TimerSettings,
        reporter: ResultReporter,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let questions = storage.questions.list_questions().await?;
        if questions.is_empty() {
            return Err(AppServicesError::EmptyBank);
        }
        info!("loaded {} questions", questions.len());
        Ok(Self {
            bank: Arc::new(QuestionBank::new(questions)),
            settings,
            reporter,
            clock,
        })
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    /// A runtime wired to `presenter`; spawn `run()` and drive it through the handle.
    #[must_use]
    pub fn runtime<P: QuizPresenter>(&self, presenter: P) -> (QuizHandle, QuizRuntime<P>) {
        let (handle, runtime) = QuizRuntime::new(
            self.bank(),
            self.settings,
            presenter,
            self.reporter.clone(),
        );
        (handle, runtime.with_clock(self.clock))
    }
}
