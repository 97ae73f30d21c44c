use std::sync::Arc;

use log::debug;
use rand::rngs::StdRng;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use quiz_core::model::Identity;
use quiz_core::timer::TimerSettings;
use quiz_core::{Clock, QuestionBank};

use crate::error::QuizError;
use crate::presenter::QuizPresenter;
use crate::reporter::ResultReporter;
use crate::sessions::controller::QuizController;
use crate::timer::TimerEvent;

/// User actions forwarded to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizCommand {
    Start(Identity),
    SelectOption(String),
    Advance,
    Restart,
    Quit,
}

/// Cloneable sender the UI uses to drive the quiz.
#[derive(Clone, Debug)]
pub struct QuizHandle {
    commands: UnboundedSender<QuizCommand>,
}

impl QuizHandle {
    /// Queue a command.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::RuntimeClosed` once the runtime has stopped.
    pub fn send(&self, command: QuizCommand) -> Result<(), QuizError> {
        self.commands
            .send(command)
            .map_err(|_| QuizError::RuntimeClosed)
    }

    /// # Errors
    ///
    /// Returns `QuizError::RuntimeClosed` once the runtime has stopped.
    pub fn start(&self, identity: Identity) -> Result<(), QuizError> {
        self.send(QuizCommand::Start(identity))
    }

    /// # Errors
    ///
    /// Returns `QuizError::RuntimeClosed` once the runtime has stopped.
    pub fn select_option(&self, option: impl Into<String>) -> Result<(), QuizError> {
        self.send(QuizCommand::SelectOption(option.into()))
    }

    /// # Errors
    ///
    /// Returns `QuizError::RuntimeClosed` once the runtime has stopped.
    pub fn advance(&self) -> Result<(), QuizError> {
        self.send(QuizCommand::Advance)
    }

    /// # Errors
    ///
    /// Returns `QuizError::RuntimeClosed` once the runtime has stopped.
    pub fn restart(&self) -> Result<(), QuizError> {
        self.send(QuizCommand::Restart)
    }

    /// # Errors
    ///
    /// Returns `QuizError::RuntimeClosed` once the runtime has stopped.
    pub fn quit(&self) -> Result<(), QuizError> {
        self.send(QuizCommand::Quit)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

/// Event loop that owns the controller.
///
/// Commands and timer events are applied one at a time, so session state has
/// a single writer.
pub struct QuizRuntime<P> {
    controller: QuizController<P>,
    commands: UnboundedReceiver<QuizCommand>,
    timer_events: UnboundedReceiver<TimerEvent>,
}

impl<P: QuizPresenter> QuizRuntime<P> {
    #[must_use]
    pub fn new(
        bank: Arc<QuestionBank>,
        settings: TimerSettings,
        presenter: P,
        reporter: ResultReporter,
    ) -> (QuizHandle, Self) {
        let (command_tx, commands) = mpsc::unbounded_channel();
        let (timer_tx, timer_events) = mpsc::unbounded_channel();
        let controller = QuizController::new(bank, settings, presenter, reporter, timer_tx);
        (
            QuizHandle {
                commands: command_tx,
            },
            Self {
                controller,
                commands,
                timer_events,
            },
        )
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.controller = self.controller.with_clock(clock);
        self
    }

    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.controller = self.controller.with_rng(rng);
        self
    }

    #[must_use]
    pub fn controller(&self) -> &QuizController<P> {
        &self.controller
    }

    /// Run until every `QuizHandle` is dropped, then hand the controller back.
    pub async fn run(mut self) -> QuizController<P> {
        loop {
            tokio::select! {
                biased;
                command = self.commands.recv() => match command {
                    Some(command) => {
                        debug!("quiz command {command:?}");
                        self.controller.dispatch(command);
                    }
                    None => break,
                },
                Some(event) = self.timer_events.recv() => self.controller.handle_timer(event),
            }
        }
        self.controller.stop_timer();
        self.controller
    }
}
