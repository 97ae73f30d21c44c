use std::sync::Arc;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedSender;

use quiz_core::model::{AdvanceOutcome, Identity, QuizReport, SessionPhase, SessionState};
use quiz_core::timer::{TimerSettings, format_countdown};
use quiz_core::{Clock, QuestionBank};

use crate::error::QuizError;
use crate::presenter::{QuestionView, QuizPresenter};
use crate::reporter::ResultReporter;
use crate::sessions::runtime::QuizCommand;
use crate::timer::{QuestionTimer, TimerEvent, TimerEventKind};

/// Owns one quiz run and drives the presenter.
///
/// Every method runs on the single task that owns the controller; timer tasks
/// reach it only through `handle_timer`.
pub struct QuizController<P> {
    bank: Arc<QuestionBank>,
    settings: TimerSettings,
    clock: Clock,
    rng: StdRng,
    presenter: P,
    reporter: ResultReporter,
    timer_events: UnboundedSender<TimerEvent>,
    timer: QuestionTimer,
    generation: u64,
    identity: Option<Identity>,
    session: Option<SessionState>,
    last_report: Option<QuizReport>,
}

impl<P: QuizPresenter> QuizController<P> {
    #[must_use]
    pub fn new(
        bank: Arc<QuestionBank>,
        settings: TimerSettings,
        presenter: P,
        reporter: ResultReporter,
        timer_events: UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            bank,
            settings,
            clock: Clock::default(),
            rng: StdRng::from_os_rng(),
            presenter,
            reporter,
            timer_events,
            timer: QuestionTimer::idle(),
            generation: 0,
            identity: None,
            session: None,
            last_report: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Draw question orders from `rng`, so a run's shuffles can be replayed.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map_or(SessionPhase::NotStarted, SessionState::phase)
    }

    #[must_use]
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&QuizReport> {
        self.last_report.as_ref()
    }

    /// Generation of the question currently on screen.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    //
    // ─── COMMANDS ──────────────────────────────────────────────────────────────
    //

    /// Run one command, logging instead of failing when it is rejected.
    pub fn dispatch(&mut self, command: QuizCommand) {
        let result = match command {
            QuizCommand::Start(identity) => self.start(identity),
            QuizCommand::SelectOption(option) => self.select_option(&option),
            QuizCommand::Advance => self.advance(),
            QuizCommand::Restart => self.restart(),
            QuizCommand::Quit => {
                self.quit();
                Ok(())
            }
        };
        if let Err(err) = result {
            warn!("quiz command rejected: {err}");
        }
    }

    /// Start a fresh session for `identity`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyBank` when there is nothing to ask.
    pub fn start(&mut self, identity: Identity) -> Result<(), QuizError> {
        if self.bank.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        info!("starting quiz for {}", identity.email());
        self.identity = Some(identity);
        self.begin_session()
    }

    /// Record `option` for the question on screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotStarted` without a session, or `QuizError::Session`
    /// when the session is not in progress or `option` is not offered.
    pub fn select_option(&mut self, option: &str) -> Result<(), QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NotStarted)?;
        session.select_option(option)?;
        debug!("option {option:?} selected for question {}", session.current_ordinal());
        self.presenter.highlight_option(option);
        self.presenter.set_advance_visible(true);
        Ok(())
    }

    /// Leave the question on screen for the next one, or the result.
    ///
    /// A finished session ignores the call.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotStarted` without a session.
    pub fn advance(&mut self) -> Result<(), QuizError> {
        let now = self.clock.now();
        let session = self.session.as_mut().ok_or(QuizError::NotStarted)?;
        if session.is_finished() {
            return Ok(());
        }
        let outcome = session.advance(now)?;
        self.cancel_timer();
        self.show_outcome(outcome);
        Ok(())
    }

    /// Throw the current session away and start over with the same identity.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotStarted` if no identity was ever given.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        if self.identity.is_none() {
            return Err(QuizError::NotStarted);
        }
        info!("restarting quiz");
        self.begin_session()
    }

    /// Drop the session and the identity and return to the first screen.
    pub fn quit(&mut self) {
        self.cancel_timer();
        self.session = None;
        self.identity = None;
        self.last_report = None;
        self.presenter.reset();
        info!("quiz closed");
    }

    /// Abort the running timer without touching the session.
    pub fn stop_timer(&mut self) {
        self.cancel_timer();
    }

    /// Apply one timer event; events from an earlier question are ignored.
    pub fn handle_timer(&mut self, event: TimerEvent) {
        if event.generation != self.generation {
            debug!(
                "dropping {:?} from generation {} (current {})",
                event.kind, event.generation, self.generation
            );
            return;
        }
        match event.kind {
            TimerEventKind::CountdownTick => self.on_countdown_tick(),
            TimerEventKind::ProgressTick => self.on_progress_tick(),
            TimerEventKind::AutoAdvance => {
                if let Err(err) = self.advance() {
                    warn!("auto-advance failed: {err}");
                }
            }
        }
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn begin_session(&mut self) -> Result<(), QuizError> {
        self.cancel_timer();
        self.last_report = None;
        let now = self.clock.now();
        let questions = self.bank.draw_session_with(&mut self.rng);
        let mut session = SessionState::new(questions, self.settings, now);
        let outcome = session.begin(now)?;
        self.session = Some(session);
        self.show_outcome(outcome);
        Ok(())
    }

    fn show_outcome(&mut self, outcome: AdvanceOutcome) {
        match outcome {
            AdvanceOutcome::Question { .. } => self.show_current(),
            AdvanceOutcome::Finished => self.finish(),
        }
    }

    fn show_current(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(question) = session.current_question() else {
            self.finish();
            return;
        };
        let view = QuestionView {
            ordinal: question.ordinal(),
            total: session.total(),
            text: question.text().to_string(),
            options: question.question().shuffled_options(),
        };
        debug!("showing question {} of {}", view.ordinal, view.total);
        let countdown = format_countdown(session.remaining_seconds());

        self.presenter.show_question(&view);
        self.presenter.update_counter(view.ordinal, view.total);
        self.presenter.update_countdown(&countdown);
        self.presenter.update_progress(0.0);
        self.presenter.set_advance_visible(false);
        self.start_timer();
    }

    fn finish(&mut self) {
        self.cancel_timer();
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let report = session.report();
        info!(
            "quiz finished: {} / {} correct",
            report.correct_count(),
            report.total_count()
        );
        self.presenter.show_result(&report);
        if let Some(identity) = self.identity.as_ref() {
            let _ = self.reporter.dispatch(identity, &report);
        }
        self.last_report = Some(report);
    }

    fn on_countdown_tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(tick) = session.tick_countdown() else {
            return;
        };
        self.presenter.update_countdown(&tick.display());
        if tick.expired {
            debug!("time is up for question {}", session.current_ordinal());
            self.timer.stop_ticks();
            self.presenter.set_advance_visible(true);
            self.timer
                .schedule_auto_advance(self.settings.auto_advance_delay());
        }
    }

    fn on_progress_tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.is_time_up() {
            return;
        }
        if let Some(value) = session.tick_progress() {
            self.presenter.update_progress(value);
        }
        if session.is_progress_stopped() {
            self.timer.stop_progress();
        }
    }

    fn start_timer(&mut self) {
        self.cancel_timer();
        self.timer = QuestionTimer::start(self.generation, &self.settings, self.timer_events.clone());
    }

    /// Abort running tasks and retire their generation.
    fn cancel_timer(&mut self) {
        self.timer.cancel();
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{PresenterEvent, RecordingPresenter};
    use quiz_core::model::{IdentityDraft, QuestionDraft, QuestionId, SessionQuestion};
    use quiz_core::time::fixed_clock;
    use tokio::sync::mpsc;

    fn bank(n: u64) -> Arc<QuestionBank> {
        let questions = (1..=n)
            .map(|id| {
                QuestionDraft::new(format!("Question {id}"), ["right", "wrong"], "right")
                    .validate(QuestionId::new(id))
                    .unwrap()
            })
            .collect();
        Arc::new(QuestionBank::new(questions))
    }

    fn identity() -> Identity {
        IdentityDraft::new("Ada Lovelace", "ada@example.com", "0123456789")
            .validate()
            .unwrap()
    }

    fn controller(
        n: u64,
    ) -> (
        QuizController<RecordingPresenter>,
        RecordingPresenter,
        mpsc::UnboundedReceiver<TimerEvent>,
    ) {
        let presenter = RecordingPresenter::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = QuizController::new(
            bank(n),
            TimerSettings::default(),
            presenter.clone(),
            ResultReporter::log_only(),
            tx,
        )
        .with_clock(fixed_clock());
        (controller, presenter, rx)
    }

    fn event(generation: u64, kind: TimerEventKind) -> TimerEvent {
        TimerEvent { generation, kind }
    }

    #[tokio::test]
    async fn start_shows_first_question() {
        let (mut controller, presenter, _rx) = controller(3);
        controller.start(identity()).unwrap();

        assert_eq!(controller.phase(), SessionPhase::InProgress);
        assert!(controller.is_timer_running());
        let questions = presenter.questions();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].ordinal, 1);
        assert_eq!(questions[0].total, 3);
        assert_eq!(presenter.last_countdown().as_deref(), Some("30"));
        assert!(presenter.events().contains(&PresenterEvent::AdvanceVisible(false)));
    }

    #[tokio::test]
    async fn empty_bank_refuses_to_start() {
        let (mut controller, presenter, _rx) = controller(0);
        let err = controller.start(identity()).unwrap_err();
        assert!(matches!(err, QuizError::EmptyBank));
        assert!(presenter.events().is_empty());
    }

    #[tokio::test]
    async fn commands_before_start_are_rejected() {
        let (mut controller, _presenter, _rx) = controller(2);
        assert!(matches!(controller.advance(), Err(QuizError::NotStarted)));
        assert!(matches!(
            controller.select_option("right"),
            Err(QuizError::NotStarted)
        ));
        assert!(matches!(controller.restart(), Err(QuizError::NotStarted)));
    }

    #[tokio::test]
    async fn selection_highlights_and_shows_next() {
        let (mut controller, presenter, _rx) = controller(2);
        controller.start(identity()).unwrap();
        presenter.clear();

        controller.select_option("wrong").unwrap();
        controller.select_option("right").unwrap();

        assert_eq!(
            presenter.events(),
            vec![
                PresenterEvent::Highlight("wrong".into()),
                PresenterEvent::AdvanceVisible(true),
                PresenterEvent::Highlight("right".into()),
                PresenterEvent::AdvanceVisible(true),
            ]
        );
        let session = controller.session().unwrap();
        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.answers()[0].selected_option(), Some("right"));
    }

    #[tokio::test]
    async fn unknown_option_leaves_state_alone() {
        let (mut controller, presenter, _rx) = controller(2);
        controller.start(identity()).unwrap();
        presenter.clear();

        let err = controller.select_option("maybe").unwrap_err();
        assert!(matches!(err, QuizError::Session(_)));
        assert!(presenter.events().is_empty());
        assert!(controller.session().unwrap().answers().is_empty());
    }

    #[tokio::test]
    async fn advancing_past_last_question_reports_once() {
        let (mut controller, presenter, _rx) = controller(2);
        controller.start(identity()).unwrap();
        controller.select_option("right").unwrap();
        controller.advance().unwrap();
        controller.advance().unwrap();
        controller.advance().unwrap();

        assert_eq!(controller.phase(), SessionPhase::Finished);
        assert!(!controller.is_timer_running());
        let results = presenter.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].correct_count(), 1);
        assert_eq!(results[0].total_count(), 2);
        assert_eq!(controller.last_report(), Some(&results[0]));
    }

    #[tokio::test]
    async fn stale_ticks_are_dropped() {
        let (mut controller, presenter, _rx) = controller(3);
        controller.start(identity()).unwrap();
        let first = controller.generation();
        controller.advance().unwrap();
        let second = controller.generation();
        assert_ne!(first, second);
        presenter.clear();

        controller.handle_timer(event(first, TimerEventKind::CountdownTick));
        controller.handle_timer(event(first, TimerEventKind::AutoAdvance));
        assert!(presenter.events().is_empty());
        assert_eq!(controller.session().unwrap().current_ordinal(), 2);
        assert_eq!(controller.session().unwrap().remaining_seconds(), 30);

        controller.handle_timer(event(second, TimerEventKind::CountdownTick));
        controller.handle_timer(event(second, TimerEventKind::CountdownTick));
        assert_eq!(presenter.last_countdown().as_deref(), Some("29"));
    }

    #[tokio::test]
    async fn expiry_shows_next_and_schedules_advance() {
        let (mut controller, presenter, _rx) = controller(2);
        controller.start(identity()).unwrap();
        let generation = controller.generation();
        presenter.clear();

        for _ in 0..31 {
            controller.handle_timer(event(generation, TimerEventKind::CountdownTick));
        }
        assert_eq!(presenter.last_countdown().as_deref(), Some("00"));
        assert!(controller.session().unwrap().is_time_up());
        assert_eq!(
            presenter.events().last(),
            Some(&PresenterEvent::AdvanceVisible(true))
        );

        controller.handle_timer(event(generation, TimerEventKind::ProgressTick));
        assert!(!presenter
            .events()
            .iter()
            .any(|e| matches!(e, PresenterEvent::Progress(_))));

        controller.handle_timer(event(generation, TimerEventKind::AutoAdvance));
        assert_eq!(controller.session().unwrap().current_ordinal(), 2);
        assert!(controller.session().unwrap().answers().is_empty());
    }

    #[tokio::test]
    async fn restart_reshuffles_with_clean_answers() {
        let (mut controller, presenter, _rx) = controller(5);
        controller.start(identity()).unwrap();
        controller.select_option("right").unwrap();
        controller.advance().unwrap();
        presenter.clear();

        controller.restart().unwrap();

        let session = controller.session().unwrap();
        assert_eq!(session.current_ordinal(), 1);
        assert_eq!(session.total(), 5);
        assert!(session.answers().is_empty());
        assert_eq!(presenter.questions()[0].ordinal, 1);
        assert_eq!(controller.identity(), Some(&identity()));
    }

    fn question_order(session: &SessionState) -> Vec<QuestionId> {
        session.questions().iter().map(SessionQuestion::id).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn restart_draws_the_next_shuffle() {
        let seed = 42;
        let mut expected = StdRng::seed_from_u64(seed);
        let first_draw: Vec<_> = bank(8)
            .draw_session_with(&mut expected)
            .iter()
            .map(SessionQuestion::id)
            .collect();
        let second_draw: Vec<_> = bank(8)
            .draw_session_with(&mut expected)
            .iter()
            .map(SessionQuestion::id)
            .collect();
        assert_ne!(first_draw, second_draw);

        let (controller, _presenter, _rx) = controller(8);
        let mut controller = controller.with_rng(StdRng::seed_from_u64(seed));
        controller.start(identity()).unwrap();
        assert_eq!(question_order(controller.session().unwrap()), first_draw);

        controller.advance().unwrap();
        controller.restart().unwrap();
        assert_eq!(question_order(controller.session().unwrap()), second_draw);
    }

    #[tokio::test]
    async fn quit_forgets_everything() {
        let (mut controller, presenter, _rx) = controller(3);
        controller.start(identity()).unwrap();
        controller.select_option("right").unwrap();
        controller.quit();

        assert_eq!(controller.phase(), SessionPhase::NotStarted);
        assert!(controller.identity().is_none());
        assert!(controller.session().is_none());
        assert!(!controller.is_timer_running());
        assert_eq!(presenter.events().last(), Some(&PresenterEvent::Reset));
        assert!(presenter.results().is_empty());
    }

    #[tokio::test]
    async fn dispatch_logs_rejections() {
        let (mut controller, _presenter, _rx) = controller(1);
        controller.dispatch(QuizCommand::Advance);
        assert_eq!(controller.phase(), SessionPhase::NotStarted);

        controller.dispatch(QuizCommand::Start(identity()));
        controller.dispatch(QuizCommand::SelectOption("right".into()));
        controller.dispatch(QuizCommand::Advance);
        assert_eq!(controller.phase(), SessionPhase::Finished);
        assert_eq!(controller.last_report().unwrap().correct_count(), 1);
    }
}
