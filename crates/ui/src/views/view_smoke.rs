use quiz_core::bank::number_questions;
use quiz_core::model::{AnsweredQuestion, QuestionDraft, QuestionId, QuizReport};
use quiz_core::time::{fixed_clock, fixed_now};
use services::{AppServices, QuestionView, QuizPresenter, ResultReporter};
use storage::Storage;

use dioxus::prelude::*;

use super::test_harness::render_stage;
use crate::context::AppContext;
use crate::views::QuizShell;
use crate::vm::{QuizScreen, Stage};

#[test]
fn welcome_view_smoke_renders_start_button() {
    let html = render_stage(QuizScreen::default());
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
}

#[test]
fn form_view_smoke_renders_fields() {
    let screen = QuizScreen {
        stage: Stage::Form,
        ..QuizScreen::default()
    };
    let html = render_stage(screen);
    for id in ["user_name", "user_email", "user_phone"] {
        assert!(html.contains(id), "missing {id} in {html}");
    }
    assert!(html.contains("Cancel"), "missing cancel in {html}");
}

#[test]
fn rules_view_smoke_renders_time_budget() {
    let screen = QuizScreen {
        stage: Stage::Rules,
        ..QuizScreen::default()
    };
    let html = render_stage(screen);
    assert!(html.contains("30 seconds"), "missing budget in {html}");
    assert!(html.contains("Exit Quiz"), "missing exit in {html}");
}

#[test]
fn quiz_view_smoke_renders_question_and_counter() {
    let mut screen = QuizScreen::default();
    screen.show_question(&QuestionView {
        ordinal: 3,
        total: 10,
        text: "What does DNS stand for?".into(),
        options: vec!["Domain Name System".into(), "Data Node Service".into()],
    });
    screen.update_counter(3, 10);
    screen.update_countdown("07");
    screen.highlight_option("Data Node Service");

    let html = render_stage(screen.clone());
    assert!(html.contains("3. What does DNS stand for?"), "missing label in {html}");
    assert!(html.contains("3 of 10 Questions"), "missing counter in {html}");
    assert!(html.contains("07"), "missing countdown in {html}");
    assert!(html.contains("option selected"), "missing highlight in {html}");
    assert!(!html.contains("Next Que"), "next shown too early in {html}");

    screen.set_advance_visible(true);
    let html = render_stage(screen);
    assert!(html.contains("Next Que"), "missing next button in {html}");
}

#[test]
fn result_view_smoke_renders_breakdown() {
    let reached = number_questions(vec![
        QuestionDraft::new("What does HTML stand for?", ["Hyper Text Markup Language", "Home Tool"], "Hyper Text Markup Language")
            .validate(QuestionId::new(1))
            .unwrap(),
        QuestionDraft::new("Default HTTPS port?", ["443", "80"], "443")
            .validate(QuestionId::new(2))
            .unwrap(),
    ]);
    let answers = vec![AnsweredQuestion::selected(reached[0].question(), "Hyper Text Markup Language")];
    let report = QuizReport::build(&reached, &answers, fixed_now(), Some(fixed_now()));

    let mut screen = QuizScreen::default();
    screen.show_result(&report);
    let html = render_stage(screen);
    assert!(html.contains("Keep it Up"), "missing headline in {html}");
    assert!(html.contains("You got 1 out of 2"), "missing score in {html}");
    assert!(html.contains("Selected: Skipped"), "missing skipped row in {html}");
    assert!(html.contains("Replay Quiz"), "missing restart in {html}");
}

#[derive(Props, Clone)]
struct ShellProps {
    context: AppContext,
}

impl PartialEq for ShellProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ShellHarness(props: ShellProps) -> Element {
    use_context_provider(|| props.context.clone());
    rsx! { QuizShell {} }
}

#[tokio::test(flavor = "current_thread")]
async fn shell_smoke_starts_on_welcome() {
    let services = AppServices::load(
        &Storage::bundled(),
        Default::default(),
        ResultReporter::log_only(),
        fixed_clock(),
    )
    .await
    .unwrap();

    let mut dom = VirtualDom::new_with_props(
        ShellHarness,
        ShellProps {
            context: AppContext::new(services),
        },
    );
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Start Quiz"), "missing welcome in {html}");
}
