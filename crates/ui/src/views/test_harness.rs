use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::QuestionBank;
use quiz_core::model::{Identity, QuestionDraft, QuestionId};
use quiz_core::timer::TimerSettings;
use services::{QuizHandle, QuizRuntime, RecordingPresenter, ResultReporter};

use crate::views::{IdentityFormView, QuizView, ResultView, RulesView, WelcomeView};
use crate::vm::{QuizScreen, Stage};

#[derive(Props, Clone)]
struct StageHarnessProps {
    handle: QuizHandle,
    screen: QuizScreen,
}

impl PartialEq for StageHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn StageHarness(props: StageHarnessProps) -> Element {
    use_context_provider(|| props.handle.clone());
    let screen = props.screen.clone();
    match screen.stage {
        Stage::Welcome => rsx! { WelcomeView { on_start: |()| {} } },
        Stage::Form => rsx! { IdentityFormView { on_submit: |_: Identity| {}, on_cancel: |()| {} } },
        Stage::Rules => rsx! { RulesView { seconds: 30, on_exit: |()| {}, on_continue: |()| {} } },
        Stage::Quiz => rsx! { QuizView { screen } },
        Stage::Result => match screen.result {
            Some(result) => rsx! { ResultView { result } },
            None => rsx! {},
        },
    }
}

fn detached_handle() -> QuizHandle {
    let question = QuestionDraft::new("Q", ["a", "b"], "a")
        .validate(QuestionId::new(1))
        .unwrap();
    let (handle, _runtime) = QuizRuntime::new(
        Arc::new(QuestionBank::new(vec![question])),
        TimerSettings::default(),
        RecordingPresenter::new(),
        ResultReporter::log_only(),
    );
    handle
}

/// Render one stage of `screen` to HTML.
pub fn render_stage(screen: QuizScreen) -> String {
    let mut dom = VirtualDom::new_with_props(
        StageHarness,
        StageHarnessProps {
            handle: detached_handle(),
            screen,
        },
    );
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}
