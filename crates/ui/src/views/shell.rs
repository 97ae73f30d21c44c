use dioxus::prelude::*;
use log::warn;
use quiz_core::model::Identity;

use crate::context::AppContext;
use crate::views::{IdentityFormView, QuizView, ResultView, RulesView, WelcomeView};
use crate::vm::{QuizScreen, SignalPresenter, Stage};

/// Owns the screen state and the quiz runtime, and picks the stage to draw.
#[component]
pub fn QuizShell() -> Element {
    let ctx = use_context::<AppContext>();
    let mut screen = use_signal(QuizScreen::default);

    let handle = use_hook(|| {
        let (handle, runtime) = ctx.services().runtime(SignalPresenter::new(screen));
        spawn(async move {
            let _ = runtime.run().await;
        });
        handle
    });
    use_context_provider(|| handle.clone());

    let seconds = ctx.seconds_per_question();
    let current = screen.read().clone();

    rsx! {
        div { class: "quiz-shell",
            match current.stage {
                Stage::Welcome => rsx! {
                    WelcomeView { on_start: move |()| screen.write().open_form() }
                },
                Stage::Form => rsx! {
                    IdentityFormView {
                        on_submit: move |submitted: Identity| screen.write().submit_identity(submitted),
                        on_cancel: move |()| screen.write().back_to_welcome(),
                    }
                },
                Stage::Rules => rsx! {
                    RulesView {
                        seconds,
                        on_exit: move |()| screen.write().back_to_welcome(),
                        on_continue: move |()| {
                            let taker = screen.read().taker.clone();
                            let Some(taker) = taker else {
                                screen.write().open_form();
                                return;
                            };
                            if let Err(err) = handle.start(taker) {
                                warn!("could not start the quiz: {err}");
                            }
                        },
                    }
                },
                Stage::Quiz => rsx! {
                    QuizView { screen: current.clone() }
                },
                Stage::Result => match current.result.clone() {
                    Some(result) => rsx! {
                        ResultView { result }
                    },
                    None => rsx! {
                        p { "Loading..." }
                    },
                },
            }
        }
    }
}
