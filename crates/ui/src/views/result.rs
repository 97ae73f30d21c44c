use dioxus::prelude::*;
use services::QuizHandle;

use crate::vm::ResultVm;

#[component]
pub fn ResultView(result: ResultVm) -> Element {
    let handle = use_context::<QuizHandle>();
    let quit_handle = handle.clone();

    let rows = result.rows.iter().map(|row| {
        let class = row.status_class();
        rsx! {
            li { key: "{row.ordinal}", class: "{class}",
                p { class: "result-question", "Q{row.ordinal}: {row.question}" }
                p { "Selected: {row.selected}" }
                p { "Correct: {row.correct}" }
            }
        }
    });

    rsx! {
        section { class: "result-box",
            div { class: "score-text",
                span { "{result.headline}" }
                p { "{result.score_label}" }
            }
            ul { class: "result-rows", {rows} }
            div { class: "buttons",
                button {
                    class: "btn btn-primary restart",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = handle.restart();
                    },
                    "Replay Quiz"
                }
                button {
                    class: "btn btn-secondary quit",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = quit_handle.quit();
                    },
                    "Quit Quiz"
                }
            }
        }
    }
}
