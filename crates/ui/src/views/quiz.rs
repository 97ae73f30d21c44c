use dioxus::prelude::*;
use services::QuizHandle;

use crate::vm::QuizScreen;

#[component]
pub fn QuizView(screen: QuizScreen) -> Element {
    let handle = use_context::<QuizHandle>();
    let Some(question) = screen.question.clone() else {
        return rsx! {
            p { "Loading..." }
        };
    };

    let countdown = screen.countdown.clone();
    let progress_style = screen.progress_style();
    let counter = screen.counter_label();
    let advance_visible = screen.advance_visible;
    let next_handle = handle.clone();

    let options = question.options.iter().map(|option| {
        let class = if screen.is_selected(option) {
            "option selected"
        } else {
            "option"
        };
        let handle = handle.clone();
        let choice = option.clone();
        rsx! {
            button {
                key: "{option}",
                class: "{class}",
                r#type: "button",
                onclick: move |_| {
                    let _ = handle.select_option(choice.clone());
                },
                span { "{option}" }
            }
        }
    });

    rsx! {
        section { class: "quiz-box",
            header {
                div { class: "title", "Quiz" }
                div { class: "timer",
                    span { class: "time-left-txt", "Time Left" }
                    span { class: "timer-sec", "{countdown}" }
                }
                div { class: "time-line", style: "{progress_style}" }
            }
            div { class: "que-text",
                span { "{question.label}" }
            }
            div { class: "option-list", {options} }
            footer {
                div { class: "total-que", "{counter}" }
                if advance_visible {
                    button {
                        class: "btn btn-primary next-btn",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = next_handle.advance();
                        },
                        "Next Que"
                    }
                }
            }
        }
    }
}
