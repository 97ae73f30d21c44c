use dioxus::prelude::*;

#[component]
pub fn RulesView(seconds: u32, on_exit: EventHandler<()>, on_continue: EventHandler<()>) -> Element {
    rsx! {
        div { class: "info-box",
            div { class: "info-title", span { "Some Rules of this Quiz" } }
            ol { class: "info-list",
                li { "You will have only {seconds} seconds per question." }
                li { "You can change your answer until you move to the next question." }
                li { "When the time runs out the quiz moves on by itself." }
                li { "Unanswered questions are counted as skipped." }
                li { "You'll get points on the basis of your correct answers." }
            }
            div { class: "buttons",
                button {
                    class: "btn btn-secondary quit",
                    r#type: "button",
                    onclick: move |_| on_exit.call(()),
                    "Exit Quiz"
                }
                button {
                    class: "btn btn-primary restart",
                    r#type: "button",
                    onclick: move |_| on_continue.call(()),
                    "Continue"
                }
            }
        }
    }
}
