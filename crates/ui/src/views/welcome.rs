use dioxus::prelude::*;

#[component]
pub fn WelcomeView(on_start: EventHandler<()>) -> Element {
    rsx! {
        div { class: "start-btn",
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_start.call(()),
                "Start Quiz"
            }
        }
    }
}
