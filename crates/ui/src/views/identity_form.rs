use dioxus::prelude::*;
use quiz_core::model::Identity;

use crate::vm::{FormField, IdentityFormVm};

#[component]
pub fn IdentityFormView(on_submit: EventHandler<Identity>, on_cancel: EventHandler<()>) -> Element {
    let form = use_signal(IdentityFormVm::default);

    rsx! {
        div { class: "user-form",
            header { class: "view-header",
                h2 { class: "view-title", "Your details" }
                p { class: "view-subtitle", "We send your results to this address." }
            }
            FormInput { form, field: FormField::Name, id: "user_name", label: "Name", input_type: "text" }
            FormInput { form, field: FormField::Email, id: "user_email", label: "Email", input_type: "email" }
            FormInput { form, field: FormField::Phone, id: "user_phone", label: "Phone", input_type: "tel" }
            div { class: "buttons",
                button {
                    class: "btn btn-secondary cancel-form",
                    r#type: "button",
                    onclick: move |_| {
                        let mut form = form;
                        form.write().clear();
                        on_cancel.call(());
                    },
                    "Cancel"
                }
                button {
                    class: "btn btn-primary submit-form",
                    r#type: "button",
                    onclick: move |_| {
                        let mut form = form;
                        let submitted = form.write().submit();
                        if let Some(identity) = submitted {
                            on_submit.call(identity);
                        }
                    },
                    "Continue"
                }
            }
        }
    }
}

#[component]
fn FormInput(
    form: Signal<IdentityFormVm>,
    field: FormField,
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
) -> Element {
    let value = form.read().value(field).to_string();
    let error = form.read().error_message(field);
    let input_class = if error.is_some() { "input-error" } else { "" };

    rsx! {
        div { class: "field",
            label { r#for: "{id}", "{label}" }
            input {
                id: "{id}",
                class: "{input_class}",
                r#type: "{input_type}",
                value: "{value}",
                oninput: move |evt| {
                    let mut form = form;
                    form.write().set(field, evt.value());
                },
            }
            if let Some(message) = error {
                small { class: "error", id: "{id}_error", "{message}" }
            }
        }
    }
}
