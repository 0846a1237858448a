//! Compose step: recipient, message and styling.

use dioxus::prelude::*;
use valentine_core::render::{PLACEHOLDER_MESSAGE, PLACEHOLDER_RECIPIENT};
use valentine_core::{Alignment, FontFamily, Theme, MAX_MESSAGE_LEN};

use crate::context::{use_notice, use_wizard};

/// The card form.
///
/// Every edit replaces the wizard's card with a fresh value. The message
/// field refuses input past the limit, and "Preview" stays disabled until
/// both recipient and message are filled in.
#[component]
pub fn ComposeStep() -> Element {
    let mut wizard = use_wizard();
    let mut notice = use_notice();

    let card = wizard.read().card().clone();
    let recipient = card.recipient().to_string();
    let message = card.message().to_string();
    let counter = card.counter_label();
    let theme = card.theme();
    let alignment = card.alignment();
    let font = card.font().to_string();
    let complete = card.is_complete();

    let on_message = move |evt: FormEvent| match wizard.write().set_message(&evt.value()) {
        Ok(()) => notice.set(None),
        Err(e) => notice.set(Some(e.to_string())),
    };

    let on_theme = move |evt: FormEvent| match evt.value().parse::<Theme>() {
        Ok(theme) => wizard.write().set_theme(theme),
        Err(e) => notice.set(Some(e.to_string())),
    };

    let on_next = move |_: MouseEvent| match wizard.write().next() {
        Ok(_) => notice.set(None),
        Err(e) => notice.set(Some(e.user_notice().to_string())),
    };

    rsx! {
        form { class: "compose-form", onsubmit: move |evt| evt.prevent_default(),
            label { class: "field",
                span { class: "field-label", "To" }
                input {
                    class: "field-input",
                    r#type: "text",
                    placeholder: PLACEHOLDER_RECIPIENT,
                    value: "{recipient}",
                    oninput: move |evt| wizard.write().set_recipient(&evt.value()),
                }
            }

            label { class: "field",
                span { class: "field-label", "Message" }
                textarea {
                    class: "field-input message-input",
                    rows: "7",
                    maxlength: "{MAX_MESSAGE_LEN}",
                    placeholder: PLACEHOLDER_MESSAGE,
                    value: "{message}",
                    oninput: on_message,
                }
                span { class: "field-counter", "{counter}" }
            }

            label { class: "field",
                span { class: "field-label", "Theme" }
                select { class: "field-input", value: "{theme}", onchange: on_theme,
                    for t in Theme::ALL {
                        option { key: "{t}", value: "{t}", selected: t == theme, "{t}" }
                    }
                }
            }

            div { class: "field",
                span { class: "field-label", "Alignment" }
                div { class: "segmented",
                    for a in Alignment::ALL {
                        button {
                            key: "{a}",
                            r#type: "button",
                            class: if a == alignment { "segment active" } else { "segment" },
                            onclick: move |_| wizard.write().set_alignment(a),
                            "{a}"
                        }
                    }
                }
            }

            label { class: "field",
                span { class: "field-label", "Font" }
                select {
                    class: "field-input",
                    value: "{font}",
                    onchange: move |evt| wizard.write().set_font(&evt.value()),
                    for f in FontFamily::known() {
                        option { key: "{f}", value: "{f}", selected: f == font, "{f}" }
                    }
                }
            }

            div { class: "actions",
                button {
                    r#type: "button",
                    class: "btn-secondary",
                    onclick: move |_| wizard.write().reset(),
                    "Clear"
                }
                button {
                    r#type: "button",
                    class: "btn-primary",
                    disabled: !complete,
                    onclick: on_next,
                    "Preview"
                }
            }
        }
    }
}
