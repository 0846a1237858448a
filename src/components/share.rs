//! Share step: the link, its QR code and a copy button.

use dioxus::prelude::*;
use valentine_core::{SystemClipboard, ACK_DURATION};

use crate::components::QrCodeDisplay;
use crate::context::{use_notice, use_wizard};

/// Shows the share link for the current card.
///
/// Copying flips the button to "Link copied" for two seconds.
#[component]
pub fn ShareStep() -> Element {
    let mut wizard = use_wizard();
    let mut notice = use_notice();

    let link = wizard.read().share_link().into_string();
    let copied = wizard.read().is_copied();

    let copy_to_clipboard = move |_: MouseEvent| {
        match wizard.write().copy_link(&SystemClipboard) {
            Ok(_) => {
                notice.set(None);
                spawn(async move {
                    // Reset copied state after the acknowledgment window
                    tokio::time::sleep(ACK_DURATION).await;
                    wizard.write().clear_expired();
                });
            }
            Err(e) => {
                tracing::warn!("Copy failed: {}", e);
                notice.set(Some("Could not copy the link. Please copy it manually.".to_string()));
            }
        }
    };

    rsx! {
        section { class: "share-step",
            QrCodeDisplay { data: link.clone(), size: 220 }

            div { class: "share-link-row",
                input {
                    class: "field-input share-link",
                    r#type: "text",
                    readonly: true,
                    value: "{link}",
                }
                button {
                    class: if copied { "btn-primary copy-btn copied" } else { "btn-primary copy-btn" },
                    onclick: copy_to_clipboard,
                    if copied { "Link copied" } else { "Copy link" }
                }
            }

            div { class: "actions",
                button {
                    class: "btn-secondary",
                    onclick: move |_| {
                        if let Err(e) = wizard.write().back() {
                            notice.set(Some(e.to_string()));
                        }
                    },
                    "Back to preview"
                }
                button {
                    class: "btn-secondary",
                    onclick: move |_| wizard.write().reset(),
                    "Clear card"
                }
            }
        }
    }
}
